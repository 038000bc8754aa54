use bytes::Bytes;
use med_assist::{
    domain::consultation::{
        entity::{CompletionRequest, ImagePart},
        errors::CompletionError,
    },
    infrastructure::genai::{
        gemini_client::{GeminiClient, GeminiSettings},
        traits::CompletionService,
    },
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-lite:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiSettings {
        api_key: "test-key".into(),
        model: "gemini-2.5-flash-lite".into(),
        base_url: format!("{}/v1beta", server.uri()),
        timeout: Some(Duration::from_secs(5)),
    })
    .expect("valid settings")
}

fn sample_request() -> CompletionRequest {
    CompletionRequest::new(
        "What is this used for?",
        ImagePart {
            mime_type: "image/jpeg".into(),
            data: Bytes::from_static(b"jpeg-bytes"),
        },
        "Identify the drug.",
    )
}

#[tokio::test]
async fn sends_one_request_with_ordered_parts_and_safety_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Metformin 500 mg" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .generate(&sample_request())
        .await
        .expect("generation succeeds");
    assert_eq!(text, "Metformin 500 mg");

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    let body: Value = serde_json::from_slice(&received[0].body).expect("json body");

    let parts = body["contents"][0]["parts"].as_array().expect("parts");
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["text"], "What is this used for?");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[1]["inlineData"]["data"], "anBlZy1ieXRlcw==");
    assert_eq!(parts[2]["text"], "Identify the drug.");

    assert_eq!(
        body["safetySettings"],
        json!([
            { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE" },
            { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE" },
            { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE" }
        ])
    );
}

#[tokio::test]
async fn invalid_key_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "API_KEY_INVALID" }]
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Authentication(400)), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Unavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn blocked_prompt_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "PROHIBITED_CONTENT" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&sample_request())
        .await
        .unwrap_err();
    assert!(
        matches!(err, CompletionError::Blocked(ref reason) if reason == "PROHIBITED_CONTENT"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_service_is_unavailable() {
    let client = GeminiClient::new(GeminiSettings {
        api_key: "test-key".into(),
        model: "gemini-2.5-flash-lite".into(),
        base_url: "http://127.0.0.1:9/v1beta".into(),
        timeout: Some(Duration::from_secs(2)),
    })
    .expect("valid settings");

    let err = client.generate(&sample_request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Unavailable(_)), "got {err:?}");
}
