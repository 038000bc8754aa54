use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use med_assist::{
    application::describe_product::use_case::DescribeProductUseCase,
    config::Config,
    domain::consultation::{entity::CompletionRequest, errors::CompletionError},
    infrastructure::genai::traits::CompletionService,
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_INSTRUCTION: &str = "Identify the drug and summarise it.";
pub const TEST_MODEL: &str = "gemini-test";

/// Canned answer handed back by [`RecordingCompletion`].
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Unavailable,
    Blocked,
}

/// Completion stub that records every request it receives.
#[derive(Clone)]
pub struct RecordingCompletion {
    reply: Reply,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl RecordingCompletion {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl CompletionService for RecordingCompletion {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.lock().expect("poisoned").push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Unavailable => Err(CompletionError::Unavailable("connection failed".into())),
            Reply::Blocked => Err(CompletionError::Blocked("SAFETY".into())),
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub completion: RecordingCompletion,
}

pub fn build_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        google_api_key: "test-key".to_string(),
        gemini_model: TEST_MODEL.to_string(),
        gemini_api_base_url: "http://127.0.0.1:9".to_string(),
        gemini_request_timeout_seconds: None,
        instruction_template: Some(TEST_INSTRUCTION.to_string()),
        instruction_template_path: PathBuf::from("./prompts/drug_information.txt"),
        branding_image_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static/pic.png"),
        max_upload_bytes: 1024 * 1024,
        allowed_origins: Vec::new(),
    }
}

pub fn spawn_app(reply: Reply) -> TestApp {
    let config = build_config();
    let completion = RecordingCompletion::new(reply);

    let state = AppState {
        describe: Arc::new(DescribeProductUseCase::new(
            Arc::new(completion.clone()),
            Arc::from(TEST_INSTRUCTION),
            config.gemini_model.clone(),
        )),
        config,
    };

    TestApp {
        app: create_router(state),
        completion,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

pub const BRANDING_PNG: &[u8] = include_bytes!("../../static/pic.png");

pub fn tiny_png_bytes() -> Vec<u8> {
    BRANDING_PNG.to_vec()
}

/// An image part for [`multipart_body`].
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn multipart_body(prompt: Option<&str>, image: Option<FilePart<'_>>) -> (String, Vec<u8>) {
    let boundary = format!("----med-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    if let Some(prompt) = prompt {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"prompt\"\r\n\r\n");
        body.extend_from_slice(prompt.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(image) = image {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                image.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.content_type).as_bytes());
        body.extend_from_slice(image.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    (boundary, body)
}

pub fn describe_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/describe")
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build describe request")
}

pub fn assert_status(status: StatusCode, expected: StatusCode) {
    assert_eq!(status, expected, "expected {}, got {}", expected, status);
}
