use super::{
    traits::CompletionService,
    wire::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
};
use crate::domain::consultation::{
    entity::CompletionRequest,
    errors::{CompletionError, ConfigError},
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::{fmt, time::Duration};
use tracing::{debug, instrument, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Everything the client needs, passed in explicitly at construction.
#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// `None` leaves the request unbounded
    pub timeout: Option<Duration>,
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the hosted Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Validates the settings and builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Fails before any network traffic when the key or model is empty, or
    /// the base URL does not parse.
    pub fn new(settings: GeminiSettings) -> Result<Self, ConfigError> {
        let api_key = settings.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let model = settings.model.trim().to_string();
        if model.is_empty() {
            return Err(ConfigError::MissingModel);
        }

        let endpoint = format!(
            "{}/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            model
        );
        let endpoint =
            Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn status_error(status: StatusCode, body: &str) -> CompletionError {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || envelope.as_ref().is_some_and(|e| e.error.is_invalid_api_key())
        {
            return CompletionError::Authentication(status.as_u16());
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return CompletionError::Unavailable(format!("status {}", status.as_u16()));
        }

        let message = envelope
            .map(|e| e.error.message)
            .unwrap_or_else(|| body.chars().take(200).collect());
        CompletionError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_decode() {
        CompletionError::MalformedResponse(err.to_string())
    } else if err.is_timeout() {
        CompletionError::Unavailable("request timed out".into())
    } else if err.is_connect() {
        CompletionError::Unavailable("connection failed".into())
    } else {
        CompletionError::Unavailable(err.to_string())
    }
}

/// Pulls the generated text out of a successful response.
///
/// Text of every part of the first candidate is concatenated.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, CompletionError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => CompletionError::Blocked(reason),
            None => CompletionError::MalformedResponse("response has no candidates".into()),
        });
    };

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if texts.is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some(reason) if reason != "STOP" => CompletionError::Blocked(reason.to_string()),
            _ => CompletionError::MalformedResponse("candidate has no text".into()),
        });
    }

    Ok(texts.concat())
}

#[async_trait]
impl CompletionService for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = GenerateContentRequest::from(request);
        debug!(
            parts = request.parts().len(),
            image_bytes = request.image().map(|i| i.data.len()).unwrap_or(0),
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = Self::status_error(status, &text);
            warn!(status = status.as_u16(), error = %err, "generateContent failed");
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let text = extract_text(parsed)?;
        debug!(chars = text.len(), "generateContent succeeded");
        Ok(text)
    }
}
