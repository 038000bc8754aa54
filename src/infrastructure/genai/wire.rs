//! JSON shapes of the `generateContent` endpoint.

use crate::domain::consultation::entity::{CompletionRequest, ContentPart, SafetySetting};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: [Content<'a>; 1],
    pub safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData<'a> {
    pub mime_type: &'a str,
    /// Base64 (standard alphabet, padded) encoding of the image bytes
    pub data: String,
}

impl<'a> From<&'a CompletionRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        let parts = request
            .parts()
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => Part::Text { text },
                ContentPart::Image(image) => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &image.mime_type,
                        data: STANDARD.encode(&image.data),
                    },
                },
            })
            .collect();

        Self {
            contents: [Content {
                role: "user",
                parts,
            }],
            safety_settings: request.safety_settings(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
pub struct ErrorStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ErrorStatus {
    /// The service answers 400 rather than 401 for a bad key.
    pub fn is_invalid_api_key(&self) -> bool {
        self.details
            .iter()
            .any(|detail| detail.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
    }
}
