use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Which required form input is missing.
///
/// Each variant carries the exact message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, TS)]
#[ts(export)]
pub enum MissingInput {
    #[error("Please enter your prompt details before describing the product.")]
    Prompt,
    #[error("Please upload your product image before describing the product.")]
    Image,
    #[error("Please upload your product image and prompt details before describing the product.")]
    ImageAndPrompt,
}

/// Failures talking to the hosted model.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Remote service unavailable: {0}")]
    Unavailable(String),
    #[error("Remote service rejected the credential (status {0})")]
    Authentication(u16),
    #[error("Remote service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Response blocked by the remote service: {0}")]
    Blocked(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Configuration problems detected before any request is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,
    #[error("Model name is empty")]
    MissingModel,
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("Instruction template is empty")]
    EmptyInstruction,
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    MissingInput(#[from] MissingInput),
    #[error("Can't read uploaded image.")]
    UnreadableImage,
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
