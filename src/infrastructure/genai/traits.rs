use crate::domain::consultation::{entity::CompletionRequest, errors::CompletionError};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send one multimodal request and return the raw generated text
    async fn generate(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
