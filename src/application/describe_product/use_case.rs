use crate::{
    application::describe_product::dto::{DescribeProductRequest, DescribeProductResponse},
    domain::consultation::{
        entity::CompletionRequest, errors::DomainError, gate::check_submission,
        payload::build_image_parts, rendering::fence_markdown,
    },
    infrastructure::genai::traits::CompletionService,
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, instrument, warn};

/// Answers a question about a photographed drug package.
///
/// Runs the submission gate, builds the image payload, sends a single request
/// to the completion service and fences the answer. Nothing is retried or
/// cached; each call is independent.
pub struct DescribeProductUseCase {
    completion: Arc<dyn CompletionService>,
    instruction: Arc<str>,
    model: String,
}

impl DescribeProductUseCase {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        instruction: Arc<str>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            completion,
            instruction,
            model: model.into(),
        }
    }

    /// # Errors
    ///
    /// - [`DomainError::MissingInput`] when the query or image is absent; no
    ///   remote call is made
    /// - [`DomainError::Completion`] when the remote call fails
    #[instrument(skip_all, fields(
        query_len = request.query.as_deref().map(str::len).unwrap_or(0),
        mime_type = request.image.as_ref().map(|i| i.mime_type.as_str()).unwrap_or("-"),
        image_size = request.image.as_ref().map(|i| i.len()).unwrap_or(0),
    ))]
    pub async fn execute(
        &self,
        request: DescribeProductRequest,
    ) -> Result<DescribeProductResponse, DomainError> {
        let submission = check_submission(request.query.as_deref(), request.image.as_ref())
            .inspect_err(|missing| debug!(reason = ?missing, "Submission rejected"))?;

        let image = build_image_parts(Some(submission.image))?
            .into_iter()
            .next()
            .ok_or(DomainError::UnreadableImage)?;

        let completion_request =
            CompletionRequest::new(submission.query, image, &*self.instruction);

        let started = Instant::now();
        let text = self
            .completion
            .generate(&completion_request)
            .await
            .inspect_err(|e| warn!(error = %e, "Completion failed"))?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(elapsed_ms, chars = text.len(), "Product described");

        Ok(DescribeProductResponse {
            markdown: fence_markdown(&text),
            model: self.model.clone(),
            elapsed_ms,
        })
    }
}
