use crate::domain::consultation::entity::UploadedImage;
use serde::Serialize;
use ts_rs::TS;

/// Raw form inputs; either may be absent.
#[derive(Debug, Clone, Default)]
pub struct DescribeProductRequest {
    pub query: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DescribeProductResponse {
    /// Model text wrapped in a markdown fence
    pub markdown: String,

    /// Model variant that produced the text
    pub model: String,

    /// Time spent waiting for the remote service
    #[ts(type = "number")]
    pub elapsed_ms: u64,
}
