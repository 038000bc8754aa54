use crate::{
    application::describe_product::dto::{DescribeProductRequest, DescribeProductResponse},
    domain::consultation::{entity::UploadedImage, gate::check_submission},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State},
};

const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Resolve the type of an uploaded file, limited to JPEG and PNG.
///
/// Only the essence of the part's `Content-Type` is compared, so parameters
/// such as `; name=x.png` are ignored. Any declared type that is not accepted
/// falls back to the file extension. `None` means the upload is neither.
pub fn accepted_mime_type(content_type: Option<&str>, file_name: Option<&str>) -> Option<&'static str> {
    let essence = content_type
        .and_then(|c| c.split(';').next())
        .map(|c| c.trim().to_ascii_lowercase());

    if let Some(accepted) = essence
        .as_deref()
        .and_then(|declared| ACCEPTED_MIME_TYPES.iter().copied().find(|t| *t == declared))
    {
        return Some(accepted);
    }

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        _ => None,
    }
}

/// `POST /api/v1/describe` with multipart fields `prompt` and `image`.
///
/// An image of another type still counts as present for the input check, so
/// the missing-prompt message wins over the media type error.
pub async fn describe_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DescribeProductResponse>, AppError> {
    let mut request = DescribeProductRequest::default();
    let mut rejected: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "prompt" => request.query = Some(field.text().await?),
            "image" => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await?;

                // Browsers send an empty, unnamed part when no file was picked.
                if data.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
                    continue;
                }

                match accepted_mime_type(content_type.as_deref(), file_name.as_deref()) {
                    Some(mime_type) => request.image = Some(UploadedImage::new(mime_type, data)),
                    None => {
                        let declared = content_type
                            .or(file_name)
                            .unwrap_or_else(|| "<unnamed>".to_string());
                        rejected = Some(UploadedImage::new(declared, data));
                    }
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    if let (None, Some(unsupported)) = (&request.image, rejected) {
        check_submission(request.query.as_deref(), Some(&unsupported))
            .map_err(AppError::MissingInput)?;
        return Err(AppError::UnsupportedMediaType(unsupported.mime_type));
    }

    let response = state.describe.execute(request).await?;
    Ok(Json(response))
}
