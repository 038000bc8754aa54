use super::{
    entity::{ImagePart, UploadedImage},
    errors::DomainError,
};

/// Turns an upload into the image descriptors sent to the model.
///
/// Always yields exactly one descriptor carrying the declared MIME type and the
/// original bytes. `Bytes` is reference-counted, so the buffer is shared rather
/// than copied.
///
/// # Errors
///
/// Returns [`DomainError::UnreadableImage`] when no upload is present.
pub fn build_image_parts(upload: Option<&UploadedImage>) -> Result<Vec<ImagePart>, DomainError> {
    let upload = upload.ok_or(DomainError::UnreadableImage)?;
    Ok(vec![ImagePart {
        mime_type: upload.mime_type.clone(),
        data: upload.data.clone(),
    }])
}
