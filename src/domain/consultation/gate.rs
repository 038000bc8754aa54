use super::{entity::UploadedImage, errors::MissingInput};

/// Inputs that passed the submission gate.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub query: &'a str,
    pub image: &'a UploadedImage,
}

/// Checks that both the query and the image are present.
///
/// A query counts as present when it is a non-empty string; whitespace is not
/// stripped. An image counts as present when an upload was received at all,
/// even if it carried zero bytes.
pub fn check_submission<'a>(
    query: Option<&'a str>,
    image: Option<&'a UploadedImage>,
) -> Result<Submission<'a>, MissingInput> {
    let query = query.filter(|q| !q.is_empty());
    match (image, query) {
        (Some(image), Some(query)) => Ok(Submission { query, image }),
        (Some(_), None) => Err(MissingInput::Prompt),
        (None, Some(_)) => Err(MissingInput::Image),
        (None, None) => Err(MissingInput::ImageAndPrompt),
    }
}
