use bytes::Bytes;
use serde::Serialize;

/// An image received from the form, held only for the duration of one submission.
///
/// The declared MIME type is taken from the upload as-is; nothing checks that
/// it matches the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Declared content type of the upload (e.g. `image/png`)
    pub mime_type: String,

    /// Raw bytes exactly as received
    pub data: Bytes,
}

impl UploadedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Content descriptor for one image inside a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Bytes,
}

/// One ordered element of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(ImagePart),
}

impl ContentPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePart> {
        match self {
            Self::Image(image) => Some(image),
            Self::Text(_) => None,
        }
    }
}

/// Harm categories the remote service can moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
}

/// Blocking threshold applied to a harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Safety configuration sent with every request: blocking disabled for
/// harassment, hate speech and sexually explicit content.
pub const NO_BLOCK_SAFETY_SETTINGS: [SafetySetting; 3] = [
    SafetySetting {
        category: HarmCategory::Harassment,
        threshold: HarmBlockThreshold::BlockNone,
    },
    SafetySetting {
        category: HarmCategory::HateSpeech,
        threshold: HarmBlockThreshold::BlockNone,
    },
    SafetySetting {
        category: HarmCategory::SexuallyExplicit,
        threshold: HarmBlockThreshold::BlockNone,
    },
];

/// A single-shot multimodal completion request.
///
/// # Invariants
/// - `parts` is always `[query text, image, instruction text]`, in that order
/// - `safety_settings` is always [`NO_BLOCK_SAFETY_SETTINGS`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    parts: [ContentPart; 3],
    safety_settings: [SafetySetting; 3],
}

impl CompletionRequest {
    pub fn new(query: impl Into<String>, image: ImagePart, instruction: impl Into<String>) -> Self {
        Self {
            parts: [
                ContentPart::Text(query.into()),
                ContentPart::Image(image),
                ContentPart::Text(instruction.into()),
            ],
            safety_settings: NO_BLOCK_SAFETY_SETTINGS,
        }
    }

    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    pub fn query(&self) -> &str {
        self.parts[0].as_text().unwrap_or_default()
    }

    pub fn image(&self) -> Option<&ImagePart> {
        self.parts[1].as_image()
    }

    pub fn instruction(&self) -> &str {
        self.parts[2].as_text().unwrap_or_default()
    }
}
