use crate::domain::consultation::errors::ConfigError;
use std::{path::Path, sync::Arc};
use tracing::info;

/// Resolves the instruction text appended after the user's question.
///
/// An inline value wins over the file. Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns an error when the file cannot be read or the resolved text is empty.
pub fn load_instruction(inline: Option<&str>, path: &Path) -> anyhow::Result<Arc<str>> {
    let raw = match inline {
        Some(text) => {
            info!("Using inline instruction template");
            text.to_string()
        }
        None => {
            info!(path = %path.display(), "Loading instruction template");
            std::fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to read instruction template {}: {}",
                    path.display(),
                    e
                )
            })?
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyInstruction.into());
    }
    Ok(Arc::from(trimmed))
}
