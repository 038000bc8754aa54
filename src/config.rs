//! Application configuration loading from environment variables.
//!
//! All configuration is read once at startup. Values come from the process
//! environment (after `dotenvy` has merged any `.env` file) and are never
//! refreshed while the server runs.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `GOOGLE_API_KEY`: Credential for the hosted generative model
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,med_assist=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `GEMINI_MODEL`: Model variant (default: "gemini-2.5-flash-lite")
//! - `GEMINI_API_BASE_URL`: Endpoint root (default: Google's public v1beta API)
//! - `GEMINI_REQUEST_TIMEOUT_SECONDS`: Client timeout, must be positive (default: none)
//! - `INSTRUCTION_TEMPLATE`: Inline instruction text, takes precedence over the path
//! - `INSTRUCTION_TEMPLATE_PATH`: Instruction file (default: "./prompts/drug_information.txt")
//! - `BRANDING_IMAGE_PATH`: Sidebar logo (default: "./static/pic.png")
//! - `MAX_UPLOAD_BYTES`: Request body limit (default: 20 MiB)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins for release builds

use crate::infrastructure::genai::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiSettings};
use std::{path::PathBuf, time::Duration};

/// Complete server configuration loaded from environment.
#[derive(Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Credential for the generative model API
    pub google_api_key: String,

    /// Model variant used for every request
    pub gemini_model: String,

    /// Base URL of the generative language API (without trailing `/models`)
    pub gemini_api_base_url: String,

    /// Optional request timeout; unset means wait for the remote service
    pub gemini_request_timeout_seconds: Option<u64>,

    /// Inline instruction template
    pub instruction_template: Option<String>,

    /// File holding the instruction template, used when no inline value is set
    pub instruction_template_path: PathBuf,

    /// Branding image shown on the form page
    pub branding_image_path: PathBuf,

    /// Maximum accepted request body in bytes
    pub max_upload_bytes: usize,

    /// Origins allowed by CORS in release builds
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("google_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base_url", &self.gemini_api_base_url)
            .field(
                "gemini_request_timeout_seconds",
                &self.gemini_request_timeout_seconds,
            )
            .field("instruction_template_path", &self.instruction_template_path)
            .field("branding_image_path", &self.branding_image_path)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("allowed_origins", &self.allowed_origins)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GOOGLE_API_KEY` is missing or empty, if any
    /// optional variable is set but cannot be parsed, or if the request
    /// timeout is zero.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google_api_key = env_required(&lookup, "GOOGLE_API_KEY")?;
        let gemini_request_timeout_seconds: Option<u64> =
            env_optional(&lookup, "GEMINI_REQUEST_TIMEOUT_SECONDS")?;
        if gemini_request_timeout_seconds == Some(0) {
            anyhow::bail!(
                "GEMINI_REQUEST_TIMEOUT_SECONDS must be greater than 0; unset it to disable the timeout"
            );
        }

        Ok(Self {
            host: env_or(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: env_or(&lookup, "PORT", 3000)?,
            google_api_key,
            gemini_model: env_or(&lookup, "GEMINI_MODEL", DEFAULT_MODEL.to_string())?,
            gemini_api_base_url: env_or(
                &lookup,
                "GEMINI_API_BASE_URL",
                DEFAULT_BASE_URL.to_string(),
            )?,
            gemini_request_timeout_seconds,
            instruction_template: lookup("INSTRUCTION_TEMPLATE"),
            instruction_template_path: env_or(
                &lookup,
                "INSTRUCTION_TEMPLATE_PATH",
                PathBuf::from("./prompts/drug_information.txt"),
            )?,
            branding_image_path: env_or(
                &lookup,
                "BRANDING_IMAGE_PATH",
                PathBuf::from("./static/pic.png"),
            )?,
            max_upload_bytes: env_or(&lookup, "MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Settings handed to the Gemini client at construction.
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.google_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_api_base_url.clone(),
            timeout: self.gemini_request_timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// Load a required, non-empty variable.
///
/// # Errors
///
/// Returns an error if the variable is not set or only whitespace.
fn env_required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(env_optional(lookup, key)?.unwrap_or(default))
}

fn env_optional<F, T>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(None),
    }
}
