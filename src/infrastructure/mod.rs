pub mod genai;
pub mod prompt;
