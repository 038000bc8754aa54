pub mod gemini_client;
pub mod traits;
pub mod wire;
