pub mod client;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod prompt;
pub mod provider;
pub mod types;

pub use client::{SpeechClient, SynthesizeError};
pub use error::AiError;
pub use gemini::{GeminiConfig, GeminiProvider};
pub use provider::SpeechProvider;
pub use types::*;
