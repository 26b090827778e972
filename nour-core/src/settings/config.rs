use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::audio::AudioFormat;

/// Environment variable consulted when no API key is stored in settings.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_refine_by_default() -> bool {
    true
}

/// Core application settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Credential for the remote model. Falls back to `GEMINI_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for text refinement
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for speech synthesis
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Upper bound on every remote call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Format of the PCM the speech model returns
    #[serde(default)]
    pub audio: AudioFormat,

    /// Whether generation refines the text first unless told otherwise
    #[serde(default = "default_refine_by_default")]
    pub refine_by_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            request_timeout_secs: default_request_timeout_secs(),
            audio: AudioFormat::default(),
            refine_by_default: default_refine_by_default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("speech_model", &self.speech_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("audio", &self.audio)
            .field("refine_by_default", &self.refine_by_default)
            .finish()
    }
}

impl Settings {
    /// Stored key if non-empty, otherwise the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
