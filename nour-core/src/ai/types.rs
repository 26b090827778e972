use serde::{Deserialize, Serialize};

use crate::catalog::VoiceIdentity;

/// Narration style used when the caller leaves it unset.
pub const DEFAULT_NARRATION_STYLE: &str = "Narrative";

/// Selections embedded into a refinement instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementOptions {
    pub dialect: String,
    pub domain: String,
    pub persona_name: String,
    #[serde(default)]
    pub narration_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementRequest {
    pub text: String,
    pub dialect: String,
    pub domain: String,
    pub persona_name: String,
    pub narration_style: String,
}

impl RefinementRequest {
    pub fn new(text: impl Into<String>, options: RefinementOptions) -> Self {
        Self {
            text: text.into(),
            dialect: options.dialect,
            domain: options.domain,
            persona_name: options.persona_name,
            narration_style: options
                .narration_style
                .filter(|style| !style.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NARRATION_STYLE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoiceIdentity,
    pub performance_note: String,
}
