use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audio::ResourceHandle;
use crate::catalog::{Gender, ResolvedSelection, StudioControls, VoiceIdentity};

/// What the user picked, as recorded on a finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub dialect: String,
    pub domain: String,
    /// Persona category, `Standard` without a persona.
    pub category: String,
    pub persona: String,
    pub gender: Gender,
    pub voice: VoiceIdentity,
    pub controls: StudioControls,
}

impl From<&ResolvedSelection> for SelectionSummary {
    fn from(resolved: &ResolvedSelection) -> Self {
        Self {
            dialect: resolved.dialect.title.to_string(),
            domain: resolved.domain.title.to_string(),
            category: resolved.category().to_string(),
            persona: resolved.persona_name().to_string(),
            gender: resolved.gender,
            voice: resolved.voice,
            controls: resolved.controls,
        }
    }
}

/// A successful generation. Never mutated; the next success replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: Uuid,
    /// Text as the user typed it.
    pub original_text: String,
    /// Text actually sent to synthesis, refined or not.
    pub spoken_text: String,
    pub selection: SelectionSummary,
    pub timestamp_ms: i64,
    pub audio: ResourceHandle,
    pub duration_ms: u64,
}

impl GenerationResult {
    pub(crate) fn new(
        original_text: String,
        spoken_text: String,
        selection: SelectionSummary,
        audio: ResourceHandle,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_text,
            spoken_text,
            selection,
            timestamp_ms: Utc::now().timestamp_millis(),
            audio,
            duration_ms,
        }
    }

    /// File name offered for download.
    pub fn download_name(&self) -> String {
        format!("nour-voice-{}.wav", self.id)
    }
}
