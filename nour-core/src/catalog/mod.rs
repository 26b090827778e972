//! What the studio offers: dialects and their personas, production domains,
//! stylistic controls, and how a UI selection maps onto a remote voice and a
//! performance note.

pub mod controls;
pub mod dialects;
pub mod voice;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use controls::{control_groups, ControlGroup, StudioControls};
pub use dialects::{find_dialect, find_field, Dialect, VoiceField, DIALECTS, VOICE_FIELDS};
pub use voice::{base_voice_for, CategoryKey, Gender, VoiceIdentity, VoiceProfile, VoiceType};

/// Category reported when no persona matches the selection.
pub const STANDARD_CATEGORY: &str = "Standard";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
}

/// The choices a user made in the studio UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSelection {
    pub dialect_id: String,
    pub gender: Gender,
    #[serde(default)]
    pub voice_type: VoiceType,
    /// Persona name; the first persona of the gender when absent or unknown.
    #[serde(default)]
    pub persona: Option<String>,
    /// Production domain id; the first domain when absent.
    #[serde(default)]
    pub domain_id: Option<String>,
    #[serde(default)]
    pub controls: StudioControls,
}

impl VoiceSelection {
    pub fn new(dialect_id: impl Into<String>, gender: Gender) -> Self {
        Self {
            dialect_id: dialect_id.into(),
            gender,
            voice_type: VoiceType::default(),
            persona: None,
            domain_id: None,
            controls: StudioControls::default(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn resolve(&self) -> Result<ResolvedSelection, CatalogError> {
        let dialect = find_dialect(&self.dialect_id)
            .ok_or_else(|| CatalogError::UnknownDialect(self.dialect_id.clone()))?;

        let domain = match &self.domain_id {
            Some(id) => find_field(id).ok_or_else(|| CatalogError::UnknownDomain(id.clone()))?,
            None => &VOICE_FIELDS[0],
        };

        let mut candidates = dialect.profiles_for(self.gender);
        let persona = match &self.persona {
            Some(name) => dialect
                .profiles_for(self.gender)
                .find(|p| p.name == name.as_str())
                .or_else(|| candidates.next()),
            None => candidates.next(),
        };

        Ok(ResolvedSelection {
            dialect,
            domain,
            persona,
            gender: self.gender,
            voice: base_voice_for(self.voice_type, self.gender),
            controls: self.controls,
        })
    }
}

/// A selection checked against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub dialect: &'static Dialect,
    pub domain: &'static VoiceField,
    pub persona: Option<&'static VoiceProfile>,
    pub gender: Gender,
    pub voice: VoiceIdentity,
    pub controls: StudioControls,
}

impl ResolvedSelection {
    pub fn persona_name(&self) -> &'static str {
        self.persona.map_or("Default", |p| p.name)
    }

    pub fn category(&self) -> &'static str {
        self.persona.map_or(STANDARD_CATEGORY, |p| p.category)
    }

    /// Free-form directive steering accent, persona and modulations.
    pub fn performance_note(&self) -> String {
        format!(
            "Language: {}\nGender: {}\nCategory: {}\nVoice: {}\nControls: {}",
            self.dialect.title,
            self.gender,
            self.category(),
            self.persona_name(),
            self.controls.summary()
        )
    }
}
