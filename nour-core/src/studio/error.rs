use thiserror::Error;

use crate::ai::AiError;
use crate::audio::DecodeError;
use crate::catalog::CatalogError;

/// Message shown for any failure after the request was accepted.
pub const RETRY_MESSAGE: &str = "Erreur de génération. Réessayez.";

/// Message shown when there is nothing to speak.
pub const EMPTY_TEXT_MESSAGE: &str = "Veuillez saisir un texte.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Text to generate is empty")]
    EmptyText,

    #[error(transparent)]
    Selection(#[from] CatalogError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] AiError),

    #[error("Audio decoding failed: {0}")]
    Decode(#[from] DecodeError),
}

impl GenerationError {
    /// What the UI shows. Remote and decoding failures collapse into a single
    /// retry message.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::EmptyText => EMPTY_TEXT_MESSAGE,
            GenerationError::Selection(_)
            | GenerationError::Synthesis(_)
            | GenerationError::Decode(_) => RETRY_MESSAGE,
        }
    }
}
