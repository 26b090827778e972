use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::DecodeError;

/// Base64-encoded PCM exactly as the speech model returned it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAudioPayload(String);

impl RawAudioPayload {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payloads run to hundreds of kilobytes; never dump them into logs.
impl std::fmt::Debug for RawAudioPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAudioPayload")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Decodes standard-alphabet base64 with canonical padding.
///
/// ASCII whitespace (line wrapping from some transports) is skipped. Any other
/// character outside the alphabet, or bad padding, is a [`DecodeError::Base64`].
pub fn decode_base64_to_bytes(base64: &str) -> Result<Vec<u8>, DecodeError> {
    let result = if base64.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = base64
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        STANDARD.decode(compact)
    } else {
        STANDARD.decode(base64)
    };

    result.map_err(|source| DecodeError::Base64 {
        len: base64.len(),
        source,
    })
}
