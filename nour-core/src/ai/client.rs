use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::ai::{error::AiError, provider::SpeechProvider, types::*};
use crate::audio::{self, AudioFormat, DecodeError, RawAudioPayload, ResourceHandle, ResourceStore};
use crate::catalog::VoiceIdentity;

/// Default bound on a single remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(thiserror::Error, Debug)]
pub enum SynthesizeError {
    #[error(transparent)]
    Synthesis(#[from] AiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Front door to the remote model: builds requests, bounds them in time and
/// normalizes failures. Holds no per-call state.
#[derive(Clone)]
pub struct SpeechClient {
    provider: Arc<dyn SpeechProvider>,
    store: ResourceStore,
    format: AudioFormat,
    timeout: Duration,
}

impl SpeechClient {
    pub fn new(provider: Arc<dyn SpeechProvider>, store: ResourceStore) -> Self {
        Self {
            provider,
            store,
            format: AudioFormat::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Best-effort refinement: any failure, timeout or empty answer yields the
    /// input text unchanged.
    pub async fn refine_text(&self, text: &str, options: RefinementOptions) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let request = RefinementRequest::new(text, options);
        match self.try_refine(&request).await {
            Ok(Some(refined)) if !refined.trim().is_empty() => {
                debug!(
                    input_len = text.len(),
                    refined_len = refined.len(),
                    "Text refined"
                );
                refined
            }
            Ok(_) => {
                info!("Refinement returned no usable text, keeping original");
                text.to_string()
            }
            Err(e) => {
                warn!(?e, provider = self.provider.name(), "Refinement failed, keeping original text");
                text.to_string()
            }
        }
    }

    async fn try_refine(&self, request: &RefinementRequest) -> Result<Option<String>, AiError> {
        tokio::time::timeout(self.timeout, self.provider.refine_text(request))
            .await
            .map_err(|_| {
                AiError::Refinement(anyhow!(
                    "timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
    }

    /// Requests speech and returns the raw base64 PCM payload.
    pub async fn synthesize_payload(
        &self,
        text: &str,
        voice: VoiceIdentity,
        performance_note: &str,
    ) -> Result<RawAudioPayload, AiError> {
        if text.trim().is_empty() {
            return Err(AiError::Synthesis(anyhow!("text to synthesize is empty")));
        }

        let request = SynthesisRequest {
            text: text.to_string(),
            voice,
            performance_note: performance_note.to_string(),
        };

        tokio::time::timeout(self.timeout, self.provider.synthesize_voice(&request))
            .await
            .map_err(|_| {
                AiError::Synthesis(anyhow!(
                    "timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
    }

    /// Requests speech, transcodes it to WAV and registers the result.
    pub async fn synthesize_voice(
        &self,
        text: &str,
        voice: VoiceIdentity,
        performance_note: &str,
    ) -> Result<ResourceHandle, SynthesizeError> {
        let payload = self.synthesize_payload(text, voice, performance_note).await?;
        let wav = audio::transcode(&payload, self.format)?;
        Ok(self.store.register(wav))
    }
}
