use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::ai::{RefinementOptions, SpeechClient};
use crate::audio::{
    decode_base64_to_bytes, encode_sample_buffer_to_wav, pcm_bytes_to_sample_buffer,
    ResourceStore,
};
use crate::catalog::{ResolvedSelection, VoiceSelection};
use crate::studio::error::GenerationError;
use crate::studio::events::{GenerationState, StudioEvent};
use crate::studio::result::{GenerationResult, SelectionSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub text: String,
    pub selection: VoiceSelection,
    /// Run the text through refinement before synthesis.
    #[serde(default = "default_refine")]
    pub refine: bool,
}

fn default_refine() -> bool {
    true
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, selection: VoiceSelection) -> Self {
        Self {
            text: text.into(),
            selection,
            refine: true,
        }
    }

    pub fn without_refinement(mut self) -> Self {
        self.refine = false;
        self
    }
}

/// One studio session: runs generation attempts and owns the current result.
///
/// Attempts may overlap. Each gets a monotonic id, and whichever resolves
/// last takes the result slot; the audio of the result it replaces is
/// revoked at that point.
#[derive(Clone)]
pub struct Studio {
    client: SpeechClient,
    current: Arc<Mutex<Option<GenerationResult>>>,
    attempts: Arc<AtomicU64>,
    event_tx: mpsc::UnboundedSender<StudioEvent>,
}

impl Studio {
    pub fn new(client: SpeechClient) -> (Self, mpsc::UnboundedReceiver<StudioEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Self {
                client,
                current: Arc::new(Mutex::new(None)),
                attempts: Arc::new(AtomicU64::new(0)),
                event_tx,
            },
            event_rx,
        )
    }

    pub fn client(&self) -> &SpeechClient {
        &self.client
    }

    pub fn store(&self) -> &ResourceStore {
        self.client.store()
    }

    pub fn current(&self) -> Option<GenerationResult> {
        self.current.lock().unwrap().clone()
    }

    /// Ids handed out so far.
    pub fn attempt_count(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Refines `text` for the given selection. Never fails on remote errors;
    /// the input comes back unchanged instead.
    pub async fn refine(
        &self,
        text: &str,
        selection: &VoiceSelection,
    ) -> Result<String, GenerationError> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyText);
        }
        let resolved = selection.resolve()?;
        Ok(self
            .client
            .refine_text(text, refinement_options(&resolved))
            .await)
    }

    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        if request.text.trim().is_empty() {
            return Err(GenerationError::EmptyText);
        }
        let resolved = request.selection.resolve()?;

        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            attempt,
            dialect = resolved.dialect.id,
            voice = %resolved.voice,
            refine = request.refine,
            "Starting generation"
        );

        match self.run_attempt(attempt, &request, &resolved).await {
            Ok(result) => {
                self.install(result.clone());
                self.transition(attempt, GenerationState::Ready);
                self.send(StudioEvent::ResultReady {
                    attempt,
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(e) => {
                error!(attempt, ?e, "Generation failed");
                self.transition(attempt, GenerationState::Failed);
                self.send(StudioEvent::Failed {
                    attempt,
                    message: e.user_message().to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run_attempt(
        &self,
        attempt: u64,
        request: &GenerationRequest,
        resolved: &ResolvedSelection,
    ) -> Result<GenerationResult, GenerationError> {
        let spoken_text = if request.refine {
            self.transition(attempt, GenerationState::Refining);
            self.client
                .refine_text(&request.text, refinement_options(resolved))
                .await
        } else {
            request.text.clone()
        };

        self.transition(attempt, GenerationState::Synthesizing);
        let payload = self
            .client
            .synthesize_payload(&spoken_text, resolved.voice, &resolved.performance_note())
            .await?;

        self.transition(attempt, GenerationState::Decoding);
        let format = self.client.format();
        let bytes = decode_base64_to_bytes(payload.as_str())?;
        drop(payload);
        let buffer = pcm_bytes_to_sample_buffer(&bytes, format.sample_rate, format.channels)?;
        debug!(
            attempt,
            pcm_bytes = bytes.len(),
            frames = buffer.frame_count(),
            "Decoded speech payload"
        );

        self.transition(attempt, GenerationState::Encoding);
        let wav = encode_sample_buffer_to_wav(&buffer)?;
        let duration_ms = wav.duration().as_millis() as u64;
        let audio = self.store().register(wav);

        Ok(GenerationResult::new(
            request.text.clone(),
            spoken_text,
            SelectionSummary::from(resolved),
            audio,
            duration_ms,
        ))
    }

    /// Swaps `result` in and revokes whatever it replaced.
    fn install(&self, result: GenerationResult) {
        let previous = self.current.lock().unwrap().replace(result);
        if let Some(previous) = previous {
            if !self.store().revoke(&previous.audio) {
                warn!(handle = %previous.audio, "Superseded audio was already revoked");
            }
        }
    }

    /// Drops the current result and revokes its audio. Returns false when
    /// there was nothing to discard.
    pub fn discard(&self) -> bool {
        let Some(previous) = self.current.lock().unwrap().take() else {
            return false;
        };
        self.store().revoke(&previous.audio);
        self.send(StudioEvent::Discarded { id: previous.id });
        true
    }

    fn transition(&self, attempt: u64, state: GenerationState) {
        debug!(attempt, %state, "Generation state changed");
        self.send(StudioEvent::StateChanged { attempt, state });
    }

    fn send(&self, event: StudioEvent) {
        let _ = self.event_tx.send(event);
    }
}

fn refinement_options(resolved: &ResolvedSelection) -> RefinementOptions {
    RefinementOptions {
        dialect: resolved.dialect.title.to_string(),
        domain: resolved.domain.title.to_string(),
        persona_name: resolved.persona_name().to_string(),
        narration_style: Some(resolved.controls.narration.to_string()),
    }
}
