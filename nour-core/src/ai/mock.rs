use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::ai::{error::AiError, provider::SpeechProvider, types::*};
use crate::audio::{RawAudioPayload, SOURCE_SAMPLE_RATE};

/// Prefix the mock puts in front of refined text.
pub const MOCK_REFINEMENT_PREFIX: &str = "[optimisé] ";

/// Mock behavior for the mock provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MockBehavior {
    /// Refine by prefixing the text, synthesize the configured PCM
    #[default]
    Success,
    /// Refinement fails, synthesis succeeds
    RefinementError,
    /// Refinement answers without text, synthesis succeeds
    EmptyRefinement,
    /// Refinement answers with whitespace only, synthesis succeeds
    BlankRefinement,
    /// Synthesis fails with a remote error
    SynthesisError,
    /// Synthesis answers without an audio payload
    NoAudio,
    /// Synthesis answers with a payload that is not base64
    MalformedAudio,
    /// Synthesis succeeds after sleeping
    Delayed { millis: u64 },
    /// One behavior per synthesis call; refinement follows the queue head
    BehaviorQueue { behaviors: Vec<MockBehavior> },
}

/// Mock speech provider for testing
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    pcm: Arc<Vec<u8>>,
    refine_calls: Arc<Mutex<usize>>,
    synthesize_calls: Arc<Mutex<usize>>,
    captured_refinements: Arc<Mutex<Vec<RefinementRequest>>>,
    captured_syntheses: Arc<Mutex<Vec<SynthesisRequest>>>,
}

impl MockProvider {
    /// Synthesizes one second of silence at the source rate.
    pub fn new(behavior: MockBehavior) -> Self {
        Self::with_pcm(behavior, vec![0u8; SOURCE_SAMPLE_RATE as usize * 2])
    }

    pub fn with_pcm(behavior: MockBehavior, pcm: Vec<u8>) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            pcm: Arc::new(pcm),
            refine_calls: Arc::new(Mutex::new(0)),
            synthesize_calls: Arc::new(Mutex::new(0)),
            captured_refinements: Arc::new(Mutex::new(Vec::new())),
            captured_syntheses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn peek_behavior(&self) -> MockBehavior {
        let behavior = self.behavior.lock().unwrap();
        match &*behavior {
            MockBehavior::BehaviorQueue { behaviors } => {
                behaviors.first().cloned().unwrap_or_default()
            }
            other => other.clone(),
        }
    }

    fn pop_behavior(&self) -> MockBehavior {
        let mut behavior = self.behavior.lock().unwrap();
        match &mut *behavior {
            MockBehavior::BehaviorQueue { behaviors } if behaviors.is_empty() => {
                MockBehavior::Success
            }
            MockBehavior::BehaviorQueue { behaviors } => behaviors.remove(0),
            other => other.clone(),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn refine_call_count(&self) -> usize {
        *self.refine_calls.lock().unwrap()
    }

    pub fn synthesize_call_count(&self) -> usize {
        *self.synthesize_calls.lock().unwrap()
    }

    pub fn captured_refinements(&self) -> Vec<RefinementRequest> {
        self.captured_refinements.lock().unwrap().clone()
    }

    pub fn captured_syntheses(&self) -> Vec<SynthesisRequest> {
        self.captured_syntheses.lock().unwrap().clone()
    }

    pub fn last_synthesis(&self) -> Option<SynthesisRequest> {
        self.captured_syntheses.lock().unwrap().last().cloned()
    }

    fn audio(&self) -> RawAudioPayload {
        RawAudioPayload::new(STANDARD.encode(self.pcm.as_slice()))
    }
}

#[async_trait::async_trait]
impl SpeechProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn refine_text(&self, request: &RefinementRequest) -> Result<Option<String>, AiError> {
        self.captured_refinements
            .lock()
            .unwrap()
            .push(request.clone());
        *self.refine_calls.lock().unwrap() += 1;

        match self.peek_behavior() {
            MockBehavior::RefinementError => Err(AiError::Refinement(anyhow::anyhow!(
                "Mock refinement error"
            ))),
            MockBehavior::EmptyRefinement => Ok(None),
            MockBehavior::BlankRefinement => Ok(Some(" \n".to_string())),
            _ => Ok(Some(format!("{MOCK_REFINEMENT_PREFIX}{}", request.text))),
        }
    }

    async fn synthesize_voice(
        &self,
        request: &SynthesisRequest,
    ) -> Result<RawAudioPayload, AiError> {
        self.captured_syntheses
            .lock()
            .unwrap()
            .push(request.clone());
        *self.synthesize_calls.lock().unwrap() += 1;

        match self.pop_behavior() {
            MockBehavior::SynthesisError => Err(AiError::Synthesis(anyhow::anyhow!(
                "Mock synthesis error"
            ))),
            MockBehavior::NoAudio => Err(AiError::Synthesis(anyhow::anyhow!(
                "No audio payload in response (finish reason: OTHER)"
            ))),
            MockBehavior::MalformedAudio => Ok(RawAudioPayload::new("%%% not audio %%%")),
            MockBehavior::Delayed { millis } => {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                Ok(self.audio())
            }
            MockBehavior::BehaviorQueue { .. } => {
                panic!("Bug: nested BehaviorQueue detected. Test setup error - BehaviorQueues cannot contain other BehaviorQueues")
            }
            MockBehavior::Success
            | MockBehavior::RefinementError
            | MockBehavior::EmptyRefinement
            | MockBehavior::BlankRefinement => Ok(self.audio()),
        }
    }
}
