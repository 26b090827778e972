use crate::ai::error::AiError;
use crate::ai::types::{RefinementRequest, SynthesisRequest};
use crate::audio::RawAudioPayload;

/// A remote generative model able to refine text and render speech.
#[async_trait::async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the refined text, or `None` when the model answered without any.
    async fn refine_text(&self, request: &RefinementRequest) -> Result<Option<String>, AiError>;

    /// Returns the first inline audio payload of the response.
    async fn synthesize_voice(&self, request: &SynthesisRequest)
        -> Result<RawAudioPayload, AiError>;
}
