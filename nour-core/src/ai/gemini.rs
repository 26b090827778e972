use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::prompt::{refinement_prompt, studio_directive};
use crate::ai::{error::AiError, provider::SpeechProvider, types::*};
use crate::audio::RawAudioPayload;
use crate::settings::Settings;

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub speech_model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings
            .resolve_api_key()
            .context("No API key configured: set api_key in settings or GEMINI_API_KEY")?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            text_model: settings.text_model.clone(),
            speech_model: settings.speech_model.clone(),
            timeout: settings.request_timeout(),
        })
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("speech_model", &self.speech_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini `generateContent` over REST.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                debug!(?e, model, "Gemini API call failed");
                anyhow!("Network error: {e}")
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Gemini response")?;

        if !status.is_success() {
            debug!(?status, ?response_text, "Gemini API returned error");
            anyhow::bail!("Gemini API error {status}: {response_text}");
        }

        serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse Gemini response ({} bytes)",
                response_text.len()
            )
        })
    }
}

#[async_trait::async_trait]
impl SpeechProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn refine_text(&self, request: &RefinementRequest) -> Result<Option<String>, AiError> {
        info!(model = %self.config.text_model, "Requesting text refinement");

        let body = GenerateContentRequest::text_only(refinement_prompt(request));
        let response = self
            .generate_content(&self.config.text_model, &body)
            .await
            .map_err(AiError::Refinement)?;

        Ok(response.text())
    }

    async fn synthesize_voice(
        &self,
        request: &SynthesisRequest,
    ) -> Result<RawAudioPayload, AiError> {
        info!(
            model = %self.config.speech_model,
            voice = %request.voice,
            "Requesting speech synthesis"
        );

        let body = GenerateContentRequest::speech(studio_directive(request), request.voice.as_ref());
        let response = self
            .generate_content(&self.config.speech_model, &body)
            .await
            .map_err(AiError::Synthesis)?;

        let inline = response.inline_audio().ok_or_else(|| {
            AiError::Synthesis(anyhow!(
                "No audio payload in response (finish reason: {})",
                response.finish_reason().unwrap_or("none")
            ))
        })?;

        debug!(
            len = inline.data.len(),
            mime_type = ?inline.mime_type,
            "Received inline audio payload"
        );
        Ok(RawAudioPayload::new(inline.data.clone()))
    }
}

// Gemini API types

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn text_only(prompt: String) -> Self {
        Self {
            contents: vec![GeminiContent::user_text(prompt)],
            generation_config: None,
        }
    }

    fn speech(directive: String, voice_name: &str) -> Self {
        Self {
            contents: vec![GeminiContent::user_text(directive)],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_name.to_string(),
                        },
                    },
                }),
            }),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn user_text(text: String) -> Self {
        Self {
            role: None,
            parts: vec![GeminiPart {
                text: Some(text),
                ..Default::default()
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[GeminiPart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated non-thought text of the first candidate; `None` if blank.
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }

    /// Audio lives in the first part of the first candidate.
    fn inline_audio(&self) -> Option<&InlineData> {
        self.first_parts()
            .first()?
            .inline_data
            .as_ref()
            .filter(|inline| !inline.data.is_empty())
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_speech_request_shape() {
        let body = GenerateContentRequest::speech("directive".to_string(), "Kore");

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "directive" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": {
                            "prebuiltVoiceConfig": { "voiceName": "Kore" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let value = serde_json::to_value(GenerateContentRequest::text_only("p".to_string())).unwrap();
        assert_eq!(value, json!({ "contents": [{ "parts": [{ "text": "p" }] }] }));
    }

    #[test]
    fn test_inline_audio_from_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{
                            "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAAA" }
                        }]
                    },
                    "finishReason": "STOP"
                },
                {
                    "content": { "parts": [{ "inlineData": { "data": "BBBB" } }] }
                }
            ]
        }))
        .unwrap();

        let inline = response.inline_audio().unwrap();
        assert_eq!(inline.data, "AAAA");
        assert_eq!(
            inline.mime_type.as_deref(),
            Some("audio/L16;codec=pcm;rate=24000")
        );
    }

    #[test]
    fn test_missing_audio_is_none() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot do that" }] }, "finishReason": "OTHER" }]
        }))
        .unwrap();

        assert!(response.inline_audio().is_none());
        assert_eq!(response.finish_reason(), Some("OTHER"));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.inline_audio().is_none());
        assert!(empty.finish_reason().is_none());
    }

    #[test]
    fn test_text_concatenates_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "thinking...", "thought": true },
                { "text": "Bonjour, " },
                { "text": "le monde." }
            ] } }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Bonjour, le monde."));
    }

    #[test]
    fn test_empty_text_is_none() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
        }))
        .unwrap();

        assert!(response.text().is_none());

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": " \n" }, { "text": "\t" }] } }]
        }))
        .unwrap();
        assert!(blank.text().is_none());
    }

    #[test]
    fn test_audio_only_read_from_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Voici l'audio" },
                { "inlineData": { "data": "AAAA" } }
            ] } }]
        }))
        .unwrap();

        assert!(response.inline_audio().is_none());
    }

    #[test]
    fn test_config_requires_api_key() {
        let settings = Settings {
            api_key: None,
            ..Settings::default()
        };
        // The environment may carry a key; only assert when it does not.
        if std::env::var(crate::settings::API_KEY_ENV).is_err() {
            assert!(GeminiConfig::from_settings(&settings).is_err());
        }

        let settings = Settings {
            api_key: Some("secret".to_string()),
            base_url: "https://example.test/v1beta/".to_string(),
            ..Settings::default()
        };
        let config = GeminiConfig::from_settings(&settings).unwrap();
        assert_eq!(config.base_url, "https://example.test/v1beta");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
