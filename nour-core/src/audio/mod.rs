//! Audio pipeline: base64 PCM payloads in, canonical WAV resources out.
//!
//! The remote speech model answers with raw 16-bit signed little-endian PCM,
//! base64 encoded, at a fixed rate. Nothing can play that directly, so every
//! payload goes through [`transcode`]: bytes, then a planar float buffer,
//! then a 44-byte-header RIFF/WAVE stream that is registered in a
//! [`ResourceStore`] and handed out as a revocable [`ResourceHandle`].

pub mod error;
pub mod payload;
pub mod pcm;
pub mod resource;
pub mod wav;

use serde::{Deserialize, Serialize};

pub use error::DecodeError;
pub use payload::{decode_base64_to_bytes, RawAudioPayload};
pub use pcm::{pcm_bytes_to_sample_buffer, DecodedAudioBuffer};
pub use resource::{ResourceHandle, ResourceStore};
pub use wav::{encode_sample_buffer_to_wav, WavHeader, WavResource};

/// Sample rate of the remote speech model's PCM output.
pub const SOURCE_SAMPLE_RATE: u32 = 24_000;

/// Channel count of the remote speech model's PCM output.
pub const SOURCE_CHANNELS: u16 = 1;

/// Audio format profile specifying sample rate and channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: SOURCE_SAMPLE_RATE,
            channels: SOURCE_CHANNELS,
        }
    }
}

/// Decodes a remote payload and re-encodes it as WAV in one step.
pub fn transcode(payload: &RawAudioPayload, format: AudioFormat) -> Result<WavResource, DecodeError> {
    let bytes = decode_base64_to_bytes(payload.as_str())?;
    let buffer = pcm_bytes_to_sample_buffer(&bytes, format.sample_rate, format.channels)?;
    encode_sample_buffer_to_wav(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_transcode_one_second_of_silence() {
        let payload = RawAudioPayload::new(STANDARD.encode(vec![0u8; 48_000]));

        let wav = transcode(&payload, AudioFormat::default()).unwrap();

        assert_eq!(wav.len(), 48_044);
        assert_eq!(wav.frame_count(), 24_000);
        assert_eq!(wav.duration().as_secs_f64(), 1.0);
    }

    #[test]
    fn test_transcode_rejects_garbage() {
        let payload = RawAudioPayload::new("not base64!!");

        let result = transcode(&payload, AudioFormat::default());

        assert!(matches!(result, Err(DecodeError::Base64 { len: 12, .. })));
    }
}
