use std::time::Duration;

use super::error::DecodeError;
use super::pcm::{DecodedAudioBuffer, BYTES_PER_SAMPLE};

/// Size of the canonical RIFF/WAVE/PCM header.
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// A complete, playable WAV byte stream.
#[derive(Clone, PartialEq, Eq)]
pub struct WavResource {
    bytes: Vec<u8>,
    sample_rate: u32,
    channel_count: u16,
    frame_count: usize,
}

impl WavResource {
    pub const MIME_TYPE: &'static str = "audio/wav";

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count as f64 / self.sample_rate as f64)
    }
}

impl std::fmt::Debug for WavResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavResource")
            .field("len", &self.bytes.len())
            .field("sample_rate", &self.sample_rate)
            .field("channel_count", &self.channel_count)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

/// Clamps to [-1, 1] and scales asymmetrically: negative samples by 32768,
/// the rest by 32767, truncating toward zero. NaN becomes silence.
fn quantize(sample: f32) -> i16 {
    let sample = f64::from(sample.clamp(-1.0, 1.0));
    if sample < 0.0 {
        (sample * 32768.0) as i16
    } else {
        (sample * 32767.0) as i16
    }
}

/// Encodes a sample buffer as 16-bit PCM WAV with interleaved samples.
pub fn encode_sample_buffer_to_wav(buffer: &DecodedAudioBuffer) -> Result<WavResource, DecodeError> {
    let channel_count = buffer.channel_count();
    let frame_count = buffer.frame_count();
    let sample_rate = buffer.sample_rate();

    let data_len = frame_count
        .checked_mul(channel_count as usize * BYTES_PER_SAMPLE)
        .and_then(|len| u32::try_from(len).ok())
        .filter(|len| *len <= u32::MAX - (WAV_HEADER_LEN as u32 - 8))
        .ok_or_else(|| {
            DecodeError::Layout(format!(
                "{frame_count} frames x {channel_count} channels does not fit a RIFF chunk"
            ))
        })?;
    let block_align = channel_count
        .checked_mul(BYTES_PER_SAMPLE as u16)
        .ok_or_else(|| DecodeError::Layout(format!("{channel_count} channels overflow block align")))?;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| DecodeError::Layout(format!("byte rate overflows at {sample_rate} Hz")))?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(data_len + WAV_HEADER_LEN as u32 - 8).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    bytes.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    bytes.extend_from_slice(&channel_count.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());

    let planes = buffer.planes();
    for frame in 0..frame_count {
        for plane in planes {
            bytes.extend_from_slice(&quantize(plane[frame]).to_le_bytes());
        }
    }

    Ok(WavResource {
        bytes,
        sample_rate,
        channel_count,
        frame_count,
    })
}

/// Fields of a canonical 44-byte WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub audio_format: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    /// Reads the header written by [`encode_sample_buffer_to_wav`]. Only the
    /// canonical layout (`fmt ` immediately followed by `data`) is accepted.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < WAV_HEADER_LEN {
            return Err(DecodeError::Layout(format!(
                "WAV stream is {} bytes, header needs {WAV_HEADER_LEN}",
                bytes.len()
            )));
        }

        let tag = |offset: usize| &bytes[offset..offset + 4];
        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        for (offset, expected) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if tag(offset) != expected {
                return Err(DecodeError::Layout(format!(
                    "expected {:?} at offset {offset}",
                    String::from_utf8_lossy(expected)
                )));
            }
        }
        if u32_at(16) != FMT_CHUNK_LEN {
            return Err(DecodeError::Layout(format!(
                "unsupported fmt chunk size {}",
                u32_at(16)
            )));
        }

        Ok(Self {
            chunk_size: u32_at(4),
            audio_format: u16_at(20),
            channel_count: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_size: u32_at(40),
        })
    }
}
