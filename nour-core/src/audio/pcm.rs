use tracing::{debug, warn};

use super::error::DecodeError;

/// Bytes per 16-bit sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Planar float audio, one plane per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudioBuffer {
    sample_rate: u32,
    planes: Vec<Vec<f32>>,
}

impl DecodedAudioBuffer {
    /// Builds a buffer from already planar channel data. All planes must hold
    /// the same number of frames.
    pub fn from_planes(sample_rate: u32, planes: Vec<Vec<f32>>) -> Result<Self, DecodeError> {
        validate_format(sample_rate, planes.len())?;

        let frame_count = planes[0].len();
        if let Some((channel, plane)) = planes
            .iter()
            .enumerate()
            .find(|(_, plane)| plane.len() != frame_count)
        {
            return Err(DecodeError::Layout(format!(
                "channel {channel} has {} frames, channel 0 has {frame_count}",
                plane.len()
            )));
        }

        Ok(Self {
            sample_rate,
            planes,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.planes.len() as u16
    }

    pub fn frame_count(&self) -> usize {
        self.planes.first().map_or(0, Vec::len)
    }

    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.planes.get(channel).map(Vec::as_slice)
    }

    pub fn planes(&self) -> &[Vec<f32>] {
        &self.planes
    }
}

fn validate_format(sample_rate: u32, channel_count: usize) -> Result<(), DecodeError> {
    if sample_rate == 0 {
        return Err(DecodeError::Layout("sample rate must be positive".to_string()));
    }
    if channel_count == 0 {
        return Err(DecodeError::Layout(
            "channel count must be positive".to_string(),
        ));
    }
    if channel_count > u16::MAX as usize {
        return Err(DecodeError::Layout(format!(
            "channel count {channel_count} exceeds {}",
            u16::MAX
        )));
    }
    Ok(())
}

/// Interprets `bytes` as interleaved 16-bit signed little-endian PCM and
/// de-interleaves it into planar floats (`value / 32768.0`).
///
/// A trailing partial frame is dropped, never reported as an error.
pub fn pcm_bytes_to_sample_buffer(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: u16,
) -> Result<DecodedAudioBuffer, DecodeError> {
    let channels = channel_count as usize;
    validate_format(sample_rate, channels)?;

    let frame_bytes = BYTES_PER_SAMPLE * channels;
    let frame_count = bytes.len() / frame_bytes;
    let trailing = bytes.len() % frame_bytes;
    if trailing != 0 {
        warn!(
            payload_len = bytes.len(),
            frame_bytes, trailing, "Dropping trailing partial PCM frame"
        );
    }

    let mut planes: Vec<Vec<f32>> = (0..channels)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for frame in bytes.chunks_exact(frame_bytes) {
        for (plane, sample) in planes.iter_mut().zip(frame.chunks_exact(BYTES_PER_SAMPLE)) {
            let value = i16::from_le_bytes([sample[0], sample[1]]);
            plane.push(value as f32 / 32768.0);
        }
    }

    debug!(
        frame_count,
        channel_count, sample_rate, "Decoded PCM into sample buffer"
    );

    Ok(DecodedAudioBuffer {
        sample_rate,
        planes,
    })
}
