use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nour_core::audio::{
    decode_base64_to_bytes, encode_sample_buffer_to_wav, pcm_bytes_to_sample_buffer, transcode,
    AudioFormat, DecodeError, DecodedAudioBuffer, RawAudioPayload, WavHeader,
};
use rstest::rstest;

fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn read_with_hound(bytes: &[u8]) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

#[test]
fn test_round_trip_within_one_quantization_step() {
    let samples: Vec<i16> = (0..4_800)
        .map(|i| ((i as f32 * 0.05).sin() * 30_000.0) as i16)
        .chain([i16::MIN, -1, 0, 1, i16::MAX])
        .collect();
    let payload = RawAudioPayload::new(STANDARD.encode(pcm_bytes(&samples)));

    let wav = transcode(&payload, AudioFormat::default()).unwrap();
    let (spec, decoded) = read_with_hound(wav.as_bytes());

    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(decoded.len(), samples.len());
    for (original, round_tripped) in samples.iter().zip(&decoded) {
        assert!(
            (*original as i32 - *round_tripped as i32).abs() <= 1,
            "{original} came back as {round_tripped}"
        );
        if *original <= 0 {
            assert_eq!(original, round_tripped);
        }
    }
}

#[test]
fn test_stereo_round_trip_keeps_channel_order() {
    let samples = [100i16, -100, 2_000, -2_000, 0, i16::MIN];
    let bytes = pcm_bytes(&samples);

    let buffer = pcm_bytes_to_sample_buffer(&bytes, 44_100, 2).unwrap();
    assert_eq!(buffer.frame_count(), 3);
    assert_eq!(buffer.channel_data(1).unwrap()[2], -1.0);

    let wav = encode_sample_buffer_to_wav(&buffer).unwrap();
    let (spec, decoded) = read_with_hound(wav.as_bytes());

    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(decoded, vec![99, -100, 1_999, -2_000, 0, i16::MIN]);
}

#[test]
fn test_transcode_is_deterministic() {
    let payload = RawAudioPayload::new(STANDARD.encode(pcm_bytes(&[1, -7, 300, -32_000, 12])));

    let first = transcode(&payload, AudioFormat::default()).unwrap();
    let second = transcode(&payload, AudioFormat::default()).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[rstest]
#[case(1, 24_000, 0)]
#[case(1, 24_000, 1)]
#[case(1, 24_000, 48_000)]
#[case(2, 48_000, 10)]
#[case(2, 16_000, 13)]
#[case(6, 8_000, 120)]
fn test_header_matches_layout(
    #[case] channels: u16,
    #[case] sample_rate: u32,
    #[case] byte_len: usize,
) {
    let bytes = vec![0x11u8; byte_len];
    let buffer = pcm_bytes_to_sample_buffer(&bytes, sample_rate, channels).unwrap();
    let frames = byte_len / 2 / channels as usize;
    assert_eq!(buffer.frame_count(), frames);

    let wav = encode_sample_buffer_to_wav(&buffer).unwrap();
    let header = WavHeader::parse(wav.as_bytes()).unwrap();
    let data_size = (frames * channels as usize * 2) as u32;

    assert_eq!(wav.len(), 44 + data_size as usize);
    assert_eq!(header.chunk_size, 36 + data_size);
    assert_eq!(header.audio_format, 1);
    assert_eq!(header.channel_count, channels);
    assert_eq!(header.sample_rate, sample_rate);
    assert_eq!(header.byte_rate, sample_rate * channels as u32 * 2);
    assert_eq!(header.block_align, channels * 2);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.data_size, data_size);
}

#[rstest]
#[case(1.5, 32_767)]
#[case(1.0, 32_767)]
#[case(0.5, 16_383)]
#[case(0.0, 0)]
#[case(-0.5, -16_384)]
#[case(-1.0, -32_768)]
#[case(-2.0, -32_768)]
fn test_quantization(#[case] sample: f32, #[case] expected: i16) {
    let buffer = DecodedAudioBuffer::from_planes(24_000, vec![vec![sample]]).unwrap();

    let wav = encode_sample_buffer_to_wav(&buffer).unwrap();

    assert_eq!(&wav.as_bytes()[44..], &expected.to_le_bytes());
}

#[test]
fn test_odd_byte_is_dropped_without_error() {
    let payload = RawAudioPayload::new(STANDARD.encode([0x00, 0x40, 0x00, 0xC0, 0x7F]));

    let wav = transcode(&payload, AudioFormat::default()).unwrap();
    let (_, decoded) = read_with_hound(wav.as_bytes());

    assert_eq!(wav.frame_count(), 2);
    assert_eq!(decoded, vec![16_383, -16_384]);
}

#[test]
fn test_malformed_base64_reports_length() {
    let err = decode_base64_to_bytes("not base64!").unwrap_err();

    assert!(matches!(err, DecodeError::Base64 { len: 11, .. }));
}

#[test]
fn test_wrapped_base64_is_accepted() {
    let encoded = STANDARD.encode(pcm_bytes(&[1, 2, 3, 4]));
    let (head, tail) = encoded.split_at(6);

    let bytes = decode_base64_to_bytes(&format!("{head}\r\n {tail}\n")).unwrap();

    assert_eq!(bytes, pcm_bytes(&[1, 2, 3, 4]));
}
