use std::time::Duration;

/// Gemini TTS returns 24 kHz mono PCM.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;
pub const WAV_MIME_TYPE: &str = "audio/wav";
pub const HEADER_LEN: usize = 44;

const NUM_CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Wrap raw PCM bytes (mono, 16-bit, little-endian) in a WAV container.
///
/// The payload is copied verbatim; only the header describes it.
pub fn encode_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let block_align = NUM_CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate.wrapping_mul(u32::from(block_align));
    let data_size = pcm.len() as u32;
    let chunk_size = data_size.wrapping_add(36);

    let mut buf = Vec::with_capacity(HEADER_LEN + pcm.len());

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&chunk_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // linear PCM
    buf.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    buf.extend_from_slice(pcm);

    buf
}

/// An encoded, playable WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavAudio {
    bytes: Vec<u8>,
    sample_rate: u32,
}

impl WavAudio {
    pub fn from_pcm(pcm: &[u8], sample_rate: u32) -> Self {
        Self {
            bytes: encode_wav(pcm, sample_rate),
            sample_rate,
        }
    }

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

    /// Whether any PCM follows the header.
    pub fn has_samples(&self) -> bool {
        self.data_len() > 0
    }

    /// Length of the PCM payload after the header.
    pub fn data_len(&self) -> usize {
        self.bytes.len() - HEADER_LEN
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn duration(&self) -> Duration {
        let byte_rate = u64::from(self.sample_rate) * 2;
        if byte_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.data_len() as f64 / byte_rate as f64)
    }
}
