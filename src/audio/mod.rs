pub mod base64;
pub mod wav;

pub use self::base64::decode_base64;
pub use self::wav::{encode_wav, WavAudio, DEFAULT_SAMPLE_RATE};
