use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::AppError;

/// Standard alphabet, forgiving about padding and trailing bits like `atob`.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a base64 payload into raw bytes.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, AppError> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    // Unpadded input may have any valid length; padded input must be whole quads.
    if compact.contains('=') && compact.len() % 4 != 0 {
        return Err(base64::DecodeError::InvalidLength(compact.len()).into());
    }
    Ok(LENIENT.decode(compact)?)
}
