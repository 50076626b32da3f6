//! Allocating wrapper for hosted callers.

use cobs_wire::size::MAX_BLOCK_DATA;

use crate::decoder::decode;
use crate::error::DecodeError;

/// Decode a complete encoded buffer into a freshly allocated `Vec`.
///
/// The scratch allocation leaves room for one whole block past the end of
/// the input, so a truncated final block is reported as
/// [`DecodeError::Truncated`] rather than tripping the overflow check.
///
/// # Errors
///
/// [`DecodeError::StrayZero`] or [`DecodeError::Truncated`] for malformed
/// input.
pub fn decode_to_vec(src: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = vec![0u8; src.len() + MAX_BLOCK_DATA];
    let len = decode(src, &mut out)?;
    out.truncate(len);
    Ok(out)
}
