//! Allocating wrappers for hosted callers. The codec proper never
//! allocates; these just size a `Vec` and call into it.

use cobs_wire::size::{FRAME_DELIMITER, max_encoded_size, max_frame_size};

use crate::encoder::encode;

/// Encode `src` into a freshly allocated, exactly sized `Vec`.
#[must_use]
pub fn encode_to_vec(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; max_encoded_size(src.len())];
    let len = encode(src, &mut out);
    out.truncate(len);
    out
}

/// Encode `src` and append the datagram delimiter, producing bytes ready
/// to hand to a transport.
#[must_use]
pub fn encode_frame(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; max_frame_size(src.len())];
    let len = encode(src, &mut out);
    out[len] = FRAME_DELIMITER;
    out.truncate(len + 1);
    out
}
