// Buffer sizing for callers that must allocate (or statically reserve)
// destination buffers before calling the encoder.

/// The datagram delimiter. Never appears inside encoded data.
pub const FRAME_DELIMITER: u8 = 0x00;

/// Longest run of literal bytes a single block can carry.
pub const MAX_BLOCK_DATA: usize = 254;

/// Code byte of a full block: 254 literal bytes, no implied zero.
pub const FULL_BLOCK_CODE: u8 = 0xFF;

/// Worst-case number of bytes encoding adds to `len` input bytes.
///
/// This is `ceil(len / 254)` for any non-empty input. An empty input
/// still produces one code byte, so its overhead is 1.
///
/// | `len` | overhead |
/// |-------|----------|
/// | 0     | 1        |
/// | 1     | 1        |
/// | 254   | 1        |
/// | 255   | 2        |
/// | 508   | 2        |
/// | 509   | 3        |
#[must_use]
pub const fn overhead(len: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(MAX_BLOCK_DATA)
    }
}

/// Destination capacity that always suffices to encode `len` bytes.
///
/// A `const fn`, so it can size arrays:
///
/// ```
/// use cobs_wire::size::max_encoded_size;
///
/// let buf = [0u8; max_encoded_size(64)];
/// assert_eq!(buf.len(), 65);
/// ```
#[must_use]
pub const fn max_encoded_size(len: usize) -> usize {
    len + overhead(len)
}

/// Like [`max_encoded_size`], plus the trailing delimiter the transport
/// appends.
#[must_use]
pub const fn max_frame_size(len: usize) -> usize {
    max_encoded_size(len) + 1
}

/// Upper bound on the decoded length of `encoded_len` encoded bytes.
///
/// The first code byte never produces output and every other byte
/// produces at most one, so a destination this large can never overflow.
#[must_use]
pub const fn max_decoded_size(encoded_len: usize) -> usize {
    encoded_len.saturating_sub(1)
}
