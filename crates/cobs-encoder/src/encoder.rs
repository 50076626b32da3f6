use cobs_wire::size::{FULL_BLOCK_CODE, MAX_BLOCK_DATA, max_encoded_size};

use crate::error::EncodeError;

/// COBS-encode `src` into `dst` and return the number of bytes written.
///
/// The output contains no `0x00` byte. The datagram delimiter is not
/// appended; that is the transport's job (or use
/// [`encode_frame`](crate::encode_frame)).
///
/// # Panics
///
/// `dst` must hold at least [`max_encoded_size`]`(src.len())` bytes. This is
/// asserted in debug builds; in release builds a short `dst` panics on the
/// out-of-bounds write instead of corrupting memory.
///
/// # Wire format examples
///
/// | Input                | Encoded                              | Length |
/// |----------------------|--------------------------------------|--------|
/// | `""`                 | `01`                                 | 1      |
/// | `00`                 | `01 01`                              | 2      |
/// | `"Hello"`            | `06 "Hello"`                         | 6      |
/// | `"Hello" 00 "w" 00 "rld"` | `06 "Hello" 02 "w" 04 "rld"`    | 12     |
/// | 254 × `AA`           | `FF` 254 × `AA`                      | 255    |
/// | 255 × `AA`           | `FF` 254 × `AA` `02 AA`              | 257    |
pub fn encode(src: &[u8], dst: &mut [u8]) -> usize {
    debug_assert!(
        dst.len() >= max_encoded_size(src.len()),
        "destination holds {} bytes, encoding {} bytes may need {}",
        dst.len(),
        src.len(),
        max_encoded_size(src.len())
    );
    encode_into(src, dst)
}

/// Like [`encode`], but checks capacity against the exact encoded length
/// first, so a destination smaller than the worst case is fine as long as
/// this particular input fits.
///
/// # Errors
///
/// [`EncodeError::OutputTooSmall`] if `dst` cannot hold the encoding.
/// Nothing is written in that case.
pub fn try_encode(src: &[u8], dst: &mut [u8]) -> Result<usize, EncodeError> {
    let required = encoded_len(src);
    if dst.len() < required {
        return Err(EncodeError::OutputTooSmall {
            required,
            capacity: dst.len(),
        });
    }
    Ok(encode_into(src, dst))
}

/// Exact number of bytes [`encode`] writes for `src`.
#[must_use]
pub fn encoded_len(src: &[u8]) -> usize {
    let mut len = 1;
    let mut run = 0;
    for (i, &byte) in src.iter().enumerate() {
        // Every input byte is copied or replaced by a code byte.
        len += 1;
        if byte == 0 {
            run = 0;
        } else {
            run += 1;
            if run == MAX_BLOCK_DATA && i + 1 != src.len() {
                len += 1;
                run = 0;
            }
        }
    }
    len
}

fn encode_into(src: &[u8], dst: &mut [u8]) -> usize {
    // `code` counts the current block including its own code byte, whose
    // slot at `code_idx` is filled in once the block closes.
    let mut code: u8 = 1;
    let mut code_idx = 0;
    let mut dst_idx = 1;

    for (i, &byte) in src.iter().enumerate() {
        if byte == 0 {
            dst[code_idx] = code;
            code_idx = dst_idx;
            dst_idx += 1;
            code = 1;
            continue;
        }

        dst[dst_idx] = byte;
        dst_idx += 1;
        code += 1;

        if code == FULL_BLOCK_CODE {
            // A full block at the very end needs no continuation block.
            if i + 1 == src.len() {
                break;
            }
            dst[code_idx] = code;
            code_idx = dst_idx;
            dst_idx += 1;
            code = 1;
        }
    }

    dst[code_idx] = code;
    dst_idx
}
