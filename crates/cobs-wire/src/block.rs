use core::fmt;

use crate::error::WireError;
use crate::size::{FULL_BLOCK_CODE, MAX_BLOCK_DATA};

/// The leading byte of a block.
///
/// Counts the block's own length: a code of `n` is followed by `n - 1`
/// literal bytes. Zero is never a valid code.
///
/// ```text
///   code   literal bytes   implied zero after the block?
///   0x01   0               yes, unless last block
///   0x06   5               yes, unless last block
///   0xFE   253             yes, unless last block
///   0xFF   254             never
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockCode(u8);

impl BlockCode {
    /// A block with no literal bytes.
    pub const EMPTY: Self = Self(1);

    /// A full block of 254 literal bytes.
    pub const FULL: Self = Self(FULL_BLOCK_CODE);

    /// Wrap a raw code byte, rejecting zero.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Number of literal bytes following the code byte.
    #[must_use]
    pub const fn data_len(self) -> usize {
        self.0 as usize - 1
    }

    /// Full blocks carry [`MAX_BLOCK_DATA`] bytes and are never followed
    /// by an implied zero.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == FULL_BLOCK_CODE
    }
}

/// One block of an encoded buffer, borrowed from that buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    /// Offset of the code byte in the encoded buffer.
    pub offset: usize,

    pub code: BlockCode,

    /// The literal bytes (never contains zero).
    pub data: &'a [u8],

    /// Whether decoding emits a zero after `data`.
    ///
    /// False for full blocks and for the final block of the buffer.
    pub implies_zero: bool,
}

impl Block<'_> {
    /// Bytes this block contributes to the decoded output.
    #[must_use]
    pub fn decoded_len(&self) -> usize {
        self.data.len() + usize::from(self.implies_zero)
    }

    /// Bytes this block occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        1 + self.data.len()
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{:04x} code=0x{:02x} data={}",
            self.offset,
            self.code.raw(),
            self.data.len()
        )?;
        if self.code.is_full() {
            f.write_str(" full")?;
        }
        if self.implies_zero {
            f.write_str(" +zero")?;
        }
        Ok(())
    }
}

/// Iterator over the blocks of an encoded buffer (delimiter already
/// stripped).
///
/// Yields `Err` once on the first layout violation and then stops.
///
/// ```
/// use cobs_wire::Blocks;
///
/// let encoded = [0x06, b'H', b'e', b'l', b'l', b'o', 0x02, b'w'];
/// let blocks: Vec<_> = Blocks::new(&encoded).collect::<Result<_, _>>().unwrap();
/// assert_eq!(blocks.len(), 2);
/// assert!(blocks[0].implies_zero);
/// assert!(!blocks[1].implies_zero);
/// ```
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    buf: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Blocks<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            done: false,
        }
    }

    fn fail(&mut self, err: WireError) -> Option<Result<Block<'a>, WireError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Result<Block<'a>, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.buf.len() {
            return None;
        }

        let offset = self.pos;
        let Some(code) = BlockCode::from_raw(self.buf[offset]) else {
            return self.fail(WireError::ZeroByte { offset });
        };

        let start = offset + 1;
        let end = start + code.data_len();
        if end > self.buf.len() {
            return self.fail(WireError::UnexpectedEof {
                offset: self.buf.len(),
                missing: end - self.buf.len(),
            });
        }

        let data = &self.buf[start..end];
        if let Some(i) = data.iter().position(|&b| b == 0) {
            return self.fail(WireError::ZeroByte { offset: start + i });
        }

        self.pos = end;
        Some(Ok(Block {
            offset,
            code,
            data,
            implies_zero: !code.is_full() && end < self.buf.len(),
        }))
    }
}

/// Decoded length of an encoded buffer, computed from its block layout
/// alone.
///
/// # Errors
///
/// - [`WireError::ZeroByte`] if the buffer contains a zero.
/// - [`WireError::UnexpectedEof`] if the last block is truncated.
pub fn decoded_len(encoded: &[u8]) -> Result<usize, WireError> {
    Blocks::new(encoded).try_fold(0, |acc, block| Ok(acc + block?.decoded_len()))
}

const _: () = assert!(BlockCode::FULL.data_len() == MAX_BLOCK_DATA);

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(buf: &[u8]) -> Result<Vec<Block<'_>>, WireError> {
        Blocks::new(buf).collect()
    }

    #[test]
    fn code_zero_is_rejected() {
        assert_eq!(BlockCode::from_raw(0), None);
        assert_eq!(BlockCode::from_raw(1), Some(BlockCode::EMPTY));
    }

    #[test]
    fn code_data_len() {
        assert_eq!(BlockCode::EMPTY.data_len(), 0);
        assert_eq!(BlockCode::from_raw(6).unwrap().data_len(), 5);
        assert_eq!(BlockCode::FULL.data_len(), 254);
        assert!(BlockCode::FULL.is_full());
        assert!(!BlockCode::from_raw(0xFE).unwrap().is_full());
    }

    #[test]
    fn single_empty_block() {
        let blocks = collect(&[0x01]).unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].data.is_empty());
        assert!(!blocks[0].implies_zero);
        assert_eq!(decoded_len(&[0x01]).unwrap(), 0);
    }

    #[test]
    fn hello_world_layout() {
        let encoded = b"\x06Hello\x02w\x04rld";
        let blocks = collect(encoded).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].data, b"Hello");
        assert_eq!(blocks[1].offset, 6);
        assert_eq!(blocks[1].data, b"w");
        assert!(blocks[1].implies_zero);
        assert_eq!(blocks[2].data, b"rld");
        assert!(!blocks[2].implies_zero);
        assert_eq!(decoded_len(encoded).unwrap(), 11);
    }

    #[test]
    fn full_block_never_implies_zero() {
        let mut encoded = vec![0xFF];
        encoded.extend_from_slice(&[0xAA; 254]);
        encoded.extend_from_slice(&[0x02, 0xBB]);
        let blocks = collect(&encoded).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].implies_zero);
        assert_eq!(decoded_len(&encoded).unwrap(), 255);
    }

    #[test]
    fn zero_code_byte_reported_with_offset() {
        let err = collect(&[0x02, b'a', 0x00]).unwrap_err();
        assert_eq!(err, WireError::ZeroByte { offset: 2 });
    }

    #[test]
    fn zero_inside_data_reported_with_offset() {
        let err = collect(&[0x04, b'a', 0x00, b'b']).unwrap_err();
        assert_eq!(err, WireError::ZeroByte { offset: 2 });
    }

    #[test]
    fn truncated_block_reports_missing_bytes() {
        let err = collect(&[0x06, b'H', b'e']).unwrap_err();
        assert_eq!(
            err,
            WireError::UnexpectedEof {
                offset: 3,
                missing: 3
            }
        );
    }

    #[test]
    fn iteration_stops_after_error() {
        let mut blocks = Blocks::new(&[0x00, 0x01]);
        assert!(blocks.next().unwrap().is_err());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn display_marks_full_and_zero() {
        let encoded = b"\x06Hello\x01";
        let blocks = collect(encoded).unwrap();
        assert_eq!(blocks[0].to_string(), "@0000 code=0x06 data=5 +zero");
        assert_eq!(blocks[1].to_string(), "@0006 code=0x01 data=0");
    }
}
