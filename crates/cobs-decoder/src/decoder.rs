use cobs_wire::size::{FRAME_DELIMITER, FULL_BLOCK_CODE};

use crate::error::DecodeError;

/// Lifecycle of a [`DecodeContext`].
///
/// ```text
///   start/restart ──► Decoding ──finish──► Idle
///                        │
///                   bad byte
///                        ▼
///                  Failed(reason) ──finish──► Idle
/// ```
///
/// Only `Decoding` accepts bytes. Within it, the decoder is either waiting
/// for a code byte (`payload_remaining == 0`) or copying literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodeState {
    Idle,
    Decoding,
    Failed(DecodeError),
}

/// Incremental COBS decoder — reconstructs one datagram from bytes fed
/// one at a time.
///
/// The context writes straight into its output buffer `B` (a `&mut [u8]`,
/// an array, a `Vec<u8>`, anything that derefs to a byte slice) and never
/// allocates. Each byte costs O(1), so [`step`](Self::step) can run in a
/// serial receive interrupt while the finished buffer is consumed at task
/// level.
///
/// Malformed input is caught at the earliest byte that proves it:
///
/// - a `0x00` fed to `step` fails the stream immediately;
/// - a code byte whose block could not fit in the buffer fails the stream
///   before any of that block is written, rather than when the buffer
///   actually runs out.
///
/// Once failed, every further `step` returns `false` and changes nothing.
///
/// # Example
///
/// ```
/// use cobs_decoder::DecodeContext;
///
/// let mut buf = [0u8; 16];
/// let mut ctx = DecodeContext::start(&mut buf[..]);
/// for &byte in b"\x06Hello\x02w\x04rld" {
///     assert!(ctx.step(byte));
/// }
/// let len = ctx.finish().unwrap();
/// assert_eq!(&buf[..len], b"Hello\x00w\x00rld");
/// ```
#[derive(Debug)]
pub struct DecodeContext<B> {
    output: B,
    state: DecodeState,
    /// Capacity of `output`, fixed when decoding starts.
    capacity: usize,
    decoded_len: usize,
    /// Literal bytes still expected before the next code byte.
    payload_remaining: u8,
    /// Whether the previous block owes a zero to the output. Deferred
    /// until the next code byte arrives because the final block of a
    /// stream has no trailing zero.
    block_is_terminated: bool,
    /// Encoded bytes accepted so far, for error offsets.
    consumed: usize,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> DecodeContext<B> {
    /// Begin decoding a new datagram into `output`.
    #[must_use]
    pub fn start(output: B) -> Self {
        let mut ctx = Self {
            output,
            state: DecodeState::Idle,
            capacity: 0,
            decoded_len: 0,
            payload_remaining: 0,
            block_is_terminated: false,
            consumed: 0,
        };
        ctx.restart();
        ctx
    }

    /// Re-initialise in place for the next datagram, reusing the same
    /// output buffer. Any previous outcome is forgotten.
    pub fn restart(&mut self) {
        self.state = DecodeState::Decoding;
        self.capacity = self.output.as_ref().len();
        self.decoded_len = 0;
        self.payload_remaining = 0;
        self.block_is_terminated = false;
        self.consumed = 0;
    }

    /// Feed one encoded byte.
    ///
    /// Returns `true` if the byte was accepted, `false` if the stream has
    /// failed (now or earlier) or the context is not decoding. The reason
    /// for a failure is available from [`failure`](Self::failure) and is
    /// returned by [`finish`](Self::finish).
    #[inline]
    pub fn step(&mut self, byte: u8) -> bool {
        if self.state != DecodeState::Decoding {
            return false;
        }

        let offset = self.consumed;
        self.consumed += 1;

        if byte == FRAME_DELIMITER {
            return self.fail(DecodeError::StrayZero { offset });
        }

        if self.payload_remaining == 0 {
            // Code byte: check that the whole block, plus the zero the
            // previous block still owes, fits before committing to it.
            self.payload_remaining = byte - 1;
            let required = self.decoded_len
                + usize::from(self.payload_remaining)
                + usize::from(self.block_is_terminated);
            if required > self.capacity {
                return self.fail(DecodeError::Overflow {
                    required,
                    capacity: self.capacity,
                });
            }

            if self.block_is_terminated {
                self.push_output(0);
            }
            self.block_is_terminated = byte != FULL_BLOCK_CODE;
        } else {
            self.push_output(byte);
            self.payload_remaining -= 1;
        }

        true
    }

    /// Feed a run of encoded bytes, stopping at the first rejected one.
    ///
    /// Returns `true` if every byte was accepted.
    pub fn step_all(&mut self, bytes: &[u8]) -> bool {
        bytes.iter().all(|&byte| self.step(byte))
    }

    /// End the datagram and report its decoded length.
    ///
    /// The context goes idle whatever the outcome and must be
    /// [`restart`](Self::restart)ed before it accepts bytes again. The
    /// decoded bytes stay readable through [`decoded`](Self::decoded)
    /// until then.
    ///
    /// # Errors
    ///
    /// - The stored failure ([`DecodeError::StrayZero`] or
    ///   [`DecodeError::Overflow`]) if the stream failed.
    /// - [`DecodeError::Truncated`] if the stream stopped inside a block.
    /// - [`DecodeError::Inactive`] if the context was already finished.
    pub fn finish(&mut self) -> Result<usize, DecodeError> {
        let outcome = match self.state {
            DecodeState::Idle => Err(DecodeError::Inactive),
            DecodeState::Failed(err) => Err(err),
            DecodeState::Decoding if self.payload_remaining != 0 => Err(DecodeError::Truncated {
                remaining: usize::from(self.payload_remaining),
            }),
            DecodeState::Decoding => Ok(self.decoded_len),
        };
        self.state = DecodeState::Idle;
        outcome
    }

    /// The bytes decoded so far.
    #[must_use]
    pub fn decoded(&self) -> &[u8] {
        &self.output.as_ref()[..self.decoded_len]
    }

    #[must_use]
    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Encoded bytes accepted since the last (re)start.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// `true` between a code byte and the end of its literals.
    #[must_use]
    pub fn in_block(&self) -> bool {
        self.payload_remaining != 0
    }

    /// `true` while the context accepts bytes.
    #[must_use]
    pub fn is_decoding(&self) -> bool {
        self.state == DecodeState::Decoding
    }

    /// Why the stream failed, if it has.
    #[must_use]
    pub fn failure(&self) -> Option<DecodeError> {
        match self.state {
            DecodeState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Give back the output buffer.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.output
    }

    fn push_output(&mut self, byte: u8) {
        // In bounds: the code-byte check reserved room for the whole block.
        self.output.as_mut()[self.decoded_len] = byte;
        self.decoded_len += 1;
    }

    fn fail(&mut self, err: DecodeError) -> bool {
        self.state = DecodeState::Failed(err);
        false
    }
}

/// Decode a complete encoded buffer (delimiter already stripped) into
/// `dst`.
///
/// # Errors
///
/// Any [`DecodeError`] the streaming context reports for this input.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeError> {
    let mut ctx = DecodeContext::start(dst);
    ctx.step_all(src);
    ctx.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper: decode into a buffer of `cap` bytes, returning the decoded
    // bytes on success.
    fn dec(src: &[u8], cap: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0u8; cap];
        let len = decode(src, &mut buf)?;
        Ok(buf[..len].to_vec())
    }

    #[test]
    fn decode_single_empty_block() {
        assert_eq!(dec(&[0x01], 0).unwrap(), b"");
    }

    #[test]
    fn decode_single_zero() {
        assert_eq!(dec(&[0x01, 0x01], 1).unwrap(), [0x00]);
    }

    #[test]
    fn decode_hello_into_exact_buffer() {
        assert_eq!(dec(b"\x06Hello", 5).unwrap(), b"Hello");
    }

    #[test]
    fn decode_hello_world_with_zeros() {
        assert_eq!(dec(b"\x06Hello\x02w\x04rld", 11).unwrap(), b"Hello\x00w\x00rld");
    }

    #[test]
    fn full_block_does_not_emit_zero() {
        let mut src = vec![0xFF];
        src.extend_from_slice(&[0xAA; 254]);
        src.extend_from_slice(&[0x02, 0xBB]);
        let out = dec(&src, 255).unwrap();
        assert_eq!(out.len(), 255);
        assert_eq!(out[254], 0xBB);
        assert!(!out.contains(&0));
    }

    #[test]
    fn full_block_at_end_fits_exactly() {
        let mut src = vec![0xFF];
        src.extend_from_slice(&[0xAA; 254]);
        assert_eq!(dec(&src, 254).unwrap(), vec![0xAA; 254]);
    }

    #[test]
    fn empty_stream_finishes_at_zero_length() {
        let mut buf = [0u8; 4];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        assert_eq!(ctx.finish(), Ok(0));
    }

    #[test]
    fn stray_zero_fails_and_stays_failed() {
        let mut buf = [0u8; 8];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        assert!(ctx.step(0x03));
        assert!(ctx.step(b'a'));
        assert!(!ctx.step(0x00));
        assert_eq!(ctx.failure(), Some(DecodeError::StrayZero { offset: 2 }));

        // Every later byte is rejected and nothing more is written.
        assert!(!ctx.step(b'b'));
        assert!(!ctx.step(0x01));
        assert_eq!(ctx.decoded(), b"a");
        assert_eq!(ctx.finish(), Err(DecodeError::StrayZero { offset: 2 }));
    }

    #[test]
    fn overflow_detected_at_code_byte() {
        let mut buf = [0u8; 4];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        // 0x06 announces 5 literals; only 4 fit.
        assert!(!ctx.step(0x06));
        assert_eq!(ctx.decoded_len(), 0);
        assert_eq!(
            ctx.finish(),
            Err(DecodeError::Overflow {
                required: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn overflow_counts_deferred_zero() {
        // "ab" then a zero owed, then "cd": needs 5 bytes.
        let err = dec(b"\x03ab\x03cd", 4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Overflow {
                required: 5,
                capacity: 4
            }
        );
        assert_eq!(dec(b"\x03ab\x03cd", 5).unwrap(), b"ab\x00cd");
    }

    #[test]
    fn trailing_deferred_zero_is_not_checked() {
        // The last block's zero is never flushed, so it must not count
        // against capacity either.
        assert_eq!(dec(b"\x03ab", 2).unwrap(), b"ab");
    }

    #[test]
    fn truncated_stream_reported_at_finish() {
        let mut buf = [0u8; 8];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        assert!(ctx.step_all(b"\x06Hel"));
        assert!(ctx.in_block());
        assert_eq!(ctx.finish(), Err(DecodeError::Truncated { remaining: 2 }));
    }

    #[test]
    fn finish_twice_is_inactive() {
        let mut buf = [0u8; 8];
        let mut ctx = DecodeContext::start(&mut buf[..]);
        assert!(ctx.step(0x01));
        assert_eq!(ctx.finish(), Ok(0));
        assert_eq!(ctx.finish(), Err(DecodeError::Inactive));
        assert!(!ctx.step(0x01));
    }

    #[test]
    fn restart_reuses_buffer() {
        let mut ctx = DecodeContext::start(vec![0u8; 8]);
        assert!(!ctx.step_all(b"\x02a\x00"));
        assert!(ctx.finish().is_err());

        ctx.restart();
        assert!(ctx.is_decoding());
        assert!(ctx.step_all(b"\x03hi"));
        assert_eq!(ctx.finish(), Ok(2));
        assert_eq!(ctx.decoded(), b"hi");
        assert_eq!(&ctx.into_inner()[..2], b"hi");
    }

    #[test]
    fn consumed_counts_accepted_bytes() {
        let mut ctx = DecodeContext::start([0u8; 8]);
        ctx.step_all(b"\x03hi\x01");
        assert_eq!(ctx.consumed(), 4);
        assert_eq!(ctx.capacity(), 8);
    }

    #[test]
    fn roundtrip_with_encoder() {
        let src: Vec<u8> = (0..600u32).map(|i| (i % 7) as u8).collect();
        let encoded = cobs_encoder::encode_to_vec(&src);
        assert_eq!(dec(&encoded, src.len()).unwrap(), src);
    }
}
