use bytes::Bytes;
use cobs_wire::FramingConfig;
use cobs_wire::size::FRAME_DELIMITER;
use tracing::{debug, warn};

use crate::decoder::DecodeContext;
use crate::error::{DecodeError, FrameError};

/// Running counters kept by a [`Deframer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeframerStats {
    /// Datagrams decoded successfully.
    pub frames: u64,
    /// Decoded payload bytes across those datagrams.
    pub bytes: u64,
    /// Datagrams rejected.
    pub errors: u64,
    /// Back-to-back delimiters ignored.
    pub empty_skipped: u64,
}

/// Push-model deframer — splits a raw byte stream on `0x00` delimiters and
/// decodes each datagram as its bytes arrive.
///
/// This is the transport-side collaborator of [`DecodeContext`]: it strips
/// delimiters, calls `finish` at each one and restarts the context for the
/// next datagram. The context's buffer is allocated once, at
/// `max_frame_len`, and reused.
///
/// A bad datagram is reported as soon as the decoder rejects a byte; the
/// rest of it is then discarded up to the next delimiter, where decoding
/// resumes cleanly.
///
/// ```text
///   push(b) ──► b != 0 ──► step ──ok──► None
///                            └─fail──► Some(Err)  (once per datagram)
///          └──► b == 0 ──► finish ──► Some(Ok(frame)) / Some(Err)
///                          restart
/// ```
pub struct Deframer {
    ctx: DecodeContext<Vec<u8>>,
    config: FramingConfig,
    /// The current datagram already produced an error; swallow it.
    reported: bool,
    stats: DeframerStats,
}

impl Deframer {
    #[must_use]
    pub fn new(config: FramingConfig) -> Self {
        Self {
            ctx: DecodeContext::start(vec![0u8; config.max_frame_len]),
            config,
            reported: false,
            stats: DeframerStats::default(),
        }
    }

    /// Feed one byte from the transport.
    ///
    /// Returns `Some` when the byte completes a datagram or proves the
    /// current one invalid.
    pub fn push(&mut self, byte: u8) -> Option<Result<Bytes, FrameError>> {
        if byte != FRAME_DELIMITER {
            if self.ctx.step(byte) || self.reported {
                return None;
            }
            self.reported = true;
            let err = self.ctx.failure().unwrap_or(DecodeError::Inactive);
            return Some(Err(self.reject(err)));
        }

        if self.reported {
            self.reset();
            return None;
        }

        if self.ctx.consumed() == 0 && self.config.skip_empty_frames {
            self.stats.empty_skipped += 1;
            return None;
        }

        let frame = match self.ctx.finish() {
            Ok(len) => {
                self.stats.frames += 1;
                self.stats.bytes += len as u64;
                debug!(len, "frame decoded");
                Ok(Bytes::copy_from_slice(self.ctx.decoded()))
            }
            Err(err) => Err(self.reject(err)),
        };
        self.reset();
        Some(frame)
    }

    /// Feed a run of bytes, collecting every outcome they produce.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<Bytes, FrameError>> {
        bytes.iter().filter_map(|&byte| self.push(byte)).collect()
    }

    /// Drop any partially received datagram.
    pub fn reset(&mut self) {
        self.ctx.restart();
        self.reported = false;
    }

    /// Encoded bytes received for a datagram that is still live (not yet
    /// terminated and not already rejected).
    #[must_use]
    pub fn pending(&self) -> usize {
        if self.reported { 0 } else { self.ctx.consumed() }
    }

    #[must_use]
    pub fn stats(&self) -> DeframerStats {
        self.stats
    }

    #[must_use]
    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    fn reject(&mut self, err: DecodeError) -> FrameError {
        self.stats.errors += 1;
        warn!(error = %err, "discarding frame");
        FrameError::Decode(err)
    }
}
