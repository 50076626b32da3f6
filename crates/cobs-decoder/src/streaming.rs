use bytes::Bytes;
use cobs_wire::FramingConfig;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::deframer::{Deframer, DeframerStats};
use crate::error::FrameError;

/// Asynchronous frame reader — yields decoded datagrams from any
/// `AsyncRead` byte transport (a serial port, a TCP socket, a file).
///
/// Bytes are pulled from the transport in chunks of `read_chunk_size`
/// and pushed through a [`Deframer`], so datagrams are decoded while they
/// arrive and nothing beyond one chunk plus one frame is ever buffered.
/// Backpressure is natural: the transport is only read when the caller
/// awaits the next item.
///
/// ```text
///   Ok(frame)        a datagram decoded
///   Err(Decode)      a datagram rejected; reading continues
///   Err(Unterminated) / Err(Io)   the stream is over
///   None             clean end of stream
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use cobs_decoder::FrameReader;
/// use tokio::io::AsyncRead;
///
/// async fn drain(port: impl AsyncRead + Unpin) {
///     let mut frames = FrameReader::new(port);
///     while let Some(frame) = frames.next().await {
///         match frame {
///             Ok(payload) => println!("{} bytes", payload.len()),
///             Err(e) => eprintln!("dropped: {e}"),
///         }
///     }
/// }
/// ```
pub struct FrameReader<R> {
    reader: R,
    deframer: Deframer,
    /// Read buffer, reused for every transport read.
    chunk: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader with the default [`FramingConfig`].
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, FramingConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: FramingConfig) -> Self {
        Self {
            reader,
            deframer: Deframer::new(config),
            chunk: vec![0u8; config.read_chunk_size.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
        }
    }

    /// Read the next datagram.
    ///
    /// Returns `None` once the transport is exhausted. A datagram cut off
    /// by end-of-stream is reported as [`FrameError::UnterminatedFrame`]
    /// before the `None`.
    pub async fn next(&mut self) -> Option<Result<Bytes, FrameError>> {
        loop {
            while self.pos < self.filled {
                let byte = self.chunk[self.pos];
                self.pos += 1;
                if let Some(frame) = self.deframer.push(byte) {
                    return Some(frame);
                }
            }

            if self.eof {
                return None;
            }

            match self.reader.read(&mut self.chunk).await {
                Ok(0) => {
                    self.eof = true;
                    let pending = self.deframer.pending();
                    if pending > 0 {
                        self.deframer.reset();
                        return Some(Err(FrameError::UnterminatedFrame { pending }));
                    }
                    return None;
                }
                Ok(n) => {
                    trace!(bytes = n, "read chunk");
                    self.pos = 0;
                    self.filled = n;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.eof = true;
                    return Some(Err(FrameError::Io(e)));
                }
            }
        }
    }

    /// Counters from the underlying deframer.
    #[must_use]
    pub fn stats(&self) -> DeframerStats {
        self.deframer.stats()
    }

    /// Give back the transport. Buffered but unprocessed bytes are lost.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.reader
    }
}
