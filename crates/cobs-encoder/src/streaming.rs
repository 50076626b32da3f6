use cobs_wire::FramingConfig;
use cobs_wire::size::max_frame_size;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::encoder::encode;
use crate::error::EncodeError;

/// Asynchronous framed writer — encodes each payload and writes it to the
/// transport as one delimited datagram.
///
/// ```text
///   [0x00]            only with `leading_delimiter`
///   <COBS bytes>
///   0x00              terminator
/// ```
///
/// The whole datagram is assembled in a scratch buffer that is reused
/// across frames, then written with a single `write_all`, so a datagram is
/// never interleaved with a partial one even if the future is polled from
/// several places in turn.
///
/// # Example
///
/// ```rust,no_run
/// use cobs_encoder::FrameWriter;
/// use tokio::io::AsyncWrite;
///
/// async fn send(port: impl AsyncWrite + Unpin) {
///     let mut writer = FrameWriter::new(port);
///     writer.write_frame(b"ping").await.unwrap();
///     writer.flush().await.unwrap();
/// }
/// ```
pub struct FrameWriter<W> {
    writer: W,
    config: FramingConfig,
    scratch: Vec<u8>,
    frames_written: u64,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Create a writer with the default [`FramingConfig`].
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, FramingConfig::default())
    }

    #[must_use]
    pub fn with_config(writer: W, config: FramingConfig) -> Self {
        Self {
            writer,
            config,
            scratch: Vec::with_capacity(max_frame_size(config.max_frame_len) + 1),
            frames_written: 0,
        }
    }

    /// Encode `payload` and write it as one datagram.
    ///
    /// Returns the number of bytes put on the wire, delimiters included.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::FrameTooLarge`] if `payload` is longer than
    ///   `max_frame_len`; nothing is written.
    /// - [`EncodeError::Io`] if the transport write fails.
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<usize, EncodeError> {
        if payload.len() > self.config.max_frame_len {
            return Err(EncodeError::FrameTooLarge {
                len: payload.len(),
                limit: self.config.max_frame_len,
            });
        }

        let start = usize::from(self.config.leading_delimiter);

        // Zero-filled, so both delimiter positions are already in place.
        self.scratch.clear();
        self.scratch.resize(start + max_frame_size(payload.len()), 0);
        let encoded = encode(payload, &mut self.scratch[start..]);
        let total = start + encoded + 1;
        self.scratch.truncate(total);

        self.writer.write_all(&self.scratch).await?;
        self.frames_written += 1;
        debug!(payload = payload.len(), wire = total, "frame written");
        Ok(total)
    }

    /// Flush the underlying transport.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Io`] if the flush fails.
    pub async fn flush(&mut self) -> Result<(), EncodeError> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Number of datagrams written so far.
    #[must_use]
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Give back the transport.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}
