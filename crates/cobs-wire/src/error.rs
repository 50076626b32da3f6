/// Errors raised while walking the block layout of an encoded buffer.
///
/// Only the layout inspection in [`crate::block`] produces these. The
/// streaming decoder has its own error type because it reports against a
/// destination buffer, not against the encoded bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A `0x00` byte appeared inside the encoded bytes.
    ///
    /// Zero is only legal as the datagram delimiter, which the transport
    /// strips before the codec sees the buffer.
    #[error("zero byte inside encoded data at offset {offset}")]
    ZeroByte { offset: usize },

    /// A code byte announced more literal bytes than the buffer holds.
    #[error("unexpected end of input at offset {offset}: block needs {missing} more bytes")]
    UnexpectedEof { offset: usize, missing: usize },
}
