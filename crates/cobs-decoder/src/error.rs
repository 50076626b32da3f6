/// Why a decode context stopped accepting bytes, or why it could not
/// produce a length at finish.
///
/// The streaming API reports failure as a plain `false` from
/// [`DecodeContext::step`](crate::DecodeContext::step) so it stays cheap
/// enough for an interrupt handler; the reason is kept in the context and
/// surfaces here from `finish`.
///
/// ```text
///   DecodeError
///   ├── StrayZero    ← 0x00 fed to the decoder mid-stream
///   ├── Overflow     ← a block announced more output than the buffer holds
///   ├── Truncated    ← finish called in the middle of a block
///   └── Inactive     ← finish called on a context that was never started
///                      or was already finished
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Zero is only legal as the datagram delimiter, which must be
    /// stripped by the transport before bytes reach the decoder.
    #[error("zero byte inside encoded stream at offset {offset}")]
    StrayZero { offset: usize },

    /// Detected at the code byte, before anything of the block is written.
    #[error("decoded output would need {required} bytes, buffer holds {capacity}")]
    Overflow { required: usize, capacity: usize },

    #[error("stream ended with {remaining} bytes of its last block missing")]
    Truncated { remaining: usize },

    #[error("decode context is not active")]
    Inactive,
}

/// Errors from the framing layer: a decode failure for one datagram, or a
/// problem with the byte transport itself.
///
/// A `Decode` error only costs the current datagram; the framing layer
/// resynchronises at the next delimiter and keeps going. `Io` and
/// `UnterminatedFrame` end the stream.
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("invalid frame: {0}")]
    Decode(#[from] DecodeError),

    /// The transport hit end-of-stream with part of a datagram received.
    #[error("stream ended inside a frame ({pending} bytes pending)")]
    UnterminatedFrame { pending: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
