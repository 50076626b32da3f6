/// Errors from the checked encoding entry points.
///
/// [`encode`](crate::encode) itself cannot fail: it trusts the caller's
/// capacity contract. These errors come from the variants that verify
/// first, and from the framed writer.
///
/// ```text
///   EncodeError
///   ├── OutputTooSmall      ← destination shorter than the exact encoding
///   ├── FrameTooLarge       ← payload above the configured frame ceiling
///   └── Io(std::io::Error)  ← from the underlying writer (std only)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("output buffer too small: need {required} bytes, have {capacity}")]
    OutputTooSmall { required: usize, capacity: usize },

    #[error("frame payload of {len} bytes exceeds limit of {limit}")]
    FrameTooLarge { len: usize, limit: usize },

    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
