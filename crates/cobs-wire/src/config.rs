/// Default ceiling on a single decoded frame, in bytes.
pub const DEFAULT_MAX_FRAME_LEN: usize = 1024;

/// Default number of bytes a frame reader asks the transport for at once.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 256;

/// Configuration for the framing layer that sits between a byte transport
/// and the codec.
///
/// The codec itself is configuration-free; these knobs only affect how
/// delimited datagrams are cut out of, and written into, a byte stream.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────────┐
/// │ Field              │ Purpose                                          │
/// ├────────────────────┼──────────────────────────────────────────────────┤
/// │ max_frame_len      │ Decoded-size ceiling; larger frames are rejected │
/// │ skip_empty_frames  │ Ignore back-to-back delimiters                   │
/// │ leading_delimiter  │ Writer emits 0x00 before each frame too          │
/// │ read_chunk_size    │ Reader's transport read granularity              │
/// └────────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// A leading delimiter makes the receiver discard whatever partial frame it
/// was holding (line noise, a reset peer) before the real frame starts. On
/// the receiving side that shows up as an empty frame, which is why
/// `skip_empty_frames` defaults to `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramingConfig {
    /// Largest decoded frame accepted (reader) or sent (writer).
    pub max_frame_len: usize,

    /// When `true`, two delimiters in a row do not produce an empty frame.
    pub skip_empty_frames: bool,

    /// When `true`, writers put a delimiter before each frame as well as
    /// after it.
    pub leading_delimiter: bool,

    /// Size of the scratch buffer readers fill from the transport.
    pub read_chunk_size: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            skip_empty_frames: true,
            leading_delimiter: false,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl FramingConfig {
    /// Same as the default, with a different frame ceiling.
    #[must_use]
    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        Self {
            max_frame_len,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FramingConfig::default();
        assert_eq!(config.max_frame_len, DEFAULT_MAX_FRAME_LEN);
        assert!(config.skip_empty_frames);
        assert!(!config.leading_delimiter);
        assert_eq!(config.read_chunk_size, DEFAULT_READ_CHUNK_SIZE);
    }

    #[test]
    fn with_max_frame_len_keeps_other_defaults() {
        let config = FramingConfig::with_max_frame_len(64);
        assert_eq!(config.max_frame_len, 64);
        assert_eq!(
            FramingConfig {
                max_frame_len: DEFAULT_MAX_FRAME_LEN,
                ..config
            },
            FramingConfig::default()
        );
    }
}
