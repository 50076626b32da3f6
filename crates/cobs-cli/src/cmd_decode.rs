/// Implementation of `cobs decode`.
///
/// Two input shapes are accepted:
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────────┐
/// │ Mode         │ Input                                                  │
/// ├──────────────┼────────────────────────────────────────────────────────┤
/// │ (default)    │ one encoded buffer, optionally followed by one 0x00    │
/// │ --frames     │ any number of 0x00-delimited datagrams                 │
/// └──────────────┴────────────────────────────────────────────────────────┘
/// ```
///
/// In `--frames` mode the datagrams go through a [`Deframer`], exactly as
/// a host would read them off a serial port: a bad datagram is reported and
/// skipped, the following ones still decode. The command fails if any
/// datagram was rejected, after writing the good ones.
use anyhow::{Context, Result, bail};
use cobs_decoder::{Deframer, decode_to_vec};
use cobs_wire::size::FRAME_DELIMITER;

use crate::{DecodeArgs, read_input, to_hex, write_output};

/// Run the `cobs decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the output cannot be
/// written, or any frame fails to decode.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let input = read_input(&args.input)?;

    let (frames, rejected) = if args.frames {
        decode_stream(&input, &mut Deframer::new(args.framing.config()))
    } else {
        let encoded = input.strip_suffix(&[FRAME_DELIMITER]).unwrap_or(&input);
        let decoded = decode_to_vec(encoded)
            .with_context(|| format!("failed to decode {}", args.input.display()))?;
        (vec![decoded], 0)
    };

    let rendered = if args.hex {
        frames.iter().fold(String::new(), |mut s, frame| {
            s.push_str(&to_hex(frame));
            s.push('\n');
            s
        })
        .into_bytes()
    } else {
        frames.concat()
    };
    write_output(args.output.as_deref(), &rendered)?;

    if rejected > 0 {
        bail!(
            "{rejected} frame{} rejected, {} decoded",
            if rejected == 1 { "" } else { "s" },
            frames.len()
        );
    }
    Ok(())
}

/// Decode every datagram in `input`, returning the good ones in order and
/// the number rejected. Each rejection is reported on stderr as it is
/// found; an unterminated tail counts as one.
fn decode_stream(input: &[u8], deframer: &mut Deframer) -> (Vec<Vec<u8>>, usize) {
    let mut frames = Vec::new();
    let mut rejected = 0usize;

    for (index, outcome) in deframer.feed(input).into_iter().enumerate() {
        match outcome {
            Ok(frame) => frames.push(frame.to_vec()),
            Err(e) => {
                eprintln!("✗ frame {index}: {e}");
                rejected += 1;
            }
        }
    }

    let pending = deframer.pending();
    if pending > 0 {
        eprintln!("✗ input ends inside a frame ({pending} bytes without delimiter)");
        rejected += 1;
    }

    (frames, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobs_wire::FramingConfig;

    #[test]
    fn stream_of_good_frames() {
        let mut deframer = Deframer::new(FramingConfig::default());
        let (frames, rejected) = decode_stream(b"\x06Hello\x00\x01\x01\x00", &mut deframer);
        assert_eq!(frames, vec![b"Hello".to_vec(), vec![0x00]]);
        assert_eq!(rejected, 0);
    }

    #[test]
    fn bad_frame_is_counted_and_skipped() {
        let mut deframer = Deframer::new(FramingConfig::default());
        let (frames, rejected) = decode_stream(b"\x06He\x00\x02a\x00", &mut deframer);
        assert_eq!(frames, vec![b"a".to_vec()]);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn unterminated_tail_counts_as_rejected() {
        let mut deframer = Deframer::new(FramingConfig::default());
        let (frames, rejected) = decode_stream(b"\x02a\x00\x02b", &mut deframer);
        assert_eq!(frames.len(), 1);
        assert_eq!(rejected, 1);
    }
}
