/// Implementation of `cobs encode`.
///
/// Reads the input, COBS-encodes it in one pass, and writes the result.
/// With `--frame` the output is a complete datagram ready for the wire.
///
/// ```text
///   input  "Hello\0w\0rld"
///   plain  06 48 65 6c 6c 6f 02 77 04 72 6c 64
///   frame  06 48 65 6c 6c 6f 02 77 04 72 6c 64 00
///   lead   00 06 48 65 6c 6c 6f 02 77 04 72 6c 64 00
/// ```
use anyhow::Result;
use cobs_encoder::{encode_frame, encode_to_vec};
use cobs_wire::size::FRAME_DELIMITER;
use tracing::debug;

use crate::{EncodeArgs, read_input, write_output};

/// Run the `cobs encode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written. Encoding itself cannot fail.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let encoded = render(&input, args.frame, args.leading_delimiter);
    debug!(input = input.len(), output = encoded.len(), "encoded");
    write_output(args.output.as_deref(), &encoded)
}

fn render(input: &[u8], frame: bool, leading_delimiter: bool) -> Vec<u8> {
    if leading_delimiter {
        let mut out = Vec::with_capacity(input.len() + 8);
        out.push(FRAME_DELIMITER);
        out.extend_from_slice(&encode_frame(input));
        out
    } else if frame {
        encode_frame(input)
    } else {
        encode_to_vec(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_delimiter() {
        assert_eq!(render(b"Hello", false, false), b"\x06Hello");
    }

    #[test]
    fn frame_appends_delimiter() {
        assert_eq!(render(b"Hello", true, false), b"\x06Hello\x00");
    }

    #[test]
    fn leading_delimiter_implies_frame() {
        assert_eq!(render(b"", false, true), [0x00, 0x01, 0x00]);
    }
}
