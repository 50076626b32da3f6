/// Implementation of `cobs validate`.
///
/// Runs the input through the same [`Deframer`] a host uses on a live
/// serial link and reports either a series of success checkmarks (`✓`) or
/// one diagnostic line (`✗`) per rejected frame. End of input counts as a
/// final delimiter, so both a bare encoded buffer and a delimited stream
/// validate.
///
/// # Success output
///
/// ```text
/// ✓ Frames: 3 frames decoded (41 bytes)
/// ✓ Layout: no stray zero bytes, no truncated blocks
/// ✓ Size: every frame within 1024 bytes
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Frame 1: invalid frame: stream ended with 2 bytes of its last block missing
/// ```
use anyhow::{Result, bail};
use cobs_decoder::{DecodeError, Deframer, FrameError};
use cobs_wire::size::FRAME_DELIMITER;

use crate::{ValidateArgs, read_input};

/// Run the `cobs validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or any frame is invalid.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let config = args.framing.config();
    let report = validate(&input, &mut Deframer::new(config));

    if report.failures.is_empty() {
        println!(
            "✓ Frames: {} frame{} decoded ({} bytes)",
            report.frames,
            if report.frames == 1 { "" } else { "s" },
            report.bytes
        );
        println!("✓ Layout: no stray zero bytes, no truncated blocks");
        println!("✓ Size: every frame within {} bytes", config.max_frame_len);
        return Ok(());
    }

    for (index, diagnostic) in &report.failures {
        println!("✗ Frame {index}: {diagnostic}");
    }
    bail!("validation failed")
}

#[derive(Debug, Default)]
struct Report {
    frames: u64,
    bytes: u64,
    /// Frame index and diagnostic for every rejected frame.
    failures: Vec<(usize, String)>,
}

fn validate(input: &[u8], deframer: &mut Deframer) -> Report {
    let mut outcomes = deframer.feed(input);
    if deframer.pending() > 0 {
        outcomes.extend(deframer.push(FRAME_DELIMITER));
    }

    let failures = outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(index, outcome)| outcome.err().map(|e| (index, diagnostic(&e))))
        .collect();

    let stats = deframer.stats();
    Report {
        frames: stats.frames,
        bytes: stats.bytes,
        failures,
    }
}

/// Maps a frame error to a message that points at the cause.
///
/// ```text
/// ┌────────────────────┬───────────────────────────────────────────────┐
/// │ Error              │ Diagnostic                                    │
/// ├────────────────────┼───────────────────────────────────────────────┤
/// │ StrayZero          │ not produced here: zeros are delimiters       │
/// │ Overflow           │ "decodes past N bytes (block needs M)"        │
/// │ Truncated          │ "last block is K bytes short"                 │
/// │ anything else      │ "<error Display>"                             │
/// └────────────────────┴───────────────────────────────────────────────┘
/// ```
fn diagnostic(e: &FrameError) -> String {
    match e {
        FrameError::Decode(DecodeError::Overflow { required, capacity }) => {
            format!("decodes past {capacity} bytes (block needs {required})")
        }
        FrameError::Decode(DecodeError::Truncated { remaining }) => {
            format!("last block is {remaining} bytes short")
        }
        other => other.to_string(),
    }
}
