/// Implementation of `cobs inspect`.
///
/// Splits the input on delimiters and prints the block layout of each
/// encoded frame, one line per block. `--show-hex` adds a hex dump of each
/// block's literal bytes.
///
/// # Output format
///
/// ```text
/// Frame 0: 12 bytes encoded, 11 decoded, 3 blocks
///          @0000 code=0x06 data=5 +zero
///          @0006 code=0x02 data=1 +zero
///          @0008 code=0x04 data=3
/// ---
/// 1 frame, 12 encoded bytes
/// ```
///
/// A frame whose layout is broken gets a `✗` line at the point of the
/// problem; the remaining frames are still shown.
use std::fmt::Write as _;

use anyhow::{Result, bail};
use cobs_wire::{Block, Blocks, WireError};

use crate::{InspectArgs, read_input, segments};

/// Run the `cobs inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or any frame has a broken
/// block layout.
pub fn run(args: &InspectArgs) -> Result<()> {
    let input = read_input(&args.input)?;

    let mut frames = 0usize;
    let mut encoded = 0usize;
    let mut malformed = 0usize;

    for (index, segment) in segments(&input).enumerate() {
        let (report, ok) = render_frame(index, segment, args.show_hex);
        print!("{report}");
        frames += 1;
        encoded += segment.len();
        if !ok {
            malformed += 1;
        }
    }

    println!("---");
    println!(
        "{frames} frame{}, {encoded} encoded bytes",
        if frames == 1 { "" } else { "s" }
    );

    if malformed > 0 {
        bail!("{malformed} malformed frame{}", if malformed == 1 { "" } else { "s" });
    }
    Ok(())
}

/// Render one frame's report. The flag is `false` if the layout is broken.
fn render_frame(index: usize, segment: &[u8], show_hex: bool) -> (String, bool) {
    let layout: Result<Vec<Block<'_>>, WireError> = Blocks::new(segment).collect();
    let mut out = String::new();

    match layout {
        Ok(blocks) => {
            let decoded: usize = blocks.iter().map(Block::decoded_len).sum();
            let _ = writeln!(
                out,
                "Frame {index}: {} bytes encoded, {decoded} decoded, {} block{}",
                segment.len(),
                blocks.len(),
                if blocks.len() == 1 { "" } else { "s" }
            );
            for block in &blocks {
                let _ = writeln!(out, "         {block}");
                if show_hex {
                    hex_dump(&mut out, block.data);
                }
            }
            (out, true)
        }
        Err(e) => {
            let _ = writeln!(out, "Frame {index}: {} bytes encoded", segment.len());
            // Show what parsed cleanly before the fault.
            for block in Blocks::new(segment).map_while(Result::ok) {
                let _ = writeln!(out, "         {block}");
            }
            let _ = writeln!(out, "         ✗ {e}");
            (out, false)
        }
    }
}

/// 16 bytes per line: offset, hex, printable ASCII.
fn hex_dump(out: &mut String, data: &[u8]) {
    for (i, chunk) in data.chunks(16).enumerate() {
        let offset = i * 16;
        let hex = chunk.iter().fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
            if !s.is_empty() {
                s.push(' ');
            }
            let _ = write!(s, "{b:02x}");
            s
        });
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        let _ = writeln!(out, "           {offset:04x}  {hex:<47}  {ascii}");
    }
}
