/// Implementation of `cobs stats`.
///
/// Walks the block layout of every delimited frame in the input and prints
/// how much the encoding cost compared to the worst case.
///
/// # Example output
///
/// ```text
/// File:    /tmp/capture.bin  (1042 bytes)
/// Frames:  4 total, 0 malformed
///
/// Blocks            Count
/// ─────────────────────────
/// full (0xFF)           3
/// zero-implied         11
/// final                 4
/// ─────────────────────────
/// Total                18
///
/// Bytes:
///   encoded        1038
///   decoded        1020
///   overhead         18  (1.76%)
///   worst case       20
/// ```
///
/// Encoded bytes count frame contents only; delimiters are reported in the
/// file size but not in the totals.
use std::fmt::Write as _;

use anyhow::Result;
use cobs_wire::{Blocks, overhead};
use serde::Serialize;

use crate::{StatsArgs, read_input, segments};

/// Aggregate statistics for one input, serialisable for `--json`.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub input_bytes: usize,
    pub frames: usize,
    pub malformed: usize,
    pub encoded_bytes: usize,
    pub decoded_bytes: usize,
    pub blocks: usize,
    pub full_blocks: usize,
    pub zero_blocks: usize,
    /// `encoded_bytes - decoded_bytes` over the well-formed frames.
    pub overhead: usize,
    /// Sum of the per-frame overhead bound.
    pub worst_case_overhead: usize,
}

/// Run the `cobs stats` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or JSON serialisation
/// fails.
pub fn run(args: &StatsArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let stats = tally(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render(&args.input.display().to_string(), &stats));
    }
    Ok(())
}

/// Tally every delimited segment of `input`. Malformed frames are counted
/// but contribute nothing else.
pub fn tally(input: &[u8]) -> Stats {
    let mut stats = Stats {
        input_bytes: input.len(),
        ..Stats::default()
    };

    for segment in segments(input) {
        let Ok(blocks) = Blocks::new(segment).collect::<Result<Vec<_>, _>>() else {
            stats.malformed += 1;
            continue;
        };
        let decoded: usize = blocks.iter().map(cobs_wire::Block::decoded_len).sum();

        stats.frames += 1;
        stats.encoded_bytes += segment.len();
        stats.decoded_bytes += decoded;
        stats.blocks += blocks.len();
        stats.full_blocks += blocks.iter().filter(|b| b.code.is_full()).count();
        stats.zero_blocks += blocks.iter().filter(|b| b.implies_zero).count();
        stats.overhead += segment.len() - decoded;
        stats.worst_case_overhead += overhead(decoded);
    }
    stats
}

fn render(name: &str, stats: &Stats) -> String {
    let mut out = String::new();
    let rule = "─".repeat(25);
    let final_blocks = stats.blocks - stats.full_blocks - stats.zero_blocks;

    let _ = writeln!(out, "File:    {name}  ({} bytes)", stats.input_bytes);
    let _ = writeln!(
        out,
        "Frames:  {} total, {} malformed",
        stats.frames, stats.malformed
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<16}{:>7}", "Blocks", "Count");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<16}{:>7}", "full (0xFF)", stats.full_blocks);
    let _ = writeln!(out, "{:<16}{:>7}", "zero-implied", stats.zero_blocks);
    let _ = writeln!(out, "{:<16}{:>7}", "final", final_blocks);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<16}{:>7}", "Total", stats.blocks);
    let _ = writeln!(out);
    let _ = writeln!(out, "Bytes:");
    let _ = writeln!(out, "  {:<12}{:>6}", "encoded", stats.encoded_bytes);
    let _ = writeln!(out, "  {:<12}{:>6}", "decoded", stats.decoded_bytes);
    let _ = writeln!(
        out,
        "  {:<12}{:>6}  ({})",
        "overhead",
        stats.overhead,
        percent(stats.overhead, stats.decoded_bytes)
    );
    let _ = writeln!(out, "  {:<12}{:>6}", "worst case", stats.worst_case_overhead);
    out
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "n/a".to_string();
    }
    format!("{:.2}%", part as f64 * 100.0 / whole as f64)
}
