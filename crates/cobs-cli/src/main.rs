/// COBS command-line tool — encode, decode, inspect, validate, and measure
/// COBS-framed data as it travels over the serial console.
///
/// # Command overview
///
/// ```text
/// cobs <COMMAND> [OPTIONS]
///
/// Commands:
///   encode     COBS-encode a file (optionally as a delimited frame)
///   decode     Decode one encoded buffer or a stream of frames
///   inspect    Print the block layout of each frame
///   validate   Check every frame for structural correctness
///   stats      Print size and overhead statistics
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log framing activity to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Every `<INPUT>` may be `-` to read stdin. Output goes to stdout unless
/// `-o` is given.
///
/// # Exit codes
///
/// | Code | Meaning                                  |
/// |------|------------------------------------------|
/// | 0    | Success                                  |
/// | 1    | Error (I/O failure, invalid frame, etc.) |
///
/// Diagnostics are written to stderr so stdout can be piped cleanly.
use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cobs_wire::FramingConfig;
use cobs_wire::config::DEFAULT_MAX_FRAME_LEN;
use cobs_wire::size::FRAME_DELIMITER;
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The COBS framing command-line tool.
#[derive(Parser)]
#[command(name = "cobs", version, about = "COBS framing codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log framing activity (frames decoded, frames dropped) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// COBS-encode a file.
    Encode(EncodeArgs),
    /// Decode an encoded buffer, or a stream of delimited frames.
    Decode(DecodeArgs),
    /// Print the block layout of each frame.
    Inspect(InspectArgs),
    /// Check every frame for structural correctness.
    Validate(ValidateArgs),
    /// Print size and overhead statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `cobs encode`.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Flag                 │ Effect                                       │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ --frame              │ Append the 0x00 datagram delimiter           │
/// │ --leading-delimiter  │ Also put a 0x00 in front (implies --frame)   │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// File to encode, or `-` for stdin.
    pub input: PathBuf,

    /// Write the encoded bytes here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append the 0x00 datagram delimiter.
    #[arg(long)]
    pub frame: bool,

    /// Prefix the frame with a 0x00 as well, flushing a receiver's partial
    /// state.
    #[arg(long)]
    pub leading_delimiter: bool,
}

/// Arguments for `cobs decode`.
///
/// Without `--frames` the whole input is one encoded buffer; a single
/// trailing delimiter is tolerated. With `--frames` the input is a stream
/// of delimited datagrams, each decoded independently; rejected datagrams
/// are reported on stderr and the rest are still written.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Flag             │ Effect                                           │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ --frames         │ Treat input as a 0x00-delimited frame stream     │
/// │ --hex            │ One hex line per frame instead of raw bytes      │
/// │ --max-frame-len  │ Reject frames decoding past N bytes (--frames)   │
/// │ --keep-empty     │ Emit empty frames for back-to-back delimiters    │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// File to decode, or `-` for stdin.
    pub input: PathBuf,

    /// Write the decoded bytes here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as a stream of 0x00-delimited frames.
    #[arg(long)]
    pub frames: bool,

    /// Print each decoded frame as a line of hex.
    #[arg(long)]
    pub hex: bool,

    #[command(flatten)]
    pub framing: FramingArgs,
}

/// Arguments for `cobs inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// File to inspect, or `-` for stdin.
    pub input: PathBuf,

    /// Hex dump each block's literal bytes (16 bytes per line).
    #[arg(long)]
    pub show_hex: bool,
}

/// Arguments for `cobs validate`.
///
/// End of input counts as a final delimiter, so a bare encoded buffer
/// validates as one frame.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// File to validate, or `-` for stdin.
    pub input: PathBuf,

    #[command(flatten)]
    pub framing: FramingArgs,
}

/// Arguments for `cobs stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// File to analyse, or `-` for stdin.
    pub input: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Framing knobs shared by the stream-oriented commands.
#[derive(clap::Args)]
pub struct FramingArgs {
    /// Largest decoded frame accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_LEN)]
    pub max_frame_len: usize,

    /// Report back-to-back delimiters as empty frames instead of skipping them.
    #[arg(long)]
    pub keep_empty: bool,
}

impl FramingArgs {
    /// Map the flags onto a [`FramingConfig`].
    pub fn config(&self) -> FramingConfig {
        FramingConfig {
            max_frame_len: self.max_frame_len,
            skip_empty_frames: !self.keep_empty,
            ..FramingConfig::default()
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`; without
/// either, only errors are logged since commands print their own reports.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── I/O helpers ───────────────────────────────────────────────────────────────

/// Read the whole input, treating `-` as stdin.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("cannot read stdin")?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("cannot read {}", path.display()))
    }
}

/// Write `bytes` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(bytes).context("cannot write to stdout")?;
        handle.flush().context("cannot write to stdout")
    }
}

/// Split input into the encoded segments between delimiters, skipping
/// empty ones.
pub(crate) fn segments(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(|&b| b == FRAME_DELIMITER)
        .filter(|segment| !segment.is_empty())
}

/// Lower-case hex with no separators.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            use std::fmt::Write as _;
            let _ = write!(s, "{b:02x}");
            s
        })
}
