/// `ccnb` command-line tool: render binary ccnb element trees as markup.
///
/// # Command overview
///
/// ```text
/// ccnb <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Render each input as markup text
///   validate   Check each input decodes cleanly, discarding the output
///   selftest   Decode the built-in sample message and check the result
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log verbosity (repeat for more: -v info, -vv debug, -vvv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (I/O failure, malformed input, etc.)     |
///
/// Logs and errors go to stderr so stdout carries only the decoded text.
use std::path::PathBuf;
use std::process;

use ccnb_decoder::{DEFAULT_CHUNK_SIZE, DecoderConfig};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_selftest;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "ccnb", version, about = "Decode ccnb binary element trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity; may be repeated.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Render each input as markup text.
    Decode(DecodeArgs),
    /// Check that each input decodes cleanly.
    Validate(ValidateArgs),
    /// Decode the built-in sample message and compare with the known rendering.
    Selftest,
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Resource limits shared by `decode` and `validate`.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────────┐
/// │ Flag             │ Effect                                            │
/// ├──────────────────┼───────────────────────────────────────────────────┤
/// │ --max-depth N    │ fail when more than N elements/attributes nest    │
/// │ --max-name-bytes │ fail when open names exceed this many bytes       │
/// │ --chunk-size N   │ feed the decoder N bytes at a time                │
/// └──────────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum nesting depth (unbounded when omitted).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum combined length of open names in bytes (unbounded when omitted).
    #[arg(long)]
    pub max_name_bytes: Option<usize>,

    /// Bytes handed to the decoder per call.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl LimitArgs {
    pub fn config(&self) -> DecoderConfig {
        DecoderConfig {
            max_depth: self.max_depth,
            max_name_bytes: self.max_name_bytes,
        }
    }
}

/// Arguments for `ccnb decode`.
///
/// Each input is decoded as one complete stream and its rendering is
/// written followed by a newline. Inputs are processed in order and the
/// first failure stops the command.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Input files; `-` reads stdin. Defaults to stdin.
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Write rendered output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `ccnb validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Input files; `-` reads stdin. Defaults to stdin.
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub limits: LimitArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Selftest => cmd_selftest::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
