//! wavprobe - print the metadata of a WAV file
//!
//! ```bash
//! wavprobe take_01.wav
//! wavprobe --format json --compact take_01.wav
//! RUST_LOG=wavprobe_lib=trace wavprobe take_01.wav
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use wavprobe_lib::prelude::*;
use wavprobe_lib::{ParseOptions, WavProbe};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "wavprobe")]
#[command(about = "Inspect the chunks of a WAV file and report its metadata", long_about = None)]
struct Args {
    /// WAV file to inspect
    #[arg(value_name = "FILE")]
    file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Compact JSON output (implies --format json)
    #[arg(short, long)]
    compact: bool,

    /// Do not skip the pad byte after odd-sized top-level chunks
    #[arg(long)]
    no_word_align: bool,

    /// Fail on malformed chunk bodies instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log each chunk as it is parsed (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn output_format(&self) -> OutputFormat {
        if self.compact {
            OutputFormat::Json
        } else {
            self.format.clone()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> R<()> {
    let options = ParseOptions::default()
        .with_word_align(!args.no_word_align)
        .with_strict(args.strict);

    let report = WavProbe::new(&args.file)?
        .with_options(options)
        .parse()?
        .report()?;

    match args.output_format() {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => {
            let json = if args.compact {
                report.to_json_compact()?
            } else {
                report.to_json()?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
