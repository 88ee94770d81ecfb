//! CLI for entstat: how random does this file look?

mod input;
mod render;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use entstat_core::{StatsEngine, SymbolMode};

use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "entstat")]
#[command(about = "Entropy, chi-square, mean, Monte Carlo pi and serial correlation of a byte stream")]
#[command(version = entstat_core::VERSION)]
struct Cli {
    /// Input file (reads stdin when omitted or "-")
    file: Option<PathBuf>,

    /// Treat input as a stream of bits, most-significant bit first
    #[arg(short = 'b', long)]
    bits: bool,

    /// Print a table of occurrence counts for every symbol value
    #[arg(short = 'c', long)]
    counts: bool,

    /// Terse comma-separated output
    #[arg(short = 't', long, conflicts_with = "json")]
    terse: bool,

    /// Write the report as JSON
    #[arg(long)]
    json: bool,

    /// Read buffer size in bytes
    #[arg(long, default_value_t = input::DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,
}

impl Cli {
    fn mode(&self) -> SymbolMode {
        if self.bits {
            SymbolMode::Bit
        } else {
            SymbolMode::Byte
        }
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.terse {
            OutputFormat::Terse
        } else {
            OutputFormat::Text
        }
    }
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn run(cli: &Cli) -> std::io::Result<()> {
    let format = cli.format();
    log::debug!(
        "analyzing {} in {} mode, {} output",
        cli.file
            .as_deref()
            .map_or_else(|| "stdin".to_string(), |p| p.display().to_string()),
        cli.mode(),
        format.as_str()
    );

    let mut reader = input::open(cli.file.as_deref())?;
    let mut engine = StatsEngine::new(cli.mode());
    input::pump(&mut reader, &mut engine, cli.chunk_size)?;
    let report = engine.finalize();

    let mut stdout = std::io::stdout().lock();
    render::write_report(&mut stdout, &report, format, cli.counts)?;
    stdout.flush()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("entstat: {e}");
        std::process::exit(1);
    }
}
