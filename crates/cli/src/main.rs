//! Cache simulator CLI.
//!
//! Replays a valgrind memory trace against a set-associative LRU cache and
//! prints the resulting totals. It performs:
//! 1. **Configuration:** Built-in defaults, then an optional JSON file, then `-s/-E/-b/-v` flags.
//! 2. **Simulation:** Every load and store accesses the cache once, every modify twice.
//! 3. **Reporting:** `hits:<h> misses:<m> evictions:<e>` on stdout (or JSON with `--json`),
//!    and optionally the space-separated results file.
//!
//! Diagnostics and logs go to stderr; set `RUST_LOG=csim_core=trace` to see every access.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use csim_core::common::SimError;
use csim_core::config::Config;
use csim_core::{Cache, CacheStats, TraceRunner};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a valgrind memory trace against an LRU set-associative cache and report hits, misses, and evictions.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 1 -E 2 -b 4 -t traces/dave.trace\n  csim --config cache.json -t traces/trans.trace --json"
)]
struct Cli {
    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', required_unless_present = "config")]
    set_index_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', required_unless_present = "config")]
    associativity: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', required_unless_present = "config")]
    block_offset_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't')]
    trace: PathBuf,

    /// Print each trace record with its hit/miss/eviction outcome.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the totals as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Also write "<hits> <misses> <evictions>" to this file.
    #[arg(long)]
    results: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let mut out = BufWriter::new(io::stdout().lock());
    let result = run(&cli, &mut out).and_then(|()| out.flush().map_err(SimError::from));
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Layers the JSON config file (if any) and the command-line flags over the defaults.
fn resolve_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(s) = cli.set_index_bits {
        config.cache.set_index_bits = s;
    }
    if let Some(e) = cli.associativity {
        config.cache.associativity = e;
    }
    if let Some(b) = cli.block_offset_bits {
        config.cache.block_offset_bits = b;
    }
    config.general.verbose |= cli.verbose;

    Ok(config)
}

/// Builds the cache, replays the trace, and writes the report to `out`.
///
/// The results file is written before the report, so a failed run never
/// leaves counts on `out`.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), SimError> {
    let config = resolve_config(cli)?;
    let geometry = config.cache.geometry()?;
    info!(
        s = geometry.set_index_bits(),
        e = geometry.associativity(),
        b = geometry.block_offset_bits(),
        trace = %cli.trace.display(),
        "starting simulation"
    );

    let mut runner = TraceRunner::new(Cache::new(geometry), config.general.verbose);
    let stats = runner.run_file(&cli.trace, out)?;

    if let Some(path) = &cli.results {
        stats.write_results(path)?;
    }
    report(&stats, cli.json, out)?;
    Ok(())
}

/// Writes the final totals in the selected format.
fn report<W: Write>(stats: &CacheStats, json: bool, out: &mut W) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, stats)?;
        writeln!(out)
    } else {
        writeln!(out, "{stats}")
    }
}
