use std::path::PathBuf;

use clap::Parser;
use datatoken::demo;
use datatoken::time::{RngSource, SystemTimeProvider};
use datatoken_core::config::load_config;
use datatoken_core::logging::init_tracing;
use tracing::error;

#[derive(Parser)]
#[command(name = "datatoken")]
#[command(about = "Random timestamp and JSON record demonstration", long_about = None)]
struct Cli {
    /// JSON file to write and read back
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Lower bound, YYYY-MM-DD_HHmm_SS
    #[arg(long)]
    start: Option<String>,
    /// Upper bound (exclusive), YYYY-MM-DD_HHmm_SS
    #[arg(long)]
    end: Option<String>,
    /// Field looked up in the stored file
    #[arg(long)]
    field: Option<String>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Write through a temporary file and rename into place
    #[arg(long)]
    atomic: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(Some(&cfg.log_level)) {
        eprintln!("Error initialising logging: {}", e);
        std::process::exit(1);
    }

    if let Some(file) = cli.file {
        cfg.data_file = file;
    }
    if let Some(start) = cli.start {
        cfg.time_start = start;
    }
    if let Some(end) = cli.end {
        cfg.time_end = end;
    }
    if let Some(field) = cli.field {
        cfg.lookup_field = field;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    cfg.atomic_writes |= cli.atomic;

    let clock = SystemTimeProvider;
    let stdout = std::io::stdout().lock();
    let result = match cfg.seed {
        Some(seed) => demo::run(&cfg, &mut RngSource::seeded(seed), &clock, stdout),
        None => demo::run(&cfg, &mut RngSource::thread(), &clock, stdout),
    };

    if let Err(e) = result {
        error!(error = %format!("{:#}", e), "demonstration aborted");
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
