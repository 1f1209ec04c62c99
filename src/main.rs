use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use std::path::PathBuf;

use lyfsim::{load_tables, rng, Session, MAX_BATCH, MIN_BATCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text life summaries
    Text,
    /// The session's records as a JSON array
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lyfsim", version)]
#[command(about = "LyfSim - Life Simulator: prints randomly generated life stories")]
struct Args {
    /// Number of lives to simulate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible lives (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding occupation_income.csv and optional life_tables.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Also write the rendered session to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !(MIN_BATCH..=MAX_BATCH).contains(&args.count) {
        anyhow::bail!(
            "--count must be between {} and {}, got {}",
            MIN_BATCH,
            MAX_BATCH,
            args.count
        );
    }

    if args.format == OutputFormat::Text {
        println!("🎲 Starting Life Simulation (CLI)...");
        println!("{}", "=".repeat(50));
    }

    let tables = match load_tables(&args.data_dir) {
        Ok(tables) => tables,
        Err(err) if err.is_data_fault() => {
            return Err(err).with_context(|| {
                format!(
                    "Table data in {} is invalid; fix it or delete the file to restore defaults",
                    args.data_dir.display()
                )
            });
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to load tables from {}", args.data_dir.display()));
        }
    };

    let mut source = match args.seed {
        Some(seed) => {
            debug!("Using seed {}", seed);
            rng::seeded(seed)
        }
        None => rng::from_entropy(),
    };

    let mut session = Session::new();
    session
        .run(&mut source, &tables, args.count)
        .context("Failed to simulate lives")?;

    match args.format {
        OutputFormat::Text => println!("{}", session.render()),
        OutputFormat::Json => println!("{}", session.to_json()?),
    }

    if let Some(path) = &args.save {
        session
            .save(path)
            .with_context(|| format!("Failed to save session to {}", path.display()))?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
