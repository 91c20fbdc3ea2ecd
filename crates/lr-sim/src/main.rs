//! LuckyReels batch simulator
//!
//! Usage:
//!   lr-sim                              - 100 sessions x 1000 spins, random seed
//!   lr-sim -n 500 -s 5000 --seed 42     - seeded run
//!   lr-sim -c sim.yaml --text           - config file, plain-text report
//!   lr-sim --bet max -o report.json     - max bets, report written to file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use lr_sim::{BetStrategy, SimConfig, Simulator};

#[derive(Parser)]
#[command(name = "lr-sim", about = "LuckyReels batch simulator")]
struct Cli {
    /// Config file (.json, .yaml or .yml); flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sessions
    #[arg(short = 'n', long)]
    sessions: Option<usize>,

    /// Spins per session
    #[arg(short, long)]
    spins: Option<u64>,

    /// Base seed
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to the CPU count)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Bet strategy for regular spins
    #[arg(long, value_enum)]
    bet: Option<BetArg>,

    /// Bet amount for the fixed strategy
    #[arg(long, default_value_t = 1)]
    amount: u64,

    /// Gamble rounds to risk before collecting
    #[arg(short, long)]
    gamble_rounds: Option<u32>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Plain-text report instead of JSON
    #[arg(long)]
    text: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BetArg {
    Min,
    Max,
    Fixed,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let simulator = Simulator::new(config).context("Invalid simulation config")?;
    let report = simulator.run().context("Simulation failed")?;

    let rendered = if cli.text {
        report.to_text()
    } else {
        report.to_json().context("Failed to serialize report")?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    if let Some(sessions) = cli.sessions {
        config = config.with_sessions(sessions);
    }
    if let Some(spins) = cli.spins {
        config = config.with_spins(spins);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    if let Some(bet) = cli.bet {
        config = config.with_bet(match bet {
            BetArg::Min => BetStrategy::Minimum,
            BetArg::Max => BetStrategy::Maximum,
            BetArg::Fixed => BetStrategy::Fixed(cli.amount),
        });
    }
    if let Some(rounds) = cli.gamble_rounds {
        config = config.with_gamble_rounds(rounds);
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let config = match extension.as_str() {
        "json" => SimConfig::from_json(&source)?,
        "yaml" | "yml" => SimConfig::from_yaml(&source)?,
        other => bail!("Unsupported config extension '{}' (use json, yaml or yml)", other),
    };
    Ok(config)
}
