// In app/src/main.rs

use anyhow::{Context, Result};
use allocation::fixed_fraction::FixedFractionAllocator;
use app_config::Settings;
use clap::{Parser, Subcommand};
use runner::{print_report, DateWindow, UniverseRunner};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strategies::ema_cross::EmaCrossUniverse;
use strategies::factory::create_universe_selection;
use strategies::types::EmaCrossSettings;
use tracing_subscriber::prelude::*;
mod samples;
use crate::samples::load_samples;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Selects a trading universe of up-trending symbols using a fast/slow EMA cross.")]
struct Cli {
    /// Directory holding `base.toml` and the environment overlays.
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replays a sample file tick by tick and reports universe changes.
    Run {
        /// JSON Lines file with one `{symbol, time, price}` object per line.
        #[arg(short, long)]
        samples: PathBuf,
    },

    /// Feeds a sample file through the trend scorers and prints every symbol's final state.
    Scores {
        /// JSON Lines file with one `{symbol, time, price}` object per line.
        #[arg(short, long)]
        samples: PathBuf,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings_from(&cli.config_dir)
        .with_context(|| format!("Failed to load settings from {}", cli.config_dir.display()))?;

    // --- Tracing Setup ---
    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting universe selection");

    match cli.command {
        Commands::Run { samples } => handle_run(&settings, &samples)?,
        Commands::Scores { samples } => handle_scores(&settings, &samples)?,
    }

    tracing::info!("Finished successfully.");

    Ok(())
}

/// Handles the logic for the `run` subcommand.
fn handle_run(settings: &Settings, samples_path: &Path) -> Result<()> {
    // --- 1. Instantiate All Components ---
    let strategy = create_universe_selection(&settings.universe)?;
    let allocator = FixedFractionAllocator::new(settings.allocation.clone())?;

    let mut runner = UniverseRunner::new(strategy, Box::new(allocator));
    match (settings.run.start_date, settings.run.end_date) {
        (Some(start), Some(end)) => {
            tracing::info!(%start, %end, "Restricting run to date window.");
            runner = runner.with_window(DateWindow::new(start, end)?);
        }
        (None, None) => {}
        _ => anyhow::bail!("run.start_date and run.end_date must be set together."),
    }

    // --- 2. Load Data ---
    let samples = load_samples(samples_path)?;

    // --- 3. Run and Report ---
    let report = runner.run(samples)?;
    print_report(&report);

    Ok(())
}

/// Handles the logic for the `scores` subcommand.
fn handle_scores(settings: &Settings, samples_path: &Path) -> Result<()> {
    if settings.universe.name != "ema_cross" {
        anyhow::bail!("Scores are only available for the ema_cross universe, not '{}'.", settings.universe.name);
    }
    let ema_settings: EmaCrossSettings = settings.universe.params.clone().try_into()?;
    let mut selector = EmaCrossUniverse::new(ema_settings)?;

    let mut samples = load_samples(samples_path)?;
    samples.sort_by_key(|s| s.time);
    let mut rejected = 0usize;
    for sample in &samples {
        if let Err(e) = selector.observe(sample) {
            tracing::warn!(symbol = %sample.symbol, error = %e, "Skipping sample.");
            rejected += 1;
        }
    }

    println!("\n--- Trend Scores ({} symbols, {} samples rejected) ---", selector.tracked_symbols(), rejected);
    println!("{:<12} {:>8} {:>7} {:>14} {:>14} {:>10}", "Symbol", "Samples", "Uptrend", "Fast EMA", "Slow EMA", "Scale");
    for scorer in selector.scores() {
        println!(
            "{:<12} {:>8} {:>7} {:>14.4} {:>14.4} {:>10.4}",
            scorer.symbol(),
            scorer.slow().samples(),
            if scorer.is_uptrend() { "yes" } else { "no" },
            scorer.fast().current(),
            scorer.slow().current(),
            scorer.scale(),
        );
    }

    Ok(())
}
