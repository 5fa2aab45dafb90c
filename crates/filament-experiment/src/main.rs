//! Entropic filament experiment CLI.
//!
//! Commands:
//! - run: Run the full Monte Carlo experiment and write the result sinks
//! - trial: Run a single seed and print its correlation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use filament_experiment::experiment::{ExperimentRunner, ExperimentRunnerConfig};
use filament_experiment::plot::render_histogram;

/// Generate a timestamped output path from the given path.
/// e.g., "experiment.json" -> "experiment-20260108-010530.json"
fn timestamped_path(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("experiment");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let parent = path.parent().unwrap_or(std::path::Path::new("."));
    parent.join(format!("{}-{}.{}", stem, timestamp, ext))
}

#[derive(Parser)]
#[command(name = "filament-experiment")]
#[command(version)]
#[command(about = "Entropic filament correlation experiments on random graphs")]
struct Cli {
    /// Number of nodes per sampled graph
    #[arg(long, default_value = "100")]
    nodes: usize,

    /// Probability that any unordered node pair carries an edge
    #[arg(long, default_value = "0.05")]
    edge_probability: f64,

    /// Weight multiplier for edges incident to the source node
    #[arg(long, default_value = "5.0")]
    mass: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full experiment and write CSV, histogram and JSON outputs
    Run {
        /// Number of successful trials to collect
        #[arg(long, default_value = "150")]
        samples: usize,

        /// Significance threshold for the two-sided t-test
        #[arg(long, default_value = "0.01")]
        alpha: f64,

        /// Seed of the first trial
        #[arg(long, default_value = "0")]
        seed_start: u64,

        /// Hard cap on attempted trials
        #[arg(long, default_value = "100000")]
        max_attempts: usize,

        /// Number of histogram bins
        #[arg(long, default_value = "15")]
        bins: usize,

        /// Directory for the output files
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// File name of the CSV sample sink, inside the output directory
        #[arg(long, default_value = "entropic_corrs.csv")]
        csv_name: String,

        /// File name of the histogram image, inside the output directory
        #[arg(long, default_value = "entropic_hist.png")]
        hist_name: String,
    },

    /// Run a single trial and print its correlation coefficient
    Trial {
        /// Seed for the trial
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Run {
            samples,
            alpha,
            seed_start,
            max_attempts,
            bins,
            output_dir,
            csv_name,
            hist_name,
        } => {
            let config = ExperimentRunnerConfig {
                node_count: cli.nodes,
                edge_probability: cli.edge_probability,
                mass: cli.mass,
                target_samples: samples,
                alpha,
                seed_start,
                max_attempts,
            };

            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("creating output directory {}", output_dir.display()))?;

            let runner = ExperimentRunner::new(config);
            let result = runner.run()?;

            let csv_path = output_dir.join(&csv_name);
            result.write_csv(&csv_path)?;

            let hist_path = output_dir.join(&hist_name);
            let caption = format!(
                "Entropic Filament (N={}, runs={})",
                result.config.node_count, result.config.target_samples
            );
            render_histogram(&result.correlations, bins, &hist_path, &caption)?;

            let json_path = timestamped_path(&output_dir.join("experiment.json"));
            result.save(&json_path)?;

            println!("\n=== Entropic Filament Experiment ===");
            println!(
                "Samples    = {} (attempts: {}, rejected: {} disconnected, {} singular)",
                result.correlations.len(),
                result.attempts,
                result.rejected_disconnected,
                result.rejected_singular
            );
            println!("Mean r     = {:.4}", result.mean_r);
            println!("t-stat     = {:.3}", result.t_statistic);
            println!("p-value    = {:.5}", result.p_value);
            println!("Verdict    : {}", result.verdict());
            println!("\nResults saved to:");
            println!("  {}", csv_path.display());
            println!("  {}", hist_path.display());
            println!("  {}", json_path.display());
        }

        Commands::Trial { seed } => {
            let config = ExperimentRunnerConfig {
                node_count: cli.nodes,
                edge_probability: cli.edge_probability,
                mass: cli.mass,
                ..Default::default()
            };
            let runner = ExperimentRunner::new(config);
            runner.validate()?;

            match runner.run_trial(seed) {
                Ok(r) => println!("seed {} -> r = {}", seed, r),
                Err(err) => println!("seed {} rejected: {}", seed, err),
            }
        }
    }

    Ok(())
}
