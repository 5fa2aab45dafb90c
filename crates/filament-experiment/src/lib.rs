//! Entropic filament experiment harness.
//!
//! Drives the Monte Carlo loop from `filament-kernel`: collects correlation
//! samples over seeded random graphs, runs the one-sample t-test against
//! zero correlation, and writes the CSV, histogram and JSON sinks.

pub mod experiment;
pub mod plot;
pub mod results;

pub use experiment::{ExperimentRunner, ExperimentRunnerConfig};
pub use results::{ExperimentConfig, ExperimentResult};
