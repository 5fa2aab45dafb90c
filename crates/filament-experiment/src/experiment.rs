//! Experiment runner for the entropic filament Monte Carlo loop.
//!
//! Orchestrates the full lifecycle:
//! 1. Walk seeds upward from `seed_start`
//! 2. Run sample → solve → correlate for each seed
//! 3. Silently discard disconnected and singular trials
//! 4. Stop at the target sample count and run the one-sample t-test

use std::time::Instant;

use anyhow::{bail, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use filament_kernel::{correlate, solve_field, stats, GraphSampler, SamplerConfig, TrialError};

use crate::results::{ExperimentConfig, ExperimentResult};

/// Configuration for the experiment runner.
#[derive(Debug, Clone)]
pub struct ExperimentRunnerConfig {
    /// Number of nodes per sampled graph
    pub node_count: usize,
    /// Probability that any unordered node pair carries an edge
    pub edge_probability: f64,
    /// Weight multiplier for edges incident to the source node
    pub mass: f64,
    /// Number of successful trials to collect
    pub target_samples: usize,
    /// Significance threshold for the two-sided t-test
    pub alpha: f64,
    /// Seed of the first trial; each attempt increments by one
    pub seed_start: u64,
    /// Hard cap on attempted trials before the run is abandoned
    pub max_attempts: usize,
}

impl Default for ExperimentRunnerConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            edge_probability: 0.05,
            mass: 5.0,
            target_samples: 150,
            alpha: 0.01,
            seed_start: 0,
            max_attempts: 100_000,
        }
    }
}

/// Runs the sampling loop and the hypothesis test.
pub struct ExperimentRunner {
    config: ExperimentRunnerConfig,
}

impl ExperimentRunner {
    /// Create a new runner with the given configuration.
    pub fn new(config: ExperimentRunnerConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration.
    pub fn config(&self) -> &ExperimentRunnerConfig {
        &self.config
    }

    /// Validate configuration bounds.
    ///
    /// Called by [`run`](Self::run); callers driving [`run_trial`](Self::run_trial)
    /// directly should validate first.
    pub fn validate(&self) -> Result<()> {
        let c = &self.config;
        if c.node_count < 2 {
            bail!("node_count must be at least 2, got {}", c.node_count);
        }
        if !(0.0..=1.0).contains(&c.edge_probability) {
            bail!(
                "edge_probability must lie in [0, 1], got {}",
                c.edge_probability
            );
        }
        if !c.mass.is_finite() || c.mass <= 0.0 {
            bail!("mass must be a positive finite weight, got {}", c.mass);
        }
        if c.target_samples < 2 {
            bail!(
                "target_samples must be at least 2 for a t-test, got {}",
                c.target_samples
            );
        }
        if !(c.alpha > 0.0 && c.alpha < 1.0) {
            bail!("alpha must lie strictly inside (0, 1), got {}", c.alpha);
        }
        if c.max_attempts < c.target_samples {
            bail!(
                "max_attempts ({}) cannot reach target_samples ({})",
                c.max_attempts,
                c.target_samples
            );
        }
        Ok(())
    }

    /// Run one trial for `seed`: sample a graph, solve the field, correlate.
    ///
    /// Exposed for the single-trial diagnostic command; [`run`](Self::run)
    /// loops over it with successive seeds.
    pub fn run_trial(&self, seed: u64) -> Result<f64, TrialError> {
        let sampler = GraphSampler::new(SamplerConfig {
            node_count: self.config.node_count,
            edge_probability: self.config.edge_probability,
        });
        let graph = sampler.sample(seed)?;
        let field = solve_field(&graph, self.config.mass)?;
        Ok(correlate(&graph, &field))
    }

    /// Run the full experiment.
    ///
    /// Walks seeds upward from `seed_start` until `target_samples` trials
    /// have succeeded, then computes the t-test over the collected sample.
    /// Rejected trials are counted but never surfaced individually;
    /// exhausting `max_attempts` first is a fatal error.
    pub fn run(&self) -> Result<ExperimentResult> {
        self.validate()?;
        let start = Instant::now();
        let c = &self.config;

        info!(
            nodes = c.node_count,
            edge_probability = c.edge_probability,
            mass = c.mass,
            target = c.target_samples,
            seed_start = c.seed_start,
            "Starting experiment"
        );

        let mut correlations = Vec::with_capacity(c.target_samples);
        let mut attempts = 0usize;
        let mut rejected_disconnected = 0usize;
        let mut rejected_singular = 0usize;
        let mut seed = c.seed_start;

        while correlations.len() < c.target_samples {
            if attempts >= c.max_attempts {
                bail!(
                    "gave up after {} attempts with {} of {} samples collected",
                    attempts,
                    correlations.len(),
                    c.target_samples
                );
            }
            attempts += 1;
            match self.run_trial(seed) {
                Ok(r) => {
                    if !r.is_finite() {
                        warn!(seed = seed, r = r, "Trial produced a non-finite correlation");
                    }
                    debug!(seed = seed, r = r, "Trial succeeded");
                    correlations.push(r);
                }
                Err(TrialError::DisconnectedGraph) => {
                    debug!(seed = seed, "Trial rejected: disconnected graph");
                    rejected_disconnected += 1;
                }
                Err(TrialError::SingularSystem) => {
                    debug!(seed = seed, "Trial rejected: singular reduced system");
                    rejected_singular += 1;
                }
            }
            seed += 1;
        }

        let mean_r = stats::mean(&correlations);
        let t_statistic = stats::t_statistic(mean_r, correlations.len());
        let dof = (correlations.len() - 1) as f64;
        let p_value = stats::two_sided_p_value(t_statistic, dof)?;
        let significant = p_value < c.alpha;

        info!(
            samples = correlations.len(),
            attempts = attempts,
            rejected_disconnected = rejected_disconnected,
            rejected_singular = rejected_singular,
            mean_r = mean_r,
            t_statistic = t_statistic,
            p_value = p_value,
            significant = significant,
            "Experiment complete"
        );

        Ok(ExperimentResult {
            config: ExperimentConfig {
                node_count: c.node_count,
                edge_probability: c.edge_probability,
                mass: c.mass,
                target_samples: c.target_samples,
                alpha: c.alpha,
                seed_start: c.seed_start,
                max_attempts: c.max_attempts,
            },
            completed_at: Utc::now(),
            elapsed_secs: start.elapsed().as_secs_f64(),
            correlations,
            attempts,
            rejected_disconnected,
            rejected_singular,
            mean_r,
            t_statistic,
            p_value,
            significant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ExperimentRunnerConfig {
        ExperimentRunnerConfig {
            node_count: 10,
            edge_probability: 0.5,
            mass: 5.0,
            target_samples: 5,
            alpha: 0.01,
            seed_start: 0,
            max_attempts: 10_000,
        }
    }

    #[test]
    fn test_run_collects_exactly_target_samples() {
        let runner = ExperimentRunner::new(small_config());
        let result = runner.run().unwrap();

        assert_eq!(result.correlations.len(), 5);
        assert!(result.attempts >= 5);
    }

    #[test]
    fn test_run_is_deterministic() {
        let first = ExperimentRunner::new(small_config()).run().unwrap();
        let second = ExperimentRunner::new(small_config()).run().unwrap();

        assert_eq!(first.correlations, second.correlations);
        assert_eq!(first.attempts, second.attempts);
        assert_eq!(first.mean_r, second.mean_r);
        assert_eq!(first.t_statistic, second.t_statistic);
        assert_eq!(first.p_value, second.p_value);
    }

    #[test]
    fn test_attempts_account_for_every_rejection() {
        let mut config = small_config();
        config.edge_probability = 0.2;
        let result = ExperimentRunner::new(config).run().unwrap();

        assert_eq!(
            result.attempts,
            result.correlations.len() + result.rejected_disconnected + result.rejected_singular
        );
    }

    #[test]
    fn test_first_sample_matches_standalone_trial() {
        let runner = ExperimentRunner::new(small_config());
        let result = runner.run().unwrap();

        let mut seed = runner.config().seed_start;
        let first = loop {
            match runner.run_trial(seed) {
                Ok(r) => break r,
                Err(_) => seed += 1,
            }
        };
        assert_eq!(result.correlations[0], first);
    }

    #[test]
    fn test_significance_flag_matches_p_value() {
        let result = ExperimentRunner::new(small_config()).run().unwrap();
        assert_eq!(result.significant, result.p_value < 0.01);
    }

    #[test]
    fn test_mean_matches_recomputed_sample_mean() {
        let result = ExperimentRunner::new(small_config()).run().unwrap();
        let recomputed =
            result.correlations.iter().sum::<f64>() / result.correlations.len() as f64;
        assert!((result.mean_r - recomputed).abs() < 1e-12);
    }

    #[test]
    fn test_two_node_complete_graph_yields_perfect_correlation() {
        let config = ExperimentRunnerConfig {
            node_count: 2,
            edge_probability: 1.0,
            mass: 5.0,
            target_samples: 3,
            alpha: 0.01,
            seed_start: 0,
            max_attempts: 100,
        };
        let result = ExperimentRunner::new(config).run().unwrap();

        for r in &result.correlations {
            assert_eq!(*r, 1.0, "two-node trial must correlate perfectly");
        }
        assert!(result.significant);
    }

    #[test]
    fn test_exhausted_attempt_budget_is_fatal() {
        let config = ExperimentRunnerConfig {
            node_count: 10,
            edge_probability: 0.0,
            mass: 5.0,
            target_samples: 2,
            alpha: 0.01,
            seed_start: 0,
            max_attempts: 10,
        };
        let err = ExperimentRunner::new(config).run().unwrap_err();
        assert!(err.to_string().contains("gave up after 10 attempts"));
    }

    #[test]
    fn test_invalid_configurations_are_rejected() {
        let cases = [
            ExperimentRunnerConfig {
                node_count: 1,
                ..small_config()
            },
            ExperimentRunnerConfig {
                edge_probability: 1.5,
                ..small_config()
            },
            ExperimentRunnerConfig {
                mass: 0.0,
                ..small_config()
            },
            ExperimentRunnerConfig {
                mass: f64::NAN,
                ..small_config()
            },
            ExperimentRunnerConfig {
                target_samples: 1,
                ..small_config()
            },
            ExperimentRunnerConfig {
                alpha: 0.0,
                ..small_config()
            },
            ExperimentRunnerConfig {
                alpha: 1.0,
                ..small_config()
            },
            ExperimentRunnerConfig {
                max_attempts: 2,
                ..small_config()
            },
        ];
        for config in cases {
            assert!(
                ExperimentRunner::new(config).run().is_err(),
                "invalid configuration must not run"
            );
        }
    }

    #[test]
    fn test_default_config_matches_reference_setup() {
        let config = ExperimentRunnerConfig::default();
        assert_eq!(config.node_count, 100);
        assert_eq!(config.edge_probability, 0.05);
        assert_eq!(config.mass, 5.0);
        assert_eq!(config.target_samples, 150);
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.seed_start, 0);
    }
}
