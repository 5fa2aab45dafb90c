//! Results collection and output for filament experiments.
//!
//! Captures everything a run produces:
//! - The raw correlation sample, in collection order
//! - Attempt and rejection accounting
//! - The hypothesis-test summary (mean, t, p, verdict)
//!
//! Sinks: single-column CSV for the sample, pretty JSON for the whole
//! result record.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration echo stored with every result artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of nodes per sampled graph
    pub node_count: usize,
    /// Probability that any unordered node pair carries an edge
    pub edge_probability: f64,
    /// Weight multiplier for edges incident to the source node
    pub mass: f64,
    /// Number of successful trials collected
    pub target_samples: usize,
    /// Significance threshold for the two-sided t-test
    pub alpha: f64,
    /// Seed of the first trial
    pub seed_start: u64,
    /// Hard cap on attempted trials
    pub max_attempts: usize,
}

/// Results from a completed experiment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Experiment configuration
    pub config: ExperimentConfig,
    /// Completion time
    pub completed_at: DateTime<Utc>,
    /// Wall-clock duration of the run in seconds
    pub elapsed_secs: f64,
    /// Correlation coefficients in collection order; length equals
    /// `config.target_samples`
    pub correlations: Vec<f64>,
    /// Seeds attempted, successful or not
    pub attempts: usize,
    /// Trials rejected by the connectivity check
    pub rejected_disconnected: usize,
    /// Trials rejected by a singular reduced system
    pub rejected_singular: usize,
    /// Sample mean of the correlations
    pub mean_r: f64,
    /// t-statistic against zero correlation; infinite when the sample is
    /// perfectly correlated
    #[serde(with = "non_finite")]
    pub t_statistic: f64,
    /// Two-sided p-value at `target_samples − 1` degrees of freedom
    pub p_value: f64,
    /// Whether the p-value fell below `config.alpha`
    pub significant: bool,
}

/// JSON numbers cannot carry ±∞ or NaN; `serde_json` flattens them to
/// `null`, which [`ExperimentResult::load`] would then refuse. A two-node
/// run collects r = 1 on every trial and drives t to +∞, so the statistic
/// is stored as its display string (`"inf"`, `"-inf"`, `"NaN"`) whenever it
/// is not finite, and parsed back from either form on load.
mod non_finite {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Encoded::deserialize(deserializer)? {
            Encoded::Number(value) => Ok(value),
            Encoded::Text(text) => text.parse().map_err(|_| {
                de::Error::invalid_value(
                    Unexpected::Str(&text),
                    &"a float or one of \"inf\", \"-inf\", \"NaN\"",
                )
            }),
        }
    }
}

impl ExperimentResult {
    /// Save the result as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("writing result to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading result from {}", path.as_ref().display()))?;
        let result = serde_json::from_str(&json)?;
        Ok(result)
    }

    /// Write the raw sample as a single-column CSV with header `r`.
    ///
    /// One row per successful trial, in collection order. Values use
    /// shortest round-trip formatting, so parsing a row back yields the
    /// exact coefficient that was collected.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut csv = String::from("r\n");
        for r in &self.correlations {
            csv.push_str(&format!("{}\n", r));
        }
        std::fs::write(path.as_ref(), csv)
            .with_context(|| format!("writing sample CSV to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Natural-language verdict at the configured threshold.
    pub fn verdict(&self) -> String {
        let confidence = (1.0 - self.config.alpha) * 100.0;
        if self.significant {
            format!(
                "correlation effect confirmed at the {:.0}% level (p < {})",
                confidence, self.config.alpha
            )
        } else {
            format!(
                "correlation effect NOT confirmed at the {:.0}% level (p >= {})",
                confidence, self.config.alpha
            )
        }
    }
}
