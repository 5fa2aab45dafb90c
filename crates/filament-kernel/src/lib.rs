//! Filament Kernel: the numeric pipeline of the entropic filament experiment.
//!
//! One trial runs sample → solve → correlate:
//! - sample a random Erdős–Rényi graph and require it to be connected;
//! - pin the field to 1.0 at the source node and solve the Dirichlet-reduced
//!   weighted Laplacian system for the rest;
//! - correlate hop distances from the source with the field drop ΔE = 1 − E.
//!
//! The harness crate repeats trials over successive seeds and runs the
//! one-sample t-test from [`stats`] on the collected coefficients.

pub mod correlation;
pub mod error;
pub mod field;
pub mod graph;
pub mod sampler;
pub mod stats;

pub use correlation::{correlate, pearson};
pub use error::TrialError;
pub use field::{SOURCE, solve_field, weighted_laplacian};
pub use graph::Graph;
pub use sampler::{GraphSampler, SamplerConfig};
