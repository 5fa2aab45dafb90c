//! Trial failure taxonomy: the recoverable conditions of the sampling loop.

use thiserror::Error;

/// A recoverable per-trial failure.
///
/// Both variants mean "discard this seed and move on to the next one"; the
/// sampling loop counts them but never reports them as errors. Anything else
/// that goes wrong during a run (I/O, invalid configuration, exhausted
/// attempt budget) is catastrophic and travels through the caller's error
/// type instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrialError {
    /// The sampled graph failed the connectivity check.
    #[error("sampled graph is not connected")]
    DisconnectedGraph,
    /// The Dirichlet-reduced Laplacian has no inverse.
    #[error("reduced Laplacian system is singular")]
    SingularSystem,
}
