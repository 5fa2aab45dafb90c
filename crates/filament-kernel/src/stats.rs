//! One-sample t-test pieces for the aggregated correlation sample.
//!
//! The experiment tests the null hypothesis that the true correlation is
//! zero: t = r̄·sqrt((n−1)/(1−r̄²)) against Student's t with n−1 degrees of
//! freedom, two-sided.

use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

/// Degrees of freedom passed to the t-distribution were not usable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("degrees of freedom must be positive and finite, got {0}")]
pub struct InvalidDegreesOfFreedom(pub f64);

/// Arithmetic mean of the sample; NaN when the sample is empty.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// t-statistic for a mean correlation `mean_r` over `n` samples.
///
/// Infinite when |r̄| reaches 1 (a perfectly correlated sample), NaN when
/// the mean itself is NaN or `n < 2`: a lone sample carries no dispersion
/// to test against.
pub fn t_statistic(mean_r: f64, n: usize) -> f64 {
    if n < 2 {
        return f64::NAN;
    }
    mean_r * ((n as f64 - 1.0) / (1.0 - mean_r * mean_r)).sqrt()
}

/// Two-sided p-value of `t_stat` under Student's t with `dof` degrees of
/// freedom.
///
/// A NaN `t_stat` propagates to a NaN p-value; an unusable `dof` (zero,
/// negative, NaN) is a typed error since it means the sample itself was too
/// small to test.
pub fn two_sided_p_value(t_stat: f64, dof: f64) -> Result<f64, InvalidDegreesOfFreedom> {
    let distribution =
        StudentsT::new(0.0, 1.0, dof).map_err(|_| InvalidDegreesOfFreedom(dof))?;
    Ok(2.0 * (1.0 - distribution.cdf(t_stat.abs())))
}
