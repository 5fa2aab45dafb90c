//! Distance/field correlation: hop counts against the field drop ΔE = 1 − E.

use nalgebra::DVector;

use crate::field::SOURCE;
use crate::graph::Graph;

/// Pearson product-moment correlation between two equal-length samples.
///
/// The result is clamped to [−1, 1]; exactly collinear inputs can otherwise
/// overshoot by an ulp of rounding error, which would push 1 − r² below
/// zero downstream. Returns NaN when the inputs are empty, differ in
/// length, or either has zero variance. The degenerate case is deliberately
/// propagated as NaN instead of an error; callers that must not see NaN are
/// responsible for keeping their inputs non-degenerate.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() || xs.len() != ys.len() {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    // Zero variance makes this 0/0, i.e. NaN, and clamp keeps NaN as NaN.
    (covariance / (variance_x * variance_y).sqrt()).clamp(-1.0, 1.0)
}

/// Correlation between hop distances from the source and the field drop.
///
/// Builds the distance vector (breadth-first search from [`SOURCE`]) and
/// ΔE = 1 − E over all N nodes, source included, and returns their Pearson
/// correlation. Unreachable nodes contribute NaN distances, so a
/// disconnected graph yields NaN rather than a misleading coefficient; the
/// sampler's connectivity check keeps that case out of the pipeline.
pub fn correlate(graph: &Graph, field: &DVector<f64>) -> f64 {
    let distances: Vec<f64> = graph
        .hop_distances(SOURCE)
        .into_iter()
        .map(|d| d.map_or(f64::NAN, |hops| hops as f64))
        .collect();
    let field_drop: Vec<f64> = field.iter().map(|e| 1.0 - e).collect();
    pearson(&distances, &field_drop)
}
