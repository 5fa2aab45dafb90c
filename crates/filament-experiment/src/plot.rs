//! Histogram rendering for the correlation sample.
//!
//! The plot is illustrative: callers rely on the file being written and the
//! axes being labeled, not on pixel-exact output.

use std::path::Path;

use anyhow::{bail, Context, Result};
use plotters::prelude::*;

/// Bucket `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// Returns `(bin_start, count)` pairs. Values outside the range are skipped
/// and the top edge lands in the last bin.
fn histogram_counts(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<(f64, usize)> {
    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        if value < min || value > max {
            continue;
        }
        let idx = (((value - min) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (0..bins)
        .map(|i| (min + i as f64 * bin_width, counts[i]))
        .collect()
}

/// Render a frequency histogram of `values` to a PNG at `path`.
///
/// Non-finite values are dropped from the plot; the raw CSV keeps them.
/// A sample with zero spread still renders, on a padded range.
pub fn render_histogram(
    values: &[f64],
    bins: usize,
    path: impl AsRef<Path>,
    caption: &str,
) -> Result<()> {
    if bins == 0 {
        bail!("histogram needs at least one bin");
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        bail!("histogram needs at least one finite sample");
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min < 1e-12 {
        min -= 0.5;
        max += 0.5;
    }

    let counts = histogram_counts(&finite, min, max, bins);
    let bin_width = (max - min) / bins as f64;
    let y_max = counts
        .iter()
        .map(|(_, count)| *count as f64)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min..max, 0.0f64..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Correlation dist vs ΔE")
        .y_desc("Frequency")
        .draw()?;

    for (bin_start, count) in counts {
        let x0 = bin_start;
        let x1 = bin_start + bin_width;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, 0.0), (x1, count as f64)],
            BLUE.mix(0.6).filled(),
        )))?;
    }

    root.present()
        .with_context(|| format!("writing histogram to {}", path.as_ref().display()))?;
    Ok(())
}
