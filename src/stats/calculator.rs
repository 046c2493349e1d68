//! Statistics Calculator Module
//! Histogram binning and kernel density estimates for the win-margin charts.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Points sampled along a density curve.
pub const DENSITY_GRID_POINTS: usize = 200;

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left, right, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Handles the numeric side of distribution charts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Bin `values` into `bins` equal-width bins spanning the sample range.
    ///
    /// The last bin is closed on the right. A zero-width range is widened by
    /// 0.5 on each side.
    pub fn histogram(values: &[f64], bins: usize) -> Histogram {
        if values.is_empty() || bins == 0 {
            return Histogram {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    /// Scott's rule bandwidth: `sd * n^(-1/5)`.
    pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let sd = values.iter().std_dev();
        if !sd.is_finite() || sd <= 0.0 {
            return None;
        }
        Some(sd * (values.len() as f64).powf(-0.2))
    }

    /// Gaussian KDE over the sample range, scaled so it overlays a count
    /// histogram with the given bin width.
    ///
    /// Returns `None` when the sample has fewer than two points or no spread.
    pub fn density_curve(values: &[f64], bin_width: f64) -> Option<Vec<[f64; 2]>> {
        let bandwidth = Self::scott_bandwidth(values)?;
        let kernel = Normal::new(0.0, 1.0).ok()?;

        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n = values.len() as f64;
        let scale = n * bin_width;
        let step = (hi - lo) / (DENSITY_GRID_POINTS - 1) as f64;

        let curve = (0..DENSITY_GRID_POINTS)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = values
                    .iter()
                    .map(|&xi| kernel.pdf((x - xi) / bandwidth))
                    .sum::<f64>()
                    / (n * bandwidth);
                [x, density * scale]
            })
            .collect();

        Some(curve)
    }
}
