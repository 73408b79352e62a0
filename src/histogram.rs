//! Fluctuation statistics for the Ehrenfest urn
//!
//! Counts fluctuation samples into fixed unit-width bins spanning `[-n, n]`
//! and keeps exact integer moments so the Gaussian fit never rescans history.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Density-normalized histogram snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityHistogram {
    /// Bin edges, one more than the number of bins
    pub edges: Vec<f64>,
    /// Density per bin; sums to 1 over unit-width bins once a sample exists
    pub densities: Vec<f64>,
}

impl DensityHistogram {
    /// Sum of density times bin width
    pub fn area(&self) -> f64 {
        self.edges
            .windows(2)
            .zip(self.densities.iter())
            .map(|(edge, &d)| (edge[1] - edge[0]) * d)
            .sum()
    }
}

/// Incrementally maintained histogram of `N_B - N_A`
#[derive(Debug, Clone)]
pub struct FluctuationHistogram {
    n: i64,
    counts: Vec<u64>,
    total: u64,
    sum: i128,
    sum_sq: i128,
}

impl FluctuationHistogram {
    /// Create an empty histogram for `n` particles (`2n` bins)
    pub fn new(n: usize) -> Self {
        Self {
            n: n as i64,
            counts: vec![0; 2 * n],
            total: 0,
            sum: 0,
            sum_sq: 0,
        }
    }

    /// Bin holding `value`. Bins are half-open except the last, which also
    /// holds the upper edge `n`.
    pub fn bin_index(&self, value: i64) -> Option<usize> {
        if self.counts.is_empty() || value < -self.n || value > self.n {
            return None;
        }
        let idx = (value + self.n) as usize;
        Some(idx.min(self.counts.len() - 1))
    }

    /// Add one sample; returns false (and ignores it) when out of range
    pub fn record(&mut self, value: i64) -> bool {
        let Some(idx) = self.bin_index(value) else {
            return false;
        };
        self.counts[idx] += 1;
        self.total += 1;
        self.sum += value as i128;
        self.sum_sq += (value as i128) * (value as i128);
        true
    }

    /// Number of samples recorded
    pub fn len(&self) -> usize {
        self.total as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn edges(&self) -> Vec<f64> {
        (-self.n..=self.n).map(|e| e as f64).collect()
    }

    /// Count over (total * bin width); all zeros before the first sample
    pub fn densities(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = self.total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    pub fn snapshot(&self) -> DensityHistogram {
        DensityHistogram {
            edges: self.edges(),
            densities: self.densities(),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.sum as f64 / self.total as f64)
    }

    /// Population standard deviation (divides by N)
    pub fn std_dev(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let n = self.total as i128;
        // N * sum(x^2) - sum(x)^2 is exact and non-negative for integer samples.
        let scaled_var = n * self.sum_sq - self.sum * self.sum;
        Some((scaled_var as f64 / (n * n) as f64).sqrt())
    }

    /// Normal density fitted by mean and population deviation, evaluated at
    /// every bin edge. Empty below two samples or for a zero deviation.
    pub fn gaussian_fit(&self) -> Vec<f64> {
        if self.total < 2 {
            return Vec::new();
        }
        match (self.mean(), self.std_dev()) {
            (Some(mean), Some(sd)) if sd > 0.0 => self
                .edges()
                .into_iter()
                .map(|x| normal_pdf(x, mean, sd))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Normal probability density
pub fn normal_pdf(x: f64, mean: f64, sd: f64) -> f64 {
    let var = sd * sd;
    let denom = (2.0 * PI * var).sqrt();
    (-(x - mean).powi(2) / (2.0 * var)).exp() / denom
}
