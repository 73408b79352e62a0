//! Ehrenfest simulation parameters
//!
//! Box populations, run length and box geometry, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::{PchemError, Result};

/// Largest particle count whose `2n`-bin histogram fits in one allocation
pub const MAX_PARTICLES: usize = isize::MAX as usize / 16;

/// Parameters for one Ehrenfest run
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EhrenfestParams {
    /// Initial particle count in box A
    #[serde_as(as = "DefaultOnNull")]
    pub n_a: usize,
    /// Initial particle count in box B
    #[serde_as(as = "DefaultOnNull")]
    pub n_b: usize,
    /// Number of transitions to simulate
    #[serde_as(as = "DefaultOnNull")]
    pub n_steps: usize,
    /// Width of one box
    #[serde_as(as = "DefaultOnNull")]
    pub width: f64,
    /// Height of one box
    #[serde_as(as = "DefaultOnNull")]
    pub height: f64,
    /// Seed for a reproducible run; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl EhrenfestParams {
    /// Create new parameters without a seed
    pub fn new(n_a: usize, n_b: usize, n_steps: usize, width: f64, height: f64) -> Self {
        Self {
            n_a,
            n_b,
            n_steps,
            width,
            height,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total number of particles, saturating at `usize::MAX`
    pub fn n(&self) -> usize {
        self.n_a.saturating_add(self.n_b)
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.n_a.checked_add(self.n_b).ok_or_else(|| {
            PchemError::InvalidParameter(format!(
                "n_a + n_b overflows: {} + {}",
                self.n_a, self.n_b
            ))
        })?;

        if n == 0 {
            return Err(PchemError::InvalidParameter(
                "n_a + n_b must be greater than zero".to_string(),
            ));
        }

        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PchemError::InvalidParameter(format!(
                "width must be finite and > 0, got {}",
                self.width
            )));
        }

        // Box B spans [width, 2 * width).
        if !(2.0 * self.width).is_finite() {
            return Err(PchemError::InvalidParameter(format!(
                "width is too large for two boxes, got {}",
                self.width
            )));
        }

        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(PchemError::InvalidParameter(format!(
                "height must be finite and > 0, got {}",
                self.height
            )));
        }

        // Also keeps fluctuations within i64.
        if n > MAX_PARTICLES {
            return Err(PchemError::InvalidParameter(format!(
                "particle count {n} exceeds the maximum of {MAX_PARTICLES}"
            )));
        }

        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(raw)?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl Default for EhrenfestParams {
    fn default() -> Self {
        Self {
            n_a: 10,
            n_b: 10,
            n_steps: 200,
            width: 100.0,
            height: 100.0,
            seed: None,
        }
    }
}
