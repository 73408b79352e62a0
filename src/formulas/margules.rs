//! Regular-solution (one-parameter Margules) mixing energies
//!
//! `beta` is the interaction parameter in J mol^-1; curves are molar
//! quantities over the mole fraction `x1` of component 1.

use serde::{Deserialize, Serialize};

use super::{ensure_positive, linspace, GAS_CONSTANT};
use crate::{PchemError, Result};

const R: f64 = GAS_CONSTANT;

/// Distance kept from the pure components, where `x ln x` is singular
pub const EDGE: f64 = 1e-4;

pub const DEFAULT_POINTS: usize = 10_000;

/// `beta / (R T)`
pub fn reduced_interaction(beta: f64, temperature: f64) -> Result<f64> {
    ensure_positive("temperature", temperature)?;
    if !beta.is_finite() {
        return Err(PchemError::Domain(format!("beta must be finite, got {beta}")));
    }
    Ok(beta / (R * temperature))
}

/// Whether the mixture splits into two phases
pub fn is_demixing(beta: f64, temperature: f64) -> Result<bool> {
    Ok(reduced_interaction(beta, temperature)? > 2.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingCurves {
    pub beta: f64,
    pub temperature: f64,
    pub x1: Vec<f64>,
    pub delta_g: Vec<f64>,
    pub delta_s: Vec<f64>,
    pub delta_h: Vec<f64>,
}

impl MixingCurves {
    pub fn new(beta: f64, temperature: f64, points: usize) -> Result<Self> {
        reduced_interaction(beta, temperature)?;
        if points < 3 {
            return Err(PchemError::Domain("at least three grid points are required".to_string()));
        }

        let x1 = linspace(EDGE, 1.0 - EDGE, points);
        let mut delta_g = Vec::with_capacity(points);
        let mut delta_s = Vec::with_capacity(points);
        let mut delta_h = Vec::with_capacity(points);

        for &x in &x1 {
            let y = 1.0 - x;
            let ideal = x * x.ln() + y * y.ln();
            let h = beta * x * y;
            let s = -R * ideal;
            delta_h.push(h);
            delta_s.push(s);
            delta_g.push(h - temperature * s);
        }

        Ok(Self {
            beta,
            temperature,
            x1,
            delta_g,
            delta_s,
            delta_h,
        })
    }

    /// `T * delta_s`, the entropic term as plotted next to `delta_g`
    pub fn t_delta_s(&self) -> Vec<f64> {
        self.delta_s.iter().map(|s| self.temperature * s).collect()
    }

    /// Compositions of the stable phases as `(low, high)` mole fractions.
    ///
    /// When demixing these are the two minima of `delta_g`; otherwise the
    /// grid point closest to the equimolar mixture is returned twice.
    pub fn stable_compositions(&self) -> (f64, f64) {
        let demixing = self.beta / (R * self.temperature) > 2.0;
        if !demixing {
            let mid = self.x1[self.x1.len() / 2];
            return (mid, mid);
        }

        // delta_g is symmetric about x1 = 1/2: take the minimum of each half.
        let half = self.x1.len() / 2;
        let left = argmin(&self.delta_g[..half]);
        let right = half + argmin(&self.delta_g[half..]);
        (self.x1[left], self.x1[right])
    }
}

fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, min), (idx, &v)| {
            if v < min {
                (idx, v)
            } else {
                (best, min)
            }
        })
        .0
}
