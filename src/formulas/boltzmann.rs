//! Boltzmann distribution over discrete energy levels
//!
//! Energies are in eV, temperatures in K.

use super::{ensure_non_negative, ensure_positive, linspace, BOLTZMANN_EV};
use crate::{PchemError, Result};

/// `exp(-E / kT)`
pub fn boltzmann_factor(energy_ev: f64, temperature: f64) -> Result<f64> {
    ensure_positive("temperature", temperature)?;
    if !energy_ev.is_finite() {
        return Err(PchemError::Domain(format!("energy must be finite, got {energy_ev}")));
    }
    Ok((-energy_ev / (BOLTZMANN_EV * temperature)).exp())
}

/// Fraction of the population on each level; sums to 1
pub fn population(levels_ev: &[f64], temperature: f64) -> Result<Vec<f64>> {
    ensure_positive("temperature", temperature)?;
    if levels_ev.is_empty() {
        return Err(PchemError::Domain("at least one energy level is required".to_string()));
    }
    if let Some(bad) = levels_ev.iter().find(|e| !e.is_finite()) {
        return Err(PchemError::Domain(format!("energy must be finite, got {bad}")));
    }

    // Shift by the ground level so the factors cannot all underflow.
    let ground = levels_ev.iter().copied().fold(f64::INFINITY, f64::min);
    let factors: Vec<f64> = levels_ev
        .iter()
        .map(|&e| boltzmann_factor(e - ground, temperature))
        .collect::<Result<_>>()?;

    // Partition function relative to the ground level
    let q: f64 = factors.iter().sum();
    Ok(factors.into_iter().map(|f| f / q).collect())
}

/// `n` levels evenly spaced from 0 to `e_max`
pub fn evenly_spaced_levels(e_max_ev: f64, n: usize) -> Result<Vec<f64>> {
    ensure_non_negative("e_max", e_max_ev)?;
    if n == 0 {
        return Err(PchemError::Domain("level count must be > 0".to_string()));
    }
    Ok(linspace(0.0, e_max_ev, n))
}
