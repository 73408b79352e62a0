//! Closed-form physical chemistry models
//!
//! Every function here is pure. Out-of-domain inputs are reported as
//! [`PchemError::Domain`](crate::PchemError::Domain).

pub mod boltzmann;
pub mod carnot;
pub mod hill;
pub mod margules;
pub mod maxwell_boltzmann;
pub mod michaelis_menten;
pub mod oscillator;

use crate::{PchemError, Result};

/// Gas constant as used throughout the models, J K^-1 mol^-1
pub const GAS_CONSTANT: f64 = 8.31;
/// Boltzmann constant, eV K^-1
pub const BOLTZMANN_EV: f64 = 8.617_333_262e-5;
/// Planck constant, J s
pub const PLANCK: f64 = 6.626_070_15e-34;
/// Speed of light in vacuum, m s^-1
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Atomic mass constant, kg
pub const ATOMIC_MASS: f64 = 1.660_539_066_6e-27;

/// `points` evenly spaced values from `start` to `stop` inclusive
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            (0..points)
                .map(|idx| {
                    if idx == points - 1 {
                        stop
                    } else {
                        start + step * idx as f64
                    }
                })
                .collect()
        }
    }
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PchemError::Domain(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PchemError::Domain(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}
