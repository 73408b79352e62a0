//! Maxwell-Boltzmann speed distribution
//!
//! Molar masses in g mol^-1, temperatures in K, speeds in m s^-1.

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_positive, linspace, GAS_CONSTANT};
use crate::{PchemError, Result};

const R: f64 = GAS_CONSTANT;

/// Molar masses of common gases, g mol^-1
pub const GASES: &[(&str, f64)] = &[
    ("H_2", 1.00784 * 2.0),
    ("He", 4.002602),
    ("N_2", 14.007 * 2.0),
    ("O_2", 15.999 * 2.0),
    ("F_2", 18.998 * 2.0),
    ("Ne", 20.1797),
    ("Cl_2", 35.453 * 2.0),
    ("Ar", 39.948),
    ("Kr", 83.80),
    ("Xe", 131.29),
];

pub fn molar_mass(gas: &str) -> Result<f64> {
    GASES
        .iter()
        .find(|(name, _)| *name == gas)
        .map(|&(_, m)| m)
        .ok_or_else(|| PchemError::Unknown {
            kind: "gas",
            name: gas.to_string(),
        })
}

fn kg_per_mol(molar_mass: f64, temperature: f64) -> Result<f64> {
    ensure_positive("molar mass", molar_mass)?;
    ensure_positive("temperature", temperature)?;
    Ok(molar_mass / 1000.0)
}

/// Probability density of speed `v`
pub fn density(v: f64, molar_mass: f64, temperature: f64) -> Result<f64> {
    let m = kg_per_mol(molar_mass, temperature)?;
    ensure_non_negative("speed", v)?;
    let norm = (m / (2.0 * PI * R * temperature)).powi(3).sqrt();
    Ok(norm * 4.0 * PI * v * v * (-(m * v * v) / (2.0 * R * temperature)).exp())
}

/// Density for every speed in `speeds`
pub fn density_curve(speeds: &[f64], molar_mass: f64, temperature: f64) -> Result<Vec<f64>> {
    speeds
        .iter()
        .map(|&v| density(v, molar_mass, temperature))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicSpeeds {
    pub most_probable: f64,
    pub average: f64,
    pub rms: f64,
}

impl CharacteristicSpeeds {
    pub fn new(molar_mass: f64, temperature: f64) -> Result<Self> {
        let m = kg_per_mol(molar_mass, temperature)?;
        let rt = R * temperature;
        Ok(Self {
            most_probable: (2.0 * rt / m).sqrt(),
            average: (8.0 * rt / (PI * m)).sqrt(),
            rms: (3.0 * rt / m).sqrt(),
        })
    }
}

/// Probability of a speed in `[v_low, v_high]` by the trapezoidal rule on
/// `points` samples
pub fn probability_between(
    v_low: f64,
    v_high: f64,
    molar_mass: f64,
    temperature: f64,
    points: usize,
) -> Result<f64> {
    ensure_non_negative("v_low", v_low)?;
    ensure_non_negative("v_high", v_high)?;
    if v_high < v_low {
        return Err(PchemError::Domain(format!(
            "speed window is reversed: [{v_low}, {v_high}]"
        )));
    }
    if points < 2 {
        return Err(PchemError::Domain("at least two sample points are required".to_string()));
    }

    let speeds = linspace(v_low, v_high, points);
    let f = density_curve(&speeds, molar_mass, temperature)?;
    let dv = (v_high - v_low) / (points - 1) as f64;
    let interior: f64 = f[1..points - 1].iter().sum();
    Ok(dv * (0.5 * (f[0] + f[points - 1]) + interior))
}

/// Speeds of `count` molecules drawn from the distribution
///
/// Each Cartesian velocity component is normal with variance `RT/M`.
pub fn sample_speeds<G: Rng + ?Sized>(
    molar_mass: f64,
    temperature: f64,
    count: usize,
    rng: &mut G,
) -> Result<Vec<f64>> {
    let m = kg_per_mol(molar_mass, temperature)?;
    let sigma = (R * temperature / m).sqrt();
    let component = Normal::new(0.0, sigma)
        .map_err(|err| PchemError::Domain(format!("velocity distribution: {err}")))?;

    Ok((0..count)
        .map(|_| {
            let vx: f64 = component.sample(rng);
            let vy: f64 = component.sample(rng);
            let vz: f64 = component.sample(rng);
            (vx * vx + vy * vy + vz * vz).sqrt()
        })
        .collect())
}
