//! Diatomic bond potentials: anharmonic (Morse) and harmonic (Hooke)
//!
//! Built from spectroscopic constants. Distances are in angstrom, energies
//! in joule, wavenumbers in cm^-1 and masses in atomic mass units.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_positive, linspace, ATOMIC_MASS, PLANCK, SPEED_OF_LIGHT};
use crate::{PchemError, Result};

const ANGSTROM: f64 = 1e-10;
const PER_CM: f64 = 100.0;

/// Grid points of the default distance range `[0, 5 re]`
pub const DEFAULT_GRID_POINTS: usize = 1000;
/// Vibrational levels listed for a harmonic oscillator by default
pub const DEFAULT_HARMONIC_LEVELS: usize = 100;

/// Spectroscopic constants of a diatomic molecule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectroscopicData {
    /// Harmonic wavenumber, cm^-1
    pub we: f64,
    /// Anharmonicity constant, cm^-1
    pub wexe: f64,
    /// Atom masses, u
    pub m1: f64,
    pub m2: f64,
    /// Equilibrium bond length, angstrom
    pub re: f64,
}

impl SpectroscopicData {
    pub const fn new(we: f64, wexe: f64, m1: f64, m2: f64, re: f64) -> Self {
        Self {
            we,
            wexe,
            m1,
            m2,
            re,
        }
    }

    /// Reduced mass, kg
    pub fn reduced_mass(&self) -> f64 {
        self.m1 * self.m2 / (self.m1 + self.m2) * ATOMIC_MASS
    }

    fn validate(&self) -> Result<()> {
        ensure_positive("we", self.we)?;
        ensure_positive("m1", self.m1)?;
        ensure_positive("m2", self.m2)?;
        ensure_positive("re", self.re)
    }
}

/// Handbook constants for common diatomics
pub const MOLECULES: &[(&str, SpectroscopicData)] = &[
    ("H_2", SpectroscopicData::new(4401.21, 121.34, 1.0, 1.0, 0.74144)),
    ("LiH", SpectroscopicData::new(1405.65, 23.20, 7.0, 1.0, 1.59490)),
    ("KH", SpectroscopicData::new(983.6, 14.3, 39.0, 1.0, 2.243)),
    ("HCl", SpectroscopicData::new(2990.945, 52.818595, 1.0, 35.0, 1.2745)),
    ("NaCl", SpectroscopicData::new(366.0, 2.05, 23.0, 35.0, 2.36080)),
    ("F_2", SpectroscopicData::new(916.64, 11.24, 19.0, 19.0, 1.41193)),
    ("Br_2", SpectroscopicData::new(325.32, 1.08, 79.0, 79.0, 2.2811)),
    ("Cl_2", SpectroscopicData::new(559.7, 2.68, 35.0, 35.0, 1.988)),
    ("I_2", SpectroscopicData::new(214.50, 0.61, 127.0, 127.0, 2.666)),
    ("O_2", SpectroscopicData::new(1580.19, 11.98, 16.0, 16.0, 1.20752)),
    ("N_2", SpectroscopicData::new(2358.57, 14.32, 14.0, 14.0, 1.09769)),
];

pub fn spectroscopic_data(molecule: &str) -> Result<SpectroscopicData> {
    MOLECULES
        .iter()
        .find(|(name, _)| *name == molecule)
        .map(|&(_, data)| data)
        .ok_or_else(|| PchemError::Unknown {
            kind: "molecule",
            name: molecule.to_string(),
        })
}

/// Potential energy curve of a bond
pub trait BondPotential {
    /// Potential energy at distance `r`
    fn energy(&self, r: f64) -> f64;

    /// Vibrational energy levels, lowest first
    fn levels(&self) -> Vec<f64>;

    fn equilibrium_distance(&self) -> f64;

    /// Distances `[0, 5 re]`
    fn default_grid(&self) -> Vec<f64> {
        linspace(0.0, 5.0 * self.equilibrium_distance(), DEFAULT_GRID_POINTS)
    }

    /// Sample the potential over `r` together with its level lines
    fn curve(&self, r: &[f64]) -> Result<PotentialCurve> {
        if r.is_empty() {
            return Err(PchemError::Domain("distance grid is empty".to_string()));
        }
        let energy: Vec<f64> = r.iter().map(|&x| self.energy(x)).collect();
        let levels = self.levels();
        let re = self.equilibrium_distance();

        let i_re = argmin_by(r, |x| (x - re).abs());
        let level_lines = levels
            .iter()
            .map(|&level| {
                let inner = if i_re == 0 {
                    0
                } else {
                    argmin_by(&energy[..i_re], |v| (v - level).abs())
                };
                let outer = i_re + argmin_by(&energy[i_re..], |v| (v - level).abs());
                LevelLine {
                    energy: level,
                    r_inner: r[inner],
                    r_outer: r[outer],
                }
            })
            .collect();

        Ok(PotentialCurve {
            r: r.to_vec(),
            energy,
            levels,
            level_lines,
        })
    }
}

/// Horizontal segment of a level between its two crossings of the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelLine {
    pub energy: f64,
    pub r_inner: f64,
    pub r_outer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialCurve {
    pub r: Vec<f64>,
    pub energy: Vec<f64>,
    pub levels: Vec<f64>,
    pub level_lines: Vec<LevelLine>,
}

fn argmin_by(values: &[f64], key: impl Fn(f64) -> f64) -> usize {
    let mut best = 0;
    let mut best_key = f64::INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        let k = key(v);
        if k < best_key {
            best = idx;
            best_key = k;
        }
    }
    best
}

/// Harmonic oscillator
#[derive(Debug, Clone, PartialEq)]
pub struct Hooke {
    /// Wavenumber, m^-1
    we: f64,
    re: f64,
    /// Force constant, N m^-1
    k: f64,
    /// Depth of the minimum below zero, J
    de: f64,
    nu_max: usize,
}

impl Hooke {
    pub fn new(data: &SpectroscopicData) -> Result<Self> {
        data.validate()?;
        let we = data.we * PER_CM;
        let omega = 2.0 * std::f64::consts::PI * SPEED_OF_LIGHT * we;
        Ok(Self {
            we,
            re: data.re,
            k: data.reduced_mass() * omega * omega,
            de: 0.0,
            nu_max: DEFAULT_HARMONIC_LEVELS,
        })
    }

    /// Shift the curve so its minimum sits at `-de`
    pub fn with_well_depth(mut self, de: f64) -> Result<Self> {
        ensure_non_negative("well depth", de)?;
        self.de = de;
        Ok(self)
    }

    pub fn with_levels(mut self, nu_max: usize) -> Self {
        self.nu_max = nu_max;
        self
    }

    pub fn force_constant(&self) -> f64 {
        self.k
    }
}

impl BondPotential for Hooke {
    fn energy(&self, r: f64) -> f64 {
        let x = (r - self.re) * ANGSTROM;
        0.5 * self.k * x * x - self.de
    }

    fn levels(&self) -> Vec<f64> {
        let quantum = PLANCK * SPEED_OF_LIGHT * self.we;
        (0..self.nu_max)
            .map(|nu| (nu as f64 + 0.5) * quantum - self.de)
            .collect()
    }

    fn equilibrium_distance(&self) -> f64 {
        self.re
    }
}

/// Anharmonic oscillator
#[derive(Debug, Clone, PartialEq)]
pub struct Morse {
    /// Wavenumbers, m^-1
    we: f64,
    wexe: f64,
    re: f64,
    /// Well depth, J
    de: f64,
    /// Exponential parameter, m^-1
    a: f64,
    nu_max: usize,
}

impl Morse {
    pub fn new(data: &SpectroscopicData) -> Result<Self> {
        data.validate()?;
        ensure_positive("wexe", data.wexe)?;

        let we = data.we * PER_CM;
        let wexe = data.wexe * PER_CM;
        let hc = PLANCK * SPEED_OF_LIGHT;
        let de = we * we / (4.0 * wexe) * hc;
        let a = we * (2.0 * data.reduced_mass() / de).sqrt() * std::f64::consts::PI * SPEED_OF_LIGHT;
        // Bound levels up to the dissociation limit
        let nu_max = (2.0 * de / (hc * we)).floor() as usize;

        Ok(Self {
            we,
            wexe,
            re: data.re,
            de,
            a,
            nu_max,
        })
    }

    pub fn with_levels(mut self, nu_max: usize) -> Self {
        self.nu_max = nu_max;
        self
    }

    pub fn well_depth(&self) -> f64 {
        self.de
    }

    /// Exponential parameter, m^-1
    pub fn alpha(&self) -> f64 {
        self.a
    }

    /// Curvature at the minimum, `2 De a^2`
    pub fn force_constant(&self) -> f64 {
        2.0 * self.de * self.a * self.a
    }
}

impl BondPotential for Morse {
    fn energy(&self, r: f64) -> f64 {
        let x = (r - self.re) * ANGSTROM;
        let attractive = -2.0 * self.de * (-self.a * x).exp();
        let repulsive = self.de * (-2.0 * self.a * x).exp();
        attractive + repulsive
    }

    fn levels(&self) -> Vec<f64> {
        let hc = PLANCK * SPEED_OF_LIGHT;
        (0..self.nu_max)
            .map(|nu| {
                let v = nu as f64 + 0.5;
                hc * (v * self.we - v * v * self.wexe) - self.de
            })
            .collect()
    }

    fn equilibrium_distance(&self) -> f64 {
        self.re
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Oscillator {
    Morse,
    Hooke,
}

impl FromStr for Oscillator {
    type Err = PchemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "morse" | "anharmonic" | "realistic" => Ok(Self::Morse),
            "hooke" | "harmonic" | "ideal" => Ok(Self::Hooke),
            other => Err(PchemError::Unknown {
                kind: "oscillator",
                name: other.to_string(),
            }),
        }
    }
}

/// Potential of a tabulated molecule with default options
pub fn oscillator(molecule: &str, kind: Oscillator) -> Result<Box<dyn BondPotential>> {
    let data = spectroscopic_data(molecule)?;
    Ok(match kind {
        Oscillator::Morse => Box::new(Morse::new(&data)?),
        Oscillator::Hooke => Box::new(Hooke::new(&data)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hcl() -> SpectroscopicData {
        spectroscopic_data("HCl").unwrap()
    }

    #[test]
    fn test_morse_minimum_and_dissociation() {
        let morse = Morse::new(&hcl()).unwrap();
        assert_relative_eq!(morse.energy(morse.equilibrium_distance()), -morse.well_depth());
        assert!(morse.energy(50.0).abs() < 1e-6 * morse.well_depth());
        assert!(morse.energy(0.5) > morse.energy(1.0));
    }

    #[test]
    fn test_morse_matches_harmonic_curvature() {
        let data = hcl();
        let morse = Morse::new(&data).unwrap();
        let hooke = Hooke::new(&data).unwrap();
        assert_relative_eq!(morse.force_constant(), hooke.force_constant(), max_relative = 1e-12);
    }

    #[test]
    fn test_morse_levels_bound_and_converging() {
        let morse = Morse::new(&hcl()).unwrap();
        let levels = morse.levels();
        assert!(!levels.is_empty());
        assert!(levels.iter().all(|&l| l < 0.0 && l > -morse.well_depth()));
        let gaps: Vec<f64> = levels.windows(2).map(|p| p[1] - p[0]).collect();
        for pair in gaps.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_hooke_levels_equally_spaced() {
        let data = hcl();
        let hooke = Hooke::new(&data).unwrap().with_levels(5);
        let levels = hooke.levels();
        let quantum = PLANCK * SPEED_OF_LIGHT * data.we * PER_CM;
        assert_eq!(levels.len(), 5);
        assert_relative_eq!(levels[0], 0.5 * quantum);
        for pair in levels.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], quantum, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_hooke_well_depth_shift() {
        let hooke = Hooke::new(&hcl()).unwrap().with_well_depth(1e-19).unwrap();
        assert_relative_eq!(hooke.energy(hooke.equilibrium_distance()), -1e-19);
        assert!(Hooke::new(&hcl()).unwrap().with_well_depth(-1.0).is_err());
    }

    #[test]
    fn test_level_lines_straddle_equilibrium() {
        let morse = Morse::new(&hcl()).unwrap().with_levels(5);
        let curve = morse.curve(&morse.default_grid()).unwrap();
        assert_eq!(curve.r.len(), DEFAULT_GRID_POINTS);
        assert_eq!(curve.level_lines.len(), 5);
        let re = morse.equilibrium_distance();
        for line in &curve.level_lines {
            assert!(line.r_inner <= re && line.r_outer >= re);
        }
        // higher levels are wider
        assert!(curve.level_lines[4].r_outer - curve.level_lines[4].r_inner
            > curve.level_lines[0].r_outer - curve.level_lines[0].r_inner);
    }

    #[test]
    fn test_factory() {
        assert_eq!("Anharmonic".parse::<Oscillator>().unwrap(), Oscillator::Morse);
        assert_eq!("ideal".parse::<Oscillator>().unwrap(), Oscillator::Hooke);
        assert!("quartic".parse::<Oscillator>().is_err());

        let potential = oscillator("N_2", Oscillator::Hooke).unwrap();
        assert_eq!(potential.levels().len(), DEFAULT_HARMONIC_LEVELS);
        assert!(oscillator("XeF", Oscillator::Morse).is_err());
    }

    #[test]
    fn test_empty_grid_rejected() {
        let hooke = Hooke::new(&hcl()).unwrap();
        assert!(hooke.curve(&[]).is_err());
    }
}
