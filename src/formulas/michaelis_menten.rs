//! Michaelis-Menten enzyme kinetics with reversible inhibition

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_positive};
use crate::{PchemError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inhibition {
    #[default]
    None,
    Competitive,
    Noncompetitive,
    Uncompetitive,
}

impl FromStr for Inhibition {
    type Err = PchemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "competitive" => Ok(Self::Competitive),
            "noncompetitive" => Ok(Self::Noncompetitive),
            "uncompetitive" => Ok(Self::Uncompetitive),
            other => Err(PchemError::Unknown {
                kind: "inhibition",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Inhibition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Competitive => "competitive",
            Self::Noncompetitive => "noncompetitive",
            Self::Uncompetitive => "uncompetitive",
        };
        f.write_str(name)
    }
}

/// Inhibitor present in the assay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inhibitor {
    pub concentration: f64,
    /// Dissociation constant of the enzyme-inhibitor complex
    pub ki: f64,
    pub kind: Inhibition,
}

impl Inhibitor {
    pub fn new(concentration: f64, ki: f64, kind: Inhibition) -> Self {
        Self {
            concentration,
            ki,
            kind,
        }
    }

    /// `1 + [I]/KI`
    fn factor(&self) -> Result<f64> {
        ensure_non_negative("inhibitor concentration", self.concentration)?;
        ensure_positive("ki", self.ki)?;
        Ok(1.0 + self.concentration / self.ki)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enzyme {
    /// Michaelis constant
    pub km: f64,
    /// Turnover number
    pub k2: f64,
    /// Total enzyme concentration
    pub e0: f64,
}

impl Enzyme {
    pub fn new(km: f64, k2: f64, e0: f64) -> Self {
        Self { km, k2, e0 }
    }

    /// Effective constants, optionally under inhibition
    pub fn kinetics(&self, inhibitor: Option<&Inhibitor>) -> Result<Kinetics> {
        ensure_positive("km", self.km)?;
        ensure_positive("k2", self.k2)?;
        ensure_positive("e0", self.e0)?;

        let (mut km, mut k2) = (self.km, self.k2);
        // KI and [I] are ignored without inhibition.
        if let Some(inhibitor) = inhibitor.filter(|i| i.kind != Inhibition::None) {
            let factor = inhibitor.factor()?;
            match inhibitor.kind {
                Inhibition::None => {}
                Inhibition::Competitive => km *= factor,
                Inhibition::Noncompetitive => k2 /= factor,
                Inhibition::Uncompetitive => {
                    k2 /= factor;
                    km /= factor;
                }
            }
        }

        Ok(Kinetics { km, k2, e0: self.e0 })
    }
}

/// Effective Michaelis-Menten constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinetics {
    pub km: f64,
    pub k2: f64,
    pub e0: f64,
}

impl Kinetics {
    pub fn v_max(&self) -> f64 {
        self.k2 * self.e0
    }

    /// `v0 = k2 E0 [S] / (KM + [S])`
    pub fn initial_rate(&self, substrate: f64) -> Result<f64> {
        ensure_non_negative("substrate concentration", substrate)?;
        Ok(self.v_max() * substrate / (self.km + substrate))
    }

    pub fn rate_curve(&self, substrates: &[f64]) -> Result<Vec<f64>> {
        substrates.iter().map(|&s| self.initial_rate(s)).collect()
    }

    /// Lineweaver-Burk intercepts: (1/[S] at 1/v0 = 0, 1/v0 at 1/[S] = 0)
    pub fn lineweaver_burk_intercepts(&self) -> (f64, f64) {
        (-1.0 / self.km, 1.0 / self.v_max())
    }
}
