//! Carnot cycle for one mole of ideal gas
//!
//! Work is counted as work done on the gas, so `delta_u = q + w` for every
//! transformation. The cycle-level `total_work` is the net work the engine
//! delivers, `-(w1 + w2 + w3 + w4)`.

use serde::{Deserialize, Serialize};

use super::{ensure_positive, linspace, GAS_CONSTANT};
use crate::{PchemError, Result};

const R: f64 = GAS_CONSTANT;
const PATH_POINTS: usize = 100;

/// Thermodynamic state of the gas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatePoint {
    pub v: f64,
    pub p: f64,
    pub t: f64,
}

impl StatePoint {
    fn ideal(v: f64, t: f64) -> Self {
        Self { v, p: R * t / v, t }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformationKind {
    IsothermalExpansion,
    AdiabaticExpansion,
    IsothermalCompression,
    AdiabaticCompression,
}

/// One leg of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub kind: TransformationKind,
    /// Work done on the gas
    pub w: f64,
    /// Heat absorbed by the gas
    pub q: f64,
    pub delta_u: f64,
    pub delta_s: f64,
    /// Sampled volumes along the path
    pub path_v: Vec<f64>,
    /// Pressures matching `path_v`
    pub path_p: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarnotCycle {
    pub states: [StatePoint; 4],
    pub transformations: [Transformation; 4],
    pub efficiency: f64,
    /// Net work delivered by the engine
    pub total_work: f64,
}

impl CarnotCycle {
    /// Cycle of a monatomic ideal gas (Cv = 3/2 R, Cp = 5/2 R)
    pub fn new(t_cold: f64, t_hot: f64, v1: f64, v2: f64) -> Result<Self> {
        Self::with_heat_capacities(t_cold, t_hot, v1, v2, 1.5 * R, 2.5 * R)
    }

    /// `v1` and `v2` bound the isothermal expansion at `t_hot`
    pub fn with_heat_capacities(
        t_cold: f64,
        t_hot: f64,
        v1: f64,
        v2: f64,
        cv: f64,
        cp: f64,
    ) -> Result<Self> {
        ensure_positive("t_cold", t_cold)?;
        ensure_positive("t_hot", t_hot)?;
        ensure_positive("v1", v1)?;
        ensure_positive("v2", v2)?;
        ensure_positive("cv", cv)?;
        if v1 >= v2 {
            return Err(PchemError::Domain(format!(
                "v1 must be smaller than v2, got v1 = {v1}, v2 = {v2}"
            )));
        }
        if !cp.is_finite() || cp <= cv {
            return Err(PchemError::Domain(format!(
                "cp must be finite and greater than cv, got cp = {cp}, cv = {cv}"
            )));
        }

        let gamma = cp / cv;

        let s1 = StatePoint::ideal(v1, t_hot);
        let s2 = StatePoint::ideal(v2, t_hot);
        let v3 = (t_hot / t_cold).powf(1.0 / (gamma - 1.0)) * v2;
        let s3 = StatePoint::ideal(v3, t_cold);
        // V3/V4 = V2/V1
        let s4 = StatePoint::ideal(v3 * v1 / v2, t_cold);

        let transformations = [
            isothermal(TransformationKind::IsothermalExpansion, &s1, &s2),
            adiabatic(TransformationKind::AdiabaticExpansion, &s2, &s3, cv, gamma),
            isothermal(TransformationKind::IsothermalCompression, &s3, &s4),
            adiabatic(TransformationKind::AdiabaticCompression, &s4, &s1, cv, gamma),
        ];

        let total_work = -transformations.iter().map(|t| t.w).sum::<f64>();

        Ok(Self {
            states: [s1, s2, s3, s4],
            transformations,
            efficiency: 1.0 - t_cold / t_hot,
            total_work,
        })
    }

    /// Heat taken from the hot reservoir (q_H > 0)
    pub fn heat_absorbed(&self) -> f64 {
        self.transformations[0].q
    }

    /// Heat given to the cold reservoir, as a positive amount (q_C)
    pub fn heat_released(&self) -> f64 {
        -self.transformations[2].q
    }

    /// Work done on the gas over the whole cycle (`-total_work`)
    pub fn net_work_on_gas(&self) -> f64 {
        self.transformations.iter().map(|t| t.w).sum()
    }
}

/// Reversible isothermal work done on the gas
pub fn isothermal_work(vi: f64, vf: f64, t: f64) -> f64 {
    -R * t * (vf / vi).ln()
}

/// Adiabatic work done on the gas
pub fn adiabatic_work(ti: f64, tf: f64, cv: f64) -> f64 {
    cv * (tf - ti)
}

fn isothermal(kind: TransformationKind, from: &StatePoint, to: &StatePoint) -> Transformation {
    let w = isothermal_work(from.v, to.v, from.t);
    let q = -w;
    let path_v = linspace(from.v, to.v, PATH_POINTS);
    let path_p = path_v.iter().map(|&v| R * from.t / v).collect();
    Transformation {
        kind,
        w,
        q,
        delta_u: 0.0,
        delta_s: q / from.t,
        path_v,
        path_p,
    }
}

fn adiabatic(
    kind: TransformationKind,
    from: &StatePoint,
    to: &StatePoint,
    cv: f64,
    gamma: f64,
) -> Transformation {
    let w = adiabatic_work(from.t, to.t, cv);
    let invariant = from.p * from.v.powf(gamma);
    let path_v = linspace(from.v, to.v, PATH_POINTS);
    let path_p = path_v.iter().map(|&v| invariant / v.powf(gamma)).collect();
    Transformation {
        kind,
        w,
        q: 0.0,
        delta_u: w,
        delta_s: 0.0,
        path_v,
        path_p,
    }
}
