//! Hill-Langmuir binding saturation

use super::{ensure_non_negative, ensure_positive};
use crate::Result;

/// Fractional saturation `L^n / (L50^n + L^n)`
///
/// `l50` is the ligand concentration giving half saturation (p50 for
/// hemoglobin) and `n` the Hill coefficient.
pub fn saturation(ligand: f64, l50: f64, n: f64) -> Result<f64> {
    ensure_non_negative("ligand concentration", ligand)?;
    ensure_positive("l50", l50)?;
    ensure_positive("hill coefficient", n)?;

    // Written in terms of (L50/L)^n so large concentrations do not overflow.
    if ligand == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 / (1.0 + (l50 / ligand).powf(n)))
}

/// Saturation for every ligand concentration in `ligands`
pub fn saturation_curve(ligands: &[f64], l50: f64, n: f64) -> Result<Vec<f64>> {
    ligands.iter().map(|&l| saturation(l, l50, n)).collect()
}
