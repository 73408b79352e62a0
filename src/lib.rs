//! pchem - physical chemistry models
//!
//! An Ehrenfest urn simulator that streams animation frames one transition at
//! a time, plus a library of closed-form models (Boltzmann populations, Carnot
//! cycle, Hill saturation, Maxwell-Boltzmann speeds, Michaelis-Menten kinetics,
//! Margules mixing, Morse/Hooke bond potentials).

pub mod ehrenfest;
pub mod formulas;
pub mod histogram;
pub mod params;

use thiserror::Error;

// Re-export main types
pub use ehrenfest::{Ehrenfest, Frame, RunSummary, Side};
pub use histogram::FluctuationHistogram;
pub use params::EhrenfestParams;

#[derive(Debug, Error)]
pub enum PchemError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("domain error: {0}")]
    Domain(String),
    #[error("unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PchemError>;
