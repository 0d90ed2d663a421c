//! Pure-species property engine over Shomate correlations.
//!
//! All results are molar and in the canonical unit set:
//! cp and s in kJ/(kmol·K), h in kJ/kmol. Entropy is at standard pressure;
//! mixing and pressure terms belong to [`crate::mixture`].

use crate::constants::ThermoConstants;
use crate::error::{ThermoError, ThermoResult};
use crate::species::Species;
use std::str::FromStr;

/// Enthalpy datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnthalpyMode {
    /// Relative to the reference temperature: `h_abs(T) − h_abs(T_ref)`.
    #[default]
    Sensible,
    /// Includes the correlation's F offset (formation basis).
    Absolute,
}

impl FromStr for EnthalpyMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sensible" => Ok(EnthalpyMode::Sensible),
            "absolute" => Ok(EnthalpyMode::Absolute),
            _ => Err("enthalpy mode must be 'sensible' or 'absolute'"),
        }
    }
}

fn finite(value: f64, what: &'static str, t: f64) -> ThermoResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ThermoError::NonFiniteThermoEvaluation { what, t })
    }
}

/// Molar heat capacity at constant pressure [kJ/(kmol·K)].
pub fn cp(species: &Species, t: f64) -> ThermoResult<f64> {
    let range = species.range_for(t)?;
    finite(range.cp(t), "cp", t)
}

/// Molar enthalpy [kJ/kmol] in the requested mode.
pub fn enthalpy(
    species: &Species,
    t: f64,
    mode: EnthalpyMode,
    constants: &ThermoConstants,
) -> ThermoResult<f64> {
    let h_abs = finite(species.range_for(t)?.h_abs(t), "enthalpy", t)?;
    match mode {
        EnthalpyMode::Absolute => Ok(h_abs),
        EnthalpyMode::Sensible => {
            let h_ref = enthalpy(species, constants.t_ref, EnthalpyMode::Absolute, constants)?;
            Ok(h_abs - h_ref)
        }
    }
}

/// Molar entropy at standard pressure [kJ/(kmol·K)].
pub fn entropy(species: &Species, t: f64) -> ThermoResult<f64> {
    let range = species.range_for(t)?;
    finite(range.s(t), "entropy", t)
}
