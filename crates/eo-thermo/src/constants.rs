//! Process-wide thermodynamic constants.

use eo_core::units::constants::{P_STD_PA, R_KJ_PER_KMOL_K, T_REF_K};
use serde::{Deserialize, Serialize};

/// Constants injected into the property engine and mixture closure.
///
/// Values are in the canonical unit set: kJ/(kmol·K), K, Pa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoConstants {
    /// Universal gas constant [kJ/(kmol·K)]
    pub r: f64,
    /// Reference temperature for sensible enthalpy [K]
    pub t_ref: f64,
    /// Standard pressure for the entropy pressure term [Pa]
    pub p_ref: f64,
}

impl Default for ThermoConstants {
    fn default() -> Self {
        Self {
            r: R_KJ_PER_KMOL_K,
            t_ref: T_REF_K,
            p_ref: P_STD_PA,
        }
    }
}
