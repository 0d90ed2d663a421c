//! Thermodynamic property errors.

use eo_core::CoreError;
use thiserror::Error;

/// Result type for thermodynamic operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur during property evaluation and inversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Requested species is absent from the library.
    #[error("Species '{name}' not found (available: {})", .available.join(", "))]
    SpeciesNotFound {
        name: String,
        available: Vec<String>,
    },

    /// No Shomate range of the species covers the queried temperature.
    #[error(
        "Temperature {t} K out of range for species '{species}' (coverage {t_min} K ..= {t_max} K)"
    )]
    TemperatureOutOfRange {
        species: String,
        t: f64,
        t_min: f64,
        t_max: f64,
    },

    /// Inverse temperature solve found no sign change on its scan grid.
    #[error(
        "No temperature bracket for target {target}; closest grid point T = {best_t} K with residual {best_residual}"
    )]
    UnbracketedRoot {
        target: f64,
        best_t: f64,
        best_residual: f64,
    },

    /// The configured scan window lies outside the mixture's temperature coverage.
    #[error(
        "Scan window {t_low} K ..= {t_high} K does not overlap mixture coverage {coverage_min} K ..= {coverage_max} K"
    )]
    EmptyScanInterval {
        t_low: f64,
        t_high: f64,
        coverage_min: f64,
        coverage_max: f64,
    },

    /// A property evaluation produced NaN or infinity.
    #[error("Non-finite {what} evaluation at T = {t} K")]
    NonFiniteThermoEvaluation { what: &'static str, t: f64 },

    /// Composition vector does not match the species list.
    #[error("Composition has {found} entries but the species list has {expected}")]
    InvalidCompositionSchema { expected: usize, found: usize },

    /// Shomate ranges of a species are unordered, overlapping or inverted.
    #[error("Invalid Shomate data for species '{species}': {what}")]
    InvalidShomateRange { species: String, what: String },

    /// Library (de)serialization failure.
    #[error("Species library error: {message}")]
    Library { message: String },
}

impl From<ThermoError> for CoreError {
    fn from(err: ThermoError) -> Self {
        CoreError::Thermo {
            what: err.to_string(),
        }
    }
}
