//! Error types for flowsheet construction and unit equations.

use eo_core::error::CoreError;
use eo_thermo::ThermoError;
use thiserror::Error;

/// Errors that can occur while building a flowsheet or evaluating unit equations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowsheetError {
    #[error("Unit '{unit}' references stream {index}, but the flowsheet has {len} streams")]
    UnknownStream {
        unit: String,
        index: usize,
        len: usize,
    },

    #[error("Stream name '{name}' is already in use")]
    DuplicateStream { name: String },

    #[error(
        "Stream '{stream}' has {found} composition entries but the flowsheet has {expected} species"
    )]
    InvalidCompositionSchema {
        stream: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Thermodynamics error: {0}")]
    Thermo(#[from] ThermoError),
}

pub type FlowsheetResult<T> = Result<T, FlowsheetError>;

impl From<FlowsheetError> for CoreError {
    fn from(e: FlowsheetError) -> Self {
        match e {
            FlowsheetError::Thermo(inner) => inner.into(),
            FlowsheetError::UnknownStream { .. } | FlowsheetError::DuplicateStream { .. } => {
                CoreError::InvalidArg {
                    what: e.to_string(),
                }
            }
            FlowsheetError::InvalidCompositionSchema { .. } => CoreError::Invariant {
                what: e.to_string(),
            },
            FlowsheetError::InvalidArg { what } => CoreError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlowsheetError::InvalidCompositionSchema {
            stream: "feed".into(),
            expected: 3,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("feed"));
        assert!(msg.contains('3') && msg.contains('2'));
    }

    #[test]
    fn error_conversion() {
        let err = FlowsheetError::DuplicateStream { name: "s1".into() };
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::InvalidArg { .. }));

        let thermo = FlowsheetError::from(ThermoError::InvalidCompositionSchema {
            expected: 2,
            found: 1,
        });
        let core: CoreError = thermo.into();
        assert!(matches!(core, CoreError::Thermo { .. }));
    }
}
