//! Error types for solver operations.

use eo_core::error::CoreError;
use eo_flowsheet::FlowsheetError;
use eo_thermo::ThermoError;
use thiserror::Error;

/// Fatal solve failures. Hitting the iteration cap is not an error; see
/// [`crate::SolveStatus::MaxIterReached`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("non-finite initial residual: unit '{unit}' equation {equation}")]
    NonFiniteInitialResidual { unit: String, equation: usize },

    #[error("non-finite residual at iteration {iteration}: unit '{unit}' equation {equation}")]
    NonFiniteResidual {
        iteration: usize,
        unit: String,
        equation: usize,
    },

    #[error(
        "line search failed at iteration {iteration}: ||r|| = {residual_norm:.6e}, step scale = {scale:.3e}"
    )]
    LineSearchFailure {
        iteration: usize,
        residual_norm: f64,
        scale: f64,
    },

    #[error("stream '{stream}' composition has {found} entries, species list has {expected}")]
    InvalidCompositionSchema {
        stream: String,
        expected: usize,
        found: usize,
    },

    #[error("flowsheet error: {0}")]
    Flowsheet(#[from] FlowsheetError),

    #[error("thermo error: {0}")]
    Thermo(#[from] ThermoError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Re-tag a residual failure with the iteration it occurred in.
    pub(crate) fn at_iteration(self, iteration: usize) -> Self {
        match self {
            SolverError::NonFiniteResidual { unit, equation, .. } if iteration == 0 => {
                SolverError::NonFiniteInitialResidual { unit, equation }
            }
            SolverError::NonFiniteResidual { unit, equation, .. } => {
                SolverError::NonFiniteResidual {
                    iteration,
                    unit,
                    equation,
                }
            }
            other => other,
        }
    }
}

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Flowsheet(inner) => inner.into(),
            SolverError::Thermo(inner) => inner.into(),
            other => CoreError::Solver {
                what: other.to_string(),
            },
        }
    }
}
