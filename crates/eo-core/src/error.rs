//! Workspace-wide error type. Each crate's error converts into it.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Inconsistent data: {what}")]
    Invariant { what: String },

    #[error("Thermodynamics: {what}")]
    Thermo { what: String },

    #[error("Solver: {what}")]
    Solver { what: String },
}
