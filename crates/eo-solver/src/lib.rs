//! Equation-oriented flowsheet solver.
//!
//! Every unknown stream field across the flowsheet is packed into one
//! unconstrained vector (log flows, composition logits, clamped temperature
//! and pressure) and all unit equations are solved simultaneously with a
//! damped Levenberg–Marquardt Newton iteration on a finite-difference
//! Jacobian.
//!
//! ```no_run
//! use eo_solver::{SolveConfig, solve};
//! # fn demo(flowsheet: &mut eo_flowsheet::Flowsheet) -> eo_solver::SolverResult<()> {
//! let report = solve(flowsheet, &SolveConfig::default())?;
//! println!("{:?} after {} iterations", report.status, report.iterations);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod jacobian;
pub mod newton;
pub mod packing;
pub mod residual;
pub mod solve;

pub use config::{Bounds, JacobianScheme, SolveConfig};
pub use error::{SolverError, SolverResult};
pub use packing::{UnknownEntry, UnknownMap, VariableKind};
pub use solve::{IterationRecord, SolveReport, SolveStatus, solve, solve_with_progress};
