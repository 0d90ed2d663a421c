//! High-level solver interface.

use crate::config::SolveConfig;
use crate::error::SolverResult;
use crate::jacobian;
use crate::newton::{backtrack, levenberg_marquardt_step};
use crate::packing::UnknownMap;
use crate::residual::{ResidualFn, assemble};
use eo_flowsheet::Flowsheet;

/// Terminal state of a solve that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Converged,
    /// Iteration cap hit; streams hold the last accepted iterate.
    MaxIterReached,
}

/// One accepted iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: usize,
    /// Residual norm before the step
    pub residual_norm: f64,
    /// Norm of the applied step in the unknown space
    pub step_norm: f64,
    /// Accepted line-search scale
    pub scale: f64,
    pub backtracks: usize,
    /// Damping used by the linear solve
    pub lambda: f64,
    /// Jacobian columns zeroed this iteration
    pub frozen_columns: usize,
}

/// Result of a non-fatal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub status: SolveStatus,
    pub iterations: usize,
    pub residual_norm: f64,
    pub unknowns: usize,
    pub equations: usize,
    pub history: Vec<IterationRecord>,
}

impl SolveReport {
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

/// Solve the flowsheet in place.
///
/// Unknown stream fields are packed into an unconstrained vector and driven
/// to a zero of the global residual with a damped Levenberg–Marquardt Newton
/// iteration. Stream state is written back after every accepted step, so on
/// any outcome the streams hold the last accepted iterate.
pub fn solve(flowsheet: &mut Flowsheet, config: &SolveConfig) -> SolverResult<SolveReport> {
    solve_internal(flowsheet, config, None)
}

/// Like [`solve`], invoking `on_iteration` after every accepted step.
pub fn solve_with_progress(
    flowsheet: &mut Flowsheet,
    config: &SolveConfig,
    on_iteration: &mut dyn FnMut(&IterationRecord),
) -> SolverResult<SolveReport> {
    solve_internal(flowsheet, config, Some(on_iteration))
}

fn solve_internal(
    flowsheet: &mut Flowsheet,
    config: &SolveConfig,
    mut on_iteration: Option<&mut dyn FnMut(&IterationRecord)>,
) -> SolverResult<SolveReport> {
    flowsheet.validate()?;

    let (streams, units, species) = flowsheet.split_mut();
    let map = UnknownMap::build(streams, species.len())?;
    let base = streams.to_vec();
    let residual = ResidualFn {
        map: &map,
        base: &base,
        units,
        species,
        bounds: &config.bounds,
    };

    let mut x = map.pack(&base, &config.bounds);
    map.unpack_into(&x, streams, &config.bounds);
    let mut r = assemble(units, streams, species).map_err(|e| e.at_iteration(0))?;
    let mut r_norm = r.norm();

    tracing::debug!(
        unknowns = map.len(),
        equations = r.len(),
        residual_norm = r_norm,
        "solve started"
    );
    if map.len() != r.len() {
        tracing::debug!(
            unknowns = map.len(),
            equations = r.len(),
            "non-square system, solving in the least-squares sense"
        );
    }

    let mut report = SolveReport {
        status: SolveStatus::MaxIterReached,
        iterations: 0,
        residual_norm: r_norm,
        unknowns: map.len(),
        equations: r.len(),
        history: Vec::new(),
    };

    if map.is_empty() {
        if r_norm < config.abs_tol {
            report.status = SolveStatus::Converged;
        } else {
            tracing::warn!(residual_norm = r_norm, "no unknowns and residual above tolerance");
        }
        return Ok(report);
    }

    for iteration in 1..=config.max_iterations {
        if r_norm < config.abs_tol {
            report.status = SolveStatus::Converged;
            break;
        }

        let jac = jacobian::estimate(
            &x,
            &r,
            |xp| residual.eval(xp),
            config.fd_rel_step,
            config.jacobian,
            config.parallel_jacobian,
        );
        let step = levenberg_marquardt_step(&jac.matrix, &r, config);
        let trial = backtrack(&x, &step.dx, r_norm, |xt| residual.eval(xt), config, iteration)?;

        let record = IterationRecord {
            iteration,
            residual_norm: r_norm,
            step_norm: trial.scale * step.dx.norm(),
            scale: trial.scale,
            backtracks: trial.backtracks,
            lambda: step.lambda,
            frozen_columns: jac.frozen.len(),
        };
        tracing::debug!(
            iteration,
            residual_norm = record.residual_norm,
            new_norm = trial.r_norm,
            step_norm = record.step_norm,
            scale = record.scale,
            backtracks = record.backtracks,
            lambda = record.lambda,
            "iteration accepted"
        );

        x = trial.x;
        map.unpack_into(&x, streams, &config.bounds);
        r = assemble(units, streams, species).map_err(|e| e.at_iteration(iteration))?;
        r_norm = r.norm();

        report.iterations = iteration;
        report.residual_norm = r_norm;
        if let Some(cb) = on_iteration.as_deref_mut() {
            cb(&record);
        }
        report.history.push(record);
    }

    if r_norm < config.abs_tol {
        report.status = SolveStatus::Converged;
    }
    match report.status {
        SolveStatus::Converged => tracing::info!(
            iterations = report.iterations,
            residual_norm = report.residual_norm,
            "solve converged"
        ),
        SolveStatus::MaxIterReached => tracing::warn!(
            iterations = report.iterations,
            residual_norm = report.residual_norm,
            "iteration cap reached without convergence"
        ),
    }
    Ok(report)
}
