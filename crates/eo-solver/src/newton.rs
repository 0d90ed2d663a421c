//! Levenberg–Marquardt step and backtracking line search.

use crate::config::SolveConfig;
use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Outcome of the damped linear solve.
#[derive(Debug, Clone)]
pub struct LmStep {
    pub dx: DVector<f64>,
    /// λ actually used (after escalation).
    pub lambda: f64,
    /// Number of times λ was raised.
    pub escalations: usize,
}

impl LmStep {
    pub fn is_zero(&self) -> bool {
        self.dx.iter().all(|v| *v == 0.0)
    }
}

/// Solve `(JᵀJ + λI) dx = −Jᵀr`.
///
/// λ starts at `lm_lambda_scale · mean(diag JᵀJ)`, floored at
/// `lm_lambda_floor`, and is multiplied by 10 whenever the factorization fails
/// or yields a non-finite step. After `lm_max_retries` escalations a zero step
/// is returned.
pub fn levenberg_marquardt_step(
    jac: &DMatrix<f64>,
    r: &DVector<f64>,
    config: &SolveConfig,
) -> LmStep {
    let n = jac.ncols();
    let jt = jac.transpose();
    let jtj = &jt * jac;
    let rhs = -(&jt * r);

    let mean_diag = if n == 0 {
        0.0
    } else {
        jtj.diagonal().iter().map(|d| d.abs()).sum::<f64>() / n as f64
    };
    let mut lambda = (config.lm_lambda_scale * mean_diag).max(config.lm_lambda_floor);

    for escalations in 0..=config.lm_max_retries {
        let mut a = jtj.clone();
        for i in 0..n {
            a[(i, i)] += lambda;
        }
        let dx = match a.clone().cholesky() {
            Some(chol) => Some(chol.solve(&rhs)),
            None => a.lu().solve(&rhs),
        };
        if let Some(dx) = dx.filter(|d| d.iter().all(|v| v.is_finite())) {
            return LmStep {
                dx,
                lambda,
                escalations,
            };
        }
        tracing::debug!(lambda, "damped system singular, raising lambda");
        lambda *= 10.0;
    }

    LmStep {
        dx: DVector::zeros(n),
        lambda,
        escalations: config.lm_max_retries,
    }
}

/// Accepted line-search trial.
#[derive(Debug, Clone)]
pub struct Trial {
    pub x: DVector<f64>,
    pub r: DVector<f64>,
    pub r_norm: f64,
    pub scale: f64,
    pub backtracks: usize,
}

/// Halve the step from `config.damping` until the trial residual is finite and
/// no larger than `r_norm`.
///
/// A zero step is accepted at the first scale with an unchanged residual.
pub fn backtrack<F>(
    x: &DVector<f64>,
    dx: &DVector<f64>,
    r_norm: f64,
    f: F,
    config: &SolveConfig,
    iteration: usize,
) -> SolverResult<Trial>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let failure = |scale: f64| SolverError::LineSearchFailure {
        iteration,
        residual_norm: r_norm,
        scale,
    };

    let mut scale = config.damping;
    for backtracks in 0..=config.max_backtracks {
        if scale < config.min_step_scale {
            break;
        }
        let x_trial = x + scale * dx;
        if let Ok(r_trial) = f(&x_trial) {
            let norm = r_trial.norm();
            if norm.is_finite() && norm <= r_norm {
                return Ok(Trial {
                    x: x_trial,
                    r: r_trial,
                    r_norm: norm,
                    scale,
                    backtracks,
                });
            }
        }
        scale *= 0.5;
    }
    Err(failure(scale))
}
