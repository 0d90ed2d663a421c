//! Solver configuration.

/// Physical bounds applied when unpacking the unknown vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum molar flow [mol/s]
    pub flow_min: f64,
    /// Maximum molar flow [mol/s]
    pub flow_max: f64,
    /// Minimum temperature [K]
    pub t_min: f64,
    /// Maximum temperature [K]
    pub t_max: f64,
    /// Minimum pressure [Pa]
    pub p_min: f64,
    /// Maximum pressure [Pa]
    pub p_max: f64,
    /// Smallest mole fraction an unpacked composition entry may take
    pub composition_floor: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            flow_min: 1e-12,
            flow_max: 1e12,
            t_min: 50.0,
            t_max: 6000.0,
            p_min: 1.0,
            p_max: 1e9,
            composition_floor: 1e-15,
        }
    }
}

/// Finite-difference scheme for the Jacobian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JacobianScheme {
    /// One extra residual evaluation per column.
    #[default]
    Forward,
    /// Two evaluations per column, second-order accurate.
    Central,
}

/// Damped Newton / Levenberg–Marquardt configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual 2-norm
    pub abs_tol: f64,
    /// Relative finite-difference step, scaled by `max(1, |x_j|)`
    pub fd_rel_step: f64,
    /// Initial line-search step scale
    pub damping: f64,
    pub bounds: Bounds,
    /// λ as a multiple of the mean diagonal of JᵀJ
    pub lm_lambda_scale: f64,
    /// Lower bound on λ
    pub lm_lambda_floor: f64,
    /// Times λ is multiplied by 10 after a failed linear solve
    pub lm_max_retries: usize,
    /// Maximum step halvings per iteration
    pub max_backtracks: usize,
    /// Smallest step scale before the line search gives up
    pub min_step_scale: f64,
    pub jacobian: JacobianScheme,
    /// Evaluate Jacobian columns on the rayon pool
    pub parallel_jacobian: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_iterations: 60,
            abs_tol: 1e-9,
            fd_rel_step: 1e-7,
            damping: 1.0,
            bounds: Bounds::default(),
            lm_lambda_scale: 1e-6,
            lm_lambda_floor: 1e-12,
            lm_max_retries: 8,
            max_backtracks: 30,
            min_step_scale: 1e-10,
            jacobian: JacobianScheme::Forward,
            parallel_jacobian: true,
        }
    }
}
