//! Inverse temperature solves: find T such that a mixture property hits a target.
//!
//! The bracketed path scans a uniform grid for the first sign change of
//! `f(T) = property(T) − target` and bisects inside it. A scan without a sign
//! change is an error carrying the closest grid point; an unconverged guess is
//! never returned.

use crate::error::{ThermoError, ThermoResult};
use crate::mixture::Mixture;
use crate::shomate::EnthalpyMode;
use tracing::{debug, trace};

/// Inverse solve settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseConfig {
    /// Lower end of the scan [K]
    pub t_low: f64,
    /// Upper end of the scan [K]
    pub t_high: f64,
    /// Number of grid points (>= 2)
    pub grid_points: usize,
    /// Bisection stops once the bracket is narrower than this [K]
    pub t_tol: f64,
    /// Bisection stops once |f| falls below this (property units)
    pub f_tol: f64,
    /// Maximum bisection / Newton iterations
    pub max_iterations: usize,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            t_low: 150.0,
            t_high: 4000.0,
            grid_points: 200,
            t_tol: 1e-10,
            f_tol: 1e-6,
            max_iterations: 200,
        }
    }
}

/// Temperature [K] at which the mixture enthalpy equals `target` [kJ/kmol].
pub fn temperature_from_enthalpy(
    mixture: &Mixture<'_>,
    target: f64,
    mode: EnthalpyMode,
    config: &InverseConfig,
) -> ThermoResult<f64> {
    bracketed_root(
        |t| mixture.enthalpy(t, mode),
        "enthalpy",
        target,
        scan_interval(mixture, config)?,
        config,
    )
}

/// Temperature [K] at which the mixture entropy at pressure `p` [Pa] equals
/// `target` [kJ/(kmol·K)].
pub fn temperature_from_entropy(
    mixture: &Mixture<'_>,
    target: f64,
    p: f64,
    config: &InverseConfig,
) -> ThermoResult<f64> {
    bracketed_root(
        |t| mixture.entropy(t, p),
        "entropy",
        target,
        scan_interval(mixture, config)?,
        config,
    )
}

/// Enthalpy inversion seeded with a guess.
///
/// Runs the bracketed solve first. If no bracket exists, a local Newton
/// iteration (slope = cp) starts from `guess`; its result is accepted only if
/// the residual at the returned temperature is within `f_tol`. Otherwise the
/// original `UnbracketedRoot` error is returned.
pub fn temperature_from_enthalpy_near(
    mixture: &Mixture<'_>,
    target: f64,
    mode: EnthalpyMode,
    guess: f64,
    config: &InverseConfig,
) -> ThermoResult<f64> {
    let unbracketed = match temperature_from_enthalpy(mixture, target, mode, config) {
        Ok(t) => return Ok(t),
        Err(err @ ThermoError::UnbracketedRoot { .. }) => err,
        Err(other) => return Err(other),
    };

    let (lo, hi) = mixture.coverage()?;
    let mut t = guess.clamp(lo, hi);
    for _ in 0..config.max_iterations {
        let f = mixture.enthalpy(t, mode)? - target;
        if f.abs() <= config.f_tol {
            break;
        }
        let slope = mixture.cp(t)?;
        if !slope.is_finite() || slope <= 0.0 {
            break;
        }
        let next = (t - f / slope).clamp(lo, hi);
        if next == t {
            break;
        }
        t = next;
    }

    match mixture.enthalpy(t, mode) {
        Ok(h) if (h - target).abs() <= config.f_tol => {
            trace!(t, guess, "guess-seeded enthalpy inversion accepted");
            Ok(t)
        }
        _ => Err(unbracketed),
    }
}

/// Scan interval clipped to the mixture's common coverage.
fn scan_interval(mixture: &Mixture<'_>, config: &InverseConfig) -> ThermoResult<(f64, f64)> {
    let (lo, hi) = mixture.coverage()?;
    let (t_lo, t_hi) = (config.t_low.max(lo), config.t_high.min(hi));
    if t_lo > t_hi {
        return Err(ThermoError::EmptyScanInterval {
            t_low: config.t_low,
            t_high: config.t_high,
            coverage_min: lo,
            coverage_max: hi,
        });
    }
    Ok((t_lo, t_hi))
}

fn bracketed_root<F>(
    property: F,
    what: &'static str,
    target: f64,
    (t_lo, t_hi): (f64, f64),
    config: &InverseConfig,
) -> ThermoResult<f64>
where
    F: Fn(f64) -> ThermoResult<f64>,
{
    let residual = |t: f64| -> ThermoResult<f64> {
        let f = property(t)? - target;
        if f.is_finite() {
            Ok(f)
        } else {
            Err(ThermoError::NonFiniteThermoEvaluation { what, t })
        }
    };

    let n = config.grid_points.max(2);
    let grid_t = |i: usize| {
        if i + 1 == n {
            t_hi
        } else {
            t_lo + (t_hi - t_lo) * i as f64 / (n - 1) as f64
        }
    };

    let mut best_t = t_lo;
    let mut best_f = f64::INFINITY;
    let mut prev: Option<(f64, f64)> = None;

    for i in 0..n {
        let t = grid_t(i);
        let f = residual(t)?;
        if f.abs() < best_f.abs() {
            best_t = t;
            best_f = f;
        }
        if f == 0.0 {
            return Ok(t);
        }
        if let Some((t_prev, f_prev)) = prev {
            if f_prev.signum() != f.signum() {
                debug!(what, target, t_lo = t_prev, t_hi = t, "bracket found");
                return bisect(&residual, (t_prev, f_prev), (t, f), config);
            }
        }
        prev = Some((t, f));
    }

    Err(ThermoError::UnbracketedRoot {
        target,
        best_t,
        best_residual: best_f,
    })
}

fn bisect<R>(
    residual: &R,
    (mut a, mut fa): (f64, f64),
    (mut b, _fb): (f64, f64),
    config: &InverseConfig,
) -> ThermoResult<f64>
where
    R: Fn(f64) -> ThermoResult<f64>,
{
    for _ in 0..config.max_iterations {
        let mid = 0.5 * (a + b);
        let fm = residual(mid)?;
        if fm.abs() <= config.f_tol || (b - a).abs() < config.t_tol {
            return Ok(mid);
        }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Ok(0.5 * (a + b))
}
