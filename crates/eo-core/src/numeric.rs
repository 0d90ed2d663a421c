//! Float helpers shared by the thermo and solver crates.

use crate::{CoreError, CoreResult};

/// Floating point type used throughout.
pub type Real = f64;

/// Mixed absolute/relative comparison tolerance.
///
/// Two values match when their difference is within `abs`, or within `rel`
/// times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through, or fail with [`CoreError::NonFinite`] naming `what`.
pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    match v.is_finite() {
        true => Ok(v),
        false => Err(CoreError::NonFinite { what, value: v }),
    }
}

/// Index of the first NaN or infinite entry.
pub fn first_non_finite(values: &[Real]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}
