//! Finite difference Jacobian computation.

use crate::config::JacobianScheme;
use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// Jacobian estimate plus the columns that had to be zeroed.
#[derive(Debug, Clone)]
pub struct Jacobian {
    pub matrix: DMatrix<f64>,
    /// Columns whose perturbed evaluation failed or was non-finite.
    pub frozen: Vec<usize>,
}

/// Estimate the Jacobian of `f` at `x`, given `f_x = f(x)`.
///
/// Step for column j is `rel_step * max(1, |x_j|)`. A column whose perturbed
/// residual errors out or contains non-finite values is set to zero, which
/// freezes that unknown for the step instead of aborting the solve.
pub fn estimate<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: F,
    rel_step: f64,
    scheme: JacobianScheme,
    parallel: bool,
) -> Jacobian
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>> + Sync,
{
    let n = x.len();
    let m = f_x.len();
    let column = |j: usize| match scheme {
        JacobianScheme::Forward => forward_column(x, f_x, &f, j, rel_step),
        JacobianScheme::Central => central_column(x, &f, j, rel_step),
    };

    let columns: Vec<Option<DVector<f64>>> = if parallel {
        (0..n).into_par_iter().map(column).collect()
    } else {
        (0..n).map(column).collect()
    };

    let mut matrix = DMatrix::zeros(m, n);
    let mut frozen = Vec::new();
    for (j, col) in columns.into_iter().enumerate() {
        match col {
            Some(c) if c.len() == m => matrix.set_column(j, &c),
            _ => {
                tracing::trace!(column = j, "jacobian column zeroed");
                frozen.push(j);
            }
        }
    }
    Jacobian { matrix, frozen }
}

fn step_for(x: &DVector<f64>, j: usize, rel_step: f64) -> f64 {
    rel_step * x[j].abs().max(1.0)
}

fn forward_column<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: &F,
    j: usize,
    rel_step: f64,
) -> Option<DVector<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let dx = step_for(x, j, rel_step);
    let mut x_perturbed = x.clone();
    x_perturbed[j] += dx;

    let f_perturbed = f(&x_perturbed).ok()?;
    if f_perturbed.len() != f_x.len() {
        return None;
    }
    let df = (f_perturbed - f_x) / dx;
    df.iter().all(|v| v.is_finite()).then_some(df)
}

fn central_column<F>(x: &DVector<f64>, f: &F, j: usize, rel_step: f64) -> Option<DVector<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let dx = step_for(x, j, rel_step);

    let mut x_plus = x.clone();
    x_plus[j] += dx;
    let f_plus = f(&x_plus).ok()?;

    let mut x_minus = x.clone();
    x_minus[j] -= dx;
    let f_minus = f(&x_minus).ok()?;

    if f_plus.len() != f_minus.len() {
        return None;
    }
    let df = (f_plus - f_minus) / (2.0 * dx);
    df.iter().all(|v| v.is_finite()).then_some(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn eval<F>(f: &F, x: &DVector<f64>) -> DVector<f64>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    {
        f(x).unwrap()
    }

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = estimate(&x, &eval(&f, &x), f, 1e-7, JacobianScheme::Forward, false);

        assert!((jac.matrix[(0, 0)] - 2.0).abs() < 1e-5);
        assert!(jac.frozen.is_empty());
    }

    #[test]
    fn jacobian_quadratic_central() {
        // f(x) = x^2, J = 2*x
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = estimate(&x, &eval(&f, &x), f, 1e-5, JacobianScheme::Central, false);

        assert!((jac.matrix[(0, 0)] - 6.0).abs() < 1e-8);
    }

    #[test]
    fn failing_column_is_zeroed() {
        // Perturbing x[1] upward leaves the domain.
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[1] > 1.0 {
                return Err(SolverError::LineSearchFailure {
                    iteration: 0,
                    residual_norm: 0.0,
                    scale: 0.0,
                });
            }
            Ok(DVector::from_vec(vec![x[0] + x[1], x[0] - x[1]]))
        };

        let x = DVector::from_vec(vec![2.0, 1.0]);
        let jac = estimate(&x, &eval(&f, &x), f, 1e-7, JacobianScheme::Forward, false);

        assert_eq!(jac.frozen, vec![1]);
        assert_eq!(jac.matrix[(0, 1)], 0.0);
        assert_eq!(jac.matrix[(1, 1)], 0.0);
        assert!((jac.matrix[(0, 0)] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_column_is_zeroed() {
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let v = if x[0] > 0.0 { f64::INFINITY } else { 0.0 };
            Ok(DVector::from_vec(vec![v, x[1]]))
        };

        let x = DVector::from_vec(vec![0.0, 1.0]);
        let jac = estimate(&x, &eval(&f, &x), f, 1e-7, JacobianScheme::Forward, false);
        assert_eq!(jac.frozen, vec![0]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                x[0] * x[1],
                x[1].sin() + x[2],
                x[0].exp() - x[2] * x[2],
            ]))
        };

        let x = DVector::from_vec(vec![0.3, 1.2, -0.7]);
        let f_x = eval(&f, &x);
        let seq = estimate(&x, &f_x, f, 1e-7, JacobianScheme::Forward, false);
        let par = estimate(&x, &f_x, f, 1e-7, JacobianScheme::Forward, true);
        assert_eq!(seq.matrix, par.matrix);
    }
}
