//! Global residual assembly.

use crate::config::Bounds;
use crate::error::{SolverError, SolverResult};
use crate::packing::UnknownMap;
use eo_flowsheet::{EvalContext, Stream, UnitModel};
use nalgebra::DVector;

/// Concatenate every unit's residuals, in unit order then equation order.
///
/// A non-finite entry fails with [`SolverError::NonFiniteResidual`] naming the
/// unit and its local equation index; the caller stamps the iteration.
pub fn assemble(
    units: &[Box<dyn UnitModel>],
    streams: &[Stream],
    species: &[String],
) -> SolverResult<DVector<f64>> {
    let ctx = EvalContext::new(streams, species);
    let mut out = Vec::new();
    for unit in units {
        let r = unit.equations(&ctx)?;
        if let Some(equation) = eo_core::numeric::first_non_finite(&r) {
            return Err(SolverError::NonFiniteResidual {
                iteration: 0,
                unit: unit.name().to_string(),
                equation,
            });
        }
        out.extend(r);
    }
    Ok(DVector::from_vec(out))
}

/// Residual as a function of the unknown vector.
///
/// Each call unpacks into a private copy of the base streams, so evaluations
/// are independent and may run concurrently.
pub struct ResidualFn<'a> {
    pub map: &'a UnknownMap,
    pub base: &'a [Stream],
    pub units: &'a [Box<dyn UnitModel>],
    pub species: &'a [String],
    pub bounds: &'a Bounds,
}

impl ResidualFn<'_> {
    pub fn streams_at(&self, x: &DVector<f64>) -> Vec<Stream> {
        self.map.unpack(x, self.base, self.bounds)
    }

    pub fn eval(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let streams = self.streams_at(x);
        assemble(self.units, &streams, self.species)
    }
}
