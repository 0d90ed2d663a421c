//! Core trait for unit operations.

use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::Stream;
use eo_core::StreamId;

/// Read-only view of the stream state handed to units.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub streams: &'a [Stream],
    pub species: &'a [String],
}

impl<'a> EvalContext<'a> {
    pub fn new(streams: &'a [Stream], species: &'a [String]) -> Self {
        Self { streams, species }
    }

    /// Stream by id; `unit` names the caller for the error message.
    pub fn stream(&self, unit: &str, id: StreamId) -> FlowsheetResult<&'a Stream> {
        self.streams
            .get(id.slot())
            .ok_or_else(|| FlowsheetError::UnknownStream {
                unit: unit.to_string(),
                index: id.slot(),
                len: self.streams.len(),
            })
    }
}

/// A unit operation contributing algebraic equations to the flowsheet.
///
/// Units hold stream ids, never the streams themselves. Implementations must
/// be deterministic functions of the stream state (no interior mutability):
/// the solver evaluates them concurrently against independent stream copies.
pub trait UnitModel: Send + Sync {
    /// Unit name for diagnostics.
    fn name(&self) -> &str;

    /// Every stream the unit reads, used for flowsheet validation.
    fn streams(&self) -> Vec<StreamId>;

    /// Residuals of the unit's equations, in a fixed order.
    ///
    /// Each entry is zero at an exact solution.
    fn equations(&self, ctx: &EvalContext<'_>) -> FlowsheetResult<Vec<f64>>;
}
