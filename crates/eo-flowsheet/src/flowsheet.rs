//! Flowsheet container: species list, streams and units.

use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::Stream;
use crate::traits::{EvalContext, UnitModel};
use eo_core::{StreamId, UnitId};

/// A steady-state flowsheet.
///
/// Owns the streams and the units. Units refer to streams by [`StreamId`],
/// which is the stream's position in insertion order.
#[derive(Default)]
pub struct Flowsheet {
    species: Vec<String>,
    streams: Vec<Stream>,
    units: Vec<Box<dyn UnitModel>>,
}

impl Flowsheet {
    /// Create an empty flowsheet over an ordered species list.
    pub fn new(species: Vec<String>) -> Self {
        Self {
            species,
            streams: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Add a stream and return its ID.
    ///
    /// Names must be unique and the composition must have one entry per species.
    pub fn add_stream(&mut self, stream: Stream) -> FlowsheetResult<StreamId> {
        if self.streams.iter().any(|s| s.name == stream.name) {
            return Err(FlowsheetError::DuplicateStream { name: stream.name });
        }
        self.check_schema(&stream)?;
        let id = StreamId::from_index(self.streams.len() as u32);
        self.streams.push(stream);
        Ok(id)
    }

    /// Add a unit and return its ID.
    pub fn add_unit(&mut self, unit: Box<dyn UnitModel>) -> UnitId {
        let id = UnitId::from_index(self.units.len() as u32);
        self.units.push(unit);
        id
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn streams_mut(&mut self) -> &mut [Stream] {
        &mut self.streams
    }

    pub fn units(&self) -> &[Box<dyn UnitModel>] {
        &self.units
    }

    pub fn stream(&self, id: StreamId) -> Option<&Stream> {
        self.streams.get(id.slot())
    }

    pub fn stream_mut(&mut self, id: StreamId) -> Option<&mut Stream> {
        self.streams.get_mut(id.slot())
    }

    pub fn stream_by_name(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }

    /// Disjoint borrows: mutable streams next to the units and species list.
    pub fn split_mut(&mut self) -> (&mut [Stream], &[Box<dyn UnitModel>], &[String]) {
        (&mut self.streams, &self.units, &self.species)
    }

    /// Evaluation context over the current stream state.
    pub fn context(&self) -> EvalContext<'_> {
        EvalContext::new(&self.streams, &self.species)
    }

    /// Check stream references and composition lengths.
    pub fn validate(&self) -> FlowsheetResult<()> {
        for stream in &self.streams {
            self.check_schema(stream)?;
        }
        for unit in &self.units {
            for id in unit.streams() {
                if id.slot() >= self.streams.len() {
                    return Err(FlowsheetError::UnknownStream {
                        unit: unit.name().to_string(),
                        index: id.slot(),
                        len: self.streams.len(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_schema(&self, stream: &Stream) -> FlowsheetResult<()> {
        if stream.composition.len() != self.species.len() {
            return Err(FlowsheetError::InvalidCompositionSchema {
                stream: stream.name.clone(),
                expected: self.species.len(),
                found: stream.composition.len(),
            });
        }
        Ok(())
    }
}
