//! Mapping between unknown stream fields and the unconstrained solver vector.
//!
//! Transforms:
//! - flow: `x = ln F`, unpacked as `exp(x)` clamped to the flow bounds
//! - composition: one logit per species, unpacked through a softmax so the
//!   result always lies on the simplex
//! - temperature, pressure: face value, clamped on unpack
//!
//! The layout is positional: stream order, then flow, composition entries,
//! temperature, pressure within a stream.

use crate::config::Bounds;
use crate::error::{SolverError, SolverResult};
use eo_flowsheet::Stream;
use nalgebra::DVector;

/// Which field of a stream an unknown drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Flow,
    /// Logit of the given species index.
    Composition(usize),
    Temperature,
    Pressure,
}

/// One slot of the unknown vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownEntry {
    /// Stream index in the flowsheet
    pub stream: usize,
    pub kind: VariableKind,
}

/// Positional bijection between unknown fields and vector slots.
///
/// Rebuilt at the start of every solve, since known flags may change
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownMap {
    entries: Vec<UnknownEntry>,
    n_species: usize,
}

impl UnknownMap {
    /// Scan the streams' known flags.
    ///
    /// A composition with any unknown entry contributes one logit per species.
    pub fn build(streams: &[Stream], n_species: usize) -> SolverResult<Self> {
        let mut entries = Vec::new();
        for (idx, stream) in streams.iter().enumerate() {
            if stream.composition.len() != n_species {
                return Err(SolverError::InvalidCompositionSchema {
                    stream: stream.name.clone(),
                    expected: n_species,
                    found: stream.composition.len(),
                });
            }
            let known = &stream.known;
            if !known.flow {
                entries.push(UnknownEntry {
                    stream: idx,
                    kind: VariableKind::Flow,
                });
            }
            if n_species > 0 && !known.composition_fully_known(n_species) {
                entries.extend((0..n_species).map(|i| UnknownEntry {
                    stream: idx,
                    kind: VariableKind::Composition(i),
                }));
            }
            if !known.temperature {
                entries.push(UnknownEntry {
                    stream: idx,
                    kind: VariableKind::Temperature,
                });
            }
            if !known.pressure {
                entries.push(UnknownEntry {
                    stream: idx,
                    kind: VariableKind::Pressure,
                });
            }
        }
        Ok(Self { entries, n_species })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[UnknownEntry] {
        &self.entries
    }

    /// Encode the current stream values into the unconstrained vector.
    pub fn pack(&self, streams: &[Stream], bounds: &Bounds) -> DVector<f64> {
        let mut x = DVector::zeros(self.entries.len());
        let mut k = 0;
        while k < self.entries.len() {
            let entry = self.entries[k];
            let stream = &streams[entry.stream];
            match entry.kind {
                VariableKind::Flow => {
                    x[k] = stream.flow.max(bounds.flow_min).ln();
                }
                VariableKind::Composition(_) => {
                    let z = normalized(&stream.composition);
                    for (i, zi) in z.iter().enumerate() {
                        x[k + i] = zi.max(bounds.composition_floor).ln();
                    }
                    k += self.n_species;
                    continue;
                }
                VariableKind::Temperature => x[k] = stream.temperature,
                VariableKind::Pressure => x[k] = stream.pressure,
            }
            k += 1;
        }
        x
    }

    /// Decode `x` into the unknown fields of `streams`; known fields are left as is.
    pub fn unpack_into(&self, x: &DVector<f64>, streams: &mut [Stream], bounds: &Bounds) {
        let mut k = 0;
        while k < self.entries.len() {
            let entry = self.entries[k];
            let stream = &mut streams[entry.stream];
            match entry.kind {
                VariableKind::Flow => {
                    let lo = bounds.flow_min.ln();
                    let hi = bounds.flow_max.ln();
                    stream.flow = clamp(x[k], lo, hi).exp();
                }
                VariableKind::Composition(_) => {
                    let logits: Vec<f64> = x.rows(k, self.n_species).iter().copied().collect();
                    stream.composition = softmax(&logits, bounds.composition_floor);
                    k += self.n_species;
                    continue;
                }
                VariableKind::Temperature => {
                    stream.temperature = clamp(x[k], bounds.t_min, bounds.t_max);
                }
                VariableKind::Pressure => {
                    stream.pressure = clamp(x[k], bounds.p_min, bounds.p_max);
                }
            }
            k += 1;
        }
    }

    /// Copy of `base` with `x` unpacked into it.
    pub fn unpack(&self, x: &DVector<f64>, base: &[Stream], bounds: &Bounds) -> Vec<Stream> {
        let mut streams = base.to_vec();
        self.unpack_into(x, &mut streams, bounds);
        streams
    }
}

/// NaN maps to the lower bound.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

fn normalized(z: &[f64]) -> Vec<f64> {
    let sum: f64 = z.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if sum > 0.0 {
        z.iter()
            .map(|v| if v.is_finite() && *v > 0.0 { v / sum } else { 0.0 })
            .collect()
    } else {
        vec![1.0 / z.len() as f64; z.len()]
    }
}

/// Stabilized softmax, floored and renormalized.
fn softmax(logits: &[f64], floor: f64) -> Vec<f64> {
    let max = logits
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    let shift = if max.is_finite() { max } else { 0.0 };
    let mut z: Vec<f64> = logits
        .iter()
        .map(|v| {
            let e = (v - shift).exp();
            if e.is_finite() { e } else { 0.0 }
        })
        .collect();
    let sum: f64 = z.iter().sum();
    if sum > 0.0 {
        z.iter_mut().for_each(|v| *v /= sum);
    } else {
        let u = 1.0 / z.len() as f64;
        z.iter_mut().for_each(|v| *v = u);
    }
    z.iter_mut().for_each(|v| *v = v.max(floor));
    let sum: f64 = z.iter().sum();
    z.iter_mut().for_each(|v| *v /= sum);
    z
}
