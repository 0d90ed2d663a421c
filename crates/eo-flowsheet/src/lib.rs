//! eo-flowsheet: streams and unit operations for eoflow.
//!
//! Provides:
//! - `Stream` with per-field known/unknown flags
//! - the `UnitModel` trait through which units contribute residual equations
//! - an adiabatic `Mixer`
//! - the `Flowsheet` container and a `StreamTable` report view
//!
//! Units reference streams by `StreamId` and are deterministic functions of the
//! stream state, suitable for simultaneous (equation-oriented) solving.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eo_flowsheet::{Flowsheet, Mixer, Stream, UnitModel};
//! use eo_thermo::{ThermoConstants, ThermoLibrary, ThermoPackage};
//!
//! let species = vec!["N2".to_string(), "O2".to_string()];
//! let thermo = Arc::new(
//!     ThermoPackage::new(
//!         Arc::new(ThermoLibrary::nist_defaults()),
//!         species.clone(),
//!         ThermoConstants::default(),
//!     )
//!     .unwrap(),
//! );
//!
//! let mut fs = Flowsheet::new(species);
//! let a = fs.add_stream(Stream::feed("a", 10.0, vec![1.0, 0.0], 300.0, 1.0e5)).unwrap();
//! let b = fs.add_stream(Stream::feed("b", 5.0, vec![0.0, 1.0], 300.0, 1.0e5)).unwrap();
//! let out = fs.add_stream(Stream::new("out", 2)).unwrap();
//! let mixer = Mixer::new("M-101", vec![a, b], out, thermo).unwrap();
//!
//! let residuals = mixer.equations(&fs.context()).unwrap();
//! assert_eq!(residuals.len(), 5);
//! fs.add_unit(Box::new(mixer));
//! ```

pub mod error;
pub mod flowsheet;
pub mod mixer;
pub mod report;
pub mod stream;
pub mod traits;

// Re-exports
pub use error::{FlowsheetError, FlowsheetResult};
pub use flowsheet::Flowsheet;
pub use mixer::Mixer;
pub use report::{StreamRow, StreamTable};
pub use stream::{KnownFlags, Stream};
pub use traits::{EvalContext, UnitModel};
