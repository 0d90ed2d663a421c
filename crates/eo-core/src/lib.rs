//! eo-core: shared foundation for the eoflow crates.
//!
//! - `units`: uom SI aliases, constructors and physical constants
//! - `numeric`: float comparison and finiteness helpers
//! - `ids`: typed stream and unit handles
//! - `error`: the error every crate error converts into

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
