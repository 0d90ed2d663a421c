//! eo-thermo: ideal-gas thermodynamic properties for eoflow.
//!
//! Provides:
//! - Species records with piecewise Shomate correlations
//! - A species library with name lookup (plus NIST defaults and JSON helpers)
//! - The pure-species property engine (cp, h, s)
//! - The ideal-gas mixture closure (MW, cp, cv, γ, h, s)
//! - Inverse temperature solves from enthalpy or entropy targets
//!
//! Canonical units: K, Pa, kJ/kmol, kJ/(kmol·K), kg/kmol.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eo_thermo::{EnthalpyMode, InverseConfig, ThermoConstants, ThermoLibrary, ThermoPackage};
//!
//! let pkg = ThermoPackage::new(
//!     Arc::new(ThermoLibrary::nist_defaults()),
//!     vec!["N2".into(), "O2".into()],
//!     ThermoConstants::default(),
//! )
//! .unwrap();
//!
//! let z = [0.79, 0.21];
//! let air = pkg.mixture(&z).unwrap();
//! let h = air.enthalpy(600.0, EnthalpyMode::Sensible).unwrap();
//! let t = eo_thermo::temperature_from_enthalpy(&air, h, EnthalpyMode::Sensible, &InverseConfig::default())
//!     .unwrap();
//! assert!((t - 600.0).abs() < 1e-6);
//! ```

pub mod constants;
pub mod error;
pub mod inverse;
pub mod library;
pub mod mixture;
pub mod shomate;
pub mod species;

// Re-exports for ergonomics
pub use constants::ThermoConstants;
pub use error::{ThermoError, ThermoResult};
pub use inverse::{
    InverseConfig, temperature_from_enthalpy, temperature_from_enthalpy_near,
    temperature_from_entropy,
};
pub use library::ThermoLibrary;
pub use mixture::{Mixture, ThermoPackage};
pub use shomate::EnthalpyMode;
pub use species::{ShomateRange, Species};
