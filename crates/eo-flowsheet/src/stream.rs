//! Material streams and their known/unknown flags.

use eo_core::units::{MolarFlow, Pressure, Temperature, k, mol_per_s, pa};
use eo_core::units::constants::{P_STD_PA, T_REF_K};

/// Which stream fields are fixed by the user.
///
/// Everything defaults to unknown. A composition flag missing for a species
/// index (the vector is shorter than the species list) also reads as unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownFlags {
    pub flow: bool,
    pub composition: Vec<bool>,
    pub temperature: bool,
    pub pressure: bool,
}

impl KnownFlags {
    /// Every field fixed, for `n_species` composition entries.
    pub fn all(n_species: usize) -> Self {
        Self {
            flow: true,
            composition: vec![true; n_species],
            temperature: true,
            pressure: true,
        }
    }

    /// Every field unknown.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether composition entry `i` is fixed.
    pub fn composition_known(&self, i: usize) -> bool {
        self.composition.get(i).copied().unwrap_or(false)
    }

    /// True when all `n_species` composition entries are fixed.
    pub fn composition_fully_known(&self, n_species: usize) -> bool {
        (0..n_species).all(|i| self.composition_known(i))
    }
}

/// A material stream.
///
/// Units: flow mol/s, temperature K, pressure Pa, composition mole fractions
/// over the flowsheet's ordered species list.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub name: String,
    /// Molar flow [mol/s]
    pub flow: f64,
    /// Mole fractions
    pub composition: Vec<f64>,
    /// Temperature [K]
    pub temperature: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    pub known: KnownFlags,
}

impl Stream {
    /// New stream with every field unknown and neutral initial guesses:
    /// 1 mol/s, uniform composition, 298.15 K, 101325 Pa.
    pub fn new(name: impl Into<String>, n_species: usize) -> Self {
        let uniform = if n_species == 0 {
            0.0
        } else {
            1.0 / n_species as f64
        };
        Self {
            name: name.into(),
            flow: 1.0,
            composition: vec![uniform; n_species],
            temperature: T_REF_K,
            pressure: P_STD_PA,
            known: KnownFlags::none(),
        }
    }

    /// Fully specified feed stream.
    pub fn feed(
        name: impl Into<String>,
        flow: f64,
        composition: Vec<f64>,
        temperature: f64,
        pressure: f64,
    ) -> Self {
        let n = composition.len();
        Self {
            name: name.into(),
            flow,
            composition,
            temperature,
            pressure,
            known: KnownFlags::all(n),
        }
    }

    /// Set the flow and mark it known.
    pub fn with_flow(mut self, flow: f64) -> Self {
        self.flow = flow;
        self.known.flow = true;
        self
    }

    /// Set the composition and mark every entry known.
    pub fn with_composition(mut self, composition: Vec<f64>) -> Self {
        self.known.composition = vec![true; composition.len()];
        self.composition = composition;
        self
    }

    /// Set the temperature and mark it known.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self.known.temperature = true;
        self
    }

    /// Set the pressure and mark it known.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self.known.pressure = true;
        self
    }

    /// Replace the initial guesses without touching the known flags.
    pub fn with_guess(mut self, flow: f64, temperature: f64, pressure: f64) -> Self {
        self.flow = flow;
        self.temperature = temperature;
        self.pressure = pressure;
        self
    }

    pub fn molar_flow(&self) -> MolarFlow {
        mol_per_s(self.flow)
    }

    pub fn temperature_k(&self) -> Temperature {
        k(self.temperature)
    }

    pub fn pressure_pa(&self) -> Pressure {
        pa(self.pressure)
    }

    /// Component molar flows F·zᵢ [mol/s].
    pub fn component_flows(&self) -> impl Iterator<Item = f64> + '_ {
        self.composition.iter().map(move |z| self.flow * z)
    }
}
