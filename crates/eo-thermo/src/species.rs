//! Species records and their Shomate correlation ranges.

use crate::error::{ThermoError, ThermoResult};
use eo_core::units::{MolarMass, kg_per_kmol};
use serde::{Deserialize, Serialize};

/// One Shomate correlation interval.
///
/// Coefficients follow the NIST Webbook convention with `t = T / 1000`:
///
/// ```text
/// cp  = A + B t + C t² + D t³ + E / t²
/// H   = A t + B t²/2 + C t³/3 + D t⁴/4 − E/t + F
/// S   = A ln t + B t + C t²/2 + D t³/3 − E/(2t²) + G
/// ```
///
/// `H` is the tabulated standard formation enthalpy, kept for provenance only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShomateRange {
    /// Lower bound of the interval [K], inclusive
    pub t_min: f64,
    /// Upper bound of the interval [K], inclusive
    pub t_max: f64,
    /// Coefficients A..H
    pub coeffs: [f64; 8],
}

impl ShomateRange {
    pub fn new(t_min: f64, t_max: f64, coeffs: [f64; 8]) -> Self {
        Self {
            t_min,
            t_max,
            coeffs,
        }
    }

    /// True when `t` lies in `[t_min, t_max]`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min && t <= self.t_max
    }

    /// Molar heat capacity [kJ/(kmol·K)].
    pub fn cp(&self, t_k: f64) -> f64 {
        let [a, b, c, d, e, ..] = self.coeffs;
        let t = t_k / 1000.0;
        a + b * t + c * t * t + d * t * t * t + e / (t * t)
    }

    /// Absolute molar enthalpy including the F offset [kJ/kmol].
    pub fn h_abs(&self, t_k: f64) -> f64 {
        let [a, b, c, d, e, f, ..] = self.coeffs;
        let t = t_k / 1000.0;
        let h_kj_per_mol =
            a * t + b * t * t / 2.0 + c * t.powi(3) / 3.0 + d * t.powi(4) / 4.0 - e / t + f;
        1000.0 * h_kj_per_mol
    }

    /// Molar entropy at standard pressure [kJ/(kmol·K)].
    pub fn s(&self, t_k: f64) -> f64 {
        let [a, b, c, d, e, _, g, _] = self.coeffs;
        let t = t_k / 1000.0;
        a * t.ln() + b * t + c * t * t / 2.0 + d * t.powi(3) / 3.0 - e / (2.0 * t * t) + g
    }
}

/// Immutable species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpeciesData", into = "SpeciesData")]
pub struct Species {
    name: String,
    molecular_weight: f64,
    hf298: Option<f64>,
    ranges: Vec<ShomateRange>,
    source: Option<String>,
}

/// Wire shape of a species; validated into [`Species`] on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpeciesData {
    name: String,
    /// [kg/kmol]
    molecular_weight: f64,
    /// Standard formation enthalpy at 298.15 K [kJ/kmol]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hf298: Option<f64>,
    ranges: Vec<ShomateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl TryFrom<SpeciesData> for Species {
    type Error = ThermoError;

    fn try_from(data: SpeciesData) -> Result<Self, Self::Error> {
        let mut species = Species::new(data.name, data.molecular_weight, data.ranges)?;
        species.hf298 = data.hf298;
        species.source = data.source;
        Ok(species)
    }
}

impl From<Species> for SpeciesData {
    fn from(s: Species) -> Self {
        Self {
            name: s.name,
            molecular_weight: s.molecular_weight,
            hf298: s.hf298,
            ranges: s.ranges,
            source: s.source,
        }
    }
}

impl Species {
    /// Create a species, validating its correlation ranges.
    ///
    /// Ranges must be non-empty, each with `t_min < t_max`, and non-overlapping.
    /// They are stored sorted by `t_min`. Adjacent ranges may share an endpoint.
    pub fn new(
        name: impl Into<String>,
        molecular_weight: f64,
        mut ranges: Vec<ShomateRange>,
    ) -> ThermoResult<Self> {
        let name = name.into();
        let invalid = |what: String| ThermoError::InvalidShomateRange {
            species: name.clone(),
            what,
        };

        if !molecular_weight.is_finite() || molecular_weight <= 0.0 {
            return Err(invalid(format!(
                "molecular weight must be positive, got {molecular_weight}"
            )));
        }
        if ranges.is_empty() {
            return Err(invalid("no temperature ranges".to_string()));
        }
        for (i, r) in ranges.iter().enumerate() {
            if !(r.t_min.is_finite() && r.t_max.is_finite()) || r.t_min <= 0.0 || r.t_min >= r.t_max
            {
                return Err(invalid(format!(
                    "range {i} has invalid bounds [{}, {}]",
                    r.t_min, r.t_max
                )));
            }
            if r.coeffs.iter().any(|c| !c.is_finite()) {
                return Err(invalid(format!("range {i} has non-finite coefficients")));
            }
        }
        ranges.sort_by(|a, b| a.t_min.total_cmp(&b.t_min));
        for (i, pair) in ranges.windows(2).enumerate() {
            if pair[1].t_min < pair[0].t_max {
                return Err(invalid(format!(
                    "range {} [{}, {}] overlaps range {} [{}, {}]",
                    i,
                    pair[0].t_min,
                    pair[0].t_max,
                    i + 1,
                    pair[1].t_min,
                    pair[1].t_max
                )));
            }
        }

        Ok(Self {
            name,
            molecular_weight,
            hf298: None,
            ranges,
            source: None,
        })
    }

    pub fn with_hf298(mut self, hf298_kj_per_kmol: f64) -> Self {
        self.hf298 = Some(hf298_kj_per_kmol);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Molecular weight [kg/kmol].
    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    /// Molecular weight as a dimensioned quantity.
    pub fn molar_mass(&self) -> MolarMass {
        kg_per_kmol(self.molecular_weight)
    }

    /// Standard formation enthalpy at 298.15 K [kJ/kmol], if tabulated.
    pub fn hf298(&self) -> Option<f64> {
        self.hf298
    }

    pub fn ranges(&self) -> &[ShomateRange] {
        &self.ranges
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Union bounds of all ranges `(t_min, t_max)`.
    pub fn coverage(&self) -> (f64, f64) {
        let lo = self
            .ranges
            .iter()
            .map(|r| r.t_min)
            .fold(f64::INFINITY, f64::min);
        let hi = self
            .ranges
            .iter()
            .map(|r| r.t_max)
            .fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    }

    /// First range whose inclusive interval contains `t`.
    pub fn range_for(&self, t: f64) -> ThermoResult<&ShomateRange> {
        self.ranges
            .iter()
            .find(|r| r.contains(t))
            .ok_or_else(|| {
                let (t_min, t_max) = self.coverage();
                ThermoError::TemperatureOutOfRange {
                    species: self.name.clone(),
                    t,
                    t_min,
                    t_max,
                }
            })
    }
}
