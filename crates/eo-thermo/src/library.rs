//! Species library: name lookup over immutable species records.

use crate::error::{ThermoError, ThermoResult};
use crate::species::{ShomateRange, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collection of species keyed by name.
///
/// The solver core only needs [`ThermoLibrary::get`] and
/// [`ThermoLibrary::has_species`]; the JSON helpers exist for front ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Species>", into = "Vec<Species>")]
pub struct ThermoLibrary {
    species: BTreeMap<String, Species>,
}

impl From<Vec<Species>> for ThermoLibrary {
    fn from(list: Vec<Species>) -> Self {
        let mut lib = ThermoLibrary::new();
        for s in list {
            lib.insert(s);
        }
        lib
    }
}

impl From<ThermoLibrary> for Vec<Species> {
    fn from(lib: ThermoLibrary) -> Self {
        lib.species.into_values().collect()
    }
}

impl ThermoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a species, returning the record it replaced.
    pub fn insert(&mut self, species: Species) -> Option<Species> {
        self.species.insert(species.name().to_string(), species)
    }

    /// Look up a species by name.
    pub fn get(&self, name: &str) -> ThermoResult<&Species> {
        self.species
            .get(name)
            .ok_or_else(|| ThermoError::SpeciesNotFound {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn has_species(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    /// Species names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.species.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn from_json_str(json: &str) -> ThermoResult<Self> {
        serde_json::from_str(json).map_err(|e| ThermoError::Library {
            message: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> ThermoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThermoError::Library {
            message: e.to_string(),
        })
    }

    /// Built-in ideal-gas data from the NIST Chemistry WebBook.
    ///
    /// Covers N2, O2, Ar, CO2, H2O, CH4 and H2.
    pub fn nist_defaults() -> Self {
        const NIST: &str = "NIST Chemistry WebBook, Shomate equation";

        // (name, MW [kg/kmol], Hf298 [kJ/kmol], ranges)
        let table: [(&str, f64, f64, &[(f64, f64, [f64; 8])]); 7] = [
            (
                "N2",
                28.0134,
                0.0,
                &[
                    (100.0, 500.0, [28.98641, 1.853978, -9.647459, 16.63537, 0.000117, -8.671914, 226.4168, 0.0]),
                    (500.0, 2000.0, [19.50583, 19.88705, -8.598535, 1.369784, 0.527601, -4.935202, 212.3900, 0.0]),
                    (2000.0, 6000.0, [35.51872, 1.128728, -0.196103, 0.014662, -4.553760, -18.97091, 224.9810, 0.0]),
                ],
            ),
            (
                "O2",
                31.9988,
                0.0,
                &[
                    (100.0, 700.0, [31.32234, -20.23531, 57.86644, -36.50624, -0.007374, -8.903471, 246.7945, 0.0]),
                    (700.0, 2000.0, [30.03235, 8.772972, -3.988133, 0.788313, -0.741599, -11.32468, 236.1663, 0.0]),
                    (2000.0, 6000.0, [20.91111, 10.72071, -2.020498, 0.146449, 9.245722, 5.337651, 237.6185, 0.0]),
                ],
            ),
            (
                "Ar",
                39.948,
                0.0,
                &[(298.0, 6000.0, [20.78600, 2.825911e-7, -1.464191e-7, 1.092131e-8, -3.661371e-8, -6.197350, 179.9990, 0.0])],
            ),
            (
                "CO2",
                44.0095,
                -393_522.4,
                &[
                    (298.0, 1200.0, [24.99735, 55.18696, -33.69137, 7.948387, -0.136638, -403.6075, 228.2431, -393.5224]),
                    (1200.0, 6000.0, [58.16639, 2.720074, -0.492289, 0.038844, -6.447293, -425.9186, 263.6125, -393.5224]),
                ],
            ),
            (
                "H2O",
                18.0153,
                -241_826.4,
                &[
                    (500.0, 1700.0, [30.09200, 6.832514, 6.793435, -2.534480, 0.082139, -250.8810, 223.3967, -241.8264]),
                    (1700.0, 6000.0, [41.96426, 8.622053, -1.499780, 0.098119, -11.15764, -272.1797, 219.7809, -241.8264]),
                ],
            ),
            (
                "CH4",
                16.0425,
                -74_873.1,
                &[
                    (298.0, 1300.0, [-0.703029, 108.4773, -42.52157, 5.862788, 0.678565, -76.84376, 158.7163, -74.87310]),
                    (1300.0, 6000.0, [85.81217, 11.26467, -2.114146, 0.138190, -26.42221, -153.5327, 224.4143, -74.87310]),
                ],
            ),
            (
                "H2",
                2.01588,
                0.0,
                &[
                    (298.0, 1000.0, [33.066178, -11.363417, 11.432816, -2.772874, -0.158558, -9.980797, 172.707974, 0.0]),
                    (1000.0, 2500.0, [18.563083, 12.257357, -2.859786, 0.268238, 1.977990, -1.147438, 156.288133, 0.0]),
                    (2500.0, 6000.0, [43.413560, -4.293079, 1.272428, -0.096876, -20.533862, -38.515158, 162.081354, 0.0]),
                ],
            ),
        ];

        let mut lib = ThermoLibrary::new();
        for (name, mw, hf, ranges) in table {
            let ranges = ranges
                .iter()
                .map(|&(lo, hi, c)| ShomateRange::new(lo, hi, c))
                .collect();
            // Table above is static and validated by `nist_defaults_are_valid`.
            if let Ok(species) = Species::new(name, mw, ranges) {
                lib.insert(species.with_hf298(hf).with_source(NIST));
            }
        }
        lib
    }
}
