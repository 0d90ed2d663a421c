//! Ideal-gas mixture closure.
//!
//! Properties are mole-fraction weighted sums of the pure-species values.
//! Components with a zero mole fraction are skipped entirely, so they need
//! neither a library entry lookup nor temperature coverage.
//!
//! The composition is taken as given: no re-normalization happens here.

use crate::constants::ThermoConstants;
use crate::error::{ThermoError, ThermoResult};
use crate::library::ThermoLibrary;
use crate::shomate::{self, EnthalpyMode};
use crate::species::Species;
use std::sync::Arc;

/// Smallest |cv| accepted when forming gamma [kJ/(kmol·K)].
const CV_GUARD: f64 = 1e-12;

/// Transient view binding a library, a species list and a composition.
#[derive(Debug, Clone, Copy)]
pub struct Mixture<'a> {
    library: &'a ThermoLibrary,
    species: &'a [String],
    z: &'a [f64],
    constants: &'a ThermoConstants,
}

impl<'a> Mixture<'a> {
    pub fn new(
        library: &'a ThermoLibrary,
        species: &'a [String],
        z: &'a [f64],
        constants: &'a ThermoConstants,
    ) -> ThermoResult<Self> {
        if species.len() != z.len() {
            return Err(ThermoError::InvalidCompositionSchema {
                expected: species.len(),
                found: z.len(),
            });
        }
        Ok(Self {
            library,
            species,
            z,
            constants,
        })
    }

    pub fn constants(&self) -> &ThermoConstants {
        self.constants
    }

    pub fn composition(&self) -> &[f64] {
        self.z
    }

    /// Present components as `(species, mole fraction)`, in species-list order.
    fn components(&self) -> impl Iterator<Item = ThermoResult<(&'a Species, f64)>> + '_ {
        let library = self.library;
        self.species
            .iter()
            .zip(self.z.iter().copied())
            .filter(|(_, zi)| *zi != 0.0)
            .map(move |(name, zi)| library.get(name).map(|sp| (sp, zi)))
    }

    fn weighted(&self, prop: impl Fn(&Species) -> ThermoResult<f64>) -> ThermoResult<f64> {
        let mut sum = 0.0;
        for item in self.components() {
            let (sp, zi) = item?;
            sum += zi * prop(sp)?;
        }
        Ok(sum)
    }

    /// Mixture molecular weight [kg/kmol].
    pub fn molecular_weight(&self) -> ThermoResult<f64> {
        self.weighted(|sp| Ok(sp.molecular_weight()))
    }

    /// Molar cp [kJ/(kmol·K)].
    pub fn cp(&self, t: f64) -> ThermoResult<f64> {
        self.weighted(|sp| shomate::cp(sp, t))
    }

    /// Molar cv = cp − R [kJ/(kmol·K)].
    pub fn cv(&self, t: f64) -> ThermoResult<f64> {
        Ok(self.cp(t)? - self.constants.r)
    }

    /// Heat capacity ratio cp/cv.
    pub fn gamma(&self, t: f64) -> ThermoResult<f64> {
        let cp = self.cp(t)?;
        let cv = cp - self.constants.r;
        let guarded = if cv.abs() < CV_GUARD {
            CV_GUARD.copysign(cv)
        } else {
            cv
        };
        Ok(cp / guarded)
    }

    /// Molar enthalpy [kJ/kmol].
    pub fn enthalpy(&self, t: f64, mode: EnthalpyMode) -> ThermoResult<f64> {
        self.weighted(|sp| shomate::enthalpy(sp, t, mode, self.constants))
    }

    /// Molar entropy with ideal mixing and pressure terms [kJ/(kmol·K)].
    ///
    /// ```text
    /// s = Σ zᵢ sᵢ(T) − R Σ zᵢ ln zᵢ − R ln(P / P₀)
    /// ```
    pub fn entropy(&self, t: f64, p: f64) -> ThermoResult<f64> {
        let r = self.constants.r;
        let mut pure = 0.0;
        let mut mixing = 0.0;
        for item in self.components() {
            let (sp, zi) = item?;
            pure += zi * shomate::entropy(sp, t)?;
            if zi > 0.0 {
                mixing += zi * zi.ln();
            }
        }
        let s = pure - r * mixing - r * (p / self.constants.p_ref).ln();
        if s.is_finite() {
            Ok(s)
        } else {
            Err(ThermoError::NonFiniteThermoEvaluation { what: "entropy", t })
        }
    }

    /// Temperature interval covered by every present component.
    pub fn coverage(&self) -> ThermoResult<(f64, f64)> {
        let mut lo = f64::NEG_INFINITY;
        let mut hi = f64::INFINITY;
        for item in self.components() {
            let (sp, _) = item?;
            let (a, b) = sp.coverage();
            lo = lo.max(a);
            hi = hi.min(b);
        }
        Ok((lo, hi))
    }
}

/// Owned thermodynamic setup shared by the units of one flowsheet.
///
/// Holds the library, the flowsheet's ordered species list and the constants,
/// and hands out [`Mixture`] views for a composition vector.
#[derive(Debug, Clone)]
pub struct ThermoPackage {
    library: Arc<ThermoLibrary>,
    species: Vec<String>,
    constants: ThermoConstants,
}

impl ThermoPackage {
    /// Build a package, checking every species exists in the library.
    pub fn new(
        library: Arc<ThermoLibrary>,
        species: Vec<String>,
        constants: ThermoConstants,
    ) -> ThermoResult<Self> {
        for name in &species {
            library.get(name)?;
        }
        Ok(Self {
            library,
            species,
            constants,
        })
    }

    pub fn library(&self) -> &ThermoLibrary {
        &self.library
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn constants(&self) -> &ThermoConstants {
        &self.constants
    }

    pub fn mixture<'a>(&'a self, z: &'a [f64]) -> ThermoResult<Mixture<'a>> {
        Mixture::new(&self.library, &self.species, z, &self.constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eo_core::numeric::{Tolerances, nearly_equal};

    fn package(names: &[&str]) -> ThermoPackage {
        ThermoPackage::new(
            Arc::new(ThermoLibrary::nist_defaults()),
            names.iter().map(|s| s.to_string()).collect(),
            ThermoConstants::default(),
        )
        .unwrap()
    }

    #[test]
    fn package_rejects_unknown_species() {
        let err = ThermoPackage::new(
            Arc::new(ThermoLibrary::nist_defaults()),
            vec!["N2".into(), "XY".into()],
            ThermoConstants::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ThermoError::SpeciesNotFound { .. }));
    }

    #[test]
    fn composition_length_must_match() {
        let pkg = package(&["N2", "O2"]);
        let err = pkg.mixture(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            ThermoError::InvalidCompositionSchema {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn air_molecular_weight() {
        let pkg = package(&["N2", "O2"]);
        let z = [0.79, 0.21];
        let mw = pkg.mixture(&z).unwrap().molecular_weight().unwrap();
        let expected = 0.79 * 28.0134 + 0.21 * 31.9988;
        assert!(nearly_equal(mw, expected, Tolerances::default()));
    }

    #[test]
    fn pure_nitrogen_gamma_near_seven_fifths() {
        let pkg = package(&["N2"]);
        let z = [1.0];
        let mix = pkg.mixture(&z).unwrap();
        let g = mix.gamma(300.0).unwrap();
        assert!((g - 1.4).abs() < 5e-3, "gamma = {g}");
        let cv = mix.cv(300.0).unwrap();
        assert!(nearly_equal(mix.cp(300.0).unwrap() - cv, 8.314_462_618, Tolerances::default()));
    }

    #[test]
    fn zero_fraction_species_are_skipped() {
        // H2O has no coverage at 300 K; with z = 0 it must not be queried.
        let pkg = package(&["N2", "H2O"]);
        let z = [1.0, 0.0];
        let mix = pkg.mixture(&z).unwrap();
        assert!(mix.cp(300.0).is_ok());
        assert!(mix.entropy(300.0, 101_325.0).is_ok());

        let z_wet = [0.9, 0.1];
        let wet = pkg.mixture(&z_wet).unwrap();
        assert!(matches!(
            wet.cp(300.0),
            Err(ThermoError::TemperatureOutOfRange { .. })
        ));
    }

    #[test]
    fn mixing_entropy_of_equimolar_binary() {
        let pkg = package(&["N2", "O2"]);
        let consts = ThermoConstants::default();
        let z = [0.5, 0.5];
        let mix = pkg.mixture(&z).unwrap();
        let t = 400.0;
        let lib = pkg.library();
        let pure = 0.5 * shomate::entropy(lib.get("N2").unwrap(), t).unwrap()
            + 0.5 * shomate::entropy(lib.get("O2").unwrap(), t).unwrap();
        let s = mix.entropy(t, consts.p_ref).unwrap();
        let expected = pure + consts.r * std::f64::consts::LN_2;
        assert!(nearly_equal(s, expected, Tolerances::default()));
    }

    #[test]
    fn coverage_is_intersection() {
        let pkg = package(&["N2", "H2O"]);
        let z = [0.5, 0.5];
        assert_eq!(pkg.mixture(&z).unwrap().coverage().unwrap(), (500.0, 6000.0));
    }
}
