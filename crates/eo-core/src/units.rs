// eo-core/src/units.rs

use uom::si::f64::{
    CatalyticActivity as UomCatalyticActivity, MolarMass as UomMolarMass,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
/// Molar flow rate. uom files mol/s under catalytic activity; the dimension is the same.
pub type MolarFlow = UomCatalyticActivity;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn mol_per_s(v: f64) -> MolarFlow {
    use uom::si::catalytic_activity::mole_per_second;
    MolarFlow::new::<mole_per_second>(v)
}

#[inline]
pub fn kg_per_kmol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v * 1e-3)
}

pub mod constants {
    /// Universal gas constant [kJ/(kmol·K)].
    pub const R_KJ_PER_KMOL_K: f64 = 8.314_462_618;
    /// Reference temperature for sensible enthalpy [K].
    pub const T_REF_K: f64 = 298.15;
    /// Standard pressure for the entropy pressure correction [Pa].
    pub const P_STD_PA: f64 = 101_325.0;
}
