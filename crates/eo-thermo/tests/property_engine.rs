//! End-to-end property queries through the public API.

use eo_thermo::{
    EnthalpyMode, InverseConfig, ShomateRange, Species, ThermoConstants, ThermoError,
    ThermoLibrary, ThermoPackage, shomate, temperature_from_enthalpy,
};
use std::sync::Arc;

fn two_range_species() -> Species {
    Species::new(
        "Demo",
        20.0,
        vec![
            ShomateRange::new(200.0, 1000.0, [25.0, 5.0, 0.0, 0.0, 0.0, -7.5, 200.0, 0.0]),
            ShomateRange::new(1000.0, 3000.0, [30.0, 0.0, 0.0, 0.0, 0.0, -9.0, 205.0, 0.0]),
        ],
    )
    .unwrap()
}

#[test]
fn cp_outside_coverage_reports_temperature_and_interval() {
    let sp = two_range_species();
    let err = shomate::cp(&sp, 3001.0).unwrap_err();
    match &err {
        ThermoError::TemperatureOutOfRange {
            species,
            t,
            t_min,
            t_max,
        } => {
            assert_eq!(species, "Demo");
            assert_eq!(*t, 3001.0);
            assert_eq!((*t_min, *t_max), (200.0, 3000.0));
        }
        other => panic!("unexpected error: {other}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("3001"));
    assert!(msg.contains("200"));
    assert!(msg.contains("3000"));
}

#[test]
fn range_endpoints_are_queryable() {
    let sp = two_range_species();
    for t in [200.0, 1000.0, 3000.0] {
        assert!(shomate::cp(&sp, t).is_ok(), "cp at {t}");
        assert!(shomate::entropy(&sp, t).is_ok(), "s at {t}");
    }
    assert!(shomate::cp(&sp, 199.0).is_err());
}

#[test]
fn custom_library_feeds_mixture_and_inversion() {
    let mut lib = ThermoLibrary::new();
    lib.insert(two_range_species());
    let pkg = ThermoPackage::new(
        Arc::new(lib),
        vec!["Demo".into()],
        ThermoConstants::default(),
    )
    .unwrap();
    let z = [1.0];
    let mix = pkg.mixture(&z).unwrap();

    assert_eq!(mix.molecular_weight().unwrap(), 20.0);
    let h = mix.enthalpy(700.0, EnthalpyMode::Sensible).unwrap();
    let t = temperature_from_enthalpy(&mix, h, EnthalpyMode::Sensible, &InverseConfig::default())
        .unwrap();
    assert!((t - 700.0).abs() < 1e-6);
}

#[test]
fn unreachable_enthalpy_target_is_unbracketed() {
    let pkg = ThermoPackage::new(
        Arc::new(ThermoLibrary::nist_defaults()),
        vec!["CO2".into()],
        ThermoConstants::default(),
    )
    .unwrap();
    let z = [1.0];
    let mix = pkg.mixture(&z).unwrap();
    let cfg = InverseConfig::default();
    let h_max = mix.enthalpy(cfg.t_high, EnthalpyMode::Sensible).unwrap();

    let err = temperature_from_enthalpy(&mix, 2.0 * h_max, EnthalpyMode::Sensible, &cfg)
        .unwrap_err();
    match err {
        ThermoError::UnbracketedRoot {
            best_t,
            best_residual,
            ..
        } => {
            assert_eq!(best_t, cfg.t_high);
            assert!((best_residual + h_max).abs() < 1e-6 * h_max);
        }
        other => panic!("unexpected error: {other}"),
    }
}
