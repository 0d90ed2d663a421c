//! Integration tests for flowsheet assembly with the NIST species data.

use eo_flowsheet::{Flowsheet, FlowsheetError, Mixer, Stream, StreamTable, UnitModel};
use eo_thermo::{EnthalpyMode, ThermoConstants, ThermoError, ThermoLibrary, ThermoPackage};
use std::sync::Arc;

fn thermo(species: &[&str]) -> Arc<ThermoPackage> {
    Arc::new(
        ThermoPackage::new(
            Arc::new(ThermoLibrary::nist_defaults()),
            species.iter().map(|s| s.to_string()).collect(),
            ThermoConstants::default(),
        )
        .unwrap(),
    )
}

#[test]
fn three_inlet_mixer_balances_at_hand_solution() {
    let species = ["N2", "O2", "CO2"];
    let pkg = thermo(&species);
    let mut fs = Flowsheet::new(species.iter().map(|s| s.to_string()).collect());

    let a = fs
        .add_stream(Stream::feed("a", 2.0, vec![1.0, 0.0, 0.0], 400.0, 3.0e5))
        .unwrap();
    let b = fs
        .add_stream(Stream::feed("b", 3.0, vec![0.0, 1.0, 0.0], 400.0, 2.0e5))
        .unwrap();
    let c = fs
        .add_stream(Stream::feed("c", 5.0, vec![0.0, 0.0, 1.0], 400.0, 2.5e5))
        .unwrap();
    let out = fs
        .add_stream(Stream::feed("out", 10.0, vec![0.2, 0.3, 0.5], 400.0, 2.0e5))
        .unwrap();

    let mixer = Mixer::new("M-1", vec![a, b, c], out, pkg).unwrap();
    let r = mixer.equations(&fs.context()).unwrap();
    assert_eq!(r.len(), species.len() + 3);
    assert!(r.iter().all(|v| v.abs() < 1e-9), "residuals: {r:?}");

    fs.add_unit(Box::new(mixer));
    assert!(fs.validate().is_ok());

    let table = StreamTable::from_flowsheet(&fs);
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.row("out").unwrap().composition, vec![0.2, 0.3, 0.5]);
}

#[test]
fn sensible_mode_surfaces_reference_coverage_gap() {
    let species = ["N2", "H2O"];
    let pkg = thermo(&species);
    let mut fs = Flowsheet::new(species.iter().map(|s| s.to_string()).collect());
    let a = fs
        .add_stream(Stream::feed("steam", 1.0, vec![0.0, 1.0], 600.0, 1.0e5))
        .unwrap();
    let out = fs
        .add_stream(Stream::feed("out", 1.0, vec![0.0, 1.0], 600.0, 1.0e5))
        .unwrap();

    let absolute = Mixer::new("M-abs", vec![a], out, pkg.clone()).unwrap();
    assert!(absolute.equations(&fs.context()).is_ok());

    let sensible = Mixer::new("M-sens", vec![a], out, pkg)
        .unwrap()
        .with_enthalpy_mode(EnthalpyMode::Sensible);
    let err = sensible.equations(&fs.context()).unwrap_err();
    assert!(matches!(
        err,
        FlowsheetError::Thermo(ThermoError::TemperatureOutOfRange { .. })
    ));
}
