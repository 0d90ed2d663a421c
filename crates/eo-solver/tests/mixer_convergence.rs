//! End-to-end solves of mixer flowsheets on the NIST species data.

use eo_core::StreamId;
use eo_flowsheet::{EvalContext, Flowsheet, FlowsheetResult, Mixer, Stream, UnitModel};
use eo_solver::{JacobianScheme, SolveConfig, SolveStatus, SolverError, solve};
use eo_thermo::{ThermoConstants, ThermoLibrary, ThermoPackage};
use std::sync::Arc;

fn air_package() -> Arc<ThermoPackage> {
    Arc::new(
        ThermoPackage::new(
            Arc::new(ThermoLibrary::nist_defaults()),
            vec!["N2".into(), "O2".into()],
            ThermoConstants::default(),
        )
        .unwrap(),
    )
}

/// Inlet A: 10 mol/s pure N2, inlet B: 5 mol/s pure O2, outlet fully unknown.
fn two_inlet_mixer() -> (Flowsheet, StreamId) {
    let mut fs = Flowsheet::new(vec!["N2".into(), "O2".into()]);
    let a = fs
        .add_stream(Stream::feed("A", 10.0, vec![1.0, 0.0], 300.0, 2.0e5))
        .unwrap();
    let b = fs
        .add_stream(Stream::feed("B", 5.0, vec![0.0, 1.0], 350.0, 1.5e5))
        .unwrap();
    let out = fs.add_stream(Stream::new("out", 2)).unwrap();
    fs.add_unit(Box::new(
        Mixer::new("M-1", vec![a, b], out, air_package()).unwrap(),
    ));
    (fs, out)
}

#[test]
fn two_inlet_mixer_converges_to_hand_solution() {
    let (mut fs, out) = two_inlet_mixer();
    let config = SolveConfig::default();
    let report = solve(&mut fs, &config).unwrap();

    assert_eq!(report.status, SolveStatus::Converged);
    assert!(report.iterations < 40, "took {} iterations", report.iterations);
    assert!(report.residual_norm < config.abs_tol);
    assert_eq!(report.unknowns, 5);
    assert_eq!(report.equations, 5);

    let s = fs.stream(out).unwrap();
    assert!((s.flow - 15.0).abs() < 1e-8, "flow = {}", s.flow);
    assert!((s.composition[0] - 2.0 / 3.0).abs() < 1e-8);
    assert!((s.composition[1] - 1.0 / 3.0).abs() < 1e-8);
    assert!((s.pressure - 1.5e5).abs() < 1e-6);
    // Outlet lies between the inlet temperatures, closer to the larger stream.
    assert!(s.temperature > 300.0 && s.temperature < 325.0, "T = {}", s.temperature);

    // Feeds are untouched.
    assert_eq!(fs.stream_by_name("A").unwrap().flow, 10.0);
    assert_eq!(fs.stream_by_name("B").unwrap().temperature, 350.0);
}

#[test]
fn outlet_temperature_balances_enthalpy() {
    let (mut fs, out) = two_inlet_mixer();
    solve(&mut fs, &SolveConfig::default()).unwrap();

    let pkg = air_package();
    let mode = eo_thermo::EnthalpyMode::Absolute;
    let h_a = pkg.mixture(&[1.0, 0.0]).unwrap().enthalpy(300.0, mode).unwrap();
    let h_b = pkg.mixture(&[0.0, 1.0]).unwrap().enthalpy(350.0, mode).unwrap();
    let s = fs.stream(out).unwrap();
    let h_out = pkg
        .mixture(&s.composition)
        .unwrap()
        .enthalpy(s.temperature, mode)
        .unwrap();
    let imbalance = 10.0 * h_a + 5.0 * h_b - s.flow * h_out;
    assert!(imbalance.abs() < 1e-5, "imbalance = {imbalance}");
}

#[test]
fn sequential_and_parallel_jacobians_agree() {
    let (mut par, _) = two_inlet_mixer();
    let (mut seq, _) = two_inlet_mixer();
    let report_par = solve(&mut par, &SolveConfig::default()).unwrap();
    let report_seq = solve(
        &mut seq,
        &SolveConfig {
            parallel_jacobian: false,
            ..SolveConfig::default()
        },
    )
    .unwrap();
    assert_eq!(report_par.history, report_seq.history);
    assert_eq!(par.streams(), seq.streams());
}

#[test]
fn central_differences_also_converge() {
    let (mut fs, out) = two_inlet_mixer();
    let config = SolveConfig {
        jacobian: JacobianScheme::Central,
        fd_rel_step: 1e-5,
        ..SolveConfig::default()
    };
    let report = solve(&mut fs, &config).unwrap();
    assert!(report.converged());
    assert!((fs.stream(out).unwrap().flow - 15.0).abs() < 1e-8);
}

#[test]
fn iteration_cap_is_not_an_error() {
    let (mut fs, out) = two_inlet_mixer();
    let config = SolveConfig {
        max_iterations: 2,
        ..SolveConfig::default()
    };
    let report = solve(&mut fs, &config).unwrap();
    assert_eq!(report.status, SolveStatus::MaxIterReached);
    assert_eq!(report.iterations, 2);
    assert_eq!(report.history.len(), 2);
    assert!(report.history[1].residual_norm <= report.history[0].residual_norm);

    // Partial progress is kept in the streams.
    let s = fs.stream(out).unwrap();
    assert_ne!(s.flow, 1.0);
    assert_ne!(s.pressure, 101_325.0);
}

#[test]
fn resolving_a_converged_sheet_takes_no_iterations() {
    let (mut fs, _) = two_inlet_mixer();
    solve(&mut fs, &SolveConfig::default()).unwrap();
    let again = solve(&mut fs, &SolveConfig::default()).unwrap();
    assert!(again.converged());
    assert_eq!(again.iterations, 0);
}

/// Equations whose value is fixed regardless of stream state.
struct Constant {
    stream: StreamId,
    value: f64,
}

impl UnitModel for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn streams(&self) -> Vec<StreamId> {
        vec![self.stream]
    }

    fn equations(&self, _ctx: &EvalContext<'_>) -> FlowsheetResult<Vec<f64>> {
        Ok(vec![self.value])
    }
}

#[test]
fn nan_initial_residual_is_fatal() {
    let mut fs = Flowsheet::new(vec!["N2".into()]);
    let s = fs.add_stream(Stream::new("s", 1)).unwrap();
    fs.add_unit(Box::new(Constant {
        stream: s,
        value: f64::NAN,
    }));
    let err = solve(&mut fs, &SolveConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SolverError::NonFiniteInitialResidual {
            unit: "constant".into(),
            equation: 0
        }
    );
}

/// `|T - 300| + 1`: minimum above zero at the starting point.
struct Kink {
    stream: StreamId,
}

impl UnitModel for Kink {
    fn name(&self) -> &str {
        "kink"
    }

    fn streams(&self) -> Vec<StreamId> {
        vec![self.stream]
    }

    fn equations(&self, ctx: &EvalContext<'_>) -> FlowsheetResult<Vec<f64>> {
        let s = ctx.stream("kink", self.stream)?;
        Ok(vec![(s.temperature - 300.0).abs() + 1.0])
    }
}

#[test]
fn stalled_descent_is_a_line_search_failure() {
    let mut fs = Flowsheet::new(vec!["N2".into()]);
    let mut stream = Stream::feed("s", 1.0, vec![1.0], 300.0, 1e5);
    stream.known.temperature = false;
    let s = fs.add_stream(stream).unwrap();
    fs.add_unit(Box::new(Kink { stream: s }));

    let err = solve(&mut fs, &SolveConfig::default()).unwrap_err();
    assert!(
        matches!(err, SolverError::LineSearchFailure { iteration: 1, .. }),
        "got {err:?}"
    );
    assert_eq!(fs.stream(s).unwrap().temperature, 300.0);
}

#[test]
fn schema_mismatch_is_reported_before_solving() {
    let mut fs = Flowsheet::new(vec!["N2".into(), "O2".into()]);
    let s = fs.add_stream(Stream::new("s", 2)).unwrap();
    if let Some(stream) = fs.stream_mut(s) {
        stream.composition.push(0.0);
    }
    let err = solve(&mut fs, &SolveConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Flowsheet(_)));
}
