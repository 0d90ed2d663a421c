use clap::{Parser, Subcommand};
use eo_core::{CoreError, CoreResult, ensure_finite};
use eo_flowsheet::{Flowsheet, Mixer, Stream, StreamTable};
use eo_solver::{JacobianScheme, SolveConfig, SolveStatus};
use eo_thermo::{
    EnthalpyMode, InverseConfig, ThermoConstants, ThermoLibrary, ThermoPackage, shomate,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "eo-cli")]
#[command(about = "eoflow CLI - equation-oriented steady-state flowsheet solver", long_about = None)]
struct Cli {
    /// Species library JSON file (defaults to the built-in NIST data)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Log solver iterations
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List species in the library
    Species {
        /// Dump the full records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pure-species cp, h and s at a temperature
    Props {
        /// Species name
        species: String,
        /// Temperature [K]
        #[arg(short, long)]
        temperature: f64,
        /// Enthalpy datum: sensible or absolute
        #[arg(long, default_value = "absolute")]
        mode: EnthalpyMode,
    },
    /// Ideal-gas mixture properties
    Mixture {
        /// Comma-separated species, e.g. N2,O2
        #[arg(long, value_delimiter = ',')]
        species: Vec<String>,
        /// Comma-separated mole fractions
        #[arg(long, value_delimiter = ',')]
        z: Vec<f64>,
        /// Temperature [K]
        #[arg(short, long)]
        temperature: f64,
        /// Pressure [Pa]
        #[arg(short, long, default_value_t = 101_325.0)]
        pressure: f64,
        #[arg(long, default_value = "absolute")]
        mode: EnthalpyMode,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mixture temperature from an enthalpy or entropy target
    InverseT {
        #[arg(long, value_delimiter = ',')]
        species: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        z: Vec<f64>,
        /// Target enthalpy [kJ/kmol]
        #[arg(long, conflicts_with = "entropy", required_unless_present = "entropy")]
        enthalpy: Option<f64>,
        /// Target entropy [kJ/(kmol K)]
        #[arg(long)]
        entropy: Option<f64>,
        /// Pressure for the entropy target [Pa]
        #[arg(short, long, default_value_t = 101_325.0)]
        pressure: f64,
        #[arg(long, default_value = "absolute")]
        mode: EnthalpyMode,
    },
    /// Solve an adiabatic mixer of the given feeds and print the stream table
    Mix {
        #[arg(long, value_delimiter = ',')]
        species: Vec<String>,
        /// Feed as flow,T,P,z1,...,zN (repeatable)
        #[arg(long = "feed", value_parser = parse_feed, required = true)]
        feeds: Vec<Feed>,
        #[arg(long, default_value_t = 60)]
        max_iterations: usize,
        #[arg(long, default_value_t = 1e-9)]
        tol: f64,
        /// Use central differences for the Jacobian
        #[arg(long)]
        central: bool,
        /// Evaluate Jacobian columns on one thread
        #[arg(long)]
        sequential: bool,
    },
}

/// Feed stream given on the command line.
#[derive(Debug, Clone, PartialEq)]
struct Feed {
    flow: f64,
    temperature: f64,
    pressure: f64,
    composition: Vec<f64>,
}

fn parse_feed(s: &str) -> Result<Feed, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("'{v}': {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    if values.len() < 4 {
        return Err("expected flow,T,P followed by at least one mole fraction".to_string());
    }
    Ok(Feed {
        flow: values[0],
        temperature: values[1],
        pressure: values[2],
        composition: values[3..].to_vec(),
    })
}

fn main() -> CoreResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let library = Arc::new(load_library(cli.library.as_deref())?);

    match cli.command {
        Commands::Species { json } => cmd_species(&library, json),
        Commands::Props {
            species,
            temperature,
            mode,
        } => cmd_props(&library, &species, temperature, mode),
        Commands::Mixture {
            species,
            z,
            temperature,
            pressure,
            mode,
            json,
        } => cmd_mixture(library, species, &z, temperature, pressure, mode, json),
        Commands::InverseT {
            species,
            z,
            enthalpy,
            entropy,
            pressure,
            mode,
        } => cmd_inverse_t(library, species, &z, enthalpy, entropy, pressure, mode),
        Commands::Mix {
            species,
            feeds,
            max_iterations,
            tol,
            central,
            sequential,
        } => {
            let config = SolveConfig {
                max_iterations,
                abs_tol: tol,
                jacobian: if central {
                    JacobianScheme::Central
                } else {
                    JacobianScheme::Forward
                },
                parallel_jacobian: !sequential,
                ..SolveConfig::default()
            };
            cmd_mix(library, species, &feeds, &config)
        }
    }
}

fn load_library(path: Option<&Path>) -> CoreResult<ThermoLibrary> {
    match path {
        None => Ok(ThermoLibrary::nist_defaults()),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| CoreError::InvalidArg {
                what: format!("cannot read {}: {e}", path.display()),
            })?;
            Ok(ThermoLibrary::from_json_str(&text)?)
        }
    }
}

fn package(library: Arc<ThermoLibrary>, species: Vec<String>) -> CoreResult<ThermoPackage> {
    Ok(ThermoPackage::new(
        library,
        species,
        ThermoConstants::default(),
    )?)
}

fn cmd_species(library: &ThermoLibrary, json: bool) -> CoreResult<()> {
    if json {
        println!("{}", library.to_json_string()?);
        return Ok(());
    }
    for name in library.names() {
        let sp = library.get(name)?;
        let (lo, hi) = sp.coverage();
        println!(
            "  {:<6} MW {:>9.4} kg/kmol  {:>6.0}-{:<6.0} K  ({} ranges)",
            name,
            sp.molecular_weight(),
            lo,
            hi,
            sp.ranges().len()
        );
    }
    Ok(())
}

fn cmd_props(library: &ThermoLibrary, name: &str, t: f64, mode: EnthalpyMode) -> CoreResult<()> {
    let t = ensure_finite(t, "temperature")?;
    let sp = library.get(name)?;
    let constants = ThermoConstants::default();
    println!("{name} at {t} K");
    println!("  cp = {:.6} kJ/(kmol K)", shomate::cp(sp, t)?);
    println!(
        "  h  = {:.6} kJ/kmol ({mode:?})",
        shomate::enthalpy(sp, t, mode, &constants)?
    );
    println!("  s  = {:.6} kJ/(kmol K)", shomate::entropy(sp, t)?);
    Ok(())
}

fn cmd_mixture(
    library: Arc<ThermoLibrary>,
    species: Vec<String>,
    z: &[f64],
    t: f64,
    p: f64,
    mode: EnthalpyMode,
    json: bool,
) -> CoreResult<()> {
    let t = ensure_finite(t, "temperature")?;
    let p = ensure_finite(p, "pressure")?;
    let pkg = package(library, species)?;
    let mix = pkg.mixture(z)?;
    let mw = mix.molecular_weight()?;
    let cp = mix.cp(t)?;
    let cv = mix.cv(t)?;
    let gamma = mix.gamma(t)?;
    let h = mix.enthalpy(t, mode)?;
    let s = mix.entropy(t, p)?;

    if json {
        let value = serde_json::json!({
            "species": pkg.species(),
            "z": z,
            "temperature_k": t,
            "pressure_pa": p,
            "molecular_weight": mw,
            "cp": cp,
            "cv": cv,
            "gamma": gamma,
            "enthalpy": h,
            "entropy": s,
        });
        println!("{value:#}");
        return Ok(());
    }

    println!("mixture at {t} K, {p} Pa");
    println!("  MW    = {mw:.6} kg/kmol");
    println!("  cp    = {cp:.6} kJ/(kmol K)");
    println!("  cv    = {cv:.6} kJ/(kmol K)");
    println!("  gamma = {gamma:.6}");
    println!("  h     = {h:.6} kJ/kmol ({mode:?})");
    println!("  s     = {s:.6} kJ/(kmol K)");
    Ok(())
}

fn cmd_inverse_t(
    library: Arc<ThermoLibrary>,
    species: Vec<String>,
    z: &[f64],
    enthalpy: Option<f64>,
    entropy: Option<f64>,
    p: f64,
    mode: EnthalpyMode,
) -> CoreResult<()> {
    let pkg = package(library, species)?;
    let mix = pkg.mixture(z)?;
    let cfg = InverseConfig::default();
    let t = match (enthalpy, entropy) {
        (Some(h), _) => eo_thermo::temperature_from_enthalpy(&mix, h, mode, &cfg)?,
        (None, Some(s)) => eo_thermo::temperature_from_entropy(&mix, s, p, &cfg)?,
        (None, None) => {
            return Err(CoreError::InvalidArg {
                what: "either --enthalpy or --entropy is required".to_string(),
            });
        }
    };
    println!("T = {t:.6} K");
    Ok(())
}

fn cmd_mix(
    library: Arc<ThermoLibrary>,
    species: Vec<String>,
    feeds: &[Feed],
    config: &SolveConfig,
) -> CoreResult<()> {
    let n = species.len();
    let pkg = Arc::new(package(library, species.clone())?);
    let mut fs = Flowsheet::new(species);

    let mut inlets = Vec::with_capacity(feeds.len());
    for (i, feed) in feeds.iter().enumerate() {
        let stream = Stream::feed(
            format!("feed-{}", i + 1),
            feed.flow,
            feed.composition.clone(),
            feed.temperature,
            feed.pressure,
        );
        inlets.push(fs.add_stream(stream)?);
    }
    let outlet = fs.add_stream(Stream::new("product", n))?;
    fs.add_unit(Box::new(Mixer::new("mixer", inlets, outlet, pkg)?));

    let report = eo_solver::solve(&mut fs, config)?;
    match report.status {
        SolveStatus::Converged => println!(
            "Converged in {} iterations (||r|| = {:.3e})",
            report.iterations, report.residual_norm
        ),
        SolveStatus::MaxIterReached => println!(
            "Not converged after {} iterations (||r|| = {:.3e})",
            report.iterations, report.residual_norm
        ),
    }
    println!();
    print!("{}", StreamTable::from_flowsheet(&fs));
    Ok(())
}
