//! Headless command-line runner for the swing collision simulator.
//!
//! Runs one simulation from scalar arguments and prints the result record.
//! All physics lives in `swing-core`; this binary only parses input and
//! formats output.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::debug;

use swing_core::profiles::{ProfileLoader, ProfileStore};
use swing_core::simulation::{run_simulation_with, SimulationReport, SimulationRequest};
use swing_core::types::{ImpactType, SimulationOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImpactKind {
    /// Seat edge meets the full neck width
    Frontal,
    /// Narrow edge impact concentrated on 20 mm
    Concentrated,
}

impl From<ImpactKind> for ImpactType {
    fn from(kind: ImpactKind) -> Self {
        match kind {
            ImpactKind::Frontal => ImpactType::Frontal,
            ImpactKind::Concentrated => ImpactType::Concentrated,
        }
    }
}

/// Simulate two swings colliding and estimate the injury risk.
#[derive(Debug, Parser)]
#[command(name = "swing-sim", version)]
struct Args {
    /// Age class of the children (1-5, youngest to oldest)
    #[arg(long, default_value_t = 1)]
    age_class: u8,

    /// Impact angle in degrees, measured from the horizontal
    #[arg(long, default_value_t = 45.0)]
    impact_angle: f64,

    /// Mass on swing 1 in pounds
    #[arg(long, default_value_t = 100.0)]
    mass1_lbs: f64,

    /// Mass on swing 2 in pounds
    #[arg(long, default_value_t = 100.0)]
    mass2_lbs: f64,

    /// Initial push on swing 1 in m/s
    #[arg(long, default_value_t = 0.0)]
    v_init1: f64,

    /// Initial push on swing 2 in m/s
    #[arg(long, default_value_t = 0.0)]
    v_init2: f64,

    /// Maximum oscillation height in meters
    #[arg(long, default_value_t = 1.0)]
    max_height: f64,

    /// Impact surface model
    #[arg(long, value_enum, default_value_t = ImpactKind::Frontal)]
    impact_type: ImpactKind,

    /// Directory of YAML profiles overriding the built-in reference data
    #[arg(long)]
    profiles: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let store = match &args.profiles {
        Some(dir) => match ProfileStore::from_loader(&ProfileLoader::new(dir)) {
            Ok(store) => {
                debug!("loaded profile overrides from {}", dir.display());
                store
            }
            Err(err) => {
                eprintln!("error: failed to load profiles: {}", err);
                process::exit(2);
            }
        },
        None => ProfileStore::builtin(),
    };

    let request = SimulationRequest {
        age_class: args.age_class,
        impact_angle_from_horizontal_deg: args.impact_angle,
        mass1_lbs: args.mass1_lbs,
        mass2_lbs: args.mass2_lbs,
        v_init1: args.v_init1,
        v_init2: args.v_init2,
        max_swing_height_m: args.max_height,
        impact_type: args.impact_type.into(),
    };

    match run_simulation_with(&request, &store) {
        Ok(report) => print_report(&report),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2);
        }
    }
}

fn print_report(report: &SimulationReport) {
    println!("Age class                 : {}", report.age_class);
    println!("Max oscillation height    : {:.2} m", report.max_swing_height_m);
    println!(
        "Swing 1 mass              : {:.1} lbs ({:.1} kg)",
        report.mass1_lbs, report.mass1_kg
    );
    println!(
        "Swing 2 mass              : {:.1} lbs ({:.1} kg)",
        report.mass2_lbs, report.mass2_kg
    );
    println!("Initial velocity swing 1  : {:.2} m/s", report.v_init1);
    println!("Initial velocity swing 2  : {:.2} m/s", report.v_init2);
    println!("Max angle (from vertical) : {:.1}°", report.max_angle_deg);
    println!(
        "Impact angle (horizontal) : {:.1}°",
        report.impact_angle_from_horizontal_deg
    );
    println!("Impact type               : {}", report.impact_type);

    match &report.outcome {
        SimulationOutcome::NoCollision { simulated_time_s } => {
            println!();
            println!(
                "No collision occurred within {:.1} s of simulated time.",
                simulated_time_s
            );
        }
        SimulationOutcome::Collision(outcome) => {
            println!(
                "Impact velocity swing 1   : {:.2} m/s",
                outcome.pre_impact_velocities.0
            );
            println!(
                "Impact velocity swing 2   : {:.2} m/s",
                outcome.pre_impact_velocities.1
            );
            println!("Relative impact velocity  : {:.2} m/s", outcome.relative_velocity);
            println!("Impact force              : {:.2} N", outcome.force_n);
            println!("Impact surface            : {:.2} cm²", outcome.impact_surface_cm2);
            println!("Pressure                  : {:.2} MPa", outcome.pressure_mpa);
            println!(
                "Head acceleration         : {:.1} m/s²",
                outcome.acceleration_ms2
            );
            if let Some(hic) = outcome.hic {
                println!("Head injury criterion     : {:.1}", hic);
            }
            println!();
            println!("Partial decapitation risk : {}", outcome.decapitation_risk);
            println!("Cervical fracture risk    : {}", outcome.cervical_fracture_risk);
            println!("Concussion risk           : {}", outcome.concussion_risk);
        }
    }
}
