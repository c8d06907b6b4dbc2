//! End-to-end orchestrator scenarios.

use swing_core::error::SimulationError;
use swing_core::simulation::{run_simulation, SimulationRequest};
use swing_core::types::{constants, ImpactType, RiskLevel, SimulationOutcome};

fn reference_request() -> SimulationRequest {
    SimulationRequest {
        age_class: 1,
        impact_angle_from_horizontal_deg: 45.0,
        mass1_lbs: 100.0,
        mass2_lbs: 100.0,
        v_init1: 0.0,
        v_init2: 0.0,
        max_swing_height_m: 1.0,
        impact_type: ImpactType::Frontal,
    }
}

#[test]
fn reference_scenario_is_well_formed() {
    let report = run_simulation(&reference_request()).expect("reference scenario runs");
    let outcome = report.outcome.collision().expect("platforms meet");

    assert!(outcome.force_n > 0.0);
    assert!(outcome.pressure_mpa > 0.0);
    assert!(outcome.acceleration_ms2 > 0.0);

    // A near-standstill first contact stays well inside the critical-impact
    // reference limits
    assert!(outcome.hic.expect("impulse profile is scorable") < constants::HIC_LIMIT);
    assert!(
        outcome.acceleration_ms2 / constants::GRAVITY < constants::PEAK_ACCELERATION_G
    );

    // Risk levels come from the defined enum, concussion capped at Probable
    for level in [
        outcome.decapitation_risk,
        outcome.cervical_fracture_risk,
        outcome.concussion_risk,
    ] {
        assert!((1..=4).contains(&level.rank()));
    }
    assert!(outcome.concussion_risk <= RiskLevel::Probable);
}

#[test]
fn reference_scenario_is_deterministic() {
    let first = run_simulation(&reference_request()).unwrap();
    let second = run_simulation(&reference_request()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_valid_config_terminates() {
    // Sweep a grid of valid inputs; each run must end (collision or ceiling)
    for age_class in [1u8, 3, 5] {
        for height in [0.2, 1.0, 2.0] {
            for angle in [50.0, 70.0, 89.0] {
                let request = SimulationRequest {
                    age_class,
                    impact_angle_from_horizontal_deg: angle,
                    mass1_lbs: 60.0,
                    mass2_lbs: 90.0,
                    v_init1: 0.5,
                    v_init2: 0.0,
                    max_swing_height_m: height,
                    impact_type: ImpactType::Concentrated,
                };
                match request.validate(&swing_core::profiles::ProfileStore::builtin()) {
                    Err(_) => continue, // angle outside this height's release arc
                    Ok(_) => {
                        let report = run_simulation(&request).expect("validated request runs");
                        match report.outcome {
                            SimulationOutcome::Collision(outcome) => {
                                assert!(outcome.force_n >= 0.0)
                            }
                            SimulationOutcome::NoCollision { simulated_time_s } => {
                                assert!(simulated_time_s > constants::MAX_SIM_TIME)
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn excess_height_fails_validation() {
    let request = SimulationRequest {
        max_swing_height_m: 3.0,
        ..reference_request()
    };
    let err = run_simulation(&request).unwrap_err();
    assert!(matches!(err, SimulationError::HeightExceedsArmLength { .. }));
    assert!(err.to_string().contains("2.25"));
}

#[test]
fn zero_mass_fails_before_any_physics() {
    let request = SimulationRequest {
        mass1_lbs: 0.0,
        ..reference_request()
    };
    let err = run_simulation(&request).unwrap_err();
    assert!(matches!(err, SimulationError::NonPositiveMass { .. }));
}

#[test]
fn heavier_sibling_raises_the_metrics() {
    // Same geometry, more mass behind the impact: force can only grow
    let light = run_simulation(&reference_request()).unwrap();
    let heavy = run_simulation(&SimulationRequest {
        mass1_lbs: 200.0,
        mass2_lbs: 200.0,
        ..reference_request()
    })
    .unwrap();

    let light = light.outcome.collision().unwrap();
    let heavy = heavy.outcome.collision().unwrap();
    assert!(heavy.force_n > light.force_n);
    assert!(heavy.pressure_mpa > light.pressure_mpa);
}
