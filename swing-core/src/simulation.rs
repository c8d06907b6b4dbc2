//! Main simulation orchestrator.
//!
//! Drives one headless run end to end: validate the raw inputs, integrate the
//! two swings until their platforms meet, resolve the collision, classify the
//! injury risks, and assemble the report. The orchestrator holds no global
//! state; everything a caller needs comes back in the report.
//!
//! Validation is fail-fast with a distinct error per check, in a fixed order,
//! so a caller can surface the first violation directly to the user.
//! The integrator loop is bounded by a simulated-time ceiling; running dry is
//! reported as an explicit no-collision outcome, never as stale numbers.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionGeometry, CollisionResolver};
use crate::error::SimulationError;
use crate::integrator::{PendulumPair, SimPhase};
use crate::kinematics;
use crate::profiles::ProfileStore;
use crate::risk::{self, AccelSample};
use crate::types::{
    constants, AgeProfile, CollisionOutcome, ImpactType, RiskThresholds, SimulationOutcome,
    SwingState,
};

/// Raw user inputs, exactly as entered at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Age class 1-5, youngest to oldest
    pub age_class: u8,
    /// Impact angle in degrees measured from the horizontal
    pub impact_angle_from_horizontal_deg: f64,
    pub mass1_lbs: f64,
    pub mass2_lbs: f64,
    /// Initial tangential speeds in m/s, non-negative
    pub v_init1: f64,
    pub v_init2: f64,
    pub max_swing_height_m: f64,
    pub impact_type: ImpactType,
}

/// Validated configuration in SI units. Immutable once built.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub profile: AgeProfile,
    pub thresholds: RiskThresholds,
    /// Release angle in radians from vertical (both swings start at ±this)
    pub max_angle_rad: f64,
    /// Collision gate: contact counts once swing 1 reaches this angle
    pub target_angle_rad: f64,
    pub masses_kg: (f64, f64),
    pub initial_angular_velocities: (f64, f64),
    pub impact_type: ImpactType,
    pub max_swing_height_m: f64,
    /// Release angle in degrees, kept for the report
    pub max_angle_deg: f64,
}

impl SimulationRequest {
    /// Run the fail-fast validation chain and convert units.
    ///
    /// Check order (first violation wins):
    /// 1. impact angle converts to a non-negative vertical-reference angle
    /// 2. oscillation height positive and within the arm length
    /// 3. both masses positive
    /// 4. both initial velocities non-negative
    /// 5. converted angle within the release arc for the height
    ///
    /// The profile lookup happens after the scalar checks, where the
    /// reference data is first needed.
    pub fn validate(&self, store: &ProfileStore) -> Result<SimulationConfig, SimulationError> {
        let arm_length = constants::SWING_LENGTH;

        let angle_deg = 90.0 - self.impact_angle_from_horizontal_deg;
        if angle_deg < 0.0 {
            return Err(SimulationError::ImpactAngleOutOfRange {
                angle_deg: self.impact_angle_from_horizontal_deg,
            });
        }

        if self.max_swing_height_m <= 0.0 {
            return Err(SimulationError::HeightNotPositive {
                height_m: self.max_swing_height_m,
            });
        }
        if self.max_swing_height_m > arm_length {
            return Err(SimulationError::HeightExceedsArmLength {
                height_m: self.max_swing_height_m,
                arm_length_m: arm_length,
            });
        }

        if self.mass1_lbs <= 0.0 || self.mass2_lbs <= 0.0 {
            return Err(SimulationError::NonPositiveMass {
                mass1_lbs: self.mass1_lbs,
                mass2_lbs: self.mass2_lbs,
            });
        }

        if self.v_init1 < 0.0 || self.v_init2 < 0.0 {
            return Err(SimulationError::NegativeInitialVelocity {
                v_init1: self.v_init1,
                v_init2: self.v_init2,
            });
        }

        let max_angle_deg = kinematics::max_release_angle_deg(self.max_swing_height_m, arm_length)?;
        if !(0.0..=max_angle_deg).contains(&angle_deg) {
            return Err(SimulationError::AngleBeyondRelease {
                angle_deg,
                max_angle_deg,
            });
        }

        let profile = store
            .profile(self.age_class)
            .cloned()
            .ok_or(SimulationError::UnknownAgeClass {
                age_class: self.age_class,
            })?;

        Ok(SimulationConfig {
            profile,
            thresholds: store.thresholds().clone(),
            max_angle_rad: max_angle_deg.to_radians(),
            target_angle_rad: angle_deg.to_radians(),
            masses_kg: (
                self.mass1_lbs * constants::LBS_TO_KG,
                self.mass2_lbs * constants::LBS_TO_KG,
            ),
            initial_angular_velocities: (self.v_init1 / arm_length, self.v_init2 / arm_length),
            impact_type: self.impact_type,
            max_swing_height_m: self.max_swing_height_m,
            max_angle_deg,
        })
    }
}

impl SimulationConfig {
    /// Build the integrator state for this configuration: mirrored swings
    /// released at ±max angle, platform width scaled to the occupant.
    pub fn build_pair(&self) -> PendulumPair {
        let arm_length = constants::SWING_LENGTH;
        let geometry = CollisionGeometry::standard(self.profile.platform_half_width());
        let swing1 = SwingState::new(
            self.max_angle_rad,
            self.initial_angular_velocities.0,
            geometry.pivot1,
            arm_length,
            self.masses_kg.0,
        );
        let swing2 = SwingState::new(
            -self.max_angle_rad,
            self.initial_angular_velocities.1,
            geometry.pivot2,
            arm_length,
            self.masses_kg.1,
        );
        PendulumPair::new(swing1, swing2, geometry, self.target_angle_rad)
    }

    /// Resolve the collision at the pair's current state and classify risks.
    pub fn resolve_collision(
        &self,
        pair: &PendulumPair,
    ) -> Result<CollisionOutcome, SimulationError> {
        let resolver = CollisionResolver::default();
        let impact = resolver.resolve(
            pair.swing1().angular_velocity,
            pair.swing2().angular_velocity,
            self.masses_kg.0,
            self.masses_kg.1,
            constants::SWING_LENGTH,
        );
        let metrics = resolver.derive_metrics(
            &impact,
            self.masses_kg.0,
            self.masses_kg.1,
            &self.profile,
            self.impact_type,
        )?;

        // Impulse approximation: the head sees a constant acceleration across
        // the collision window.
        let profile_samples = [
            AccelSample {
                time_s: 0.0,
                acceleration_ms2: metrics.acceleration_ms2,
            },
            AccelSample {
                time_s: resolver.collision_time,
                acceleration_ms2: metrics.acceleration_ms2,
            },
        ];
        let hic = risk::head_injury_criterion(&profile_samples, 15.0);

        Ok(CollisionOutcome {
            pre_impact_velocities: impact.pre_impact_velocities,
            post_impact_velocities: impact.post_impact_velocities,
            relative_velocity: impact.relative_velocity,
            force_n: metrics.force_n,
            impact_surface_cm2: metrics.impact_surface_cm2,
            pressure_mpa: metrics.pressure_mpa,
            acceleration_ms2: metrics.acceleration_ms2,
            hic,
            decapitation_risk: risk::assess_decapitation_risk(
                metrics.pressure_mpa,
                &self.profile,
                &self.thresholds,
            ),
            cervical_fracture_risk: risk::assess_cervical_fracture_risk(
                metrics.pressure_mpa,
                &self.profile,
                &self.thresholds,
            ),
            concussion_risk: risk::assess_concussion_risk(
                metrics.acceleration_ms2,
                &self.thresholds,
            ),
        })
    }
}

/// Full result record: validated inputs echoed back plus the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub age_class: u8,
    pub max_swing_height_m: f64,
    pub mass1_lbs: f64,
    pub mass2_lbs: f64,
    pub mass1_kg: f64,
    pub mass2_kg: f64,
    pub v_init1: f64,
    pub v_init2: f64,
    pub max_angle_deg: f64,
    pub impact_angle_from_horizontal_deg: f64,
    pub impact_type: ImpactType,
    pub outcome: SimulationOutcome,
}

/// Run one simulation against the built-in reference data.
pub fn run_simulation(request: &SimulationRequest) -> Result<SimulationReport, SimulationError> {
    run_simulation_with(request, &ProfileStore::builtin())
}

/// Run one simulation against an explicit profile store.
pub fn run_simulation_with(
    request: &SimulationRequest,
    store: &ProfileStore,
) -> Result<SimulationReport, SimulationError> {
    let config = request.validate(store)?;
    info!(
        "starting run: age class {}, release {:.1}°, target {:.1}° from vertical",
        config.profile.age_class,
        config.max_angle_deg,
        config.target_angle_rad.to_degrees()
    );

    let mut pair = config.build_pair();
    let dt = constants::TICK_DT;

    let outcome = loop {
        if pair.tick(dt) == SimPhase::Colliding {
            debug!(
                "platforms met at t={:.3}s, θ1={:.3} rad, θ2={:.3} rad",
                pair.time_s(),
                pair.swing1().angle_rad,
                pair.swing2().angle_rad
            );
            break SimulationOutcome::Collision(config.resolve_collision(&pair)?);
        }
        if pair.time_s() > constants::MAX_SIM_TIME {
            info!(
                "no collision within {:.0}s of simulated time",
                constants::MAX_SIM_TIME
            );
            break SimulationOutcome::NoCollision {
                simulated_time_s: pair.time_s(),
            };
        }
    };

    Ok(SimulationReport {
        age_class: config.profile.age_class,
        max_swing_height_m: request.max_swing_height_m,
        mass1_lbs: request.mass1_lbs,
        mass2_lbs: request.mass2_lbs,
        mass1_kg: config.masses_kg.0,
        mass2_kg: config.masses_kg.1,
        v_init1: request.v_init1,
        v_init2: request.v_init2,
        max_angle_deg: config.max_angle_deg,
        impact_angle_from_horizontal_deg: request.impact_angle_from_horizontal_deg,
        impact_type: request.impact_type,
        outcome,
    })
}

// =============================================================================
// Tests
// =============================================================================
