//! Collision resolution for the seat-to-seat impact.
//!
//! The impact is modeled as a one-dimensional collision along the tangential
//! velocity axis with a coefficient of restitution:
//!
//! ```text
//! v1' = (m1·v1 + m2·v2 − m2·e·(v2−v1)) / (m1+m2)
//! v2' = (m1·v1 + m2·v2 + m1·e·(v2−v1)) / (m1+m2)
//! ```
//!
//! where `v = θ̇·L` converts between angular and tangential velocities.
//!
//! ## Model Assumptions
//!
//! - **Impulse approximation**: the contact force acts over a fixed
//!   `collision_time` window rather than being resolved in time.
//! - **Closing speed**: the relative velocity is `|v1| + |v2|`, the combined
//!   approach speed of a symmetric head-on meeting. This is NOT the classical
//!   `|v1−v2|`; the injury thresholds downstream are calibrated against this
//!   definition, so it is kept as-is.

use crate::error::SimulationError;
use crate::types::{constants, AgeProfile, ImpactType};

/// Width of the contact edge for a concentrated impact (mm).
const CONCENTRATED_EDGE_MM: f64 = 20.0;

/// Fraction of the neck height engaged by the seat edge.
const IMPACT_HEIGHT_FRACTION: f64 = 2.0 / 3.0;

/// Pre- and post-impact velocities of both swings.
///
/// Tangential velocities are in m/s, angular velocities in rad/s; both keep
/// the sign convention of the swing angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactKinematics {
    pub pre_impact_velocities: (f64, f64),
    pub post_impact_velocities: (f64, f64),
    pub post_impact_angular: (f64, f64),
    pub relative_velocity: f64,
}

/// Scalars derived from the impact for the risk classifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactMetrics {
    pub force_n: f64,
    pub impact_surface_cm2: f64,
    pub pressure_mpa: f64,
    pub acceleration_ms2: f64,
}

/// Collision resolver for the two-swing impact.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    /// Coefficient of restitution: 1 = perfectly elastic, 0 = perfectly inelastic
    pub restitution: f64,
    /// Impulse window for the force approximation (s)
    pub collision_time: f64,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            restitution: constants::RESTITUTION,
            collision_time: constants::COLLISION_TIME,
        }
    }
}

impl CollisionResolver {
    /// Resolve the collision from pre-impact angular velocities.
    pub fn resolve(
        &self,
        omega1: f64,
        omega2: f64,
        mass1_kg: f64,
        mass2_kg: f64,
        arm_length: f64,
    ) -> ImpactKinematics {
        let e = self.restitution;
        let v1 = omega1 * arm_length;
        let v2 = omega2 * arm_length;

        let momentum = mass1_kg * v1 + mass2_kg * v2;
        let total_mass = mass1_kg + mass2_kg;
        let v1_prime = (momentum - mass2_kg * e * (v2 - v1)) / total_mass;
        let v2_prime = (momentum + mass1_kg * e * (v2 - v1)) / total_mass;

        ImpactKinematics {
            pre_impact_velocities: (v1, v2),
            post_impact_velocities: (v1_prime, v2_prime),
            post_impact_angular: (v1_prime / arm_length, v2_prime / arm_length),
            relative_velocity: v1.abs() + v2.abs(),
        }
    }

    /// Effective single-body mass for the two-body impact.
    ///
    /// Falls back to `m1` when the total is zero. Validation keeps both
    /// masses positive, so the branch only matters for direct callers.
    pub fn reduced_mass(mass1_kg: f64, mass2_kg: f64) -> f64 {
        let total = mass1_kg + mass2_kg;
        if total == 0.0 {
            mass1_kg
        } else {
            mass1_kg * mass2_kg / total
        }
    }

    /// Contact force from the impulse approximation: the reduced mass brought
    /// to the closing speed over the collision window.
    pub fn impact_force(&self, reduced_mass: f64, relative_velocity: f64) -> f64 {
        reduced_mass * relative_velocity / self.collision_time
    }

    /// Contact surface on the neck in cm², from the age profile and the
    /// impact geometry.
    ///
    /// Frontal impacts engage the full neck diameter; concentrated impacts
    /// only a 20 mm edge. Either way the seat edge meets two thirds of the
    /// neck height.
    pub fn impact_surface_cm2(profile: &AgeProfile, impact_type: ImpactType) -> f64 {
        let impact_height_mm = profile.neck_height_mm * IMPACT_HEIGHT_FRACTION;
        let width_mm = match impact_type {
            ImpactType::Frontal => profile.neck_diameter_mm(),
            ImpactType::Concentrated => CONCENTRATED_EDGE_MM,
        };
        width_mm * impact_height_mm / 100.0
    }

    /// Pressure in MPa (N/mm²) from force over the contact surface.
    pub fn pressure_mpa(force_n: f64, surface_cm2: f64) -> Result<f64, SimulationError> {
        if surface_cm2 <= 0.0 {
            return Err(SimulationError::ImpactSurfaceNotPositive { surface_cm2 });
        }
        let surface_mm2 = surface_cm2 * 100.0;
        Ok(force_n / surface_mm2)
    }

    /// Head acceleration under the contact force.
    pub fn head_acceleration(force_n: f64, head_mass_kg: f64) -> f64 {
        force_n / head_mass_kg
    }

    /// Derive every classifier input from resolved kinematics.
    pub fn derive_metrics(
        &self,
        kinematics: &ImpactKinematics,
        mass1_kg: f64,
        mass2_kg: f64,
        profile: &AgeProfile,
        impact_type: ImpactType,
    ) -> Result<ImpactMetrics, SimulationError> {
        let reduced_mass = Self::reduced_mass(mass1_kg, mass2_kg);
        let force_n = self.impact_force(reduced_mass, kinematics.relative_velocity);
        let impact_surface_cm2 = Self::impact_surface_cm2(profile, impact_type);
        let pressure_mpa = Self::pressure_mpa(force_n, impact_surface_cm2)?;
        let acceleration_ms2 = Self::head_acceleration(force_n, profile.head_mass_kg);

        Ok(ImpactMetrics {
            force_n,
            impact_surface_cm2,
            pressure_mpa,
            acceleration_ms2,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
