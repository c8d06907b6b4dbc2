//! Angle-to-position mapping and release-arc helpers.
//!
//! The swing is a rigid arm of length L hung from a fixed pivot. With the
//! angle θ measured from the vertical rest position:
//!
//! ```text
//!        ● pivot
//!        |\
//!        | \  L
//!        |  \
//!        |   ● tip      x = pivot.x + L·sin θ
//!        ↓              y = pivot.y − L·cos θ
//! ```
//!
//! Everything in this module is a pure function of its arguments.

use crate::error::SimulationError;
use crate::types::{constants, Vec2};

/// Position of the arm tip for a given pivot, angle, and arm length.
pub fn tip_position(pivot: Vec2, angle_rad: f64, arm_length: f64) -> Vec2 {
    Vec2::new(
        pivot.x + arm_length * angle_rad.sin(),
        pivot.y - arm_length * angle_rad.cos(),
    )
}

/// Endpoints of the rigid seat platform attached at the arm tip.
///
/// The platform lies perpendicular to the arm, offset by `half_width` on each
/// side along `(cos θ, sin θ)`.
pub fn platform_endpoints(tip: Vec2, angle_rad: f64, half_width: f64) -> (Vec2, Vec2) {
    let along = Vec2::new(angle_rad.cos(), angle_rad.sin()) * half_width;
    (tip - along, tip + along)
}

/// Largest release angle (degrees from vertical) reachable from an
/// oscillation height.
///
/// Geometry: raising the seat by `height` tilts the arm until
/// `cos θ = 1 − height/arm_length`. A zero height gives 0°, a height equal to
/// the arm length gives 90° (seat level with the pivot).
///
/// Fails when the height exceeds the arm length; taller oscillations would
/// need the seat to climb past the pivot, which the input bounds exclude.
pub fn max_release_angle_deg(height_m: f64, arm_length: f64) -> Result<f64, SimulationError> {
    if height_m > arm_length {
        return Err(SimulationError::HeightExceedsArmLength {
            height_m,
            arm_length_m: arm_length,
        });
    }
    let cos_theta = 1.0 - height_m / arm_length;
    Ok(cos_theta.acos().to_degrees())
}

/// Tangential seat speed at an angular position, from energy conservation.
///
/// The drop from the release point to angle θ is `h = L·(1 − cos θ)`, giving
/// `v = √(2·g·h)`; any initial push is added on top.
pub fn speed_from_height(theta_rad: f64, arm_length: f64, initial_speed: f64) -> f64 {
    let h = arm_length * (1.0 - theta_rad.cos());
    (2.0 * constants::GRAVITY * h).sqrt() + initial_speed
}

// =============================================================================
// Tests
// =============================================================================
