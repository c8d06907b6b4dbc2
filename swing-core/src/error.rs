//! Error types for simulation runs.
//!
//! Two families exist: validation errors (malformed or out-of-physical-range
//! input, reported synchronously before any physics executes) and domain
//! errors (configuration/data bugs such as a non-positive impact surface).
//! Nothing here is retryable; the computation is deterministic and will fail
//! identically on retry. Loader errors live in [`crate::profiles`].

use thiserror::Error;

/// Errors raised while validating inputs or deriving impact metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Impact angle measured from the horizontal must stay within [0, 90]°.
    #[error("impact angle from horizontal must be between 0 and 90 degrees, got {angle_deg}")]
    ImpactAngleOutOfRange {
        /// Angle as entered, in degrees from horizontal.
        angle_deg: f64,
    },

    /// Oscillation height must be strictly positive.
    #[error("max oscillation height must be greater than 0, got {height_m} m")]
    HeightNotPositive {
        /// Height as entered, in meters.
        height_m: f64,
    },

    /// Oscillation height cannot exceed the swing arm length.
    #[error("max oscillation height ({height_m} m) cannot exceed the swing length ({arm_length_m} m)")]
    HeightExceedsArmLength {
        /// Height as entered, in meters.
        height_m: f64,
        /// Arm length bound, in meters.
        arm_length_m: f64,
    },

    /// Both swing masses must be strictly positive.
    #[error("swing masses must be greater than 0, got {mass1_lbs} and {mass2_lbs} lbs")]
    NonPositiveMass {
        mass1_lbs: f64,
        mass2_lbs: f64,
    },

    /// Initial velocities cannot be negative.
    #[error("initial velocities cannot be negative, got {v_init1} and {v_init2} m/s")]
    NegativeInitialVelocity {
        v_init1: f64,
        v_init2: f64,
    },

    /// The converted vertical-reference angle must stay within the release arc.
    #[error("impact angle from vertical must be between 0 and {max_angle_deg:.1} degrees, got {angle_deg:.1}")]
    AngleBeyondRelease {
        /// Converted angle, in degrees from vertical.
        angle_deg: f64,
        /// Largest angle reachable from the configured height.
        max_angle_deg: f64,
    },

    /// No profile exists for the requested age class.
    #[error("no anthropometric profile for age class {age_class}")]
    UnknownAgeClass {
        age_class: u8,
    },

    /// Derived impact surface was not positive; the age profile data is broken.
    #[error("impact surface must be greater than zero, got {surface_cm2} cm²")]
    ImpactSurfaceNotPositive {
        /// Derived surface, in cm².
        surface_cm2: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_inputs() {
        let err = SimulationError::HeightExceedsArmLength {
            height_m: 3.0,
            arm_length_m: 2.25,
        };
        let text = err.to_string();
        assert!(text.contains("3 m"), "message should echo the height: {}", text);
        assert!(text.contains("2.25"), "message should echo the bound: {}", text);
    }

    #[test]
    fn test_angle_message_formats_degrees() {
        let err = SimulationError::AngleBeyondRelease {
            angle_deg: 61.234,
            max_angle_deg: 48.19,
        };
        assert_eq!(
            err.to_string(),
            "impact angle from vertical must be between 0 and 48.2 degrees, got 61.2"
        );
    }
}
