//! Core types for the swing collision simulation.
//!
//! All units are SI unless the name says otherwise:
//! - Position: meters (m)
//! - Angle: radians (degrees only at the input/display boundary)
//! - Angular velocity: radians per second (rad/s)
//! - Mass: kilograms (kg); user-facing masses arrive in pounds
//! - Force: Newtons (N)
//! - Pressure: megapascals (MPa ≡ N/mm²)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for pivot and platform-endpoint positions.
///
/// Coordinate system:
/// - X: horizontal, positive to the right (swing 1 hangs at negative X)
/// - Y: vertical, positive upward (ground at y = 0, pivots at arm height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Swing State
// =============================================================================

/// Complete state of one swing at a given instant.
///
/// The angle is measured from the vertical rest position, positive toward
/// positive X. The seat/platform hangs at the arm tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingState {
    pub angle_rad: f64,
    pub angular_velocity: f64,
    pub pivot: Vec2,
    pub arm_length: f64,
    pub mass_kg: f64,
}

impl SwingState {
    pub fn new(angle_rad: f64, angular_velocity: f64, pivot: Vec2, arm_length: f64, mass_kg: f64) -> Self {
        Self {
            angle_rad,
            angular_velocity,
            pivot,
            arm_length,
            mass_kg,
        }
    }

    /// Swing hanging at rest straight down from its pivot
    pub fn at_rest(pivot: Vec2, arm_length: f64, mass_kg: f64) -> Self {
        Self::new(0.0, 0.0, pivot, arm_length, mass_kg)
    }

    /// Position of the arm tip (seat attachment point)
    pub fn tip_position(&self) -> Vec2 {
        crate::kinematics::tip_position(self.pivot, self.angle_rad, self.arm_length)
    }

    /// Tangential speed of the seat in m/s
    pub fn tangential_speed(&self) -> f64 {
        self.angular_velocity * self.arm_length
    }

    /// Translational kinetic energy of the seated mass
    pub fn kinetic_energy(&self) -> f64 {
        let v = self.tangential_speed();
        0.5 * self.mass_kg * v * v
    }
}

// =============================================================================
// Impact Type
// =============================================================================

/// Geometry model used for the neck impact surface.
///
/// - `Frontal`: the full neck width takes the blow (seat edge hits flat)
/// - `Concentrated`: a narrow 20 mm edge takes the blow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
    Frontal,
    Concentrated,
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactType::Frontal => write!(f, "frontal"),
            ImpactType::Concentrated => write!(f, "concentrated"),
        }
    }
}

// =============================================================================
// Age Profiles
// =============================================================================

/// Anthropometric reference data for one age class (1-5, youngest to oldest).
///
/// Vertebrae strength is a (min, max) band in MPa; pressures inside the band
/// are where individual variation decides the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeProfile {
    pub age_class: u8,
    pub neck_circumference_mm: f64,
    pub neck_height_mm: f64,
    pub vertebrae_strength_mpa: (f64, f64),
    pub head_mass_kg: f64,
}

impl AgeProfile {
    /// Built-in profile for an age class, or `None` outside 1-5.
    pub fn builtin(age_class: u8) -> Option<Self> {
        let (circumference, neck_height, strength, head_mass) = match age_class {
            1 => (200.0, 45.0, (4.0, 8.0), 3.0),
            2 => (210.0, 50.0, (4.5, 8.5), 3.2),
            3 => (225.0, 60.0, (5.0, 9.0), 3.5),
            4 => (235.0, 65.0, (5.0, 9.5), 3.7),
            5 => (245.0, 70.0, (5.0, 10.0), 4.0),
            _ => return None,
        };
        Some(Self {
            age_class,
            neck_circumference_mm: circumference,
            neck_height_mm: neck_height,
            vertebrae_strength_mpa: strength,
            head_mass_kg: head_mass,
        })
    }

    /// Neck diameter from circumference, assuming a circular cross-section
    pub fn neck_diameter_mm(&self) -> f64 {
        self.neck_circumference_mm / std::f64::consts::PI
    }

    /// Half-width of the seat platform in meters, scaled to the occupant.
    ///
    /// 0.6 m at the 50 mm reference neck height, growing with the child.
    pub fn platform_half_width(&self) -> f64 {
        0.6 * (self.neck_height_mm / 50.0)
    }
}

// =============================================================================
// Risk Thresholds
// =============================================================================

/// Global classifier bands, shared across age classes.
///
/// Pressure bands are (min, max) in MPa; below min the injury is ruled out,
/// above max it is near-certain, and inside the band the age profile's
/// vertebrae strength decides. Concussion is a single g-force threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub decapitation_mpa: (f64, f64),
    pub cervical_fracture_mpa: (f64, f64),
    pub concussion_g: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            decapitation_mpa: (5.0, 10.0),
            cervical_fracture_mpa: (3.0, 6.0),
            concussion_g: 80.0,
        }
    }
}

// =============================================================================
// Risk Level
// =============================================================================

/// Ordinal injury likelihood. Ordering is meaningful: classifiers are
/// monotonic in their input metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Improbable,
    Possible,
    Probable,
    VeryProbable,
}

impl RiskLevel {
    /// Numeric rank, 1 (improbable) through 4 (very probable)
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Improbable => 1,
            RiskLevel::Possible => 2,
            RiskLevel::Probable => 3,
            RiskLevel::VeryProbable => 4,
        }
    }

    /// Human-readable label for result panels
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Improbable => "Improbable (low)",
            RiskLevel::Possible => "Possible (moderate)",
            RiskLevel::Probable => "Probable (high)",
            RiskLevel::VeryProbable => "Very probable (extreme)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Outcome Records
// =============================================================================

/// Everything derived from the single collision event.
///
/// Velocities are tangential seat speeds in m/s, signed with the angular
/// convention (positive toward positive X).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionOutcome {
    pub pre_impact_velocities: (f64, f64),
    pub post_impact_velocities: (f64, f64),
    pub relative_velocity: f64,
    pub force_n: f64,
    pub impact_surface_cm2: f64,
    pub pressure_mpa: f64,
    pub acceleration_ms2: f64,
    /// HIC15 of the impulse-approximation acceleration profile, when computable
    pub hic: Option<f64>,
    pub decapitation_risk: RiskLevel,
    pub cervical_fracture_risk: RiskLevel,
    pub concussion_risk: RiskLevel,
}

/// Terminal state of one simulation run.
///
/// The integrator loop is bounded by a simulated-time ceiling; running out of
/// time is a defined outcome, not an error, and is reported explicitly rather
/// than returning stale numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationOutcome {
    Collision(CollisionOutcome),
    NoCollision { simulated_time_s: f64 },
}

impl SimulationOutcome {
    pub fn collision(&self) -> Option<&CollisionOutcome> {
        match self {
            SimulationOutcome::Collision(outcome) => Some(outcome),
            SimulationOutcome::NoCollision { .. } => None,
        }
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants and fixed model parameters.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Swing arm length, shared by both swings (m)
    pub const SWING_LENGTH: f64 = 2.25;

    /// Horizontal pivot offset from the origin, mirrored for the two swings (m)
    pub const PIVOT_OFFSET_X: f64 = 2.0;

    /// Duration of the impact used in the impulse approximation (s)
    pub const COLLISION_TIME: f64 = 0.05;

    /// Pounds to kilograms
    pub const LBS_TO_KG: f64 = 0.453592;

    /// Angular drag coefficient. Applied as -(c/m)·θ̇, which is a modeling
    /// simplification rather than true viscous damping; downstream numbers
    /// are calibrated against it, so it must not be replaced with a
    /// physically stricter term.
    pub const DAMPING_COEFF: f64 = 0.02;

    /// Default coefficient of restitution for the seat-to-seat impact
    pub const RESTITUTION: f64 = 0.5;

    /// Fixed integration step: one tick of a 60 Hz simulation (s)
    pub const TICK_DT: f64 = 1.0 / 60.0;

    /// Simulated-time ceiling for the headless integrator loop (s)
    pub const MAX_SIM_TIME: f64 = 10.0;

    /// Near-miss contact tolerance at the reference arm length (m).
    /// Scaled by arm_length / SWING_LENGTH wherever it is applied.
    pub const NEAR_MISS_TOLERANCE: f64 = 0.01;

    /// Head Injury Criterion reference limit for critical impacts
    pub const HIC_LIMIT: f64 = 1000.0;

    /// Peak head acceleration reference limit for critical impacts (g)
    pub const PEAK_ACCELERATION_G: f64 = 200.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
