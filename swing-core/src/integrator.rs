//! Time integration for the pendulum motion.
//!
//! Each swing follows the damped pendulum equation
//!
//! ```text
//! α = −(g/L)·sin θ − (c/m)·θ̇
//! ```
//!
//! advanced with semi-implicit (symplectic) Euler at a fixed step:
//!
//! ```text
//! θ̇ += α·dt
//! θ  += θ̇·dt      // uses the UPDATED velocity
//! ```
//!
//! ## Why semi-implicit Euler?
//!
//! - **Symplectic**: oscillation amplitude stays bounded over long runs,
//!   where explicit Euler spirals outward
//! - **Fixed dt**: collision timing is resolved to the tick; results are
//!   reproducible bit-for-bit for a given step
//!
//! The damping term divides by mass, so it is an angular drag stand-in rather
//! than true viscous damping. Downstream injury numbers are calibrated
//! against this exact term.

use crate::collision::CollisionGeometry;
use crate::types::{constants, SwingState};

/// Angular acceleration model for one swing.
pub trait TorqueModel {
    /// Angular acceleration in rad/s² at the given state.
    fn angular_acceleration(&self, state: &SwingState) -> f64;
}

/// Gravity restoring torque plus velocity-proportional drag.
#[derive(Debug, Clone)]
pub struct GravityDamping {
    pub gravity: f64,
    pub damping: f64,
}

impl Default for GravityDamping {
    fn default() -> Self {
        Self {
            gravity: constants::GRAVITY,
            damping: constants::DAMPING_COEFF,
        }
    }
}

impl TorqueModel for GravityDamping {
    fn angular_acceleration(&self, state: &SwingState) -> f64 {
        -(self.gravity / state.arm_length) * state.angle_rad.sin()
            - (self.damping / state.mass_kg) * state.angular_velocity
    }
}

/// Semi-implicit Euler integrator.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance one swing by one time step.
    pub fn step<M: TorqueModel>(state: &SwingState, model: &M, dt: f64) -> SwingState {
        let alpha = model.angular_acceleration(state);
        let angular_velocity = state.angular_velocity + alpha * dt;
        let angle_rad = state.angle_rad + angular_velocity * dt;
        SwingState {
            angle_rad,
            angular_velocity,
            ..*state
        }
    }
}

/// Lifecycle of one simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Physics advancing every tick
    Running,
    /// Platforms met this tick; physics halted, resolver takes over
    Colliding,
    /// Post-impact velocities applied (or the run was shut down)
    Stopped,
}

/// The two coupled swings plus the collision latch.
///
/// Owns all mutable physics state; consumers read angles and velocities
/// between ticks. Collision fires at most once: the tick that detects contact
/// moves the phase to `Colliding` and freezes the physics, so neither the
/// headless loop nor an animation loop can double-process the event.
#[derive(Debug, Clone)]
pub struct PendulumPair {
    swing1: SwingState,
    swing2: SwingState,
    geometry: CollisionGeometry,
    model: GravityDamping,
    target_angle_rad: f64,
    phase: SimPhase,
    time_s: f64,
}

impl PendulumPair {
    /// Build a pair at its initial state.
    ///
    /// `target_angle_rad` gates the collision: contact only counts once
    /// swing 1 has reached the configured impact angle.
    pub fn new(
        swing1: SwingState,
        swing2: SwingState,
        geometry: CollisionGeometry,
        target_angle_rad: f64,
    ) -> Self {
        Self {
            swing1,
            swing2,
            geometry,
            model: GravityDamping::default(),
            target_angle_rad,
            phase: SimPhase::Running,
            time_s: 0.0,
        }
    }

    pub fn swing1(&self) -> &SwingState {
        &self.swing1
    }

    pub fn swing2(&self) -> &SwingState {
        &self.swing2
    }

    pub fn geometry(&self) -> &CollisionGeometry {
        &self.geometry
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Simulated time advanced so far (s)
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// Advance both swings by one tick, then run the collision test.
    ///
    /// A no-op unless the phase is `Running`; the first contact latches the
    /// phase at `Colliding` and later ticks leave the state untouched.
    pub fn tick(&mut self, dt: f64) -> SimPhase {
        if self.phase != SimPhase::Running {
            return self.phase;
        }

        self.swing1 = SemiImplicitEuler::step(&self.swing1, &self.model, dt);
        self.swing2 = SemiImplicitEuler::step(&self.swing2, &self.model, dt);
        self.time_s += dt;

        let target_reached = self.swing1.angle_rad.abs() >= self.target_angle_rad;
        if target_reached
            && self
                .geometry
                .check_collision(self.swing1.angle_rad, self.swing2.angle_rad)
        {
            self.phase = SimPhase::Colliding;
        }

        self.phase
    }

    /// Install the resolver's post-impact angular velocities and stop.
    pub fn apply_post_impact(&mut self, omega1: f64, omega2: f64) {
        self.swing1.angular_velocity = omega1;
        self.swing2.angular_velocity = omega2;
        self.phase = SimPhase::Stopped;
    }
}

// =============================================================================
// Tests
// =============================================================================
