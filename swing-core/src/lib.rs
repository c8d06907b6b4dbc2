//! # Swing Core
//!
//! A physics engine estimating injury risk from two playground swings
//! colliding head-on.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, swing state, age profiles, outcomes)
//! - `error`: Validation and domain error taxonomy
//! - `kinematics`: Angle-to-position mapping and release-arc helpers
//! - `integrator`: Numerical integration (semi-implicit Euler) and run phases
//! - `collision`: Platform overlap detection and restitution-based resolution
//! - `risk`: Pressure/acceleration to injury-likelihood classifiers
//! - `profiles`: YAML-based reference data loader
//! - `simulation`: Main orchestrator (headless, 10 s ceiling)
//! - `runner`: Worker-thread runner for interactive consumers

pub mod collision;
pub mod error;
pub mod integrator;
pub mod kinematics;
pub mod profiles;
pub mod risk;
pub mod runner;
pub mod simulation;
pub mod types;
