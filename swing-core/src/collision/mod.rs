//! Collision detection and resolution for the two-swing impact.
//!
//! This module handles:
//! - **Detection**: finding the tick where the two seat platforms meet
//! - **Resolution**: post-impact velocities and the derived injury metrics
//!
//! ## Platform Overlap Test
//!
//! Each seat is a rigid segment perpendicular to its arm. Detection checks
//! whether the two segments intersect, with a small distance tolerance to
//! catch near-misses between discrete ticks:
//!
//! ```text
//!   ● pivot 1                 pivot 2 ●
//!    \                               /
//!     \ θ₁                      θ₂ /
//!      \                          /
//!     ──●── platform      platform ──●──
//!          \__ overlap here __/
//! ```

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
