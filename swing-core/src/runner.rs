//! Interactive runner: physics on a worker thread, snapshots for a consumer.
//!
//! The worker thread owns the `PendulumPair` exclusively; nothing else ever
//! touches the physics state. Two shared handles cross the thread boundary:
//!
//! - an `AtomicBool` "keep running" flag, checked at tick boundaries only
//!   (there is no mid-tick cancellation)
//! - a mutex holding the latest read-only [`FrameSnapshot`], overwritten by
//!   the worker each tick and cloned out by the consumer at its own cadence
//!
//! The collision is processed exactly once: the tick that latches `Colliding`
//! resolves the impact, installs the post-impact velocities, publishes the
//! final snapshot carrying the outcome, and exits the loop.
//!
//! Unlike the headless orchestrator there is no simulated-time ceiling here;
//! a run that never collides keeps ticking until the consumer clears the
//! flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};

use crate::integrator::{PendulumPair, SimPhase};
use crate::simulation::SimulationConfig;
use crate::types::{constants, CollisionOutcome};

/// Read-only view of the latest computed tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub time_s: f64,
    pub angles_rad: (f64, f64),
    pub angular_velocities: (f64, f64),
    pub phase: SimPhase,
    /// Present only on the final snapshot of a run that collided
    pub outcome: Option<CollisionOutcome>,
}

/// Spawns and owns the physics worker for one interactive run.
pub struct SimulationRunner;

impl SimulationRunner {
    /// Start the worker at the configuration's initial state.
    ///
    /// The worker paces itself to the fixed tick, so the published snapshots
    /// advance in roughly real time for a 60 Hz consumer.
    pub fn spawn(config: SimulationConfig) -> RunnerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let mut pair = config.build_pair();

        let latest = Arc::new(Mutex::new(FrameSnapshot {
            time_s: pair.time_s(),
            angles_rad: (pair.swing1().angle_rad, pair.swing2().angle_rad),
            angular_velocities: (
                pair.swing1().angular_velocity,
                pair.swing2().angular_velocity,
            ),
            phase: pair.phase(),
            outcome: None,
        }));

        let worker = {
            let running = Arc::clone(&running);
            let latest = Arc::clone(&latest);
            thread::spawn(move || {
                let dt = constants::TICK_DT;
                while running.load(Ordering::Acquire) {
                    let phase = pair.tick(dt);

                    let outcome = if phase == SimPhase::Colliding {
                        match config.resolve_collision(&pair) {
                            Ok(outcome) => {
                                let (omega1, omega2) = (
                                    outcome.post_impact_velocities.0 / constants::SWING_LENGTH,
                                    outcome.post_impact_velocities.1 / constants::SWING_LENGTH,
                                );
                                pair.apply_post_impact(omega1, omega2);
                                debug!("collision resolved at t={:.3}s", pair.time_s());
                                Some(outcome)
                            }
                            Err(err) => {
                                error!("collision resolution failed: {}", err);
                                None
                            }
                        }
                    } else {
                        None
                    };

                    let done = outcome.is_some() || phase != SimPhase::Running;
                    publish(&latest, &pair, outcome);
                    if done {
                        running.store(false, Ordering::Release);
                        break;
                    }

                    thread::sleep(Duration::from_secs_f64(dt));
                }
            })
        };

        RunnerHandle {
            running,
            latest,
            worker: Some(worker),
        }
    }
}

fn publish(
    latest: &Arc<Mutex<FrameSnapshot>>,
    pair: &PendulumPair,
    outcome: Option<CollisionOutcome>,
) {
    let snapshot = FrameSnapshot {
        time_s: pair.time_s(),
        angles_rad: (pair.swing1().angle_rad, pair.swing2().angle_rad),
        angular_velocities: (
            pair.swing1().angular_velocity,
            pair.swing2().angular_velocity,
        ),
        phase: pair.phase(),
        outcome,
    };
    // A poisoned lock only means the consumer panicked mid-clone; the
    // snapshot itself is plain data and still safe to replace.
    let mut slot = latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = snapshot;
}

/// Consumer-side handle to a running simulation.
pub struct RunnerHandle {
    running: Arc<AtomicBool>,
    latest: Arc<Mutex<FrameSnapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl RunnerHandle {
    /// Clone out the most recent snapshot.
    pub fn latest(&self) -> FrameSnapshot {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// True while the worker is still ticking.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the worker to exit at the next tick boundary.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Wait for the worker and return the collision outcome, if one latched.
    ///
    /// Blocks until the worker exits; for a run that may never collide, call
    /// [`stop`](Self::stop) first.
    pub fn join(mut self) -> Option<CollisionOutcome> {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .outcome
            .clone()
    }
}

impl Drop for RunnerHandle {
    fn drop(&mut self) {
        self.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
