//! Fixed-step simulation tick
//!
//! Core game loop that advances a run by exactly one logical step.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::collision::{bounds_violation, first_obstacle_hit};
use super::scroll::{retire_passed, scroll_obstacles};
use super::spawn::should_spawn;
use super::state::{CrashCause, Run, RunPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// At least one impulse arrived since the previous tick
    pub flap: bool,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Flapped,
    Spawned { id: u32 },
    Scored { id: u32, score: u64 },
    Crashed { cause: CrashCause },
}

/// Advance the run by one tick
///
/// Does nothing unless the run is `Running`: a `Ready` world is static and an
/// `Ended` one is frozen. A tick that detects a crash still completes before
/// the run moves to `Ended`.
pub fn tick<R: RngCore>(run: &mut Run<R>, input: &TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();
    if run.phase != RunPhase::Running {
        return events;
    }

    let config = run.config;

    // 1. Physics
    let impulse = input.flap.then_some(config.flap_velocity);
    run.player.integrate(config.gravity, impulse);
    if impulse.is_some() {
        events.push(SimEvent::Flapped);
    }
    let mut crash = bounds_violation(&run.player, config.playfield_height);

    // 2. Spawn on cadence
    if should_spawn(run.frame, config.spawn_interval) {
        let id = run.spawn_obstacle().id;
        events.push(SimEvent::Spawned { id });
    }

    // 3. Scroll, then retire the oldest obstacle if it has passed
    scroll_obstacles(&mut run.obstacles, config.scroll_speed);
    if let Some(retired) = retire_passed(run) {
        events.push(SimEvent::Scored {
            id: retired.id,
            score: run.score,
        });
    }

    // 4. Collisions against every live obstacle
    if crash.is_none() {
        crash = first_obstacle_hit(&run.player, &run.obstacles, config.playfield_height)
            .map(|id| CrashCause::Obstacle { id });
    }

    run.frame += 1;
    debug_assert!(run.obstacles_in_spawn_order(), "obstacle order violated");

    // 5. Resolve terminal state
    if let Some(cause) = crash {
        run.phase = RunPhase::Ended;
        run.crash = Some(cause);
        events.push(SimEvent::Crashed { cause });
        log::info!(
            "Run ended at frame {} with score {} ({:?})",
            run.frame,
            run.score,
            cause
        );
    }

    log::trace!(
        "frame {} y {:.2} vel {:.2} obstacles {}",
        run.frame,
        run.player.pos.y,
        run.player.vel,
        run.obstacles.len()
    );

    events
}
