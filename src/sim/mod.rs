//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick per call, no wall-clock
//! - Injected, seeded RNG only
//! - Obstacles kept in spawn order (FIFO)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod scroll;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{bounds_violation, first_obstacle_hit, hits_obstacle, overlaps_horizontally};
pub use scroll::{retire_passed, scroll_obstacles};
pub use snapshot::{FrameSnapshot, ObstacleView, PlayerView, Rect, Renderer};
pub use spawn::{roll_top_height, should_spawn};
pub use state::{CrashCause, Obstacle, Player, Run, RunPhase};
pub use tick::{SimEvent, TickInput, tick};
