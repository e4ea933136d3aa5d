//! Flappy Sim - a deterministic side-scrolling flappy game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `config`: Validated tuning constants, loadable from JSON
//! - `game`: Session driver (start/restart/flap triggers, input latching)
//! - `render`: Text render adapter for frame snapshots

pub mod config;
pub mod game;
pub mod render;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use game::Game;
pub use render::TextRenderer;
pub use sim::{FrameSnapshot, Renderer, Run, RunPhase, SimEvent, TickInput, tick};

/// Game configuration constants
///
/// Canvas units, one tick per display frame.
pub mod consts {
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set by an impulse (negative is up)
    pub const FLAP_VELOCITY: f32 = -12.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Player box and its fixed horizontal position
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Vertical opening between the top and bottom segment
    pub const GAP_SIZE: f32 = 200.0;
    /// Minimum height of either segment
    pub const GAP_MARGIN: f32 = 50.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u32 = 90;
    /// Leftward scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;
}
