//! Run state and core simulation types
//!
//! A [`Run`] owns everything one attempt needs. Nothing is shared between runs;
//! restarting means building a new one.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimConfig};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// World is static, waiting for the start trigger
    Ready,
    /// Ticking every frame
    Running,
    /// Terminal; last frame is kept for display
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Top edge left the playfield
    Ceiling,
    /// Bottom edge left the playfield
    Floor,
    /// Hit a segment of the obstacle with this id
    Obstacle { id: u32 },
}

/// The player-controlled body
///
/// Only `pos.y` and `vel` change during a run; the world scrolls instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel: f32,
    pub size: Vec2,
}

impl Player {
    /// Player at the fixed x, top edge at half the playfield height, at rest
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_x, config.player_start_y()),
            vel: 0.0,
            size: config.player_size(),
        }
    }

    /// Advance one tick. An impulse replaces the gravity step with an absolute
    /// velocity set, so repeated impulses never stack.
    pub fn integrate(&mut self, gravity: f32, impulse: Option<f32>) {
        match impulse {
            Some(flap_velocity) => self.vel = flap_velocity,
            None => self.vel += gravity,
        }
        self.pos.y += self.vel;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// An obstacle pair: a top segment and a bottom segment around a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn order within the run (monotonic)
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Height of the top segment
    pub top: f32,
    /// Height of the bottom segment
    pub bottom: f32,
}

impl Obstacle {
    /// Build an obstacle from its top height; the bottom height fills the rest
    /// of the playfield below the gap.
    pub fn new(id: u32, x: f32, top: f32, config: &SimConfig) -> Self {
        Self {
            id,
            x,
            width: config.obstacle_width,
            top,
            bottom: config.playfield_height - config.gap_size - top,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y of the gap's upper boundary
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.top
    }

    /// Y of the gap's lower boundary
    #[inline]
    pub fn gap_bottom(&self, field_height: f32) -> f32 {
        field_height - self.bottom
    }
}

/// One complete attempt: player, obstacles, counters and phase
///
/// Generic over the random source so tests and tools can inject their own;
/// the default is a seeded PCG stream.
#[derive(Debug, Clone)]
pub struct Run<R = Pcg32> {
    pub config: SimConfig,
    /// Seed the random source was built from; `None` for an injected source
    pub seed: Option<u64>,
    pub phase: RunPhase,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: VecDeque<Obstacle>,
    /// Ticks simulated while running
    pub frame: u64,
    /// Obstacles retired so far
    pub score: u64,
    /// Set once when the run ends
    pub crash: Option<CrashCause>,
    pub(crate) rng: R,
    next_id: u32,
}

impl<R: RngCore + SeedableRng> Run<R> {
    /// Validate the config and build a fresh run seeded from `seed`
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(config, seed))
    }

    /// Build a fresh run from an already validated config
    pub(crate) fn fresh(config: SimConfig, seed: u64) -> Self {
        Self::from_parts(config, Some(seed), R::seed_from_u64(seed))
    }
}

impl<R: RngCore> Run<R> {
    /// Validate the config and build a fresh run around an existing random source
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, None, rng))
    }

    fn from_parts(config: SimConfig, seed: Option<u64>, rng: R) -> Self {
        Self {
            player: Player::new(&config),
            config,
            seed,
            phase: RunPhase::Ready,
            obstacles: VecDeque::new(),
            frame: 0,
            score: 0,
            crash: None,
            rng,
            next_id: 1,
        }
    }

    /// Ready -> Running. Returns false (and changes nothing) in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != RunPhase::Ready {
            return false;
        }
        self.phase = RunPhase::Running;
        match self.seed {
            Some(seed) => log::info!("Run started (seed {})", seed),
            None => log::info!("Run started (injected rng)"),
        }
        true
    }

    /// Allocate the next obstacle id
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    /// Obstacles are stored oldest first with strictly increasing ids
    pub fn obstacles_in_spawn_order(&self) -> bool {
        self.obstacles
            .iter()
            .zip(self.obstacles.iter().skip(1))
            .all(|(a, b)| a.id < b.id && a.x <= b.x)
    }
}
