//! Simulation tuning and validation
//!
//! Every constant the simulation reads lives in [`SimConfig`]. A config is
//! validated once, when a run or session is built from it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("flap_velocity must be negative (upward), got {0}")]
    FlapNotUpward(f32),
    #[error("gap_margin must not be negative, got {0}")]
    NegativeMargin(f32),
    #[error("spawn_interval must be at least one tick")]
    ZeroSpawnInterval,
    #[error("gap {gap} plus two margins of {margin} exceeds playfield height {height}")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
    #[error("player of height {player_height} cannot start at half of playfield height {height}")]
    PlayerDoesNotFit { player_height: f32, height: f32 },
    #[error("player span [{left}, {right}] lies outside playfield width {width}")]
    PlayerOutsideField { left: f32, right: f32, width: f32 },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation tuning constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Absolute velocity set by an impulse
    pub flap_velocity: f32,
    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub obstacle_width: f32,
    /// Vertical opening of every obstacle pair
    pub gap_size: f32,
    /// Minimum height of each obstacle segment
    pub gap_margin: f32,
    /// Spawn cadence in ticks
    pub spawn_interval: u32,
    /// Leftward obstacle movement per tick
    pub scroll_speed: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            scroll_speed: SCROLL_SPEED,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that every constant is usable and the geometry fits the playfield
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("player_x", self.player_x),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("gap_margin", self.gap_margin),
            ("scroll_speed", self.scroll_speed),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("scroll_speed", self.scroll_speed),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.flap_velocity >= 0.0 {
            return Err(ConfigError::FlapNotUpward(self.flap_velocity));
        }
        if self.gap_margin < 0.0 {
            return Err(ConfigError::NegativeMargin(self.gap_margin));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.gap_size + 2.0 * self.gap_margin > self.playfield_height {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_size,
                margin: self.gap_margin,
                height: self.playfield_height,
            });
        }
        if self.player_start_y() + self.player_height > self.playfield_height {
            return Err(ConfigError::PlayerDoesNotFit {
                player_height: self.player_height,
                height: self.playfield_height,
            });
        }
        let right = self.player_x + self.player_width;
        if self.player_x < 0.0 || right > self.playfield_width {
            return Err(ConfigError::PlayerOutsideField {
                left: self.player_x,
                right,
                width: self.playfield_width,
            });
        }

        Ok(())
    }

    /// Top edge of a freshly spawned player
    #[inline]
    pub fn player_start_y(&self) -> f32 {
        self.playfield_height / 2.0
    }

    #[inline]
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    #[inline]
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Valid range for an obstacle's top segment height
    pub fn top_height_range(&self) -> (f32, f32) {
        let max = self.playfield_height - self.gap_size - self.gap_margin;
        (self.gap_margin, max)
    }
}
