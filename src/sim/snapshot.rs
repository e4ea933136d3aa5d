//! Frame snapshots and the render contract
//!
//! A snapshot is an owned, immutable copy of everything a renderer needs for
//! one frame. Renderers never see the live run.

use serde::{Deserialize, Serialize};

use super::state::{CrashCause, Obstacle, Player, Run, RunPhase};

/// Axis-aligned rectangle in playfield units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the point lies inside (left/top inclusive, right/bottom exclusive)
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub vel: f32,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            rect: Rect::new(player.pos.x, player.pos.y, player.size.x, player.size.y),
            vel: player.vel,
        }
    }
}

/// One obstacle pair with its gap bounds resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

impl ObstacleView {
    fn new(obstacle: &Obstacle, field_height: f32) -> Self {
        Self {
            id: obstacle.id,
            x: obstacle.x,
            width: obstacle.width,
            top: obstacle.top,
            bottom: obstacle.bottom,
            gap_top: obstacle.gap_top(),
            gap_bottom: obstacle.gap_bottom(field_height),
        }
    }

    /// Segment hanging from the top of the playfield
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top)
    }

    /// Segment standing on the bottom of the playfield
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom, self.width, self.bottom)
    }
}

/// Immutable view of a run for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub width: f32,
    pub height: f32,
    pub phase: RunPhase,
    pub frame: u64,
    pub score: u64,
    /// Best score of the session, including this run
    pub best_score: u64,
    pub crash: Option<CrashCause>,
    pub player: PlayerView,
    /// Oldest first
    pub obstacles: Vec<ObstacleView>,
}

impl FrameSnapshot {
    /// Oldest obstacle whose right edge is not yet behind the player
    pub fn next_obstacle(&self) -> Option<&ObstacleView> {
        let player_left = self.player.rect.x;
        self.obstacles.iter().find(|o| o.x + o.width >= player_left)
    }
}

/// Anything that can draw a frame: a canvas, a terminal, a test recorder
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot);
}

impl<R> Run<R> {
    /// Capture the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let height = self.config.playfield_height;
        FrameSnapshot {
            width: self.config.playfield_width,
            height,
            phase: self.phase,
            frame: self.frame,
            score: self.score,
            best_score: self.score,
            crash: self.crash,
            player: PlayerView::from(&self.player),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView::new(o, height))
                .collect(),
        }
    }
}
