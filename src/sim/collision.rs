//! Collision detection for axis-aligned boxes
//!
//! The player is a box; each obstacle is two boxes (above and below its gap).
//! There is no collision response: any contact ends the run.

use super::state::{CrashCause, Obstacle, Player};

/// Horizontal span overlap between the player and an obstacle
#[inline]
pub fn overlaps_horizontally(player: &Player, obstacle: &Obstacle) -> bool {
    player.right() > obstacle.left() && player.left() < obstacle.right()
}

/// Player touches either segment of the obstacle
pub fn hits_obstacle(player: &Player, obstacle: &Obstacle, field_height: f32) -> bool {
    overlaps_horizontally(player, obstacle)
        && (player.top() < obstacle.gap_top()
            || player.bottom() > obstacle.gap_bottom(field_height))
}

/// Player has left the playfield vertically
pub fn bounds_violation(player: &Player, field_height: f32) -> Option<CrashCause> {
    if player.top() < 0.0 {
        Some(CrashCause::Ceiling)
    } else if player.bottom() > field_height {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// Check every live obstacle, not just the nearest: with tight spacing more
/// than one pair can overlap the player's span. Returns the oldest hit.
pub fn first_obstacle_hit<'a>(
    player: &Player,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    field_height: f32,
) -> Option<u32> {
    obstacles
        .into_iter()
        .find(|obstacle| hits_obstacle(player, obstacle, field_height))
        .map(|obstacle| obstacle.id)
}
