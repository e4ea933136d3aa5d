//! Idle/demo mode: a simple controller that plays from snapshots
//!
//! It aims for the lower part of the next gap and flaps whenever the player
//! sinks below that line. One flap lifts the player well over a hundred units
//! with default tuning, so the aim line sits just above the gap's floor.

use super::snapshot::FrameSnapshot;

/// Snapshot-driven flap controller
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Distance above the gap's lower boundary at which to flap
    pub floor_clearance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            floor_clearance: 30.0,
        }
    }
}

impl Autopilot {
    /// Y the player's bottom edge should stay above
    pub fn aim_line(&self, frame: &FrameSnapshot) -> f32 {
        let floor = match frame.next_obstacle() {
            Some(obstacle) => obstacle.gap_bottom,
            // Nothing spawned yet: hold the middle of the field
            None => frame.height / 2.0 + frame.player.rect.h * 2.0,
        };
        floor - self.floor_clearance
    }

    /// Whether to send an impulse before the next tick
    pub fn wants_flap(&self, frame: &FrameSnapshot) -> bool {
        let bottom = frame.player.rect.y + frame.player.rect.h;
        bottom > self.aim_line(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::{Obstacle, Run};
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_flaps_below_aim_line() {
        let config = SimConfig::default();
        let mut run: Run = Run::new(config, 1).unwrap();
        run.obstacles.push_back(Obstacle::new(1, 200.0, 50.0, &config));
        let pilot = Autopilot::default();

        // Gap floor at 250, aim line at 220, player bottom at 264
        assert_eq!(pilot.aim_line(&run.snapshot()), 220.0);
        assert!(pilot.wants_flap(&run.snapshot()));

        run.player.pos.y = 150.0;
        assert!(!pilot.wants_flap(&run.snapshot()));
    }

    #[test]
    fn test_autopilot_clears_obstacles() {
        let mut run: Run = Run::new(SimConfig::default(), 2024).unwrap();
        run.start();
        let pilot = Autopilot::default();

        for _ in 0..1000 {
            let input = TickInput {
                flap: pilot.wants_flap(&run.snapshot()),
            };
            tick(&mut run, &input);
            if run.is_over() {
                break;
            }
        }
        assert!(run.score >= 3, "autopilot scored only {}", run.score);
    }
}
