//! Obstacle generation
//!
//! One obstacle pair enters at the right edge every `spawn_interval` ticks.
//! The gap's vertical placement is the only random input to the simulation.

use rand::{Rng, RngCore};

use super::state::{Obstacle, Run};
use crate::config::SimConfig;

/// True on ticks that spawn an obstacle (including the very first)
#[inline]
pub fn should_spawn(frame: u64, spawn_interval: u32) -> bool {
    frame % u64::from(spawn_interval) == 0
}

/// Draw a top segment height uniformly from the range that keeps both
/// segments at least `gap_margin` tall
pub fn roll_top_height<G: Rng + ?Sized>(rng: &mut G, config: &SimConfig) -> f32 {
    let (min, max) = config.top_height_range();
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

impl<R: RngCore> Run<R> {
    /// Append a new obstacle at the right edge of the playfield
    pub fn spawn_obstacle(&mut self) -> &Obstacle {
        let top = roll_top_height(&mut self.rng, &self.config);
        let id = self.next_obstacle_id();
        let obstacle = Obstacle::new(id, self.config.playfield_width, top, &self.config);
        log::debug!(
            "Spawned obstacle {} at frame {} (top {:.1}, bottom {:.1})",
            id,
            self.frame,
            obstacle.top,
            obstacle.bottom
        );
        self.obstacles.push_back(obstacle);
        &self.obstacles[self.obstacles.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        assert!(should_spawn(0, 90));
        assert!(!should_spawn(1, 90));
        assert!(!should_spawn(89, 90));
        assert!(should_spawn(90, 90));
        assert!(should_spawn(180, 90));
        assert!(should_spawn(7, 1));
    }

    #[test]
    fn test_top_height_respects_margins() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            let top = roll_top_height(&mut rng, &config);
            assert!(top >= config.gap_margin);
            let bottom = config.playfield_height - config.gap_size - top;
            assert!(bottom >= config.gap_margin - 1e-3);
        }
    }

    #[test]
    fn test_degenerate_range_is_fixed() {
        let config = SimConfig {
            gap_size: 380.0,
            gap_margin: 50.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(roll_top_height(&mut rng, &config), 50.0);
    }

    #[test]
    fn test_spawn_appends_at_right_edge() {
        let mut run: Run = Run::new(SimConfig::default(), 11).unwrap();
        let first = run.spawn_obstacle().id;
        let second = *run.spawn_obstacle();
        assert_eq!(run.obstacles.len(), 2);
        assert_eq!(run.obstacles[0].id, first);
        assert_eq!(second.x, 320.0);
        assert!(second.id > first);
        assert!(run.obstacles_in_spawn_order());
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let mut a: Run = Run::new(SimConfig::default(), 42).unwrap();
        let mut b: Run = Run::new(SimConfig::default(), 42).unwrap();
        for _ in 0..20 {
            assert_eq!(*a.spawn_obstacle(), *b.spawn_obstacle());
        }
    }

    #[test]
    fn test_injected_rng_matches_seeded_run() {
        let config = SimConfig::default();
        let mut seeded: Run = Run::new(config, 8).unwrap();
        let mut injected = Run::with_rng(config, Pcg32::seed_from_u64(8)).unwrap();
        for _ in 0..10 {
            assert_eq!(seeded.spawn_obstacle().top, injected.spawn_obstacle().top);
        }
    }
}
