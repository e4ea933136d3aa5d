//! Obstacle scrolling, retirement and scoring
//!
//! Spawn order is monotonic and every obstacle moves at the same speed, so the
//! oldest live obstacle is always the next one to leave. Retirement only ever
//! looks at the front of the queue.

use std::collections::VecDeque;

use super::state::{Obstacle, Run};

/// Move every obstacle left by `speed`
pub fn scroll_obstacles(obstacles: &mut VecDeque<Obstacle>, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
}

/// Retire the front obstacle once its right edge is behind the player's left
/// edge, scoring exactly one point. At most one obstacle leaves per call.
pub fn retire_passed<R>(run: &mut Run<R>) -> Option<Obstacle> {
    let passed = run
        .obstacles
        .front()
        .is_some_and(|front| front.right() < run.player.left());
    if !passed {
        return None;
    }

    let retired = run.obstacles.pop_front()?;
    run.score += 1;
    log::debug!("Obstacle {} passed, score {}", retired.id, run.score);
    Some(retired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn run_with(xs: &[f32]) -> Run {
        let config = SimConfig::default();
        let mut run: Run = Run::new(config, 5).unwrap();
        for &x in xs {
            let id = run.next_obstacle_id();
            run.obstacles.push_back(Obstacle::new(id, x, 100.0, &config));
        }
        run
    }

    #[test]
    fn test_scroll_moves_all() {
        let mut run = run_with(&[100.0, 280.0]);
        scroll_obstacles(&mut run.obstacles, 2.0);
        assert_eq!(run.obstacles[0].x, 98.0);
        assert_eq!(run.obstacles[1].x, 278.0);
    }

    #[test]
    fn test_exited_obstacle_scores_once() {
        // Right edge at 49, player span [50, 84]
        let mut run = run_with(&[-1.0]);
        let retired = retire_passed(&mut run).expect("obstacle should retire");
        assert_eq!(retired.id, 1);
        assert_eq!(run.score, 1);
        assert!(run.obstacles.is_empty());
        assert!(retire_passed(&mut run).is_none());
        assert_eq!(run.score, 1);
    }

    #[test]
    fn test_not_retired_while_overlapping_player() {
        // Midpoint is behind the player but the right edge is not
        let mut run = run_with(&[10.0]);
        assert!(retire_passed(&mut run).is_none());
        assert_eq!(run.score, 0);

        // Right edge exactly at the player's left edge is not yet past it
        let mut run = run_with(&[0.0]);
        assert!(retire_passed(&mut run).is_none());
    }

    #[test]
    fn test_one_retirement_per_call_in_fifo_order() {
        let mut run = run_with(&[-80.0, -10.0, 200.0]);
        assert_eq!(retire_passed(&mut run).map(|o| o.id), Some(1));
        assert_eq!(run.score, 1);
        assert_eq!(run.obstacles.len(), 2);
        assert_eq!(retire_passed(&mut run).map(|o| o.id), Some(2));
        assert_eq!(run.score, 2);
        assert!(retire_passed(&mut run).is_none());
    }
}
