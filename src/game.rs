//! Session driver
//!
//! Owns the current [`Run`] and turns external triggers (start, restart,
//! flap) into simulation input. An external scheduler calls [`Game::advance`]
//! once per display refresh and then reads [`Game::snapshot`].

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{ConfigError, SimConfig};
use crate::sim::{FrameSnapshot, Renderer, Run, RunPhase, SimEvent, TickInput, tick};

/// Derive the seed for the n-th run of a session
///
/// Mixes the run index into the session seed so each run gets its own
/// obstacle sequence while a session stays reproducible.
pub fn run_seed(session_seed: u64, run_index: u64) -> u64 {
    run_index
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(session_seed)
}

/// A play session: one live run plus session-wide bookkeeping
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    config: SimConfig,
    session_seed: u64,
    /// Runs built so far, including the current one
    runs: u64,
    run: Run<R>,
    /// Impulses since the last tick, collapsed to one
    pending_flap: bool,
    best_score: u64,
}

impl<R: RngCore + SeedableRng> Game<R> {
    /// Validate the config and prepare the first run in `Ready`
    pub fn new(config: SimConfig, session_seed: u64) -> Result<Self, ConfigError> {
        let run = Run::new(config, run_seed(session_seed, 0))?;
        Ok(Self {
            config,
            session_seed,
            runs: 1,
            run,
            pending_flap: false,
            best_score: 0,
        })
    }

    /// Start trigger: "begin or play again"
    ///
    /// Ready starts the current run; Ended builds a fresh run and starts it;
    /// Running ignores the trigger. Returns whether a run was started.
    pub fn start(&mut self) -> bool {
        match self.run.phase {
            RunPhase::Ready => self.run.start(),
            RunPhase::Ended => {
                self.restart();
                self.run.start()
            }
            RunPhase::Running => {
                log::debug!("Start ignored: run already in progress");
                false
            }
        }
    }

    /// Restart trigger: discard the current run and build a fresh one in `Ready`
    pub fn restart(&mut self) {
        let seed = run_seed(self.session_seed, self.runs);
        self.runs = self.runs.wrapping_add(1);
        self.run = Run::fresh(self.config, seed);
        self.pending_flap = false;
        log::info!("Run {} ready (seed {})", self.runs, seed);
    }
}

impl<R: RngCore> Game<R> {
    /// Impulse trigger. Only a running game accepts it; several impulses
    /// before the next tick count as one.
    pub fn flap(&mut self) -> bool {
        if !self.run.is_running() {
            log::debug!("Flap ignored in {:?}", self.run.phase);
            return false;
        }
        self.pending_flap = true;
        true
    }

    /// Advance one tick, consuming any latched impulse
    pub fn advance(&mut self) -> Vec<SimEvent> {
        let input = TickInput {
            flap: std::mem::take(&mut self.pending_flap),
        };
        let events = tick(&mut self.run, &input);
        self.best_score = self.best_score.max(self.run.score);
        events
    }

    /// Advance one tick and hand the resulting frame to a renderer
    pub fn frame<D: Renderer + ?Sized>(&mut self, renderer: &mut D) -> Vec<SimEvent> {
        let events = self.advance();
        renderer.render(&self.snapshot());
        events
    }

    /// Current frame, with the session's best score filled in
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut frame = self.run.snapshot();
        frame.best_score = self.best_score.max(self.run.score);
        frame
    }

    pub fn run(&self) -> &Run<R> {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Number of runs built this session
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;

    fn crash(game: &mut Game) {
        while game.phase() == RunPhase::Running {
            game.advance();
        }
    }

    #[test]
    fn test_ready_until_started() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        assert_eq!(game.phase(), RunPhase::Ready);
        assert!(!game.flap());
        assert!(game.advance().is_empty());
        assert_eq!(game.run().frame, 0);

        assert!(game.start());
        assert_eq!(game.phase(), RunPhase::Running);
        assert!(!game.start());
    }

    #[test]
    fn test_impulses_coalesce() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.start();
        game.advance();
        assert!(game.flap());
        assert!(game.flap());
        assert!(game.flap());

        let events = game.advance();
        let flaps = events.iter().filter(|e| **e == SimEvent::Flapped).count();
        assert_eq!(flaps, 1);
        assert_eq!(game.run().player.vel, -12.0);

        // Latch is consumed
        game.advance();
        assert!((game.run().player.vel - (-11.4)).abs() < 1e-5);
    }

    #[test]
    fn test_ended_ignores_flap() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.start();
        crash(&mut game);
        assert_eq!(game.run().crash, Some(CrashCause::Floor));
        assert!(!game.flap());
        let frame = game.run().frame;
        assert!(game.advance().is_empty());
        assert_eq!(game.run().frame, frame);
    }

    #[test]
    fn test_restart_matches_fresh_run() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.start();
        crash(&mut game);

        game.restart();
        let fresh: Run = Run::new(SimConfig::default(), 123).unwrap();
        let run = game.run();
        assert_eq!(run.phase, RunPhase::Ready);
        assert_eq!(run.player, fresh.player);
        assert_eq!(run.obstacles, fresh.obstacles);
        assert_eq!((run.frame, run.score), (0, 0));
        assert_eq!(run.crash, None);
        assert_eq!(game.runs(), 2);
    }

    #[test]
    fn test_start_after_end_plays_again() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.start();
        crash(&mut game);
        let first_seed = game.run().seed;

        assert!(game.start());
        assert_eq!(game.phase(), RunPhase::Running);
        assert_ne!(game.run().seed, first_seed);
        assert_eq!(game.run().seed, Some(run_seed(5, 1)));
        assert_eq!(game.run().frame, 0);
    }

    #[test]
    fn test_run_counter_wraps() {
        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.runs = u64::MAX;
        game.restart();
        assert_eq!(game.runs(), 0);
        assert_eq!(game.run().seed, Some(run_seed(5, u64::MAX)));
        assert_eq!(game.phase(), RunPhase::Ready);

        game.restart();
        assert_eq!(game.run().seed, Some(run_seed(5, 0)));
    }

    #[test]
    fn test_sessions_are_reproducible() {
        let mut a: Game = Game::new(SimConfig::default(), 77).unwrap();
        let mut b: Game = Game::new(SimConfig::default(), 77).unwrap();
        for game in [&mut a, &mut b] {
            game.start();
            for i in 0..300 {
                if i % 20 == 0 {
                    game.flap();
                }
                game.advance();
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            spawn_interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            Game::<Pcg32>::new(config, 1),
            Err(ConfigError::ZeroSpawnInterval)
        ));
    }

    #[test]
    fn test_frame_renders_snapshot() {
        struct Recorder(Vec<u64>);
        impl Renderer for Recorder {
            fn render(&mut self, frame: &FrameSnapshot) {
                self.0.push(frame.frame);
            }
        }

        let mut game: Game = Game::new(SimConfig::default(), 5).unwrap();
        game.start();
        let mut recorder = Recorder(Vec::new());
        for _ in 0..3 {
            game.frame(&mut recorder);
        }
        assert_eq!(recorder.0, vec![1, 2, 3]);
    }
}
