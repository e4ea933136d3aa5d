//! Flappy Sim headless driver
//!
//! Runs seeded sessions without a display: the built-in autopilot (or nobody)
//! plays, frames can be dumped as text, and the final frame as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use flappy_sim::sim::{Autopilot, Renderer, SimEvent};
    use flappy_sim::{Game, RunPhase, SimConfig, TextRenderer};

    #[derive(Debug, Parser)]
    #[command(name = "flappy-sim", about = "Run the flappy simulation headless")]
    pub struct Args {
        /// Session seed; every run derives its own seed from it
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,

        /// Stop a run after this many ticks even if it is still going
        #[arg(long, default_value_t = 10_000)]
        max_ticks: u64,

        /// JSON file overriding the default tuning
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a text frame every N ticks
        #[arg(long)]
        render_every: Option<u64>,

        /// Let the player fall without any input
        #[arg(long)]
        no_autopilot: bool,

        /// Print the final frame of each run as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run(args: Args) -> Result<()> {
        let config = match &args.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimConfig::default(),
        };

        let mut game: Game = Game::new(config, args.seed).context("invalid configuration")?;
        let pilot = Autopilot::default();
        let mut renderer = TextRenderer::default();

        for run_index in 0..args.runs {
            game.start();
            let mut ticks = 0u64;

            while game.phase() == RunPhase::Running && ticks < args.max_ticks {
                if !args.no_autopilot && pilot.wants_flap(&game.snapshot()) {
                    game.flap();
                }

                for event in game.advance() {
                    match event {
                        SimEvent::Scored { score, .. } => log::debug!("Score {}", score),
                        SimEvent::Crashed { cause } => log::info!("Crashed: {:?}", cause),
                        _ => {}
                    }
                }
                ticks += 1;

                if let Some(every) = args.render_every.filter(|n| *n > 0) {
                    if ticks % every == 0 {
                        renderer.render(&game.snapshot());
                        println!("{}\n", renderer.text());
                    }
                }
            }

            let frame = game.snapshot();
            println!(
                "run {}: seed {} score {} frames {} {}",
                run_index + 1,
                game.run().seed.map_or_else(|| "injected".to_string(), |seed| seed.to_string()),
                frame.score,
                frame.frame,
                match frame.crash {
                    Some(cause) => format!("crashed ({cause:?})"),
                    None => "survived".to_string(),
                }
            );
            if args.json {
                let json = serde_json::to_string_pretty(&frame).context("serializing frame")?;
                println!("{json}");
            }

            // Leave the last run's frame in place; start() rebuilds from Ended
            if game.phase() == RunPhase::Running {
                game.restart();
            }
        }

        println!("best score: {}", game.best_score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host page; there is no native entry point
}
