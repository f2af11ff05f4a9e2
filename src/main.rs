//! Sky Runner headless runner
//!
//! Drives the simulation with synthetic 60 Hz timestamps and a simple
//! autopilot, logging a JSON HUD snapshot once per simulated second.
//!
//! ```text
//! RUST_LOG=info sky-runner --seed 42 --frames 3600 --tuning balance.json
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use sky_runner::input::Command;
    use sky_runner::sim::{Direction, GamePhase};
    use sky_runner::view::NullRenderer;
    use sky_runner::{Game, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Autopilot jumps this often (frames)
    const JUMP_EVERY: u64 = 40;

    struct Args {
        seed: u64,
        frames: u64,
        tuning: Option<PathBuf>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            seed: 12345,
            frames: 60 * 60,
            tuning: None,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--seed" => args.seed = value()?.parse().map_err(|e| format!("--seed: {e}"))?,
                "--frames" => {
                    args.frames = value()?.parse().map_err(|e| format!("--frames: {e}"))?
                }
                "--tuning" => args.tuning = Some(PathBuf::from(value()?)),
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(args)
    }

    pub fn run() {
        env_logger::init();

        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                log::error!("{e}");
                eprintln!("usage: sky-runner [--seed N] [--frames N] [--tuning FILE]");
                std::process::exit(2);
            }
        };

        let tuning = match &args.tuning {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {e}", path.display());
                    std::process::exit(1);
                }
            },
            None => Tuning::default(),
        };

        let mut game = match Game::with_config(args.seed, tuning, Settings::default()) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid configuration: {e}");
                std::process::exit(1);
            }
        };
        log::info!("Sky Runner (headless) starting, seed {}", args.seed);

        let mut renderer = NullRenderer::default();
        game.push(Command::Start);
        game.push(Command::Hold(Direction::Right, true));

        for frame in 0..args.frames {
            if frame % JUMP_EVERY == 0 {
                game.push(Command::Jump);
            }
            game.frame(frame as f64 * FRAME_MS, &mut renderer);

            if frame % 60 == 0 {
                log_hud(&game);
            }
            game.drain_events();
            game.drain_sounds();

            if game.state().phase == GamePhase::GameOver {
                break;
            }
        }

        log_hud(&game);
        let state = game.state();
        log::info!(
            "Finished after {} ticks ({} rendered): level {}, score {}, distance {}",
            state.time_ticks,
            renderer.frames,
            state.level,
            state.player.score,
            state.distance()
        );
    }

    fn log_hud(game: &Game) {
        match serde_json::to_string(&game.hud()) {
            Ok(json) => log::info!("{json}"),
            Err(e) => log::warn!("HUD serialization failed: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive `Game::frame` themselves on wasm
}
