//! Egg Warden headless runner
//!
//! Runs a session against a simulated 60 Hz host clock with a scripted
//! pointer that sweeps the egg field, then prints the final snapshot as JSON.
//!
//! Usage: `egg-warden [config.json] [seed] [seconds]`

use anyhow::Context;

use egg_warden::GameConfig;
use egg_warden::sim::GameLoop;

/// Host frame time (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_SECONDS: u64 = 60;

/// Pointer position for a given frame: a slow figure-eight over the lower arena
fn scripted_target(config: &GameConfig, frame: u64) -> (f64, f64) {
    let t = frame as f64 * 0.01;
    let x = config.arena_width * (0.5 + 0.4 * t.sin());
    let mid = (config.placement_top_margin + config.arena_height) * 0.5;
    let y = mid + 0.4 * (config.arena_height - config.placement_top_margin) * (2.0 * t).sin();
    (x, y)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().filter(|a| a != "-") {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => DEFAULT_SEED,
    };
    let seconds: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid duration {s:?}"))?,
        None => DEFAULT_SECONDS,
    };

    log::info!("Egg Warden (headless) starting: seed {}, {} s", seed, seconds);

    let mut game = GameLoop::new(config.clone(), seed)?;
    let frames = (seconds as f64 * 1000.0 / FRAME_MS).ceil() as u64;
    let mut last_reported = 0;

    for frame in 0..frames {
        let (x, y) = scripted_target(&config, frame);
        game.set_target(x, y);
        game.tick(FRAME_MS);

        let secs = game.running_time_secs();
        if secs > last_reported {
            last_reported = secs;
            let registry = &game.state().registry;
            log::info!(
                "t={}s score={} eggs={} larvae={} enemies={}",
                secs,
                game.score(),
                registry.eggs().len(),
                registry.larvae().len(),
                registry.enemies().len()
            );
        }
    }

    let snapshot = game.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    log::info!("Final score: {}", snapshot.score);

    Ok(())
}
