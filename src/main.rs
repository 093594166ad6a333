//! Bubble Lines headless driver
//!
//! Plays a seeded game in idle mode (random legal moves) until the board
//! fills up, logging what happens. Useful for tuning settings files.
//!
//! Run with `--help` for the options.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bubble_lines::sim::{self, GameEvent};
use bubble_lines::{GameState, Settings};

/// Turn cap so a pathological settings file cannot loop forever
const DEFAULT_MAX_TURNS: u32 = 10_000;

/// Play a seeded Bubble Lines game with random legal moves.
#[derive(Debug, Parser)]
#[command(name = "bubble-lines", version, about)]
struct Args {
    /// JSON settings file; missing fields use the defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// RNG seed. Defaults to the current time.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Stop after this many turns even if the board is not full.
    #[arg(
        long,
        value_name = "TURNS",
        default_value_t = DEFAULT_MAX_TURNS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_turns: u32,
    /// Print the effective settings as JSON and exit.
    #[arg(long)]
    print_settings: bool,
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn log_events(state: &mut GameState) {
    for event in state.drain_events() {
        match event {
            GameEvent::ColorUnlocked(color) => log::info!("Unlocked color {}", color),
            GameEvent::BubblesCleared(cells) => log::info!("Cleared {} bubbles", cells.len()),
            GameEvent::GameFinished => log::info!("Board full"),
            other => log::trace!("{:?}", other),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.validate()?;

    if args.print_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    let max_turns = args.max_turns;
    log::info!("Bubble Lines (headless) starting with seed {}", seed);

    let mut state = GameState::new(settings, seed);
    sim::restart(&mut state);
    log_events(&mut state);

    while !state.is_finished() && state.turn <= max_turns {
        if !sim::play_idle_turn(&mut state) {
            log::warn!("No legal move on turn {}", state.turn);
            break;
        }
        log_events(&mut state);
    }

    println!(
        "seed {}: {} after {} turns, score {}, {} colors",
        seed,
        if state.is_finished() { "finished" } else { "stopped" },
        state.turn - 1,
        state.score,
        state.palette.len()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is a library on wasm; front-ends drive it directly
}
