//! Badge Pinball headless entry point
//!
//! Runs an attract-mode game at a fixed 60 Hz and prints the final snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use badge_pinball::sim::{Autoplayer, GameEvent, GamePhase, GameState, Table};
use badge_pinball::{AudioSink, LogAudio, Tuning};
use clap::Parser;

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Badge Pinball autoplay run", long_about = None)]
struct Args {
    /// Longest simulated run in seconds
    #[arg(short, long, default_value_t = 120.0)]
    seconds: f32,

    /// Autoplayer RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Table layout JSON (built-in table when omitted)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Tuning JSON; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Badge Pinball (headless) starting...");

    let table = args
        .table
        .as_deref()
        .map(|path| load(path, Table::from_json))
        .unwrap_or_default();
    let tuning = args
        .tuning
        .as_deref()
        .map(|path| load(path, Tuning::from_json))
        .unwrap_or_default();

    let mut state = GameState::new(table, tuning);
    let mut player = Autoplayer::new(args.seed);
    let mut audio = LogAudio::new();
    log::info!("Autoplay seed {} for up to {}s", args.seed, args.seconds);

    let frames = (args.seconds.max(0.0) / FRAME_DT) as u64;
    for frame in 0..frames {
        for input in player.decide(&state, FRAME_DT) {
            let events = state.handle_input(input);
            report(&events);
            audio.play_events(&events);
        }
        let events = state.tick(FRAME_DT);
        report(&events);
        audio.play_events(&events);

        if state.phase == GamePhase::GameOver {
            log::info!("Finished after {:.1}s", frame as f32 * FRAME_DT);
            break;
        }
    }

    log::info!("{} sound cues", audio.played());
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Read and parse a config file, falling back to defaults on any error
fn load<T: Default>(path: &Path, parse: fn(&str) -> Result<T, serde_json::Error>) -> T {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Cannot read {}: {}; using defaults", path.display(), e);
            return T::default();
        }
    };
    match parse(&text) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Invalid {}: {}; using defaults", path.display(), e);
            T::default()
        }
    }
}

fn report(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::FlipperHit { .. } => log::trace!("{:?}", event),
            GameEvent::BadgeComplete { .. } | GameEvent::Champion { .. } | GameEvent::GameOver { .. } => {
                log::info!("{:?}", event)
            }
            _ => log::debug!("{:?}", event),
        }
    }
}
