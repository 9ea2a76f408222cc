#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Rampart demonstration.
//!
//! The adapter stands in for the rendering and input collaborators: it feeds
//! a scripted command stream into a [`Session`], drains the event batches a
//! real presentation layer would turn into sprites and sound, and prints a
//! short progress report instead.

use std::time::Duration;

use anyhow::{bail, Result};
use rampart_core::{config::GameConfig, Event, GameState, Position, TowerKind, WavePhase};
use rampart_runtime::{FrameInput, Session};
use rampart_world::query;

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: u32 = 60_000;
const WAVES_TO_SURVIVE: u32 = 3;

/// Entry point for the Rampart command-line demonstration.
fn main() -> Result<()> {
    let mut session = Session::new(GameConfig::standard());
    println!("{}", query::welcome_banner(session.world()));

    let _ = session.frame(
        FrameInput {
            start_game: true,
            ..FrameInput::default()
        },
        FRAME,
    );

    for (kind, at) in [
        (TowerKind::Cannon, Position::new(250.0, 120.0)),
        (TowerKind::Laser, Position::new(560.0, 390.0)),
    ] {
        let output = session.frame(
            FrameInput {
                select_tower: Some(kind),
                click: Some(at),
                ..FrameInput::default()
            },
            FRAME,
        );
        for event in output.events() {
            if let Event::TowerPlaced { kind, .. } = event {
                let currency = query::economy(session.world()).currency;
                println!("placed {kind:?}, {currency} gold left");
            }
        }
    }

    let mut waves_completed = 0u32;
    let mut kills = 0u32;
    for _ in 0..MAX_FRAMES {
        let start_wave = query::wave(session.world()).phase == WavePhase::Idle
            && waves_completed < WAVES_TO_SURVIVE;
        let output = session.frame(
            FrameInput {
                start_wave,
                ..FrameInput::default()
            },
            FRAME,
        );

        for event in output.events() {
            match event {
                Event::WaveStarted { wave } => println!("wave {} incoming", wave.get()),
                Event::MonsterDied { .. } => kills += 1,
                Event::WaveCompleted { wave, .. } => {
                    waves_completed += 1;
                    let economy = query::economy(session.world());
                    println!(
                        "wave {} cleared: {} kills so far, {} gold, base at {}",
                        wave.get(),
                        kills,
                        economy.currency,
                        economy.base_health,
                    );
                }
                Event::GameStateChanged {
                    state: GameState::GameOver,
                } => {
                    let wave = query::wave(session.world()).wave_number.get();
                    println!("game over during wave {wave}");
                    return Ok(());
                }
                _ => {}
            }
        }

        if waves_completed >= WAVES_TO_SURVIVE {
            let economy = query::economy(session.world());
            println!(
                "survived {} waves with {} gold and {} base health",
                waves_completed, economy.currency, economy.base_health,
            );
            return Ok(());
        }
    }

    bail!("demonstration did not finish within {MAX_FRAMES} frames")
}
