#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director that paces monster releases.
//!
//! The world owns the wave phase machine; this system owns the spawn cadence.
//! It accumulates simulated time while a wave is in its release window and
//! emits one `Command::SpawnMonster` per elapsed spawn interval, choosing the
//! tier from the configured difficulty table.

use std::time::Duration;

use rampart_core::{config::WaveConfig, Command, Event, GameState, WavePhase, WaveSnapshot};

/// Pure system that deterministically emits spawn commands during a wave.
#[derive(Debug, Default)]
pub struct WaveDirector {
    accumulator: Duration,
}

impl WaveDirector {
    /// Creates a new wave director with an empty spawn clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes events and the wave snapshot to emit spawn commands.
    ///
    /// Outside an active release window the spawn clock is cleared, so a
    /// freshly started wave always waits one full interval before its first
    /// release.
    pub fn handle(
        &mut self,
        events: &[Event],
        game_state: GameState,
        wave: &WaveSnapshot,
        config: &WaveConfig,
        out: &mut Vec<Command>,
    ) {
        if game_state != GameState::Playing || wave.phase != WavePhase::Spawning {
            self.accumulator = Duration::ZERO;
            return;
        }

        let interval = config.spawn_interval();
        if interval.is_zero() {
            return;
        }

        for event in events {
            match event {
                Event::WaveStarted { .. } => self.accumulator = Duration::ZERO,
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                _ => {}
            }
        }

        let remaining = wave.monsters_to_spawn.saturating_sub(wave.monsters_spawned);
        let mut released = 0u32;
        while self.accumulator >= interval && released < remaining {
            self.accumulator -= interval;
            let kind = config.kind_for_release(wave.wave_number, wave.monsters_spawned + released);
            out.push(Command::SpawnMonster { kind });
            released += 1;
        }
    }
}
