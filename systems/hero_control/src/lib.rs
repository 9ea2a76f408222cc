#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns held movement keys into hero movement commands.

use rampart_core::{config::HeroConfig, Command, Event, GameState};

/// Normalized "keys currently held" set supplied by the input adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// Upward movement key is held.
    pub up: bool,
    /// Downward movement key is held.
    pub down: bool,
    /// Leftward movement key is held.
    pub left: bool,
    /// Rightward movement key is held.
    pub right: bool,
}

impl HeldKeys {
    /// Creates a held-keys set with explicit flags.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }
}

/// Hero movement system that follows game state transitions via events.
#[derive(Debug)]
pub struct HeroControl {
    game_state: GameState,
}

impl Default for HeroControl {
    fn default() -> Self {
        Self {
            game_state: GameState::Menu,
        }
    }
}

impl HeroControl {
    /// Creates a new hero control system assuming the menu state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and held keys to emit a movement command.
    ///
    /// Axis contributions stack without normalization: holding two directions
    /// moves the hero at full speed on each axis. Opposing keys cancel.
    pub fn handle(
        &mut self,
        events: &[Event],
        held: HeldKeys,
        config: &HeroConfig,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::GameStateChanged { state } = event {
                self.game_state = *state;
            }
        }

        if self.game_state != GameState::Playing {
            return;
        }

        let speed = config.speed();
        let mut dx = 0.0;
        let mut dy = 0.0;
        if held.left {
            dx -= speed;
        }
        if held.right {
            dx += speed;
        }
        if held.up {
            dy -= speed;
        }
        if held.down {
            dy += speed;
        }

        if dx == 0.0 && dy == 0.0 {
            return;
        }

        out.push(Command::MoveHero { dx, dy });
    }
}

#[cfg(test)]
mod tests {
    use super::{HeldKeys, HeroControl};
    use rampart_core::{config::GameConfig, Command, Event, GameState};

    fn playing_events() -> Vec<Event> {
        vec![Event::GameStateChanged {
            state: GameState::Playing,
        }]
    }

    #[test]
    fn no_keys_emit_no_command() {
        let config = GameConfig::standard();
        let mut system = HeroControl::new();
        let mut out = Vec::new();
        system.handle(&playing_events(), HeldKeys::default(), config.hero(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn single_axis_moves_at_full_speed() {
        let config = GameConfig::standard();
        let mut system = HeroControl::new();
        let mut out = Vec::new();
        system.handle(
            &playing_events(),
            HeldKeys::new(false, false, false, true),
            config.hero(),
            &mut out,
        );
        assert_eq!(out, vec![Command::MoveHero { dx: 4.0, dy: 0.0 }]);
    }

    #[test]
    fn diagonals_stack_without_normalization() {
        let config = GameConfig::standard();
        let mut system = HeroControl::new();
        let mut out = Vec::new();
        system.handle(
            &playing_events(),
            HeldKeys::new(true, false, false, true),
            config.hero(),
            &mut out,
        );
        assert_eq!(out, vec![Command::MoveHero { dx: 4.0, dy: -4.0 }]);
    }

    #[test]
    fn opposing_keys_cancel() {
        let config = GameConfig::standard();
        let mut system = HeroControl::new();
        let mut out = Vec::new();
        system.handle(
            &playing_events(),
            HeldKeys::new(true, true, true, true),
            config.hero(),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn menu_and_game_over_ignore_movement_keys() {
        let config = GameConfig::standard();
        let mut system = HeroControl::new();
        let mut out = Vec::new();

        system.handle(
            &[],
            HeldKeys::new(false, false, false, true),
            config.hero(),
            &mut out,
        );
        assert!(out.is_empty(), "menu must stay paused");

        system.handle(
            &[Event::GameStateChanged {
                state: GameState::GameOver,
            }],
            HeldKeys::new(false, false, false, true),
            config.hero(),
            &mut out,
        );
        assert!(out.is_empty(), "game over halts movement");
    }
}
