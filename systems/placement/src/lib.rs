#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating pointer input into tower placement commands.
//!
//! The system holds the armed tower selection between frames: selecting a
//! kind arms placement mode, a click submits `Command::PlaceTower`, and the
//! world's `TowerPlaced` confirmation (or an explicit cancel) disarms it. A
//! rejected placement keeps the mode armed so the player can pick another
//! spot.

use rampart_core::{Command, Event, GameState, Position, TowerKind};

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Point the ghost indicator hovers over.
    pub at: Position,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(kind: TowerKind, at: Position, placeable: bool) -> Self {
        Self {
            kind,
            at,
            placeable,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlacementInput {
    /// Tower kind the player selected this frame, if any.
    pub select: Option<TowerKind>,
    /// Point the player clicked this frame, if any.
    pub click: Option<Position>,
    /// Indicates whether the player cancelled placement this frame.
    pub cancel: bool,
}

impl PlacementInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(select: Option<TowerKind>, click: Option<Position>, cancel: bool) -> Self {
        Self {
            select,
            click,
            cancel,
        }
    }
}

/// Placement system that arms a tower kind and submits placement requests.
#[derive(Debug)]
pub struct Placement {
    game_state: GameState,
    armed: Option<TowerKind>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            game_state: GameState::Menu,
            armed: None,
        }
    }
}

impl Placement {
    /// Creates a new placement system with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tower kind currently armed for placement, if any.
    #[must_use]
    pub fn armed(&self) -> Option<TowerKind> {
        self.armed
    }

    /// Builds the ghost-indicator preview for the hovered point.
    ///
    /// The `validate` closure should mirror the world's
    /// `query::placement_preview` so the ghost reflects the exact commit
    /// check without mutating anything.
    #[must_use]
    pub fn preview<F>(&self, cursor: Option<Position>, validate: F) -> Option<PlacementPreview>
    where
        F: FnOnce(TowerKind, Position) -> bool,
    {
        let kind = self.armed?;
        let at = cursor?;
        Some(PlacementPreview::new(kind, at, validate(kind, at)))
    }

    /// Consumes world events and adapter input to emit placement commands.
    pub fn handle(&mut self, events: &[Event], input: PlacementInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStateChanged { state } => {
                    self.game_state = *state;
                    if *state != GameState::Playing {
                        self.armed = None;
                    }
                }
                Event::TowerPlaced { .. } => self.armed = None,
                _ => {}
            }
        }

        if self.game_state != GameState::Playing {
            return;
        }

        if input.cancel {
            self.armed = None;
            return;
        }

        if let Some(kind) = input.select {
            self.armed = Some(kind);
        }

        if let Some(at) = input.click {
            if let Some(kind) = self.armed {
                out.push(Command::PlaceTower { kind, at });
            }
        }
    }
}
