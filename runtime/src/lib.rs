#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-order per-frame orchestration for the Rampart simulation.
//!
//! A [`Session`] owns the authoritative world plus every pure system and
//! drives one frame per call in the canonical order: discrete commands,
//! input-driven systems, the simulation tick, wave-director releases, then
//! targeting and combat on the post-cleanup snapshot. Targeting therefore
//! never sees a monster that died earlier in the same frame. The full event
//! batch of the frame is handed back for presentation collaborators to drain.

use std::time::Duration;

use rampart_core::{
    config::GameConfig, AttackerTarget, Command, Event, Position, TowerKind,
};
use rampart_system_combat::Combat;
use rampart_system_hero_control::{HeldKeys, HeroControl};
use rampart_system_placement::{Placement, PlacementInput, PlacementPreview};
use rampart_system_targeting::Targeting;
use rampart_system_wave_director::WaveDirector;
use rampart_world::{apply, query, World};

/// Discrete events and held keys gathered by the input adapter for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Movement keys currently held.
    pub held: HeldKeys,
    /// Point the pointer hovers over, for the placement ghost.
    pub cursor: Option<Position>,
    /// Point the player clicked this frame, if any.
    pub click: Option<Position>,
    /// Tower kind the player selected this frame, if any.
    pub select_tower: Option<TowerKind>,
    /// Indicates whether the player cancelled placement this frame.
    pub cancel_placement: bool,
    /// Indicates whether the player confirmed the menu start this frame.
    pub start_game: bool,
    /// Indicates whether the player requested the next wave this frame.
    pub start_wave: bool,
    /// Indicates whether the player requested a restart this frame.
    pub restart: bool,
    /// Cosmetic range-display toggle; accepted and ignored by the core.
    pub toggle_range_display: bool,
}

/// Events and presentation data produced by one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    events: Vec<Event>,
    placement_preview: Option<PlacementPreview>,
}

impl FrameOutput {
    /// One-shot event markers produced during the frame, in order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Ghost indicator for the armed tower kind under the cursor, if any.
    #[must_use]
    pub fn placement_preview(&self) -> Option<PlacementPreview> {
        self.placement_preview
    }

    /// Consumes the output, yielding the frame's event batch.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

/// Owns the world and the pure systems and drives them in a fixed order.
#[derive(Debug)]
pub struct Session {
    world: World,
    wave_director: WaveDirector,
    targeting: Targeting,
    combat: Combat,
    hero_control: HeroControl,
    placement: Placement,
    targets: Vec<AttackerTarget>,
    commands: Vec<Command>,
    carryover: Vec<Event>,
}

impl Session {
    /// Creates a session in the menu state using the provided rule set.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            world: World::new(config),
            wave_director: WaveDirector::new(),
            targeting: Targeting::new(),
            combat: Combat::new(),
            hero_control: HeroControl::new(),
            placement: Placement::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            carryover: Vec::new(),
        }
    }

    /// Read-only access to the authoritative world for snapshot queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Installs the map provider's waypoints; only valid from the menu.
    pub fn configure_map(&mut self, waypoints: Vec<Position>) -> Vec<Event> {
        let mut events = Vec::new();
        apply(&mut self.world, Command::ConfigureMap { waypoints }, &mut events);
        events
    }

    /// Advances the simulation by one frame.
    pub fn frame(&mut self, input: FrameInput, dt: Duration) -> FrameOutput {
        let mut events: Vec<Event> = Vec::new();

        // Discrete session commands first so same-frame state transitions are
        // visible to the input-driven systems below.
        if input.start_game {
            apply(&mut self.world, Command::StartGame, &mut events);
        }
        if input.restart {
            apply(&mut self.world, Command::Restart, &mut events);
        }
        if input.start_wave {
            apply(&mut self.world, Command::StartWave, &mut events);
        }

        // Input-driven systems read last frame's confirmations plus this
        // frame's transitions.
        let mut inbox = std::mem::take(&mut self.carryover);
        inbox.extend(events.iter().cloned());
        let hero_config = *self.world.config().hero();
        self.hero_control
            .handle(&inbox, input.held, &hero_config, &mut self.commands);
        self.placement.handle(
            &inbox,
            PlacementInput::new(input.select_tower, input.click, input.cancel_placement),
            &mut self.commands,
        );
        let consumed = events.len();
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        // The simulation tick runs the world's fixed internal order.
        apply(&mut self.world, Command::Tick { dt }, &mut events);

        // Wave director releases monsters from the drained events.
        let wave = query::wave(&self.world);
        let wave_config = *self.world.config().waves();
        self.wave_director.handle(
            &events,
            query::game_state(&self.world),
            &wave,
            &wave_config,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        // Targeting and combat run on the post-cleanup snapshot, so a monster
        // that died this frame is never acquired.
        let towers = query::tower_view(&self.world);
        let hero = query::hero(&self.world);
        let monsters = query::monster_view(&self.world);
        let tower_config = *self.world.config().towers();
        self.targeting.handle(
            query::game_state(&self.world),
            &towers,
            &hero,
            &monsters,
            &tower_config,
            &hero_config,
            &mut self.targets,
        );
        self.combat.handle(
            query::game_state(&self.world),
            query::cooldowns(&self.world),
            &self.targets,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut events);
        }

        // Everything after the discrete batch feeds next frame's inbox so the
        // input systems observe confirmations exactly once.
        self.carryover = events[consumed..].to_vec();

        let placement_preview = self.placement.preview(input.cursor, |kind, at| {
            query::placement_preview(&self.world, kind, at).is_ok()
        });

        FrameOutput {
            events,
            placement_preview,
        }
    }
}
