use std::time::Duration;

use rampart_core::{
    config::{
        ArenaBounds, EconomyConfig, GameConfig, HeroConfig, MonsterTierConfig, ProjectileConfig,
        TowerConfig, TowerPreset, WaveConfig,
    },
    Event, GameState, Health, Position, TowerKind, WaveNumber, WavePhase,
};
use rampart_runtime::{FrameInput, Session};
use rampart_world::query;

const FRAME: Duration = Duration::from_millis(400);

/// One-walker wave against a hero that needs exactly three shots for a kill.
fn duel_config() -> GameConfig {
    GameConfig::new(
        ArenaBounds::new(1000.0, 1000.0, 10.0),
        TowerConfig::new(
            TowerPreset::new(50, 150.0, 25, Duration::from_millis(1000)),
            TowerPreset::new(100, 200.0, 15, Duration::from_millis(500)),
        ),
        MonsterTierConfig::new(100, 0, 2.0, 150, 4.0, 400, 0, 1.0),
        WaveConfig::new(1, Duration::from_millis(500), 2, 3, 7, 5, 5, 10, 3, 2, 1),
        EconomyConfig::new(200, 20, 1, 10, 15, 40, 5),
        HeroConfig::new(
            Position::new(100.0, 250.0),
            4.0,
            Health::new(200),
            300.0,
            40,
            Duration::from_millis(400),
            10.0,
            1,
        ),
        ProjectileConfig::new(1000.0, 10.0),
    )
}

fn start_input() -> FrameInput {
    FrameInput {
        start_game: true,
        ..FrameInput::default()
    }
}

#[test]
fn three_hits_overkill_one_walker_with_a_single_reward() {
    let mut session = Session::new(duel_config());
    let configured = session.configure_map(vec![
        Position::new(0.0, 190.0),
        Position::new(900.0, 190.0),
    ]);
    assert!(matches!(
        configured.as_slice(),
        [Event::MapConfigured { waypoints: 2 }]
    ));

    let mut input = start_input();
    input.start_wave = true;
    let mut events = session.frame(input, FRAME).into_events();

    let mut health_trace = Vec::new();
    for _ in 0..8 {
        events.extend(session.frame(FrameInput::default(), FRAME).into_events());
        if let Some(monster) = query::monster_view(session.world()).iter().next() {
            health_trace.push(monster.health.get());
        }
    }

    let hits: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            Event::ProjectileHit { damage, .. } => Some(*damage),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![40, 40, 40], "exactly three shots may land");

    let deaths = events
        .iter()
        .filter(|event| matches!(event, Event::MonsterDied { .. }))
        .count();
    assert_eq!(deaths, 1, "the kill reward fires exactly once");

    let expired = events
        .iter()
        .filter(|event| matches!(event, Event::ProjectileExpired { .. }))
        .count();
    assert_eq!(expired, 1, "the in-flight fourth shot fizzles on the corpse");

    assert!(
        health_trace.windows(2).all(|pair| pair[1] <= pair[0]),
        "health decreases monotonically: {health_trace:?}",
    );
    assert!(health_trace.contains(&60));
    assert!(health_trace.contains(&20));

    assert_eq!(query::economy(session.world()).currency, 210);
    assert!(query::monster_view(session.world()).iter().next().is_none());
}

#[test]
fn two_cannons_and_a_laser_drain_the_bank() {
    let mut session = Session::new(GameConfig::standard());
    let _ = session.frame(start_input(), FRAME);

    let placements = [
        (TowerKind::Cannon, Position::new(100.0, 500.0), 150),
        (TowerKind::Cannon, Position::new(300.0, 500.0), 100),
        (TowerKind::Laser, Position::new(500.0, 500.0), 0),
    ];
    for (kind, at, remaining) in placements {
        let input = FrameInput {
            select_tower: Some(kind),
            click: Some(at),
            ..FrameInput::default()
        };
        let output = session.frame(input, FRAME);
        assert!(
            output
                .events()
                .iter()
                .any(|event| matches!(event, Event::TowerPlaced { .. })),
            "expected a confirmation at {at:?}",
        );
        assert_eq!(query::economy(session.world()).currency, remaining);
    }

    let input = FrameInput {
        select_tower: Some(TowerKind::Cannon),
        click: Some(Position::new(900.0, 500.0)),
        ..FrameInput::default()
    };
    let output = session.frame(input, FRAME);
    assert!(
        output
            .events()
            .iter()
            .any(|event| matches!(event, Event::TowerPlacementRejected { .. })),
        "an empty bank rejects every further placement",
    );
    assert_eq!(query::tower_view(session.world()).iter().count(), 3);
    assert_eq!(query::economy(session.world()).currency, 0);
}

#[test]
fn a_single_breach_on_one_base_health_ends_and_resets_the_session() {
    let config = GameConfig::new(
        *duel_config().arena(),
        *duel_config().towers(),
        *duel_config().monsters(),
        WaveConfig::new(1, Duration::from_millis(500), 2, 3, 7, 5, 5, 10, 3, 2, 1),
        EconomyConfig::new(200, 1, 1, 10, 15, 40, 5),
        HeroConfig::new(
            Position::new(500.0, 500.0),
            4.0,
            Health::new(200),
            120.0,
            40,
            Duration::from_millis(400),
            10.0,
            1,
        ),
        ProjectileConfig::new(1000.0, 10.0),
    );

    let mut session = Session::new(config);
    let _ = session.configure_map(vec![Position::new(0.0, 0.0), Position::new(6.0, 0.0)]);

    let mut input = start_input();
    input.start_wave = true;
    let _ = session.frame(input, FRAME);

    let mut breach_frame = None;
    for _ in 0..12 {
        let events = session.frame(FrameInput::default(), FRAME).into_events();
        if events
            .iter()
            .any(|event| matches!(event, Event::MonsterExited { .. }))
        {
            breach_frame = Some(events);
            break;
        }
    }

    let events = breach_frame.expect("the walker must reach the exit");
    assert!(events.iter().any(|event| matches!(
        event,
        Event::MonsterExited { base_health: 0, .. }
    )));
    assert!(
        events.iter().any(|event| matches!(
            event,
            Event::GameStateChanged {
                state: GameState::GameOver,
            }
        )),
        "the breach and the game over land on the same frame",
    );

    // Frozen until restart: no clock, no movement, no firing.
    let idle = session.frame(FrameInput::default(), FRAME);
    assert!(idle.events().is_empty());

    let restart = FrameInput {
        restart: true,
        ..FrameInput::default()
    };
    let events = session.frame(restart, FRAME).into_events();
    assert!(events.iter().any(|event| matches!(
        event,
        Event::GameStateChanged {
            state: GameState::Menu,
        }
    )));

    let economy = query::economy(session.world());
    assert_eq!(economy.currency, 200);
    assert_eq!(economy.base_health, 1);
    let wave = query::wave(session.world());
    assert_eq!(wave.wave_number, WaveNumber::new(1));
    assert_eq!(wave.phase, WavePhase::Idle);
    assert_eq!(wave.monsters_spawned, 0);
    assert!(query::monster_view(session.world()).iter().next().is_none());
    assert_eq!(query::tower_view(session.world()).iter().count(), 0);
    let hero = query::hero(session.world());
    assert!(hero.alive);
    assert_eq!(hero.health, hero.max_health);
    assert_eq!(hero.position, Position::new(500.0, 500.0));

    // The player must explicitly confirm the next run from the menu.
    let output = session.frame(start_input(), FRAME);
    assert!(output.events().iter().any(|event| matches!(
        event,
        Event::GameStateChanged {
            state: GameState::Playing,
        }
    )));
}

#[test]
fn scripted_sessions_replay_identically() {
    let run = || {
        let mut session = Session::new(duel_config());
        let _ = session.configure_map(vec![
            Position::new(0.0, 190.0),
            Position::new(900.0, 190.0),
        ]);

        let mut log = Vec::new();
        let mut input = start_input();
        input.start_wave = true;
        log.extend(session.frame(input, FRAME).into_events());
        for index in 0..12u32 {
            let input = FrameInput {
                select_tower: (index == 2).then_some(TowerKind::Cannon),
                click: (index == 3).then_some(Position::new(200.0, 500.0)),
                ..FrameInput::default()
            };
            log.extend(session.frame(input, FRAME).into_events());
        }
        log
    };

    assert_eq!(run(), run(), "replay diverged between runs");
}
