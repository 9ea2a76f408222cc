#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rampart.
//!
//! The world owns every entity collection and mutates exclusively through
//! [`apply`]. Each command either commits a validated mutation and broadcasts
//! the matching [`Event`]s, or rejects with a reason event and zero state
//! change. The per-tick pipeline inside [`Command::Tick`] runs in a fixed
//! order that callers rely on: cooldowns, monster movement, melee drain,
//! projectile resolution, one-time terminal bookkeeping, purge, wave
//! completion, and finally the game-over check.

mod economy;
mod path;
mod towers;

use std::time::Duration;

use rampart_core::{
    config::GameConfig, AttackerId, Command, Event, GameState, Health, MapError, MonsterId,
    MonsterKind, Position, ProjectileId, WaveNumber, WavePhase, WaveStartError, WELCOME_BANNER,
};

use economy::Economy;
use path::Path;
use towers::TowerRegistry;

/// Represents the authoritative Rampart world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    game_state: GameState,
    path: Path,
    monsters: Vec<MonsterState>,
    towers: TowerRegistry,
    projectiles: Vec<ProjectileState>,
    hero: HeroState,
    economy: Economy,
    wave: WaveState,
    next_monster_id: u32,
    next_projectile_id: u32,
}

impl World {
    /// Creates a new world in the menu state using the provided rule set.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            game_state: GameState::Menu,
            path: Path::default_lane(),
            monsters: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            hero: HeroState::new(&config),
            economy: Economy::new(config.economy()),
            wave: WaveState::initial(&config),
            next_monster_id: 0,
            next_projectile_id: 0,
            config,
        }
    }

    /// Rule set the world was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn reset(&mut self) {
        self.monsters.clear();
        self.projectiles.clear();
        self.towers = TowerRegistry::new();
        self.hero = HeroState::new(&self.config);
        self.economy = Economy::new(self.config.economy());
        self.wave = WaveState::initial(&self.config);
        self.next_monster_id = 0;
        self.next_projectile_id = 0;
    }

    fn spawn_monster(&mut self, kind: MonsterKind, out_events: &mut Vec<Event>) {
        let stats = self
            .config
            .monsters()
            .stats_for(kind, self.wave.wave_number);
        let id = MonsterId::new(self.next_monster_id);
        self.next_monster_id = self.next_monster_id.saturating_add(1);
        let at = self.path.spawn_point();
        self.monsters.push(MonsterState {
            id,
            kind,
            position: at,
            speed: stats.speed,
            health: stats.health,
            max_health: stats.health,
            path_index: 1,
            alive: true,
            arrived: false,
            resolved: false,
        });
        self.wave.monsters_spawned = self.wave.monsters_spawned.saturating_add(1);
        if self.wave.monsters_spawned == self.wave.monsters_to_spawn {
            self.wave.phase = WavePhase::Draining;
        }
        out_events.push(Event::MonsterSpawned {
            monster: id,
            kind,
            at,
        });
    }

    fn spawn_projectile(
        &mut self,
        position: Position,
        attacker: AttackerId,
        target: MonsterId,
        damage: u32,
        out_events: &mut Vec<Event>,
    ) {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.saturating_add(1);
        self.projectiles.push(ProjectileState {
            id,
            position,
            target,
            damage,
            alive: true,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            attacker,
            target,
        });
    }

    fn fire(&mut self, attacker: AttackerId, target: MonsterId, out_events: &mut Vec<Event>) {
        // A stale target id means the referent died this tick; the request is
        // dropped, never treated as an error.
        if !self
            .monsters
            .iter()
            .any(|monster| monster.id == target && monster.alive)
        {
            return;
        }

        match attacker {
            AttackerId::Hero => {
                if !self.hero.alive || !self.hero.ready_in.is_zero() {
                    return;
                }
                let position = self.hero.position;
                let damage = self.config.hero().damage();
                self.hero.ready_in = self.config.hero().fire_period();
                self.spawn_projectile(position, attacker, target, damage, out_events);
            }
            AttackerId::Tower(id) => {
                let tower_config = *self.config.towers();
                let Some(tower) = self.towers.get_mut(id) else {
                    return;
                };
                if !tower.ready_in.is_zero() {
                    return;
                }
                let preset = tower_config.preset(tower.kind);
                let position = tower.position;
                tower.ready_in = preset.fire_period();
                let damage = preset.damage();
                self.spawn_projectile(position, attacker, target, damage, out_events);
            }
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.game_state != GameState::Playing {
            return;
        }

        out_events.push(Event::TimeAdvanced { dt });

        // Cooldown clocks accumulate real time so fire rates stay independent
        // of the frame rate.
        self.hero.ready_in = self.hero.ready_in.saturating_sub(dt);
        for tower in self.towers.iter_mut() {
            tower.ready_in = tower.ready_in.saturating_sub(dt);
        }

        // Monster movement; arrival is terminal in the same step.
        for monster in self.monsters.iter_mut() {
            if !monster.alive {
                continue;
            }
            let advance = self
                .path
                .advance(monster.position, monster.path_index, monster.speed);
            if advance.arrived {
                monster.arrived = true;
                monster.alive = false;
            } else {
                monster.position = advance.position;
                monster.path_index = advance.next_waypoint;
            }
        }

        // Melee drain: every monster inside the radius bleeds the hero.
        if self.hero.alive {
            let radius = self.config.hero().melee_radius();
            let radius_sq = radius * radius;
            let per_tick = self.config.hero().melee_damage_per_tick();
            let in_range = self
                .monsters
                .iter()
                .filter(|monster| monster.alive)
                .filter(|monster| monster.position.distance_sq_to(self.hero.position) <= radius_sq)
                .count() as u32;
            let drain = in_range.saturating_mul(per_tick);
            if drain > 0 {
                self.hero.health = self.hero.health.saturating_sub(drain);
                if self.hero.health.is_zero() {
                    self.hero.alive = false;
                    out_events.push(Event::HeroDied);
                }
            }
        }

        // Projectile homing and resolution.
        let speed = self.config.projectile().speed();
        let hit_threshold = self.config.projectile().hit_threshold();
        for index in 0..self.projectiles.len() {
            if !self.projectiles[index].alive {
                continue;
            }
            let target = self.projectiles[index].target;
            let Some(monster_index) = self
                .monsters
                .iter()
                .position(|monster| monster.id == target && monster.alive)
            else {
                // Orphaned projectile: the target is gone, the shot fizzles.
                self.projectiles[index].alive = false;
                out_events.push(Event::ProjectileExpired {
                    projectile: self.projectiles[index].id,
                });
                continue;
            };

            let target_position = self.monsters[monster_index].position;
            let position = self.projectiles[index].position;
            if position.distance_to(target_position) <= hit_threshold {
                let damage = self.projectiles[index].damage;
                let monster = &mut self.monsters[monster_index];
                monster.health = monster.health.saturating_sub(damage);
                if monster.health.is_zero() {
                    monster.alive = false;
                }
                self.projectiles[index].alive = false;
                out_events.push(Event::ProjectileHit {
                    projectile: self.projectiles[index].id,
                    target,
                    damage,
                });
            } else {
                self.projectiles[index].position = position.step_toward(target_position, speed);
            }
        }

        // One-time terminal bookkeeping. A monster stays in the collection
        // until its reward or penalty has been consumed exactly once.
        let wave_number = self.wave.wave_number;
        for monster in self.monsters.iter_mut() {
            if monster.alive || monster.resolved {
                continue;
            }
            monster.resolved = true;
            if monster.arrived {
                let remaining = self
                    .economy
                    .apply_arrival_penalty(self.config.economy().arrival_penalty());
                out_events.push(Event::MonsterExited {
                    monster: monster.id,
                    base_health: remaining,
                });
            } else {
                let reward = self.config.economy().reward_for(monster.kind, wave_number);
                self.economy.credit(reward);
                out_events.push(Event::MonsterDied {
                    monster: monster.id,
                    reward,
                });
            }
        }

        // End-of-tick purge.
        self.monsters.retain(|monster| monster.alive);
        self.projectiles.retain(|projectile| projectile.alive);

        // Wave completion: the battlefield has no unresolved unit left.
        if self.wave.phase == WavePhase::Draining && self.monsters.is_empty() {
            let completed = self.wave.wave_number;
            self.wave.monsters_to_spawn = self
                .wave
                .monsters_to_spawn
                .saturating_add(self.config.waves().quota_growth(completed));
            self.wave.wave_number = completed.next();
            self.wave.monsters_spawned = 0;
            self.wave.phase = WavePhase::Idle;
            out_events.push(Event::WaveCompleted {
                wave: completed,
                next_quota: self.wave.monsters_to_spawn,
            });
        }

        // Terminal check runs last so the snapshot the collaborators read
        // reflects the full tick.
        if self.economy.base_health() == 0 || !self.hero.alive {
            self.game_state = GameState::GameOver;
            out_events.push(Event::GameStateChanged {
                state: GameState::GameOver,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMap { waypoints } => {
            if world.game_state != GameState::Menu {
                out_events.push(Event::MapRejected {
                    reason: MapError::SessionActive,
                });
                return;
            }
            match Path::try_new(waypoints) {
                Ok(path) => {
                    let count = path.waypoints().len();
                    world.path = path;
                    out_events.push(Event::MapConfigured { waypoints: count });
                }
                Err(reason) => out_events.push(Event::MapRejected { reason }),
            }
        }
        Command::StartGame => {
            if world.game_state == GameState::Menu {
                world.game_state = GameState::Playing;
                out_events.push(Event::GameStateChanged {
                    state: GameState::Playing,
                });
            }
        }
        Command::Restart => {
            if world.game_state == GameState::GameOver {
                world.reset();
                world.game_state = GameState::Menu;
                out_events.push(Event::GameStateChanged {
                    state: GameState::Menu,
                });
            }
        }
        Command::StartWave => {
            if world.game_state != GameState::Playing {
                out_events.push(Event::WaveStartRejected {
                    reason: WaveStartError::NotPlaying,
                });
            } else if world.wave.phase != WavePhase::Idle {
                out_events.push(Event::WaveStartRejected {
                    reason: WaveStartError::WaveInProgress,
                });
            } else {
                world.wave.phase = WavePhase::Spawning;
                world.wave.monsters_spawned = 0;
                out_events.push(Event::WaveStarted {
                    wave: world.wave.wave_number,
                });
            }
        }
        Command::SpawnMonster { kind } => {
            // Surplus spawn requests outside an active release window are
            // dropped; the quota guard keeps `monsters_spawned` honest.
            if world.game_state == GameState::Playing
                && world.wave.phase == WavePhase::Spawning
                && world.wave.monsters_spawned < world.wave.monsters_to_spawn
            {
                world.spawn_monster(kind, out_events);
            }
        }
        Command::PlaceTower { kind, at } => {
            if world.game_state != GameState::Playing {
                return;
            }
            match towers::validate_placement(
                &world.config,
                world.economy.currency(),
                world.path.waypoints(),
                &world.towers,
                kind,
                at,
            ) {
                Ok(()) => {
                    world.economy.debit(world.config.towers().preset(kind).cost());
                    let tower = world.towers.place(kind, at);
                    out_events.push(Event::TowerPlaced { tower, kind, at });
                }
                Err(reason) => out_events.push(Event::TowerPlacementRejected { kind, at, reason }),
            }
        }
        Command::MoveHero { dx, dy } => {
            if world.game_state == GameState::Playing && world.hero.alive {
                let moved = world.hero.position.offset(dx, dy);
                world.hero.position = world.config.arena().clamp_inset(moved);
            }
        }
        Command::FireProjectile { attacker, target } => {
            if world.game_state == GameState::Playing {
                world.fire(attacker, target, out_events);
            }
        }
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use rampart_core::{
        AttackerId, CooldownSnapshot, CooldownView, EconomySnapshot, GameState, HeroSnapshot,
        MonsterSnapshot, MonsterView, PlacementError, Position, ProjectileSnapshot, ProjectileView,
        TowerKind, TowerSnapshot, TowerView, WaveSnapshot,
    };

    use super::{towers, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current top-level game state.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.game_state
    }

    /// Ordered waypoints of the active path.
    #[must_use]
    pub fn waypoints(world: &World) -> &[Position] {
        world.path.waypoints()
    }

    /// Captures a read-only view of the monsters on the field.
    #[must_use]
    pub fn monster_view(world: &World) -> MonsterView {
        MonsterView::from_snapshots(
            world
                .monsters
                .iter()
                .map(|monster| MonsterSnapshot {
                    id: monster.id,
                    kind: monster.kind,
                    position: monster.position,
                    health: monster.health,
                    max_health: monster.max_health,
                    speed: monster.speed,
                    path_index: monster.path_index,
                    alive: monster.alive,
                    arrived: monster.arrived,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| TowerSnapshot {
                    id: tower.id,
                    kind: tower.kind,
                    position: tower.position,
                    ready_in: tower.ready_in,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| projectile.alive)
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    position: projectile.position,
                    target: projectile.target,
                    damage: projectile.damage,
                })
                .collect(),
        )
    }

    /// Captures the hero's current state.
    #[must_use]
    pub fn hero(world: &World) -> HeroSnapshot {
        HeroSnapshot {
            position: world.hero.position,
            health: world.hero.health,
            max_health: world.hero.max_health,
            alive: world.hero.alive,
            ready_in: world.hero.ready_in,
        }
    }

    /// Captures the wave director's bookkeeping.
    #[must_use]
    pub fn wave(world: &World) -> WaveSnapshot {
        WaveSnapshot {
            phase: world.wave.phase,
            wave_number: world.wave.wave_number,
            monsters_to_spawn: world.wave.monsters_to_spawn,
            monsters_spawned: world.wave.monsters_spawned,
        }
    }

    /// Captures the player's resources.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            currency: world.economy.currency(),
            base_health: world.economy.base_health(),
        }
    }

    /// Captures cooldown readiness for the hero and every tower.
    #[must_use]
    pub fn cooldowns(world: &World) -> CooldownView {
        let mut snapshots = Vec::with_capacity(1 + world.towers.iter().count());
        snapshots.push(CooldownSnapshot {
            attacker: AttackerId::Hero,
            ready_in: world.hero.ready_in,
        });
        snapshots.extend(world.towers.iter().map(|tower| CooldownSnapshot {
            attacker: AttackerId::Tower(tower.id),
            ready_in: tower.ready_in,
        }));
        CooldownView::from_snapshots(snapshots)
    }

    /// Previews a placement request without mutating any state.
    ///
    /// Adapters use this for the placement-ghost indicator; the validation is
    /// byte-for-byte the one `Command::PlaceTower` commits against.
    pub fn placement_preview(
        world: &World,
        kind: TowerKind,
        at: Position,
    ) -> Result<(), PlacementError> {
        towers::validate_placement(
            &world.config,
            world.economy.currency(),
            world.path.waypoints(),
            &world.towers,
            kind,
            at,
        )
    }
}

#[derive(Clone, Debug)]
struct MonsterState {
    id: MonsterId,
    kind: MonsterKind,
    position: Position,
    speed: f32,
    health: Health,
    max_health: Health,
    path_index: usize,
    alive: bool,
    arrived: bool,
    resolved: bool,
}

#[derive(Clone, Debug)]
struct ProjectileState {
    id: ProjectileId,
    position: Position,
    target: MonsterId,
    damage: u32,
    alive: bool,
}

#[derive(Clone, Debug)]
struct HeroState {
    position: Position,
    health: Health,
    max_health: Health,
    alive: bool,
    ready_in: Duration,
}

impl HeroState {
    fn new(config: &GameConfig) -> Self {
        Self {
            position: config.hero().start_position(),
            health: config.hero().max_health(),
            max_health: config.hero().max_health(),
            alive: true,
            ready_in: Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
struct WaveState {
    phase: WavePhase,
    wave_number: WaveNumber,
    monsters_to_spawn: u32,
    monsters_spawned: u32,
}

impl WaveState {
    fn initial(config: &GameConfig) -> Self {
        Self {
            phase: WavePhase::Idle,
            wave_number: WaveNumber::new(1),
            monsters_to_spawn: config.waves().initial_quota(),
            monsters_spawned: 0,
        }
    }
}
