//! Tunable configuration for every numeric rule in the simulation.
//!
//! Adapters construct a [`GameConfig`] once at startup and hand it to the
//! world; nothing in the engine reads a gameplay constant from anywhere else.
//! [`GameConfig::standard`] carries the balance values of the reference
//! campaign.

use std::time::Duration;

use crate::{Health, MonsterKind, Position, TowerKind, WaveNumber};

/// Rectangular playfield the simulation takes place in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaBounds {
    width: f32,
    height: f32,
    unit_margin: f32,
}

impl ArenaBounds {
    /// Creates arena bounds with the provided dimensions and unit margin.
    #[must_use]
    pub const fn new(width: f32, height: f32, unit_margin: f32) -> Self {
        Self {
            width,
            height,
            unit_margin,
        }
    }

    /// Total width of the arena in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Total height of the arena in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Half-sprite inset applied when clamping mobile units.
    #[must_use]
    pub const fn unit_margin(&self) -> f32 {
        self.unit_margin
    }

    /// Reports whether the point lies within the arena rectangle.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        point.x() >= 0.0 && point.x() <= self.width && point.y() >= 0.0 && point.y() <= self.height
    }

    /// Clamps the point into the arena inset by the unit margin.
    #[must_use]
    pub fn clamp_inset(&self, point: Position) -> Position {
        Position::new(
            point.x().clamp(self.unit_margin, self.width - self.unit_margin),
            point.y().clamp(self.unit_margin, self.height - self.unit_margin),
        )
    }
}

/// Stat block shared by every tower of one kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPreset {
    cost: u32,
    range: f32,
    damage: u32,
    fire_period: Duration,
}

impl TowerPreset {
    /// Creates a tower preset from explicit stats.
    #[must_use]
    pub const fn new(cost: u32, range: f32, damage: u32, fire_period: Duration) -> Self {
        Self {
            cost,
            range,
            damage,
            fire_period,
        }
    }

    /// Currency debited when a tower of this kind is placed.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Targeting radius in world units.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Damage carried by each projectile the tower fires.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Minimum time between successive shots.
    #[must_use]
    pub const fn fire_period(&self) -> Duration {
        self.fire_period
    }
}

/// Per-kind tower presets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerConfig {
    cannon: TowerPreset,
    laser: TowerPreset,
}

impl TowerConfig {
    /// Creates a tower configuration from explicit presets.
    #[must_use]
    pub const fn new(cannon: TowerPreset, laser: TowerPreset) -> Self {
        Self { cannon, laser }
    }

    /// Retrieves the preset for the requested tower kind.
    #[must_use]
    pub const fn preset(&self, kind: TowerKind) -> &TowerPreset {
        match kind {
            TowerKind::Cannon => &self.cannon,
            TowerKind::Laser => &self.laser,
        }
    }
}

/// Concrete stats resolved for one monster at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterStats {
    /// Health the monster enters the field with.
    pub health: Health,
    /// Movement speed in world units per tick.
    pub speed: f32,
}

/// Health and speed formulas for each monster tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterTierConfig {
    walker_base_health: u32,
    walker_health_growth: u32,
    walker_speed: f32,
    sprinter_health: u32,
    sprinter_speed: f32,
    juggernaut_base_health: u32,
    juggernaut_health_growth: u32,
    juggernaut_speed: f32,
}

impl MonsterTierConfig {
    /// Creates tier formulas from explicit coefficients.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        walker_base_health: u32,
        walker_health_growth: u32,
        walker_speed: f32,
        sprinter_health: u32,
        sprinter_speed: f32,
        juggernaut_base_health: u32,
        juggernaut_health_growth: u32,
        juggernaut_speed: f32,
    ) -> Self {
        Self {
            walker_base_health,
            walker_health_growth,
            walker_speed,
            sprinter_health,
            sprinter_speed,
            juggernaut_base_health,
            juggernaut_health_growth,
            juggernaut_speed,
        }
    }

    /// Resolves the stat block for a monster spawned during the given wave.
    #[must_use]
    pub const fn stats_for(&self, kind: MonsterKind, wave: WaveNumber) -> MonsterStats {
        match kind {
            MonsterKind::Walker => MonsterStats {
                health: Health::new(
                    self.walker_base_health
                        .saturating_add(wave.get().saturating_mul(self.walker_health_growth)),
                ),
                speed: self.walker_speed,
            },
            MonsterKind::Sprinter => MonsterStats {
                health: Health::new(self.sprinter_health),
                speed: self.sprinter_speed,
            },
            MonsterKind::Juggernaut => MonsterStats {
                health: Health::new(
                    self.juggernaut_base_health
                        .saturating_add(wave.get().saturating_mul(self.juggernaut_health_growth)),
                ),
                speed: self.juggernaut_speed,
            },
        }
    }
}

/// Pacing rules for the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveConfig {
    initial_quota: u32,
    spawn_interval: Duration,
    early_wave_limit: u32,
    sprinter_stride: u32,
    boss_wave_start: u32,
    boss_stride: u32,
    mid_growth_start: u32,
    late_growth_start: u32,
    early_growth: u32,
    mid_growth: u32,
    late_growth: u32,
}

impl WaveConfig {
    /// Creates wave pacing rules from explicit coefficients.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        initial_quota: u32,
        spawn_interval: Duration,
        early_wave_limit: u32,
        sprinter_stride: u32,
        boss_wave_start: u32,
        boss_stride: u32,
        mid_growth_start: u32,
        late_growth_start: u32,
        early_growth: u32,
        mid_growth: u32,
        late_growth: u32,
    ) -> Self {
        Self {
            initial_quota,
            spawn_interval,
            early_wave_limit,
            sprinter_stride,
            boss_wave_start,
            boss_stride,
            mid_growth_start,
            late_growth_start,
            early_growth,
            mid_growth,
            late_growth,
        }
    }

    /// Spawn quota of the very first wave.
    #[must_use]
    pub const fn initial_quota(&self) -> u32 {
        self.initial_quota
    }

    /// Minimum simulated time between successive releases.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Quota increase applied when the given wave completes.
    ///
    /// The curve shrinks over the campaign: large increments while the player
    /// is still building out, small ones once the field is saturated.
    #[must_use]
    pub const fn quota_growth(&self, wave: WaveNumber) -> u32 {
        if wave.get() < self.mid_growth_start {
            self.early_growth
        } else if wave.get() < self.late_growth_start {
            self.mid_growth
        } else {
            self.late_growth
        }
    }

    /// Chooses the tier of the `release_index`th monster of a wave.
    ///
    /// Early waves release walkers only. From the mid game on, every
    /// `sprinter_stride`th release is a sprinter; late waves substitute a
    /// juggernaut every `boss_stride`th release, taking precedence over the
    /// sprinter slot.
    #[must_use]
    pub const fn kind_for_release(&self, wave: WaveNumber, release_index: u32) -> MonsterKind {
        if wave.get() <= self.early_wave_limit {
            return MonsterKind::Walker;
        }
        if wave.get() >= self.boss_wave_start && release_index % self.boss_stride == 0 {
            return MonsterKind::Juggernaut;
        }
        if release_index % self.sprinter_stride == 0 {
            return MonsterKind::Sprinter;
        }
        MonsterKind::Walker
    }
}

/// Currency and base-integrity rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomyConfig {
    starting_currency: u32,
    starting_base_health: u32,
    arrival_penalty: u32,
    walker_reward: u32,
    sprinter_reward: u32,
    juggernaut_reward: u32,
    late_bonus_divisor: u32,
}

impl EconomyConfig {
    /// Creates economy rules from explicit values.
    #[must_use]
    pub const fn new(
        starting_currency: u32,
        starting_base_health: u32,
        arrival_penalty: u32,
        walker_reward: u32,
        sprinter_reward: u32,
        juggernaut_reward: u32,
        late_bonus_divisor: u32,
    ) -> Self {
        Self {
            starting_currency,
            starting_base_health,
            arrival_penalty,
            walker_reward,
            sprinter_reward,
            juggernaut_reward,
            late_bonus_divisor,
        }
    }

    /// Currency a fresh session begins with.
    #[must_use]
    pub const fn starting_currency(&self) -> u32 {
        self.starting_currency
    }

    /// Base integrity a fresh session begins with.
    #[must_use]
    pub const fn starting_base_health(&self) -> u32 {
        self.starting_base_health
    }

    /// Base integrity lost when a monster reaches the exit.
    #[must_use]
    pub const fn arrival_penalty(&self) -> u32 {
        self.arrival_penalty
    }

    /// Bounty credited for a kill during the given wave.
    ///
    /// The per-kind base reward gains a flat late-wave bonus of
    /// `wave / late_bonus_divisor`.
    #[must_use]
    pub const fn reward_for(&self, kind: MonsterKind, wave: WaveNumber) -> u32 {
        let base = match kind {
            MonsterKind::Walker => self.walker_reward,
            MonsterKind::Sprinter => self.sprinter_reward,
            MonsterKind::Juggernaut => self.juggernaut_reward,
        };
        base.saturating_add(wave.get() / self.late_bonus_divisor)
    }
}

/// Stat block of the player-controlled hero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroConfig {
    start_position: Position,
    speed: f32,
    max_health: Health,
    range: f32,
    damage: u32,
    fire_period: Duration,
    melee_radius: f32,
    melee_damage_per_tick: u32,
}

impl HeroConfig {
    /// Creates a hero configuration from explicit stats.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        start_position: Position,
        speed: f32,
        max_health: Health,
        range: f32,
        damage: u32,
        fire_period: Duration,
        melee_radius: f32,
        melee_damage_per_tick: u32,
    ) -> Self {
        Self {
            start_position,
            speed,
            max_health,
            range,
            damage,
            fire_period,
            melee_radius,
            melee_damage_per_tick,
        }
    }

    /// Position the hero occupies at session start and after a reset.
    #[must_use]
    pub const fn start_position(&self) -> Position {
        self.start_position
    }

    /// Movement speed in world units per tick and axis.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Health the hero starts with.
    #[must_use]
    pub const fn max_health(&self) -> Health {
        self.max_health
    }

    /// Auto-attack targeting radius.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Damage carried by each hero projectile.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Minimum time between successive hero shots.
    #[must_use]
    pub const fn fire_period(&self) -> Duration {
        self.fire_period
    }

    /// Radius within which monsters drain the hero each tick.
    #[must_use]
    pub const fn melee_radius(&self) -> f32 {
        self.melee_radius
    }

    /// Health drained per in-range monster per tick.
    #[must_use]
    pub const fn melee_damage_per_tick(&self) -> u32 {
        self.melee_damage_per_tick
    }
}

/// Flight parameters shared by all projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileConfig {
    speed: f32,
    hit_threshold: f32,
}

impl ProjectileConfig {
    /// Creates projectile parameters from explicit values.
    #[must_use]
    pub const fn new(speed: f32, hit_threshold: f32) -> Self {
        Self {
            speed,
            hit_threshold,
        }
    }

    /// Homing speed in world units per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Distance below which a projectile counts as having hit its target.
    #[must_use]
    pub const fn hit_threshold(&self) -> f32 {
        self.hit_threshold
    }
}

/// Complete tunable rule set consumed by the world and the pure systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    arena: ArenaBounds,
    towers: TowerConfig,
    monsters: MonsterTierConfig,
    waves: WaveConfig,
    economy: EconomyConfig,
    hero: HeroConfig,
    projectile: ProjectileConfig,
}

impl GameConfig {
    /// Assembles a configuration from explicit sections.
    #[must_use]
    pub const fn new(
        arena: ArenaBounds,
        towers: TowerConfig,
        monsters: MonsterTierConfig,
        waves: WaveConfig,
        economy: EconomyConfig,
        hero: HeroConfig,
        projectile: ProjectileConfig,
    ) -> Self {
        Self {
            arena,
            towers,
            monsters,
            waves,
            economy,
            hero,
            projectile,
        }
    }

    /// Balance values of the reference campaign.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            arena: ArenaBounds::new(1280.0, 960.0, 32.0),
            towers: TowerConfig::new(
                TowerPreset::new(50, 150.0, 25, Duration::from_millis(1000)),
                TowerPreset::new(100, 200.0, 15, Duration::from_millis(500)),
            ),
            monsters: MonsterTierConfig::new(100, 10, 2.0, 150, 4.0, 400, 20, 1.0),
            waves: WaveConfig::new(
                5,
                Duration::from_millis(1500),
                2,
                3,
                7,
                5,
                5,
                10,
                3,
                2,
                1,
            ),
            economy: EconomyConfig::new(200, 20, 1, 10, 15, 40, 5),
            hero: HeroConfig::new(
                Position::new(640.0, 880.0),
                4.0,
                Health::new(200),
                120.0,
                20,
                Duration::from_millis(400),
                40.0,
                1,
            ),
            projectile: ProjectileConfig::new(8.0, 10.0),
        }
    }

    /// Playfield dimensions and clamping margin.
    #[must_use]
    pub const fn arena(&self) -> &ArenaBounds {
        &self.arena
    }

    /// Per-kind tower presets.
    #[must_use]
    pub const fn towers(&self) -> &TowerConfig {
        &self.towers
    }

    /// Monster tier formulas.
    #[must_use]
    pub const fn monsters(&self) -> &MonsterTierConfig {
        &self.monsters
    }

    /// Wave pacing rules.
    #[must_use]
    pub const fn waves(&self) -> &WaveConfig {
        &self.waves
    }

    /// Currency and base-integrity rules.
    #[must_use]
    pub const fn economy(&self) -> &EconomyConfig {
        &self.economy
    }

    /// Hero stat block.
    #[must_use]
    pub const fn hero(&self) -> &HeroConfig {
        &self.hero
    }

    /// Projectile flight parameters.
    #[must_use]
    pub const fn projectile(&self) -> &ProjectileConfig {
        &self.projectile
    }
}
