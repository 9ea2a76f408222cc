#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

pub mod config;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Rampart.";

/// Top-level mode of the simulation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen; the simulation is fully paused.
    Menu,
    /// Active play; the full tick pipeline runs.
    Playing,
    /// Terminal screen; mutation stops, the last snapshot stays readable.
    GameOver,
}

/// Phase of the wave director's spawn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave is active; awaiting an explicit start command.
    Idle,
    /// Scheduled monsters are still being released.
    Spawning,
    /// All monsters released; waiting for the battlefield to clear.
    Draining,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Installs the waypoint path monsters follow from spawn to base.
    ConfigureMap {
        /// Ordered waypoint polyline; the first point is the spawn, the last
        /// the base exit.
        waypoints: Vec<Position>,
    },
    /// Requests the transition from the menu into active play.
    StartGame,
    /// Requests a full session reset after a game over.
    Restart,
    /// Requests that the next wave begin releasing monsters.
    StartWave,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that one monster of the given kind enter the field.
    SpawnMonster {
        /// Tier of monster to release.
        kind: MonsterKind,
    },
    /// Requests placement of a tower at the provided point.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Center point requested for the tower.
        at: Position,
    },
    /// Moves the hero by the provided per-axis delta.
    MoveHero {
        /// Horizontal displacement in world units.
        dx: f32,
        /// Vertical displacement in world units.
        dy: f32,
    },
    /// Requests that an attacker fire a projectile at a monster.
    FireProjectile {
        /// Attacker performing the shot.
        attacker: AttackerId,
        /// Monster the projectile will home toward.
        target: MonsterId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces a top-level game state transition.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
    /// Confirms that a waypoint path was installed.
    MapConfigured {
        /// Number of waypoints in the accepted path.
        waypoints: usize,
    },
    /// Reports that a map configuration request was rejected.
    MapRejected {
        /// Specific reason the path was refused.
        reason: MapError,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a wave began releasing monsters.
    WaveStarted {
        /// Number of the wave that started.
        wave: WaveNumber,
    },
    /// Reports that a start-wave request was refused.
    WaveStartRejected {
        /// Specific reason the wave could not start.
        reason: WaveStartError,
    },
    /// Announces that a wave finished and the next one is armed.
    WaveCompleted {
        /// Number of the wave that completed.
        wave: WaveNumber,
        /// Spawn quota scheduled for the following wave.
        next_quota: u32,
    },
    /// Confirms that a monster entered the field at the spawn point.
    MonsterSpawned {
        /// Identifier assigned to the monster.
        monster: MonsterId,
        /// Tier of the spawned monster.
        kind: MonsterKind,
        /// Position the monster occupies after spawning.
        at: Position,
    },
    /// Reports that a monster died and its bounty was credited.
    MonsterDied {
        /// Identifier of the monster that died.
        monster: MonsterId,
        /// Currency credited for the kill.
        reward: u32,
    },
    /// Reports that a monster reached the base exit.
    MonsterExited {
        /// Identifier of the monster that escaped.
        monster: MonsterId,
        /// Base health remaining after the penalty.
        base_health: u32,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Center point of the new tower.
        at: Position,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Point provided in the placement request.
        at: Position,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an attacker fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Attacker that fired the shot.
        attacker: AttackerId,
        /// Monster the projectile homes toward.
        target: MonsterId,
    },
    /// Reports that a projectile reached its target and applied damage.
    ProjectileHit {
        /// Identifier of the resolving projectile.
        projectile: ProjectileId,
        /// Monster that absorbed the hit.
        target: MonsterId,
        /// Damage applied to the target.
        damage: u32,
    },
    /// Reports that a projectile was discarded because its target was gone.
    ProjectileExpired {
        /// Identifier of the discarded projectile.
        projectile: ProjectileId,
    },
    /// Announces that the hero's health reached zero.
    HeroDied,
}

/// Unique identifier assigned to a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifies a combat actor capable of firing projectiles.
///
/// The hero sorts before every tower so cooldown views and target lists keep
/// a stable deterministic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackerId {
    /// The single player-controlled hero.
    Hero,
    /// A stationary tower addressed by its identifier.
    Tower(TowerId),
}

/// Sequential number of a wave, starting at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Creates a new wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying wave index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the number of the following wave.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Amount of vitality carried by a monster, the hero, or the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the health pool is depleted.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts damage, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, damage: u32) -> Self {
        Self(self.0.saturating_sub(damage))
    }
}

/// Point in continuous world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position from world coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared Euclidean distance, cheaper when only comparisons are needed.
    #[must_use]
    pub fn distance_sq_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Returns this position displaced by the provided per-axis deltas.
    #[must_use]
    pub const fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Moves `step` world units from this position toward `target`.
    ///
    /// A zero remaining distance returns `target` directly so callers never
    /// normalize a zero-length direction vector.
    #[must_use]
    pub fn step_toward(self, target: Position, step: f32) -> Self {
        let distance = self.distance_to(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let scale = step / distance;
        Self {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        }
    }
}

/// Tiers of hostile units released by the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Baseline unit; health scales with the wave number.
    Walker,
    /// Fast mid-wave unit with a flat stat block.
    Sprinter,
    /// Slow high-health quasi-boss substituted into late waves.
    Juggernaut,
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// High damage, short range, slow fire rate.
    Cannon,
    /// Low damage, long range, fast fire rate.
    Laser,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The player cannot afford the requested tower kind.
    #[error("insufficient funds for the requested tower")]
    InsufficientFunds,
    /// The requested point lies outside the arena bounds.
    #[error("placement point lies outside the arena")]
    OutOfBounds,
    /// The requested point encroaches on the monster lane.
    #[error("placement point is too close to the path")]
    TooCloseToPath,
    /// The requested point overlaps an existing tower's clearance.
    #[error("placement point is too close to an existing tower")]
    TooCloseToTower,
}

/// Reasons a start-wave request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum WaveStartError {
    /// The session is not in active play.
    #[error("waves can only start during active play")]
    NotPlaying,
    /// The previous wave has not finished resolving.
    #[error("a wave is already in progress")]
    WaveInProgress,
}

/// Reasons a map configuration request may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MapError {
    /// A path needs at least a spawn point and an exit point.
    #[error("a path requires at least two waypoints")]
    TooFewWaypoints,
    /// The path is immutable once a session has left the menu.
    #[error("the map can only be configured from the menu")]
    SessionActive,
}

/// Immutable representation of a single monster's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSnapshot {
    /// Unique identifier assigned to the monster.
    pub id: MonsterId,
    /// Tier of the monster.
    pub kind: MonsterKind,
    /// Current position in world coordinates.
    pub position: Position,
    /// Remaining health.
    pub health: Health,
    /// Health the monster spawned with.
    pub max_health: Health,
    /// Movement speed in world units per tick.
    pub speed: f32,
    /// Index of the next waypoint the monster walks toward.
    pub path_index: usize,
    /// Indicates whether the monster still participates in the simulation.
    pub alive: bool,
    /// Indicates whether the monster reached the base exit.
    pub arrived: bool,
}

/// Read-only snapshot describing all monsters on the field.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a new monster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MonsterSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Fixed center position of the tower.
    pub position: Position,
    /// Time remaining until the tower may fire again.
    pub ready_in: Duration,
}

/// Read-only snapshot describing all placed towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Current position in world coordinates.
    pub position: Position,
    /// Monster the projectile homes toward.
    pub target: MonsterId,
    /// Damage the projectile will apply on impact.
    pub damage: u32,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the hero used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroSnapshot {
    /// Current position in world coordinates.
    pub position: Position,
    /// Remaining health.
    pub health: Health,
    /// Health the hero starts a session with.
    pub max_health: Health,
    /// Indicates whether the hero is still standing.
    pub alive: bool,
    /// Time remaining until the hero may fire again.
    pub ready_in: Duration,
}

/// Immutable representation of the wave director's bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveSnapshot {
    /// Current phase of the spawn cycle.
    pub phase: WavePhase,
    /// Number of the wave currently armed or running.
    pub wave_number: WaveNumber,
    /// Total monsters scheduled for the wave.
    pub monsters_to_spawn: u32,
    /// Monsters released so far this wave.
    pub monsters_spawned: u32,
}

/// Immutable representation of the player's resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomySnapshot {
    /// Currency available for tower placement.
    pub currency: u32,
    /// Remaining base integrity; zero triggers game over.
    pub base_health: u32,
}

/// Target assignment computed by the targeting system for one attacker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerTarget {
    /// Attacker the assignment belongs to.
    pub attacker: AttackerId,
    /// Monster selected as the nearest in-range candidate.
    pub target: MonsterId,
    /// Position of the attacker when the assignment was computed.
    pub attacker_position: Position,
    /// Position of the target when the assignment was computed.
    pub target_position: Position,
}

/// Cooldown readiness of a single attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownSnapshot {
    /// Attacker the cooldown belongs to.
    pub attacker: AttackerId,
    /// Time remaining until the attacker may fire; zero means ready.
    pub ready_in: Duration,
}

/// Read-only view over attacker cooldowns, sorted for binary search.
#[derive(Clone, Debug, Default)]
pub struct CooldownView {
    snapshots: Vec<CooldownSnapshot>,
}

impl CooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.attacker);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &CooldownSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CooldownSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AttackerId, Health, MapError, MonsterId, MonsterKind, PlacementError, Position,
        ProjectileId, TowerId, TowerKind, WaveNumber, WaveStartError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&MonsterId::new(7));
        assert_round_trip(&TowerId::new(42));
        assert_round_trip(&ProjectileId::new(9000));
        assert_round_trip(&AttackerId::Hero);
        assert_round_trip(&AttackerId::Tower(TowerId::new(3)));
    }

    #[test]
    fn kinds_and_errors_round_trip_through_bincode() {
        assert_round_trip(&MonsterKind::Juggernaut);
        assert_round_trip(&TowerKind::Laser);
        assert_round_trip(&PlacementError::TooCloseToPath);
        assert_round_trip(&WaveStartError::WaveInProgress);
        assert_round_trip(&MapError::TooFewWaypoints);
    }

    #[test]
    fn hero_sorts_before_towers() {
        let mut attackers = vec![
            AttackerId::Tower(TowerId::new(0)),
            AttackerId::Hero,
            AttackerId::Tower(TowerId::new(5)),
        ];
        attackers.sort();
        assert_eq!(
            attackers,
            vec![
                AttackerId::Hero,
                AttackerId::Tower(TowerId::new(0)),
                AttackerId::Tower(TowerId::new(5)),
            ],
        );
    }

    #[test]
    fn step_toward_snaps_when_step_covers_distance() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        assert_eq!(origin.step_toward(target, 5.0), target);
        assert_eq!(origin.step_toward(target, 6.0), target);
    }

    #[test]
    fn step_toward_moves_along_the_direction_vector() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        let moved = origin.step_toward(target, 2.5);
        assert!((moved.x() - 1.5).abs() < f32::EPSILON);
        assert!((moved.y() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn step_toward_tolerates_zero_remaining_distance() {
        let point = Position::new(7.0, 7.0);
        assert_eq!(point.step_toward(point, 2.0), point);
    }

    #[test]
    fn health_clamps_at_zero() {
        let health = Health::new(25);
        assert_eq!(health.saturating_sub(40), Health::new(0));
        assert!(health.saturating_sub(40).is_zero());
    }

    #[test]
    fn wave_number_increments() {
        assert_eq!(WaveNumber::new(4).next(), WaveNumber::new(5));
    }
}
