//! Authoritative tower state management utilities.

use std::collections::BTreeMap;
use std::time::Duration;

use rampart_core::{config::GameConfig, PlacementError, Position, TowerId, TowerKind};

/// Minimum distance a tower must keep from every path waypoint.
const PATH_CLEARANCE: f32 = 40.0;
/// Minimum distance between two tower centers.
const TOWER_CLEARANCE: f32 = 60.0;

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Fixed center position of the tower.
    pub(crate) position: Position,
    /// Time remaining until the tower may fire again.
    pub(crate) ready_in: Duration,
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Inserts a tower at the provided point and returns its identifier.
    pub(crate) fn place(&mut self, kind: TowerKind, position: Position) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                position,
                ready_in: Duration::ZERO,
            },
        );
        id
    }

    /// Looks up a tower for mutation.
    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Iterates towers in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    /// Iterates towers mutably in identifier order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }
}

/// Validates a placement request without mutating any state.
///
/// The check order is the contract: funds first, then arena bounds, then lane
/// clearance, then tower clearance.
pub(crate) fn validate_placement(
    config: &GameConfig,
    currency: u32,
    waypoints: &[Position],
    registry: &TowerRegistry,
    kind: TowerKind,
    at: Position,
) -> Result<(), PlacementError> {
    if currency < config.towers().preset(kind).cost() {
        return Err(PlacementError::InsufficientFunds);
    }
    if !config.arena().contains(at) {
        return Err(PlacementError::OutOfBounds);
    }
    if waypoints
        .iter()
        .any(|waypoint| at.distance_to(*waypoint) < PATH_CLEARANCE)
    {
        return Err(PlacementError::TooCloseToPath);
    }
    if registry
        .iter()
        .any(|tower| at.distance_to(tower.position) < TOWER_CLEARANCE)
    {
        return Err(PlacementError::TooCloseToTower);
    }
    Ok(())
}
