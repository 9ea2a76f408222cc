//! Waypoint polyline monsters follow from the spawn point to the base exit.

use rampart_core::{MapError, Position};

/// Reference lane used until a map provider installs its own waypoints.
const DEFAULT_LANE: [Position; 10] = [
    Position::new(0.0, 190.0),
    Position::new(250.0, 190.0),
    Position::new(520.0, 190.0),
    Position::new(650.0, 280.0),
    Position::new(650.0, 500.0),
    Position::new(650.0, 700.0),
    Position::new(750.0, 760.0),
    Position::new(980.0, 760.0),
    Position::new(1110.0, 760.0),
    Position::new(1280.0, 760.0),
];

/// Immutable ordered waypoint list; the first point is the spawn, the last
/// the base exit.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Path {
    waypoints: Vec<Position>,
}

impl Path {
    /// Builds the reference lane shipped with the engine.
    pub(crate) fn default_lane() -> Self {
        Self {
            waypoints: DEFAULT_LANE.to_vec(),
        }
    }

    /// Validates and wraps a waypoint list.
    pub(crate) fn try_new(waypoints: Vec<Position>) -> Result<Self, MapError> {
        if waypoints.len() < 2 {
            return Err(MapError::TooFewWaypoints);
        }
        Ok(Self { waypoints })
    }

    /// Point where newly spawned monsters enter the field.
    pub(crate) fn spawn_point(&self) -> Position {
        self.waypoints[0]
    }

    /// Ordered waypoints of the polyline.
    pub(crate) fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Advances one monster by `step` world units along the polyline.
    ///
    /// If the remaining distance to the next waypoint is smaller than the
    /// step, the monster snaps exactly onto the waypoint and the index
    /// increments; zero remaining distance counts as reached. A monster whose
    /// index already passed the last waypoint is reported as arrived without
    /// moving.
    pub(crate) fn advance(&self, position: Position, next_waypoint: usize, step: f32) -> Advance {
        if next_waypoint >= self.waypoints.len() {
            return Advance {
                position,
                next_waypoint,
                arrived: true,
            };
        }

        let target = self.waypoints[next_waypoint];
        let distance = position.distance_to(target);
        if distance < step || distance == 0.0 {
            return Advance {
                position: target,
                next_waypoint: next_waypoint + 1,
                arrived: false,
            };
        }

        Advance {
            position: position.step_toward(target, step),
            next_waypoint,
            arrived: false,
        }
    }
}

/// Outcome of advancing a monster by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Advance {
    /// Position after the step.
    pub(crate) position: Position,
    /// Waypoint index the monster walks toward next.
    pub(crate) next_waypoint: usize,
    /// Set when the monster had already consumed the full polyline.
    pub(crate) arrived: bool,
}
