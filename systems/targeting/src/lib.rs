#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic attacker targets from snapshots.
//!
//! Towers and the hero share one acquisition rule: the strictly nearest alive
//! monster within range wins, and distance ties keep the first candidate
//! encountered in identifier order. Assignments are recomputed from scratch
//! every frame; no attacker remembers a previous target.

use rampart_core::{
    config::{HeroConfig, TowerConfig},
    AttackerId, AttackerTarget, GameState, HeroSnapshot, MonsterId, MonsterView, Position,
    TowerView,
};

/// Targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct Targeting {
    attacker_workspace: Vec<AttackerSite>,
    monster_workspace: Vec<Candidate>,
}

impl Targeting {
    /// Creates a new targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes target assignments for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments; the hero's entry always precedes the towers'.
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &mut self,
        game_state: GameState,
        towers: &TowerView,
        hero: &HeroSnapshot,
        monsters: &MonsterView,
        tower_config: &TowerConfig,
        hero_config: &HeroConfig,
        out: &mut Vec<AttackerTarget>,
    ) {
        out.clear();

        if game_state != GameState::Playing {
            return;
        }

        self.prepare_attacker_workspace(towers, hero, tower_config, hero_config);
        if self.attacker_workspace.is_empty() {
            return;
        }

        self.prepare_monster_workspace(monsters);
        if self.monster_workspace.is_empty() {
            return;
        }

        for attacker in &self.attacker_workspace {
            let mut best: Option<BestCandidate> = None;

            for candidate in &self.monster_workspace {
                let distance_sq = attacker.position.distance_sq_to(candidate.position);
                if distance_sq > attacker.range_sq {
                    continue;
                }

                // Strict comparison keeps the first-encountered candidate on
                // equal distances.
                let replace = match &best {
                    Some(existing) => distance_sq < existing.distance_sq,
                    None => true,
                };
                if replace {
                    best = Some(BestCandidate {
                        distance_sq,
                        monster: candidate.id,
                        position: candidate.position,
                    });
                }
            }

            if let Some(found) = best {
                out.push(AttackerTarget {
                    attacker: attacker.id,
                    target: found.monster,
                    attacker_position: attacker.position,
                    target_position: found.position,
                });
            }
        }
    }

    fn prepare_attacker_workspace(
        &mut self,
        towers: &TowerView,
        hero: &HeroSnapshot,
        tower_config: &TowerConfig,
        hero_config: &HeroConfig,
    ) {
        self.attacker_workspace.clear();
        let (lower, _) = towers.iter().size_hint();
        self.attacker_workspace.reserve(lower + 1);

        if hero.alive {
            let range = hero_config.range();
            self.attacker_workspace.push(AttackerSite {
                id: AttackerId::Hero,
                position: hero.position,
                range_sq: range * range,
            });
        }

        for snapshot in towers.iter() {
            let range = tower_config.preset(snapshot.kind).range();
            self.attacker_workspace.push(AttackerSite {
                id: AttackerId::Tower(snapshot.id),
                position: snapshot.position,
                range_sq: range * range,
            });
        }
    }

    fn prepare_monster_workspace(&mut self, monsters: &MonsterView) {
        self.monster_workspace.clear();
        let (lower, _) = monsters.iter().size_hint();
        self.monster_workspace.reserve(lower);

        for snapshot in monsters.iter() {
            if !snapshot.alive {
                continue;
            }
            self.monster_workspace.push(Candidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AttackerSite {
    id: AttackerId,
    position: Position,
    range_sq: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    id: MonsterId,
    position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    monster: MonsterId,
    position: Position,
}

#[cfg(test)]
mod tests {
    use super::Targeting;
    use rampart_core::{
        config::GameConfig, AttackerId, AttackerTarget, GameState, Health, HeroSnapshot,
        MonsterId, MonsterKind, MonsterSnapshot, MonsterView, Position, TowerId, TowerKind,
        TowerSnapshot, TowerView,
    };
    use std::time::Duration;

    fn tower_snapshot(id: u32, at: (f32, f32)) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind: TowerKind::Cannon,
            position: Position::new(at.0, at.1),
            ready_in: Duration::ZERO,
        }
    }

    fn monster_snapshot(id: u32, at: (f32, f32), alive: bool) -> MonsterSnapshot {
        MonsterSnapshot {
            id: MonsterId::new(id),
            kind: MonsterKind::Walker,
            position: Position::new(at.0, at.1),
            health: Health::new(100),
            max_health: Health::new(100),
            speed: 2.0,
            path_index: 1,
            alive,
            arrived: false,
        }
    }

    fn hero_at(at: (f32, f32), alive: bool) -> HeroSnapshot {
        HeroSnapshot {
            position: Position::new(at.0, at.1),
            health: Health::new(200),
            max_health: Health::new(200),
            alive,
            ready_in: Duration::ZERO,
        }
    }

    fn assignments(
        game_state: GameState,
        towers: Vec<TowerSnapshot>,
        hero: HeroSnapshot,
        monsters: Vec<MonsterSnapshot>,
    ) -> Vec<AttackerTarget> {
        let config = GameConfig::standard();
        let mut system = Targeting::new();
        let mut out = Vec::new();
        system.handle(
            game_state,
            &TowerView::from_snapshots(towers),
            &hero,
            &MonsterView::from_snapshots(monsters),
            config.towers(),
            config.hero(),
            &mut out,
        );
        out
    }

    #[test]
    fn nearest_monster_within_range_is_selected() {
        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (500.0, 500.0))],
            hero_at((2000.0, 2000.0), false),
            vec![
                monster_snapshot(1, (620.0, 500.0), true),
                monster_snapshot(2, (560.0, 500.0), true),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].attacker, AttackerId::Tower(TowerId::new(1)));
        assert_eq!(out[0].target, MonsterId::new(2));
    }

    #[test]
    fn monsters_outside_range_are_ignored() {
        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (100.0, 100.0))],
            hero_at((2000.0, 2000.0), false),
            vec![monster_snapshot(1, (900.0, 900.0), true)],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn equal_distances_keep_the_first_encountered_monster() {
        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (500.0, 500.0))],
            hero_at((2000.0, 2000.0), false),
            vec![
                monster_snapshot(7, (560.0, 500.0), true),
                monster_snapshot(3, (440.0, 500.0), true),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].target,
            MonsterId::new(3),
            "identifier order decides ties",
        );
    }

    #[test]
    fn dead_monsters_are_never_candidates() {
        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (500.0, 500.0))],
            hero_at((2000.0, 2000.0), false),
            vec![
                monster_snapshot(1, (510.0, 500.0), false),
                monster_snapshot(2, (600.0, 500.0), true),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, MonsterId::new(2));
    }

    #[test]
    fn hero_assignment_precedes_tower_assignments() {
        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (500.0, 500.0))],
            hero_at((520.0, 500.0), true),
            vec![monster_snapshot(1, (560.0, 500.0), true)],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].attacker, AttackerId::Hero);
        assert_eq!(out[1].attacker, AttackerId::Tower(TowerId::new(1)));
    }

    #[test]
    fn a_dead_hero_acquires_nothing() {
        let out = assignments(
            GameState::Playing,
            Vec::new(),
            hero_at((500.0, 500.0), false),
            vec![monster_snapshot(1, (510.0, 500.0), true)],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn menu_and_game_over_clear_the_output() {
        for state in [GameState::Menu, GameState::GameOver] {
            let config = GameConfig::standard();
            let mut system = Targeting::new();
            let mut out = vec![AttackerTarget {
                attacker: AttackerId::Hero,
                target: MonsterId::new(99),
                attacker_position: Position::new(0.0, 0.0),
                target_position: Position::new(0.0, 0.0),
            }];
            system.handle(
                state,
                &TowerView::from_snapshots(vec![tower_snapshot(1, (500.0, 500.0))]),
                &hero_at((500.0, 500.0), true),
                &MonsterView::from_snapshots(vec![monster_snapshot(1, (510.0, 500.0), true)]),
                config.towers(),
                config.hero(),
                &mut out,
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn empty_collections_produce_no_assignments() {
        let out = assignments(
            GameState::Playing,
            Vec::new(),
            hero_at((500.0, 500.0), false),
            vec![monster_snapshot(1, (510.0, 500.0), true)],
        );
        assert!(out.is_empty());

        let out = assignments(
            GameState::Playing,
            vec![tower_snapshot(1, (500.0, 500.0))],
            hero_at((500.0, 500.0), true),
            Vec::new(),
        );
        assert!(out.is_empty());
    }
}
