#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use rampart_core::{AttackerId, AttackerTarget, Command, CooldownSnapshot, CooldownView, GameState};

/// Combat system that queues firing commands for ready attackers.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for attackers ready to fire.
    pub fn handle(
        &mut self,
        game_state: GameState,
        cooldowns: CooldownView,
        targets: &[AttackerTarget],
        out: &mut Vec<Command>,
    ) {
        if game_state != GameState::Playing {
            return;
        }

        if targets.is_empty() {
            return;
        }

        let cooldowns = cooldowns.into_vec();
        if cooldowns.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in targets {
            if let Some(snapshot) = find_cooldown(&cooldowns, target.attacker) {
                if snapshot.ready_in.is_zero() {
                    self.scratch.push(Command::FireProjectile {
                        attacker: target.attacker,
                        target: target.target,
                    });
                }
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn find_cooldown(cooldowns: &[CooldownSnapshot], attacker: AttackerId) -> Option<&CooldownSnapshot> {
    cooldowns
        .binary_search_by_key(&attacker, |snapshot| snapshot.attacker)
        .ok()
        .map(|index| &cooldowns[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{MonsterId, Position, TowerId};
    use std::time::Duration;

    fn snapshot(attacker: AttackerId, ready_in: Duration) -> CooldownSnapshot {
        CooldownSnapshot { attacker, ready_in }
    }

    fn target(attacker: AttackerId, monster: u32) -> AttackerTarget {
        AttackerTarget {
            attacker,
            target: MonsterId::new(monster),
            attacker_position: Position::new(0.0, 0.0),
            target_position: Position::new(0.0, 0.0),
        }
    }

    #[test]
    fn menu_and_game_over_are_silent() {
        let mut system = Combat::new();
        let mut out = Vec::new();
        for state in [GameState::Menu, GameState::GameOver] {
            let cooldowns =
                CooldownView::from_snapshots(vec![snapshot(AttackerId::Hero, Duration::ZERO)]);
            system.handle(state, cooldowns, &[target(AttackerId::Hero, 7)], &mut out);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn firing_respects_cooldown_readiness() {
        let mut system = Combat::new();
        let cooldowns = CooldownView::from_snapshots(vec![
            snapshot(AttackerId::Hero, Duration::ZERO),
            snapshot(AttackerId::Tower(TowerId::new(2)), Duration::ZERO),
        ]);
        let targets = vec![
            target(AttackerId::Hero, 4),
            target(AttackerId::Tower(TowerId::new(2)), 1),
        ];
        let mut out = Vec::new();

        system.handle(GameState::Playing, cooldowns, &targets, &mut out);

        assert_eq!(
            out,
            vec![
                Command::FireProjectile {
                    attacker: AttackerId::Hero,
                    target: MonsterId::new(4),
                },
                Command::FireProjectile {
                    attacker: AttackerId::Tower(TowerId::new(2)),
                    target: MonsterId::new(1),
                },
            ],
        );
    }

    #[test]
    fn non_ready_or_unknown_attackers_are_skipped() {
        let mut system = Combat::new();
        let cooldowns = CooldownView::from_snapshots(vec![
            snapshot(AttackerId::Tower(TowerId::new(3)), Duration::from_millis(250)),
            snapshot(AttackerId::Tower(TowerId::new(8)), Duration::ZERO),
        ]);
        let targets = vec![
            target(AttackerId::Tower(TowerId::new(3)), 9),
            target(AttackerId::Tower(TowerId::new(8)), 2),
            target(AttackerId::Tower(TowerId::new(42)), 3),
        ];
        let mut out = Vec::new();

        system.handle(GameState::Playing, cooldowns, &targets, &mut out);

        assert_eq!(
            out,
            vec![Command::FireProjectile {
                attacker: AttackerId::Tower(TowerId::new(8)),
                target: MonsterId::new(2),
            }],
        );
    }
}
