//! Attack resolution.
//!
//! One attack runs in a fixed order:
//!
//! 1. base damage = attack power + variance in `[-2, 2]`
//! 2. critical check; on a crit the damage is multiplied and truncated
//! 3. damage floor of 1
//! 4. dodge check; a dodge deals nothing and ends the attack
//! 5. block check; a block halves the damage (truncated)
//! 6. defense subtraction, never below zero
//!
//! Each check is an independent draw from the [`Roller`].

mod boss;
mod flee;

use dq_core::Combatant;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::roller::Roller;

pub use boss::{boss_turn, foe_turn};
pub use flee::{FLEE_CHANCE, attempt_flee};

/// The result of one resolved attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Name of the attacker.
    pub attacker: String,
    /// Name of the defender.
    pub defender: String,
    /// Damage actually removed from the defender's health.
    pub damage: u32,
    /// The defender's health after the attack.
    pub defender_health: u32,
    /// The attack was a critical hit.
    pub critical: bool,
    /// The defender dodged; `damage` is zero.
    pub dodged: bool,
    /// The defender blocked and halved the damage.
    pub blocked: bool,
    /// Name of the special ability used instead of a normal attack.
    pub special: Option<String>,
}

impl AttackOutcome {
    /// Whether the attack left the defender at zero health.
    pub fn defender_defeated(&self) -> bool {
        self.defender_health == 0
    }
}

/// What the defender's mitigation did to an incoming hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mitigation {
    /// Damage applied after dodge, block, and defense.
    pub damage: u32,
    /// The hit was dodged.
    pub dodged: bool,
    /// The hit was blocked.
    pub blocked: bool,
}

/// Run `incoming` through the defender's dodge, block, and defense, and
/// apply the result to the defender's health.
pub fn mitigate<D, R>(incoming: u32, defender: &mut D, roller: &mut R) -> Mitigation
where
    D: Combatant + ?Sized,
    R: Roller + ?Sized,
{
    let stats = defender.stats();

    if roller.chance() < stats.dodge_chance {
        return Mitigation {
            damage: 0,
            dodged: true,
            blocked: false,
        };
    }

    let blocked = roller.chance() < stats.block_chance;
    let incoming = if blocked { incoming / 2 } else { incoming };
    let damage = defender.take_hit(incoming);

    Mitigation {
        damage,
        dodged: false,
        blocked,
    }
}

/// Damage before mitigation: attack power plus variance, crit applied,
/// floored at 1. Returns the damage and whether it was a critical hit.
fn raw_damage<A, R>(attacker: &A, roller: &mut R) -> (u32, bool)
where
    A: Combatant + ?Sized,
    R: Roller + ?Sized,
{
    let stats = attacker.stats();
    let variance = roller.variance();
    let mut damage = (i64::from(stats.attack_power) + i64::from(variance)).max(0);

    let critical = roller.chance() < stats.crit_chance;
    if critical {
        damage = (damage as f64 * stats.crit_multiplier).trunc() as i64;
    }

    let damage = u32::try_from(damage.max(1)).unwrap_or(u32::MAX);
    (damage, critical)
}

/// Resolve one attack from `attacker` against `defender`.
///
/// Only the defender's health changes.
pub fn resolve_attack<A, D, R>(
    attacker: &A,
    defender: &mut D,
    roller: &mut R,
) -> MechResult<AttackOutcome>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
    R: Roller + ?Sized,
{
    if attacker.is_dead() {
        return Err(MechError::AttackerDead(attacker.name().to_string()));
    }

    let (raw, critical) = raw_damage(attacker, roller);
    let mitigation = mitigate(raw, defender, roller);

    let outcome = AttackOutcome {
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        damage: mitigation.damage,
        defender_health: defender.health(),
        critical,
        dodged: mitigation.dodged,
        blocked: mitigation.blocked,
        special: None,
    };
    tracing::debug!(
        attacker = %outcome.attacker,
        defender = %outcome.defender,
        raw,
        damage = outcome.damage,
        critical,
        dodged = outcome.dodged,
        blocked = outcome.blocked,
        "attack resolved"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::ScriptedRoller;
    use dq_core::{CombatStats, Enemy, Player};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn goblin() -> Enemy {
        Enemy::new("Goblin", "Small", 50, 12, 3).unwrap()
    }

    fn fighter(attack: u32, defense: u32) -> Enemy {
        Enemy::new("Fighter", "Plain", 100, attack, defense).unwrap()
    }

    #[test]
    fn plain_attack_subtracts_defense() {
        let attacker = fighter(10, 0);
        let mut defender = goblin();
        let mut roller = ScriptedRoller::new();
        let out = resolve_attack(&attacker, &mut defender, &mut roller).unwrap();
        assert_eq!(out.damage, 7);
        assert_eq!(out.defender_health, 43);
        assert_eq!(defender.health(), 43);
        assert!(!out.critical && !out.dodged && !out.blocked);
        assert_eq!(out.attacker, "Fighter");
        assert_eq!(out.defender, "Goblin");
    }

    #[test]
    fn zero_modifier_player_takes_exact_damage_for_any_seed() {
        for seed in 0..50 {
            let mut player = Player::new("Hero")
                .unwrap()
                .with_base_stats(CombatStats::new(10, 5))
                .unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let hit = mitigate(15, &mut player, &mut rng);
            assert_eq!(hit.damage, 10);
            assert!(!hit.dodged && !hit.blocked);
            assert_eq!(player.health(), 90);
        }
    }

    #[test]
    fn variance_shifts_damage() {
        let attacker = fighter(10, 0);
        let mut defender = fighter(0, 0);
        let mut roller = ScriptedRoller::new().with_variances([-2, 2]);
        assert_eq!(
            resolve_attack(&attacker, &mut defender, &mut roller)
                .unwrap()
                .damage,
            8
        );
        assert_eq!(
            resolve_attack(&attacker, &mut defender, &mut roller)
                .unwrap()
                .damage,
            12
        );
    }

    #[test]
    fn critical_multiplies_and_truncates() {
        let attacker = Enemy::with_stats(
            "Rogue",
            "Sharp",
            40,
            CombatStats::new(11, 0).with_crit_chance(0.5),
        )
        .unwrap();
        let mut defender = fighter(0, 0);
        // variance 0, crit roll 0.2 < 0.5; 11 * 1.5 = 16.5 -> 16
        let mut roller = ScriptedRoller::new().with_chances([0.2]);
        let out = resolve_attack(&attacker, &mut defender, &mut roller).unwrap();
        assert!(out.critical);
        assert_eq!(out.damage, 16);
    }

    #[test]
    fn damage_floor_is_one_before_mitigation() {
        let attacker = fighter(1, 0);
        let mut defender = fighter(0, 0);
        let mut roller = ScriptedRoller::new().with_variances([-2]);
        let out = resolve_attack(&attacker, &mut defender, &mut roller).unwrap();
        assert_eq!(out.damage, 1);
    }

    #[test]
    fn dodge_skips_block_and_defense() {
        let attacker = fighter(20, 0);
        let mut defender = Enemy::with_stats(
            "Cat",
            "Quick",
            30,
            CombatStats::new(0, 0)
                .with_dodge_chance(0.5)
                .with_block_chance(1.0),
        )
        .unwrap();
        // crit draw, then dodge draw 0.1 < 0.5; no block draw follows
        let mut roller = ScriptedRoller::new().with_chances([0.9, 0.1, 0.0]);
        let out = resolve_attack(&attacker, &mut defender, &mut roller).unwrap();
        assert!(out.dodged);
        assert!(!out.blocked);
        assert_eq!(out.damage, 0);
        assert_eq!(defender.health(), 30);
        assert_eq!(roller.chance(), 0.0);
    }

    #[test]
    fn block_halves_before_defense() {
        let attacker = fighter(15, 0);
        let mut defender = Enemy::with_stats(
            "Knight",
            "Shielded",
            60,
            CombatStats::new(0, 3).with_block_chance(0.5),
        )
        .unwrap();
        // crit miss, dodge miss, block hit: 15 / 2 = 7, minus 3 = 4
        let mut roller = ScriptedRoller::new().with_chances([0.9, 0.9, 0.1]);
        let out = resolve_attack(&attacker, &mut defender, &mut roller).unwrap();
        assert!(out.blocked);
        assert_eq!(out.damage, 4);
        assert_eq!(out.defender_health, 56);
    }

    #[test]
    fn defense_can_absorb_everything() {
        let attacker = fighter(3, 0);
        let mut defender = fighter(0, 10);
        let out = resolve_attack(&attacker, &mut defender, &mut ScriptedRoller::new()).unwrap();
        assert_eq!(out.damage, 0);
        assert_eq!(defender.health(), 100);
    }

    #[test]
    fn dead_attacker_is_rejected() {
        let mut attacker = fighter(10, 0);
        attacker.set_health(0);
        let mut defender = goblin();
        let err = resolve_attack(&attacker, &mut defender, &mut ScriptedRoller::new());
        assert_eq!(err, Err(MechError::AttackerDead("Fighter".into())));
        assert_eq!(defender.health(), 50);
    }

    #[test]
    fn lethal_hit_reports_defeat() {
        let attacker = fighter(60, 0);
        let mut defender = goblin();
        let out = resolve_attack(&attacker, &mut defender, &mut ScriptedRoller::new()).unwrap();
        assert!(out.defender_defeated());
        assert!(defender.is_dead());
    }

    proptest! {
        #[test]
        fn damage_formula_holds(
            attack in 0u32..50,
            defense in 0u32..30,
            dodge in 0.0f64..=1.0,
            block in 0.0f64..=1.0,
            crit in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let attacker = Enemy::with_stats(
                "A", "a", 10, CombatStats::new(attack, 0).with_crit_chance(crit),
            ).unwrap();
            let mut defender = Enemy::with_stats(
                "D", "d", 80,
                CombatStats::new(0, defense).with_dodge_chance(dodge).with_block_chance(block),
            ).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let out = resolve_attack(&attacker, &mut defender, &mut rng).unwrap();

            prop_assert!(defender.health() <= defender.max_health());
            prop_assert_eq!(out.defender_health, defender.health());
            prop_assert_eq!(80 - defender.health(), out.damage);
            if out.dodged {
                prop_assert_eq!(out.damage, 0);
                prop_assert!(!out.blocked);
            }
            let max_raw = ((attack + 2) as f64 * 1.5) as u32;
            prop_assert!(out.damage <= max_raw.saturating_sub(defense).max(1));
        }
    }
}
