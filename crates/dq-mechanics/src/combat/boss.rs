//! Enemy turns, including boss special abilities.

use dq_core::enemy::BOSS_SPECIAL_CHANCE;
use dq_core::{Boss, Combatant, Foe};

use super::{AttackOutcome, mitigate, resolve_attack};
use crate::error::{MechError, MechResult};
use crate::roller::Roller;

/// Take a boss's turn against `defender`.
///
/// A boss whose cooldown is zero rolls for its special ability. On success
/// the special hits for `floor(attack × 1.5)` through the defender's normal
/// mitigation and the cooldown resets. Otherwise the cooldown ticks down
/// and the boss makes a normal attack.
pub fn boss_turn<D, R>(boss: &mut Boss, defender: &mut D, roller: &mut R) -> MechResult<AttackOutcome>
where
    D: Combatant + ?Sized,
    R: Roller + ?Sized,
{
    if boss.is_dead() {
        return Err(MechError::AttackerDead(boss.name().to_string()));
    }

    if boss.special_ready() && roller.chance() < BOSS_SPECIAL_CHANCE {
        let raw = boss.special_damage();
        let mitigation = mitigate(raw, defender, roller);
        boss.reset_cooldown();

        let outcome = AttackOutcome {
            attacker: boss.name().to_string(),
            defender: defender.name().to_string(),
            damage: mitigation.damage,
            defender_health: defender.health(),
            critical: false,
            dodged: mitigation.dodged,
            blocked: mitigation.blocked,
            special: Some(boss.special_ability().to_string()),
        };
        tracing::debug!(
            boss = %outcome.attacker,
            ability = boss.special_ability(),
            raw,
            damage = outcome.damage,
            "special ability used"
        );
        return Ok(outcome);
    }

    boss.tick_cooldown();
    resolve_attack(&*boss, defender, roller)
}

/// Take any foe's turn: bosses go through [`boss_turn`], plain enemies
/// make a normal attack.
pub fn foe_turn<D, R>(foe: &mut Foe, defender: &mut D, roller: &mut R) -> MechResult<AttackOutcome>
where
    D: Combatant + ?Sized,
    R: Roller + ?Sized,
{
    match foe {
        Foe::Boss(boss) => boss_turn(boss, defender, roller),
        Foe::Enemy(enemy) => resolve_attack(&*enemy, defender, roller),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::ScriptedRoller;
    use dq_core::enemy::BOSS_MAX_COOLDOWN;
    use dq_core::{CombatStats, Enemy, Player};

    fn dark_lord() -> Boss {
        Boss::new(
            Enemy::new("Dark Lord", "Master of the tower", 100, 20, 10).unwrap(),
            "Shadow Strike",
        )
        .unwrap()
    }

    fn target() -> Player {
        Player::new("Hero")
            .unwrap()
            .with_base_stats(CombatStats::new(10, 0))
            .unwrap()
    }

    #[test]
    fn special_triggers_below_threshold() {
        let mut boss = dark_lord();
        let mut player = target();
        let mut roller = ScriptedRoller::new().with_chances([0.29]);
        let out = boss_turn(&mut boss, &mut player, &mut roller).unwrap();
        assert_eq!(out.special.as_deref(), Some("Shadow Strike"));
        assert_eq!(out.damage, 30);
        assert_eq!(player.health(), 70);
        assert_eq!(boss.cooldown(), BOSS_MAX_COOLDOWN);
    }

    #[test]
    fn special_goes_through_mitigation() {
        let mut boss = dark_lord();
        let mut player = Player::new("Hero")
            .unwrap()
            .with_base_stats(CombatStats::new(10, 5).with_block_chance(0.5))
            .unwrap();
        // trigger, dodge miss, block hit: 30 / 2 - 5 = 10
        let mut roller = ScriptedRoller::new().with_chances([0.1, 0.9, 0.1]);
        let out = boss_turn(&mut boss, &mut player, &mut roller).unwrap();
        assert!(out.blocked);
        assert_eq!(out.damage, 10);
    }

    #[test]
    fn failed_trigger_is_normal_attack() {
        let mut boss = dark_lord();
        let mut player = target();
        let mut roller = ScriptedRoller::new().with_chances([0.3]);
        let out = boss_turn(&mut boss, &mut player, &mut roller).unwrap();
        assert_eq!(out.special, None);
        assert_eq!(out.damage, 20);
        assert_eq!(boss.cooldown(), 0);
    }

    #[test]
    fn cooldown_blocks_special_and_ticks_down() {
        let mut boss = dark_lord();
        boss.reset_cooldown();
        let mut player = target();
        // No trigger draw while cooling down: first chance is the crit roll.
        let mut roller = ScriptedRoller::new().with_chances([0.0]);
        let out = boss_turn(&mut boss, &mut player, &mut roller).unwrap();
        assert_eq!(out.special, None);
        assert!(!out.critical);
        assert_eq!(boss.cooldown(), BOSS_MAX_COOLDOWN - 1);

        boss_turn(&mut boss, &mut player, &mut ScriptedRoller::new()).unwrap();
        boss_turn(&mut boss, &mut player, &mut ScriptedRoller::new()).unwrap();
        assert_eq!(boss.cooldown(), 0);
        assert!(boss.special_ready());
    }

    #[test]
    fn dead_boss_cannot_act() {
        let mut boss = dark_lord();
        boss.take_hit(1000);
        let err = boss_turn(&mut boss, &mut target(), &mut ScriptedRoller::new());
        assert_eq!(err, Err(MechError::AttackerDead("Dark Lord".into())));
    }

    #[test]
    fn foe_turn_dispatches() {
        let mut foe = Foe::from(dark_lord());
        let mut player = target();
        let out = foe_turn(&mut foe, &mut player, &mut ScriptedRoller::new().with_chances([0.0]))
            .unwrap();
        assert!(out.special.is_some());

        let mut foe = Foe::from(Enemy::new("Rat", "Small", 5, 3, 0).unwrap());
        let out = foe_turn(&mut foe, &mut player, &mut ScriptedRoller::new()).unwrap();
        assert_eq!(out.damage, 3);
    }
}
