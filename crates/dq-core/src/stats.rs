//! Combat statistics and the combatant capability set.
//!
//! Player, enemies, and bosses are distinct types that all implement
//! [`Combatant`]. The combat engine only ever talks to this trait.

use crate::error::{CoreError, CoreResult};
use crate::health::Health;

/// Critical-hit multiplier used when none is given.
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;

/// Offensive, defensive, and probabilistic modifiers of a combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatStats {
    /// Base damage of an attack before variance.
    pub attack_power: u32,
    /// Flat damage reduction applied last in the mitigation pipeline.
    pub defense: u32,
    /// Probability in `[0, 1]` of avoiding an attack entirely.
    pub dodge_chance: f64,
    /// Probability in `[0, 1]` of halving incoming damage.
    pub block_chance: f64,
    /// Probability in `[0, 1]` of landing a critical hit.
    pub crit_chance: f64,
    /// Damage multiplier of a critical hit (at least 1.0).
    pub crit_multiplier: f64,
}

impl CombatStats {
    /// Stats with the given attack and defense and no probabilistic modifiers.
    pub const fn new(attack_power: u32, defense: u32) -> Self {
        Self {
            attack_power,
            defense,
            dodge_chance: 0.0,
            block_chance: 0.0,
            crit_chance: 0.0,
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
        }
    }

    /// Set the dodge chance.
    pub fn with_dodge_chance(mut self, chance: f64) -> Self {
        self.dodge_chance = chance;
        self
    }

    /// Set the block chance.
    pub fn with_block_chance(mut self, chance: f64) -> Self {
        self.block_chance = chance;
        self
    }

    /// Set the critical-hit chance.
    pub fn with_crit_chance(mut self, chance: f64) -> Self {
        self.crit_chance = chance;
        self
    }

    /// Set the critical-hit multiplier.
    pub fn with_crit_multiplier(mut self, multiplier: f64) -> Self {
        self.crit_multiplier = multiplier;
        self
    }

    /// Check that every chance is a probability and the multiplier is at least 1.
    pub fn validate(&self) -> CoreResult<()> {
        check_chance("dodge chance", self.dodge_chance)?;
        check_chance("block chance", self.block_chance)?;
        check_chance("crit chance", self.crit_chance)?;
        if self.crit_multiplier.is_nan() || self.crit_multiplier < 1.0 {
            return Err(CoreError::CritMultiplierTooLow(self.crit_multiplier));
        }
        Ok(())
    }
}

/// Reject values outside `[0, 1]` (NaN included).
pub(crate) fn check_chance(field: &'static str, value: f64) -> CoreResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::ChanceOutOfRange { field, value })
    }
}

/// Anything with health, offense, and defense that can deal or receive damage.
pub trait Combatant {
    /// Display name.
    fn name(&self) -> &str;

    /// Effective stats, including any equipment bonuses.
    fn stats(&self) -> CombatStats;

    /// The health track.
    fn vitals(&self) -> &Health;

    /// Mutable access to the health track.
    fn vitals_mut(&mut self) -> &mut Health;

    /// Current hit points.
    fn health(&self) -> u32 {
        self.vitals().current()
    }

    /// Maximum hit points.
    fn max_health(&self) -> u32 {
        self.vitals().max()
    }

    /// A combatant is alive while its health is above zero.
    fn is_alive(&self) -> bool {
        !self.vitals().is_depleted()
    }

    /// A dead combatant is inert: it cannot act but can still be looted.
    fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Apply incoming damage after defense: `max(incoming - defense, 0)`.
    ///
    /// Returns the damage after defense; health is clamped at zero.
    fn take_hit(&mut self, incoming: u32) -> u32 {
        let actual = incoming.saturating_sub(self.stats().defense);
        self.vitals_mut().damage(actual);
        actual
    }

    /// Restore hit points up to the maximum. Returns the amount restored.
    fn heal(&mut self, amount: u32) -> u32 {
        self.vitals_mut().heal(amount)
    }
}
