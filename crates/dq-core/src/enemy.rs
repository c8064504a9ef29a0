//! Enemies and bosses.
//!
//! A [`Boss`] composes an [`Enemy`] with special-ability state rather than
//! overriding it. Rooms store both behind the [`Foe`] enum.

use crate::error::{CoreError, CoreResult};
use crate::health::Health;
use crate::item::Item;
use crate::stats::{CombatStats, Combatant};

/// Cooldown a boss is reset to after using its special ability.
pub const BOSS_MAX_COOLDOWN: u32 = 3;

/// Probability that a ready boss uses its special ability.
pub const BOSS_SPECIAL_CHANCE: f64 = 0.3;

/// Attack power multiplier of a boss special ability.
pub const BOSS_SPECIAL_FACTOR: f64 = 1.5;

/// A hostile combatant that owns a loot list until it is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    name: String,
    description: String,
    health: Health,
    stats: CombatStats,
    loot: Vec<Item>,
}

impl Enemy {
    /// Create an enemy with plain attack and defense.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_health: u32,
        attack_power: u32,
        defense: u32,
    ) -> CoreResult<Self> {
        Self::with_stats(
            name,
            description,
            max_health,
            CombatStats::new(attack_power, defense),
        )
    }

    /// Create an enemy with full combat stats.
    pub fn with_stats(
        name: impl Into<String>,
        description: impl Into<String>,
        max_health: u32,
        stats: CombatStats,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("enemy name"));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(CoreError::EmptyField("enemy description"));
        }
        stats.validate()?;
        Ok(Self {
            name,
            description,
            health: Health::new(max_health)?,
            stats,
            loot: Vec::new(),
        })
    }

    /// Description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Items this enemy will drop on death.
    pub fn loot(&self) -> &[Item] {
        &self.loot
    }

    /// Add an item to the loot list.
    pub fn add_loot(&mut self, item: Item) {
        self.loot.push(item);
    }

    /// Builder form of [`Enemy::add_loot`].
    pub fn with_loot(mut self, item: Item) -> Self {
        self.loot.push(item);
        self
    }

    /// Replace the loot list.
    pub fn set_loot(&mut self, loot: Vec<Item>) {
        self.loot = loot;
    }

    /// Hand over the whole loot list, leaving it empty.
    ///
    /// A second call returns nothing, so loot drops exactly once.
    pub fn drop_loot(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.loot)
    }

    /// Overwrite current health (clamped), e.g. when restoring a save.
    pub fn set_health(&mut self, current: u32) {
        self.health.set(current);
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> CombatStats {
        self.stats
    }

    fn vitals(&self) -> &Health {
        &self.health
    }

    fn vitals_mut(&mut self) -> &mut Health {
        &mut self.health
    }
}

/// An enemy with a special ability on a cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    enemy: Enemy,
    special_ability: String,
    cooldown: u32,
}

impl Boss {
    /// Wrap an enemy as a boss. The ability starts ready (cooldown 0).
    pub fn new(enemy: Enemy, special_ability: impl Into<String>) -> CoreResult<Self> {
        let special_ability = special_ability.into();
        if special_ability.trim().is_empty() {
            return Err(CoreError::EmptyField("special ability name"));
        }
        Ok(Self {
            enemy,
            special_ability,
            cooldown: 0,
        })
    }

    /// The underlying enemy.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Mutable access to the underlying enemy.
    pub fn enemy_mut(&mut self) -> &mut Enemy {
        &mut self.enemy
    }

    /// Name of the special ability.
    pub fn special_ability(&self) -> &str {
        &self.special_ability
    }

    /// Turns until the special ability is ready again.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Whether the special ability may trigger this turn.
    pub fn special_ready(&self) -> bool {
        self.cooldown == 0
    }

    /// Count the cooldown down by one, stopping at zero.
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Put the ability on full cooldown after use.
    pub fn reset_cooldown(&mut self) {
        self.cooldown = BOSS_MAX_COOLDOWN;
    }

    /// Overwrite the cooldown (capped at the maximum), e.g. when restoring a save.
    pub fn set_cooldown(&mut self, cooldown: u32) {
        self.cooldown = cooldown.min(BOSS_MAX_COOLDOWN);
    }

    /// Pre-mitigation damage of the special ability: `floor(attack * 1.5)`.
    pub fn special_damage(&self) -> u32 {
        (f64::from(self.enemy.stats.attack_power) * BOSS_SPECIAL_FACTOR).floor() as u32
    }
}

impl Combatant for Boss {
    fn name(&self) -> &str {
        self.enemy.name()
    }

    fn stats(&self) -> CombatStats {
        self.enemy.stats()
    }

    fn vitals(&self) -> &Health {
        self.enemy.vitals()
    }

    fn vitals_mut(&mut self) -> &mut Health {
        self.enemy.vitals_mut()
    }
}

/// Either kind of hostile combatant found in a room.
#[derive(Debug, Clone, PartialEq)]
pub enum Foe {
    /// A regular enemy.
    Enemy(Enemy),
    /// A boss.
    Boss(Boss),
}

impl Foe {
    /// The enemy part, shared by both variants.
    pub fn enemy(&self) -> &Enemy {
        match self {
            Self::Enemy(enemy) => enemy,
            Self::Boss(boss) => boss.enemy(),
        }
    }

    /// Mutable access to the enemy part.
    pub fn enemy_mut(&mut self) -> &mut Enemy {
        match self {
            Self::Enemy(enemy) => enemy,
            Self::Boss(boss) => boss.enemy_mut(),
        }
    }

    /// The boss, if this foe is one.
    pub fn as_boss(&self) -> Option<&Boss> {
        match self {
            Self::Boss(boss) => Some(boss),
            Self::Enemy(_) => None,
        }
    }

    /// Returns true for bosses.
    pub fn is_boss(&self) -> bool {
        matches!(self, Self::Boss(_))
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name()
            .to_lowercase()
            .contains(&fragment.trim().to_lowercase())
    }

    /// Hand over the loot list exactly once.
    pub fn drop_loot(&mut self) -> Vec<Item> {
        self.enemy_mut().drop_loot()
    }
}

impl From<Enemy> for Foe {
    fn from(enemy: Enemy) -> Self {
        Self::Enemy(enemy)
    }
}

impl From<Boss> for Foe {
    fn from(boss: Boss) -> Self {
        Self::Boss(boss)
    }
}

impl Combatant for Foe {
    fn name(&self) -> &str {
        self.enemy().name()
    }

    fn stats(&self) -> CombatStats {
        self.enemy().stats()
    }

    fn vitals(&self) -> &Health {
        self.enemy().vitals()
    }

    fn vitals_mut(&mut self) -> &mut Health {
        self.enemy_mut().vitals_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Enemy {
        Enemy::new("Goblin", "A fierce goblin", 50, 12, 3).unwrap()
    }

    #[test]
    fn creates_enemy_with_full_health() {
        let e = goblin();
        assert_eq!(e.name(), "Goblin");
        assert_eq!(e.health(), 50);
        assert_eq!(e.max_health(), 50);
        assert_eq!(e.stats().attack_power, 12);
        assert_eq!(e.stats().defense, 3);
        assert!(e.is_alive());
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            Enemy::new("", "desc", 10, 5, 0),
            Err(CoreError::EmptyField("enemy name"))
        );
        assert_eq!(
            Enemy::new("name", "desc", 0, 5, 0),
            Err(CoreError::NotPositive("max health"))
        );
    }

    #[test]
    fn take_hit_subtracts_defense() {
        let mut e = goblin();
        assert_eq!(e.take_hit(10), 7);
        assert_eq!(e.health(), 43);
    }

    #[test]
    fn take_hit_below_defense_does_nothing() {
        let mut e = goblin();
        assert_eq!(e.take_hit(2), 0);
        assert_eq!(e.health(), 50);
    }

    #[test]
    fn take_hit_floors_at_zero() {
        let mut e = goblin();
        e.take_hit(100);
        assert_eq!(e.health(), 0);
        assert!(e.is_dead());
    }

    #[test]
    fn loot_drops_exactly_once() {
        let gold = Item::misc("Gold", "Shiny gold").unwrap();
        let mut e = goblin().with_loot(gold.clone());
        assert_eq!(e.loot(), &[gold.clone()]);

        let dropped = e.drop_loot();
        assert_eq!(dropped, vec![gold]);
        assert!(e.loot().is_empty());
        assert!(e.drop_loot().is_empty());
    }

    #[test]
    fn boss_cooldown_cycle() {
        let mut boss = Boss::new(
            Enemy::new("Dark Lord", "Evil", 100, 20, 10).unwrap(),
            "Shadow Strike",
        )
        .unwrap();
        assert!(boss.special_ready());
        assert_eq!(boss.special_damage(), 30);

        boss.reset_cooldown();
        assert_eq!(boss.cooldown(), BOSS_MAX_COOLDOWN);
        for _ in 0..5 {
            boss.tick_cooldown();
        }
        assert_eq!(boss.cooldown(), 0);

        boss.set_cooldown(10);
        assert_eq!(boss.cooldown(), BOSS_MAX_COOLDOWN);
    }

    #[test]
    fn boss_special_damage_floors() {
        let boss = Boss::new(Enemy::new("Wyrm", "Old", 80, 15, 0).unwrap(), "Flame").unwrap();
        assert_eq!(boss.special_damage(), 22);
    }

    #[test]
    fn boss_requires_ability_name() {
        let err = Boss::new(goblin(), " ");
        assert_eq!(err, Err(CoreError::EmptyField("special ability name")));
    }

    #[test]
    fn foe_delegates() {
        let mut foe = Foe::from(goblin());
        assert!(!foe.is_boss());
        assert!(foe.name_contains("gob"));
        foe.take_hit(13);
        assert_eq!(foe.enemy().health(), 40);

        let boss = Boss::new(goblin(), "Bite").unwrap();
        let foe = Foe::from(boss);
        assert!(foe.is_boss());
        assert_eq!(foe.as_boss().unwrap().special_ability(), "Bite");
    }
}
