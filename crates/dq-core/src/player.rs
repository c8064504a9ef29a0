//! The player character.
//!
//! Equipment bonuses are never folded into the stored stats. The player
//! keeps its base stats and [`Combatant::stats`] derives the effective
//! values from whatever sits in the weapon and armor slots, so unequipping
//! always restores the exact pre-equip numbers.

use crate::error::{CoreError, CoreResult};
use crate::health::Health;
use crate::item::{Item, ItemKind, Slot};
use crate::stats::{CombatStats, Combatant};

/// Starting maximum health.
pub const DEFAULT_MAX_HEALTH: u32 = 100;

/// Starting base stats.
pub const DEFAULT_STATS: CombatStats = CombatStats {
    attack_power: 10,
    defense: 5,
    dodge_chance: 0.1,
    block_chance: 0.1,
    crit_chance: 0.1,
    crit_multiplier: 1.5,
};

/// What changed when an item was equipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Equipped {
    /// The slot that was filled.
    pub slot: Slot,
    /// Name of the newly equipped item.
    pub item: String,
    /// Name of the item that was moved back to the inventory, if any.
    pub replaced: Option<String>,
}

/// The effect of using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseEffect {
    /// Hit points actually restored.
    Healed(u32),
}

/// The player: a combatant with an inventory and two equipment slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    health: Health,
    base: CombatStats,
    inventory: Vec<Item>,
    weapon: Option<Item>,
    armor: Option<Item>,
}

impl Player {
    /// Create a player with default health and stats.
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("player name"));
        }
        Ok(Self {
            name,
            health: Health::new(DEFAULT_MAX_HEALTH)?,
            base: DEFAULT_STATS,
            inventory: Vec::new(),
            weapon: None,
            armor: None,
        })
    }

    /// Replace the base stats, builder style.
    pub fn with_base_stats(mut self, stats: CombatStats) -> CoreResult<Self> {
        self.set_base_stats(stats)?;
        Ok(self)
    }

    /// Replace the health track, builder style.
    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    /// Stats without equipment bonuses.
    pub fn base_stats(&self) -> CombatStats {
        self.base
    }

    /// Replace the base stats after validating them.
    pub fn set_base_stats(&mut self, stats: CombatStats) -> CoreResult<()> {
        stats.validate()?;
        self.base = stats;
        Ok(())
    }

    /// Overwrite current health (clamped).
    pub fn set_health(&mut self, current: u32) {
        self.health.set(current);
    }

    /// Items carried but not equipped.
    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// The equipped weapon.
    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    /// The equipped armor.
    pub fn armor(&self) -> Option<&Item> {
        self.armor.as_ref()
    }

    /// Add an item to the inventory. Nothing is equipped automatically.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove the first inventory item with the given name.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let pos = self.inventory.iter().position(|i| i.matches_name(name))?;
        Some(self.inventory.remove(pos))
    }

    /// Whether the inventory holds an item with the given name.
    pub fn has_item(&self, name: &str) -> bool {
        self.find_item(name).is_some()
    }

    /// Find an inventory item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.matches_name(name))
    }

    /// Move an item from the inventory into its slot.
    ///
    /// Whatever occupied the slot goes back to the inventory first.
    pub fn equip(&mut self, name: &str) -> CoreResult<Equipped> {
        let item = self
            .find_item(name)
            .ok_or_else(|| CoreError::ItemNotInInventory(name.to_string()))?;
        let slot = item
            .kind()
            .slot()
            .ok_or_else(|| CoreError::NotEquippable(item.name().to_string()))?;

        let replaced = self.slot_mut(slot).take().map(|old| {
            let old_name = old.name().to_string();
            self.inventory.push(old);
            old_name
        });

        let item = self
            .remove_item(name)
            .ok_or_else(|| CoreError::ItemNotInInventory(name.to_string()))?;
        let equipped = item.name().to_string();
        *self.slot_mut(slot) = Some(item);

        Ok(Equipped {
            slot,
            item: equipped,
            replaced,
        })
    }

    /// Move an equipped item back to the inventory.
    pub fn unequip(&mut self, name: &str) -> CoreResult<Item> {
        let slot = [Slot::Weapon, Slot::Armor]
            .into_iter()
            .find(|&slot| {
                self.slot(slot)
                    .is_some_and(|equipped| equipped.matches_name(name))
            })
            .ok_or_else(|| CoreError::NotEquipped(name.to_string()))?;

        let item = self
            .slot_mut(slot)
            .take()
            .ok_or_else(|| CoreError::NotEquipped(name.to_string()))?;
        self.inventory.push(item.clone());
        Ok(item)
    }

    /// Put items straight into the slots, e.g. when restoring a save.
    pub fn restore_equipment(
        &mut self,
        weapon: Option<Item>,
        armor: Option<Item>,
    ) -> CoreResult<()> {
        for (item, slot) in [(&weapon, Slot::Weapon), (&armor, Slot::Armor)] {
            if let Some(item) = item {
                if item.kind().slot() != Some(slot) {
                    return Err(CoreError::WrongSlot {
                        item: item.name().to_string(),
                        slot: slot.name(),
                    });
                }
            }
        }
        self.weapon = weapon;
        self.armor = armor;
        Ok(())
    }

    /// Use an item from the inventory. Potions heal and are consumed.
    pub fn use_item(&mut self, name: &str) -> CoreResult<UseEffect> {
        let item = self
            .find_item(name)
            .ok_or_else(|| CoreError::ItemNotInInventory(name.to_string()))?;
        let heal_amount = match item.kind() {
            ItemKind::Potion { heal_amount } => *heal_amount,
            _ => return Err(CoreError::NotUsable(item.name().to_string())),
        };
        let healed = self.health.heal(heal_amount);
        self.remove_item(name);
        Ok(UseEffect::Healed(healed))
    }

    /// Numbered inventory listing.
    pub fn inventory_list(&self) -> String {
        if self.inventory.is_empty() {
            return "Inventory is empty".to_string();
        }
        self.inventory
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn slot(&self, slot: Slot) -> Option<&Item> {
        match slot {
            Slot::Weapon => self.weapon.as_ref(),
            Slot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Item> {
        match slot {
            Slot::Weapon => &mut self.weapon,
            Slot::Armor => &mut self.armor,
        }
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> CombatStats {
        let mut stats = self.base;
        if let Some(ItemKind::Weapon {
            attack_bonus,
            crit_bonus,
        }) = self.weapon.as_ref().map(Item::kind)
        {
            stats.attack_power = stats.attack_power.saturating_add(*attack_bonus);
            stats.crit_chance = (stats.crit_chance + crit_bonus).min(1.0);
        }
        if let Some(ItemKind::Armor {
            defense_bonus,
            dodge_bonus,
            block_bonus,
        }) = self.armor.as_ref().map(Item::kind)
        {
            stats.defense = stats.defense.saturating_add(*defense_bonus);
            stats.dodge_chance = (stats.dodge_chance + dodge_bonus).min(1.0);
            stats.block_chance = (stats.block_chance + block_bonus).min(1.0);
        }
        stats
    }

    fn vitals(&self) -> &Health {
        &self.health
    }

    fn vitals_mut(&mut self) -> &mut Health {
        &mut self.health
    }
}
