//! Items and equipment bonuses.
//!
//! An item is an immutable value: a name, a description, and an
//! [`ItemKind`] tag carrying only the bonuses relevant to that kind.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::stats::check_chance;

/// Category of an item and its category-specific numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Wielded in the weapon slot.
    Weapon {
        /// Added to attack power while equipped.
        attack_bonus: u32,
        /// Added to crit chance while equipped.
        #[serde(default)]
        crit_bonus: f64,
    },
    /// Worn in the armor slot.
    Armor {
        /// Added to defense while equipped.
        defense_bonus: u32,
        /// Added to dodge chance while equipped.
        #[serde(default)]
        dodge_bonus: f64,
        /// Added to block chance while equipped.
        #[serde(default)]
        block_bonus: f64,
    },
    /// Single-use healing.
    Potion {
        /// Hit points restored on use.
        heal_amount: u32,
    },
    /// Opens locked rooms (unlocking is a separate action).
    Key,
    /// Anything else.
    Misc,
}

impl ItemKind {
    /// Lowercase tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Weapon { .. } => "weapon",
            Self::Armor { .. } => "armor",
            Self::Potion { .. } => "potion",
            Self::Key => "key",
            Self::Misc => "misc",
        }
    }

    /// The equipment slot this kind goes into, if any.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Self::Weapon { .. } => Some(Slot::Weapon),
            Self::Armor { .. } => Some(Slot::Armor),
            _ => None,
        }
    }
}

/// Equipment slots on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Holds one weapon.
    Weapon,
    /// Holds one piece of armor.
    Armor,
}

impl Slot {
    /// Lowercase slot name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
        }
    }
}

/// An immutable item value.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    description: String,
    kind: ItemKind,
}

impl Item {
    /// Create an item, validating its text and bonuses.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
    ) -> CoreResult<Self> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("item name"));
        }
        if description.trim().is_empty() {
            return Err(CoreError::EmptyField("item description"));
        }
        match &kind {
            ItemKind::Weapon { crit_bonus, .. } => check_chance("crit bonus", *crit_bonus)?,
            ItemKind::Armor {
                dodge_bonus,
                block_bonus,
                ..
            } => {
                check_chance("dodge bonus", *dodge_bonus)?;
                check_chance("block bonus", *block_bonus)?;
            }
            ItemKind::Potion { heal_amount: 0 } => {
                return Err(CoreError::NotPositive("heal amount"));
            }
            _ => {}
        }
        Ok(Self {
            name,
            description,
            kind,
        })
    }

    /// A weapon with an attack bonus and no crit bonus.
    pub fn weapon(
        name: impl Into<String>,
        description: impl Into<String>,
        attack_bonus: u32,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            description,
            ItemKind::Weapon {
                attack_bonus,
                crit_bonus: 0.0,
            },
        )
    }

    /// Armor with a defense bonus and no dodge or block bonus.
    pub fn armor(
        name: impl Into<String>,
        description: impl Into<String>,
        defense_bonus: u32,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            description,
            ItemKind::Armor {
                defense_bonus,
                dodge_bonus: 0.0,
                block_bonus: 0.0,
            },
        )
    }

    /// A healing potion.
    pub fn potion(
        name: impl Into<String>,
        description: impl Into<String>,
        heal_amount: u32,
    ) -> CoreResult<Self> {
        Self::new(name, description, ItemKind::Potion { heal_amount })
    }

    /// A key.
    pub fn key(name: impl Into<String>, description: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, description, ItemKind::Key)
    }

    /// A miscellaneous item with no effect.
    pub fn misc(name: impl Into<String>, description: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, description, ItemKind::Misc)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Kind and bonuses.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Weapons and armor can be equipped.
    pub fn is_equippable(&self) -> bool {
        self.kind.slot().is_some()
    }

    /// Only potions have a use effect.
    pub fn is_usable(&self) -> bool {
        matches!(self.kind, ItemKind::Potion { .. })
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}
