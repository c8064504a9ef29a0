//! The save document schema.
//!
//! One document type per entity. Every field is explicit, so a document
//! either deserializes into exactly this shape or is rejected as malformed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dq_core::{CombatStats, Direction, ItemKind, NpcState, PuzzleKind};
use serde::{Deserialize, Serialize};

use crate::error::{SaveError, SaveResult};

/// Current document version.
pub const SAVE_VERSION: u32 = 1;

fn default_true() -> bool {
    true
}

/// A complete saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    /// Schema version; see [`SAVE_VERSION`].
    pub version: u32,
    /// When the document was captured.
    pub saved_at: DateTime<Utc>,
    /// The player.
    pub player: PlayerDoc,
    /// Key of the room the player stands in.
    pub current_room: String,
    /// Every room, by room key.
    pub rooms: BTreeMap<String, RoomDoc>,
    /// Whether flavor narration was switched on.
    #[serde(default = "default_true")]
    pub narrator_enabled: bool,
}

impl SaveDocument {
    /// Reject documents written by an unknown schema version.
    pub fn check_version(&self) -> SaveResult<()> {
        if self.version == SAVE_VERSION {
            Ok(())
        } else {
            Err(SaveError::Malformed(format!(
                "unsupported save version {} (expected {SAVE_VERSION})",
                self.version
            )))
        }
    }
}

/// Combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsDoc {
    /// Attack power.
    pub attack_power: u32,
    /// Defense.
    pub defense: u32,
    /// Dodge probability.
    #[serde(default)]
    pub dodge_chance: f64,
    /// Block probability.
    #[serde(default)]
    pub block_chance: f64,
    /// Critical-hit probability.
    #[serde(default)]
    pub crit_chance: f64,
    /// Critical-hit multiplier.
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
}

fn default_crit_multiplier() -> f64 {
    dq_core::stats::DEFAULT_CRIT_MULTIPLIER
}

impl From<CombatStats> for StatsDoc {
    fn from(s: CombatStats) -> Self {
        Self {
            attack_power: s.attack_power,
            defense: s.defense,
            dodge_chance: s.dodge_chance,
            block_chance: s.block_chance,
            crit_chance: s.crit_chance,
            crit_multiplier: s.crit_multiplier,
        }
    }
}

impl From<StatsDoc> for CombatStats {
    fn from(d: StatsDoc) -> Self {
        CombatStats::new(d.attack_power, d.defense)
            .with_dodge_chance(d.dodge_chance)
            .with_block_chance(d.block_chance)
            .with_crit_chance(d.crit_chance)
            .with_crit_multiplier(d.crit_multiplier)
    }
}

/// An item, stored by full value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDoc {
    /// Item name; also the catalog key.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Variant tag and variant fields, inlined.
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// The player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDoc {
    /// Player name.
    pub name: String,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Base stats, without equipment bonuses.
    #[serde(flatten)]
    pub stats: StatsDoc,
    /// Carried items.
    #[serde(default)]
    pub inventory: Vec<ItemDoc>,
    /// Weapon slot.
    #[serde(default)]
    pub equipped_weapon: Option<ItemDoc>,
    /// Armor slot.
    #[serde(default)]
    pub equipped_armor: Option<ItemDoc>,
}

/// Special-ability state of a boss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossDoc {
    /// Ability name.
    pub special_ability: String,
    /// Turns until the ability is ready again.
    pub cooldown: u32,
}

/// An enemy or boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDoc {
    /// Enemy name; also the catalog key.
    pub name: String,
    /// Enemy description.
    pub description: String,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Combat stats.
    #[serde(flatten)]
    pub stats: StatsDoc,
    /// Loot not yet dropped.
    #[serde(default)]
    pub loot: Vec<ItemDoc>,
    /// Present for bosses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossDoc>,
}

/// A puzzle with its progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDoc {
    /// Puzzle name; also the catalog key.
    pub name: String,
    /// Puzzle description.
    pub description: String,
    /// Variant tag and expected answer, inlined.
    #[serde(flatten)]
    pub kind: PuzzleKind,
    /// Attempt limit.
    pub max_attempts: u32,
    /// Attempts remaining.
    pub attempts_left: u32,
    /// Whether it was solved.
    pub solved: bool,
    /// Reward item.
    #[serde(default)]
    pub reward: Option<ItemDoc>,
}

/// An NPC with its conversation progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcDoc {
    /// NPC name; also the catalog key.
    pub name: String,
    /// NPC description.
    pub description: String,
    /// Dialogue lines.
    pub dialogue: Vec<String>,
    /// Conversation state.
    #[serde(default)]
    pub state: NpcState,
    /// Times talked to.
    #[serde(default)]
    pub talked_count: u32,
    /// Index of the next line.
    #[serde(default)]
    pub dialogue_index: usize,
}

/// A room, its contents, and its outgoing connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDoc {
    /// Room name, used to resolve connections.
    pub name: String,
    /// Room description.
    pub description: String,
    /// Visited flag.
    #[serde(default)]
    pub visited: bool,
    /// Locked flag.
    #[serde(default)]
    pub locked: bool,
    /// Key that unlocks the room.
    #[serde(default)]
    pub required_key: Option<String>,
    /// Items on the floor.
    #[serde(default)]
    pub items: Vec<ItemDoc>,
    /// Enemies, dead or alive.
    #[serde(default)]
    pub enemies: Vec<EnemyDoc>,
    /// NPCs.
    #[serde(default)]
    pub npcs: Vec<NpcDoc>,
    /// Puzzles.
    #[serde(default)]
    pub puzzles: Vec<PuzzleDoc>,
    /// Direction to target room *name*.
    #[serde(default)]
    pub connections: BTreeMap<Direction, String>,
}
