//! Prototype lookup tables used when restoring a save.
//!
//! A prototype supplies the static definition of an entity (description,
//! stats, dialogue, expected answer). Restoring always clones it, so a
//! restored entity never shares state with the prototype or with another
//! restore.

use std::collections::HashMap;

use dq_core::{Combatant, Foe, Item, Npc, Puzzle, Room, World};

/// Prototypes keyed by display name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
    enemies: HashMap<String, Foe>,
    puzzles: HashMap<String, Puzzle>,
    npcs: HashMap<String, Npc>,
}

impl Catalog {
    /// An empty catalog: every entity is rebuilt from the document alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item prototype. A later registration replaces an earlier one.
    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.name().to_string(), item);
    }

    /// Register an enemy or boss prototype. Its loot is registered too.
    pub fn add_enemy(&mut self, enemy: impl Into<Foe>) {
        let enemy = enemy.into();
        for item in enemy.enemy().loot() {
            self.add_item(item.clone());
        }
        self.enemies.insert(enemy.name().to_string(), enemy);
    }

    /// Register a puzzle prototype. Its reward is registered too.
    pub fn add_puzzle(&mut self, puzzle: Puzzle) {
        if let Some(reward) = puzzle.reward() {
            self.add_item(reward.clone());
        }
        self.puzzles.insert(puzzle.name().to_string(), puzzle);
    }

    /// Register an NPC prototype.
    pub fn add_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.name().to_string(), npc);
    }

    /// Register everything found in a room.
    pub fn add_room_contents(&mut self, room: &Room) {
        for item in room.items() {
            self.add_item(item.clone());
        }
        for enemy in room.enemies() {
            self.add_enemy(enemy.clone());
        }
        for puzzle in room.puzzles() {
            self.add_puzzle(puzzle.clone());
        }
        for npc in room.npcs() {
            self.add_npc(npc.clone());
        }
    }

    /// Build a catalog from a freshly built world.
    pub fn from_world(world: &World) -> Self {
        let mut catalog = Self::new();
        for (_, room) in world.rooms() {
            catalog.add_room_contents(room);
        }
        catalog
    }

    /// Item prototype by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Enemy prototype by name.
    pub fn enemy(&self, name: &str) -> Option<&Foe> {
        self.enemies.get(name)
    }

    /// Puzzle prototype by name.
    pub fn puzzle(&self, name: &str) -> Option<&Puzzle> {
        self.puzzles.get(name)
    }

    /// NPC prototype by name.
    pub fn npc(&self, name: &str) -> Option<&Npc> {
        self.npcs.get(name)
    }

    /// Number of registered prototypes of all kinds.
    pub fn len(&self) -> usize {
        self.items.len() + self.enemies.len() + self.puzzles.len() + self.npcs.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
