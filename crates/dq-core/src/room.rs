//! Rooms and their contents.
//!
//! Exits point at room keys, not at rooms. The [`World`](crate::World)
//! owns every room and is the only place exits are wired, so a room never
//! holds a reference to another room.

use std::collections::BTreeMap;

use crate::direction::Direction;
use crate::enemy::Foe;
use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::npc::Npc;
use crate::puzzle::Puzzle;
use crate::stats::Combatant;

/// A location in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    name: String,
    description: String,
    items: Vec<Item>,
    enemies: Vec<Foe>,
    npcs: Vec<Npc>,
    puzzles: Vec<Puzzle>,
    exits: BTreeMap<Direction, String>,
    locked: bool,
    required_key: Option<String>,
    visited: bool,
}

impl Room {
    /// Create an empty, unlocked, unvisited room.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("room name"));
        }
        if description.trim().is_empty() {
            return Err(CoreError::EmptyField("room description"));
        }
        Ok(Self {
            name,
            description,
            items: Vec::new(),
            enemies: Vec::new(),
            npcs: Vec::new(),
            puzzles: Vec::new(),
            exits: BTreeMap::new(),
            locked: false,
            required_key: None,
            visited: false,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base description.
    pub fn description(&self) -> &str {
        &self.description
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Items lying in the room.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Drop an item into the room.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Builder form of [`add_item`](Self::add_item).
    pub fn with_item(mut self, item: Item) -> Self {
        self.add_item(item);
        self
    }

    /// Find an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.matches_name(name))
    }

    /// Remove and return the first item with the given name.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.matches_name(name))?;
        Some(self.items.remove(pos))
    }

    // -----------------------------------------------------------------------
    // Enemies
    // -----------------------------------------------------------------------

    /// All enemies, dead or alive, in placement order.
    pub fn enemies(&self) -> &[Foe] {
        &self.enemies
    }

    /// Mutable access to the enemy list.
    pub fn enemies_mut(&mut self) -> &mut [Foe] {
        &mut self.enemies
    }

    /// Place an enemy or boss.
    pub fn add_enemy(&mut self, enemy: impl Into<Foe>) {
        self.enemies.push(enemy.into());
    }

    /// Builder form of [`add_enemy`](Self::add_enemy).
    pub fn with_enemy(mut self, enemy: impl Into<Foe>) -> Self {
        self.add_enemy(enemy);
        self
    }

    /// Enemies that are still alive.
    pub fn alive_enemies(&self) -> impl Iterator<Item = &Foe> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    /// Whether any enemy is still alive.
    pub fn has_enemies(&self) -> bool {
        self.alive_enemies().next().is_some()
    }

    /// Index of the enemy an attack should target.
    ///
    /// Without a name, the first living enemy. With a name, the first living
    /// enemy whose name contains it (case-insensitive).
    pub fn target_index(&self, name: Option<&str>) -> Option<usize> {
        self.enemies.iter().position(|e| {
            e.is_alive() && name.is_none_or(|fragment| e.name_contains(fragment))
        })
    }

    /// Mutable enemy by index.
    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Foe> {
        self.enemies.get_mut(index)
    }

    // -----------------------------------------------------------------------
    // NPCs
    // -----------------------------------------------------------------------

    /// NPCs in the room.
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Place an NPC.
    pub fn add_npc(&mut self, npc: Npc) {
        self.npcs.push(npc);
    }

    /// Builder form of [`add_npc`](Self::add_npc).
    pub fn with_npc(mut self, npc: Npc) -> Self {
        self.add_npc(npc);
        self
    }

    /// Find an NPC by name (case-insensitive); with no name, the first NPC.
    pub fn find_npc_mut(&mut self, name: Option<&str>) -> Option<&mut Npc> {
        match name {
            Some(name) => self.npcs.iter_mut().find(|n| n.matches_name(name)),
            None => self.npcs.first_mut(),
        }
    }

    // -----------------------------------------------------------------------
    // Puzzles
    // -----------------------------------------------------------------------

    /// Puzzles in the room.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// Place a puzzle.
    pub fn add_puzzle(&mut self, puzzle: Puzzle) {
        self.puzzles.push(puzzle);
    }

    /// Builder form of [`add_puzzle`](Self::add_puzzle).
    pub fn with_puzzle(mut self, puzzle: Puzzle) -> Self {
        self.add_puzzle(puzzle);
        self
    }

    /// Whether an unsolved puzzle is present.
    pub fn has_puzzle(&self) -> bool {
        self.puzzles.iter().any(|p| !p.is_solved())
    }

    /// Puzzles that can still be attempted.
    pub fn active_puzzles(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter().filter(|p| p.can_attempt())
    }

    /// Puzzle whose name contains `fragment` (case-insensitive). Active
    /// puzzles win; a solved or exhausted match is returned only if no
    /// active one matches.
    pub fn find_puzzle_mut(&mut self, fragment: &str) -> Option<&mut Puzzle> {
        let fragment = fragment.trim().to_lowercase();
        let matches = |p: &Puzzle| p.name().to_lowercase().contains(&fragment);
        let index = self
            .puzzles
            .iter()
            .position(|p| p.can_attempt() && matches(p))
            .or_else(|| self.puzzles.iter().position(&matches))?;
        self.puzzles.get_mut(index)
    }

    // -----------------------------------------------------------------------
    // Exits
    // -----------------------------------------------------------------------

    /// Exit map: direction to target room key.
    pub fn exits(&self) -> &BTreeMap<Direction, String> {
        &self.exits
    }

    /// Target room key of an exit.
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        self.exits.get(&direction).map(String::as_str)
    }

    pub(crate) fn set_exit(&mut self, direction: Direction, target_key: String) {
        self.exits.insert(direction, target_key);
    }

    // -----------------------------------------------------------------------
    // Lock and visit flags
    // -----------------------------------------------------------------------

    /// Lock the room, optionally naming the key that opens it.
    pub fn lock(&mut self, required_key: Option<String>) {
        self.locked = true;
        self.required_key = required_key;
    }

    /// Builder form of [`lock`](Self::lock).
    pub fn locked_with(mut self, required_key: impl Into<String>) -> Self {
        self.lock(Some(required_key.into()));
        self
    }

    /// Unlock the room. The required key name is kept for display.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Whether the room is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Name of the key that unlocks the room.
    pub fn required_key(&self) -> Option<&str> {
        self.required_key.as_deref()
    }

    /// Whether the room can be entered.
    ///
    /// Holding the key is not enough: a locked room stays closed until it
    /// has been unlocked explicitly.
    pub fn can_enter(&self) -> bool {
        !self.locked
    }

    /// Whether the player has been here.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Mark the room visited.
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Overwrite the visited flag.
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// "Available exits: north, east" or "No exits available".
    pub fn exits_description(&self) -> String {
        if self.exits.is_empty() {
            return "No exits available".to_string();
        }
        let names: Vec<&str> = self.exits.keys().map(|d| d.name()).collect();
        format!("Available exits: {}", names.join(", "))
    }

    /// Description plus items, living enemies, NPCs, open puzzle, and exits.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.description.clone()];
        if !self.items.is_empty() {
            let names: Vec<&str> = self.items.iter().map(Item::name).collect();
            parts.push(format!("You see: {}", names.join(", ")));
        }
        if self.has_enemies() {
            let names: Vec<&str> = self.alive_enemies().map(|e| e.name()).collect();
            parts.push(format!("Enemies: {}", names.join(", ")));
        }
        if !self.npcs.is_empty() {
            let names: Vec<&str> = self.npcs.iter().map(Npc::name).collect();
            parts.push(format!("People here: {}", names.join(", ")));
        }
        if let Some(puzzle) = self.active_puzzles().next() {
            parts.push(format!("There is a puzzle here: {}", puzzle.name()));
        }
        parts.push(self.exits_description());
        parts.join("\n")
    }
}
