//! The room graph.
//!
//! Rooms live in an arena keyed by a stable room key (`"entrance"`,
//! `"throne_room"`). Exits store target keys, so cycles in the graph need
//! no shared ownership. A lowercase name index maps display names back to
//! keys, which is how persisted connections are resolved.

use std::collections::{BTreeMap, HashMap};

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::room::Room;

/// All rooms of a game, keyed by stable room key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    rooms: BTreeMap<String, Room>,

    // Index
    by_name_lower: HashMap<String, String>,
}

impl World {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    /// Add a room under `key`. Keys and names (case-insensitive) are unique.
    pub fn add_room(&mut self, key: impl Into<String>, room: Room) -> CoreResult<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CoreError::EmptyField("room key"));
        }
        if self.rooms.contains_key(&key) {
            return Err(CoreError::DuplicateRoom(key));
        }
        let name_lower = room.name().to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(CoreError::DuplicateRoom(room.name().to_string()));
        }
        self.by_name_lower.insert(name_lower, key.clone());
        self.rooms.insert(key, room);
        Ok(())
    }

    /// Room by key.
    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    /// Mutable room by key.
    pub fn room_mut(&mut self, key: &str) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }

    /// Room by key, or [`CoreError::RoomNotFound`].
    pub fn get(&self, key: &str) -> CoreResult<&Room> {
        self.room(key)
            .ok_or_else(|| CoreError::RoomNotFound(key.to_string()))
    }

    /// Mutable room by key, or [`CoreError::RoomNotFound`].
    pub fn get_mut(&mut self, key: &str) -> CoreResult<&mut Room> {
        self.rooms
            .get_mut(key)
            .ok_or_else(|| CoreError::RoomNotFound(key.to_string()))
    }

    /// Whether a room with this key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.rooms.contains_key(key)
    }

    /// Rooms in key order.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &Room)> {
        self.rooms.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the world has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Key of the room with this display name (case-insensitive).
    pub fn find_key_by_name(&self, name: &str) -> Option<&str> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// Add an exit from `from` to `to`. A bidirectional connection also adds
    /// the opposite exit from `to` back to `from`.
    pub fn connect(
        &mut self,
        from: &str,
        direction: Direction,
        to: &str,
        bidirectional: bool,
    ) -> CoreResult<()> {
        if from == to {
            return Err(CoreError::SelfConnection(from.to_string()));
        }
        if !self.contains(to) {
            return Err(CoreError::RoomNotFound(to.to_string()));
        }
        self.get_mut(from)?.set_exit(direction, to.to_string());
        if bidirectional {
            self.get_mut(to)?
                .set_exit(direction.opposite(), from.to_string());
        }
        Ok(())
    }

    /// Key of the room reached from `key` by `direction`.
    pub fn neighbor(&self, key: &str, direction: Direction) -> Option<&str> {
        self.room(key)?.exit(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let mut w = World::new();
        w.add_room("entrance", Room::new("Entrance Hall", "Cold stone").unwrap())
            .unwrap();
        w.add_room("library", Room::new("Library", "Dusty books").unwrap())
            .unwrap();
        w
    }

    #[test]
    fn duplicate_key_and_name_rejected() {
        let mut w = world();
        assert_eq!(
            w.add_room("library", Room::new("Other", "d").unwrap()),
            Err(CoreError::DuplicateRoom("library".into()))
        );
        assert_eq!(
            w.add_room("lib2", Room::new("LIBRARY", "d").unwrap()),
            Err(CoreError::DuplicateRoom("LIBRARY".into()))
        );
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn bidirectional_connection() {
        let mut w = world();
        w.connect("entrance", Direction::North, "library", true)
            .unwrap();
        assert_eq!(w.neighbor("entrance", Direction::North), Some("library"));
        assert_eq!(w.neighbor("library", Direction::South), Some("entrance"));
    }

    #[test]
    fn one_way_connection() {
        let mut w = world();
        w.connect("entrance", Direction::Down, "library", false)
            .unwrap();
        assert_eq!(w.neighbor("entrance", Direction::Down), Some("library"));
        assert_eq!(w.neighbor("library", Direction::Up), None);
    }

    #[test]
    fn connection_errors() {
        let mut w = world();
        assert_eq!(
            w.connect("entrance", Direction::East, "entrance", false),
            Err(CoreError::SelfConnection("entrance".into()))
        );
        assert_eq!(
            w.connect("entrance", Direction::East, "vault", false),
            Err(CoreError::RoomNotFound("vault".into()))
        );
        assert_eq!(
            w.connect("vault", Direction::East, "entrance", false),
            Err(CoreError::RoomNotFound("vault".into()))
        );
    }

    #[test]
    fn name_index_is_case_insensitive() {
        let w = world();
        assert_eq!(w.find_key_by_name("entrance hall"), Some("entrance"));
        assert_eq!(w.find_key_by_name("Kitchen"), None);
    }
}
