//! The complete state of a game in progress.

use crate::error::{CoreError, CoreResult};
use crate::player::Player;
use crate::room::Room;
use crate::world::World;

/// World, player, and the key of the room the player stands in.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Every room in the game.
    pub world: World,
    /// The player character.
    pub player: Player,
    current_room: String,
}

impl GameState {
    /// Place `player` in the room with key `current_room`.
    ///
    /// The starting room is marked visited.
    pub fn new(world: World, player: Player, current_room: impl Into<String>) -> CoreResult<Self> {
        let current_room = current_room.into();
        let mut state = Self {
            world,
            player,
            current_room,
        };
        state.world.get_mut(&state.current_room)?.mark_visited();
        Ok(state)
    }

    /// Rebuild a state without touching any room flags.
    pub fn restore(world: World, player: Player, current_room: impl Into<String>) -> CoreResult<Self> {
        let current_room = current_room.into();
        if !world.contains(&current_room) {
            return Err(CoreError::RoomNotFound(current_room));
        }
        Ok(Self {
            world,
            player,
            current_room,
        })
    }

    /// Key of the current room.
    pub fn current_room_key(&self) -> &str {
        &self.current_room
    }

    /// The current room.
    pub fn current_room(&self) -> CoreResult<&Room> {
        self.world.get(&self.current_room)
    }

    /// The current room, mutably.
    pub fn current_room_mut(&mut self) -> CoreResult<&mut Room> {
        self.world.get_mut(&self.current_room)
    }

    /// Move the player to the room with `key` and mark it visited.
    pub fn move_to(&mut self, key: &str) -> CoreResult<&Room> {
        let room = self.world.get_mut(key)?;
        room.mark_visited();
        self.current_room = key.to_string();
        self.current_room()
    }
}
