//! The Dark Tower: the world a new game starts in.

use dq_core::{
    Boss, CoreResult, Direction, Enemy, GameState, Item, Npc, Player, Puzzle, Room, World,
};

/// Key of the room a new game starts in.
pub const START_ROOM: &str = "entrance";

/// Key of the room whose liberation wins the game.
pub const GOAL_ROOM: &str = "throne_room";

/// A ready-to-play world with its player and win condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// All rooms, connected and populated.
    pub world: World,
    /// The player character.
    pub player: Player,
    /// Key of the starting room.
    pub start_room: String,
    /// Key of the room that must be cleared of living enemies to win.
    pub goal_room: String,
}

impl Scenario {
    /// Place the player in the starting room.
    pub fn into_state(self) -> CoreResult<(GameState, String)> {
        let state = GameState::new(self.world, self.player, self.start_room)?;
        Ok((state, self.goal_room))
    }
}

/// Build the Dark Tower for a player called `player_name`.
pub fn dark_tower(player_name: &str) -> CoreResult<Scenario> {
    let sword = Item::weapon("Iron Sword", "A well-balanced sword with a sharp edge", 5)?;
    let shield = Item::armor("Wooden Shield", "A sturdy shield made of oak", 3)?;
    let potion = Item::potion("Health Potion", "Restores 30 HP", 30)?;
    let master_key = Item::key("Master Key", "An ornate key that opens many doors")?;
    let elixir = Item::potion("Magic Elixir", "Restores 50 HP", 50)?;
    let blade = Item::weapon("Legendary Blade", "A sword infused with ancient power", 15)?;

    let goblin = Enemy::new("Goblin Warrior", "A small but fierce goblin", 30, 8, 2)?
        .with_loot(potion.clone());
    let troll = Enemy::new("Cave Troll", "A massive troll with thick skin", 50, 12, 5)?
        .with_loot(master_key);
    let knight = Enemy::new(
        "Dark Knight",
        "An armored warrior wielding a dark blade",
        60,
        15,
        8,
    )?
    .with_loot(blade);
    let dark_lord = Boss::new(
        Enemy::new(
            "Dark Lord",
            "The master of the tower, radiating dark energy",
            100,
            20,
            10,
        )?
        .with_loot(elixir),
        "Shadow Strike",
    )?;

    let riddle = Puzzle::riddle(
        "Ancient Riddle",
        "I speak without a mouth and hear without ears. I have no body, but I come alive with wind. What am I?",
        "echo",
    )?
    .with_reward(shield);
    let door_code = Puzzle::code(
        "Door Code",
        "A numeric keypad reads: 'The answer is the sum of the primes below 10.'",
        "17",
    )?
    .with_reward(potion.clone());

    let hermit = Npc::new(
        "Old Hermit",
        "A stooped figure in a moth-eaten robe, muttering over a candle",
        [
            "Many have climbed this tower. Few came back down.",
            "The troll in the dungeon carries a key it does not understand.",
            "Echoes answer riddles better than scholars do.",
            "The Dark Lord strikes hardest when you think you have the upper hand.",
        ],
    )?;

    let mut world = World::new();
    world.add_room(
        "entrance",
        Room::new(
            "Entrance Hall",
            "A grand hall with high ceilings and dusty chandeliers. The air is cold and musty.",
        )?
        .with_item(potion),
    )?;
    world.add_room(
        "armory",
        Room::new(
            "Armory",
            "Walls lined with weapon racks, most of them empty. A few rusty swords remain.",
        )?
        .with_item(sword)
        .with_enemy(goblin),
    )?;
    world.add_room(
        "library",
        Room::new(
            "Library",
            "Towering bookshelves filled with ancient tomes. A puzzle inscription glows on the wall.",
        )?
        .with_puzzle(riddle)
        .with_npc(hermit),
    )?;
    world.add_room(
        "dungeon",
        Room::new(
            "Dungeon",
            "Dark cells line the walls. The smell of decay fills the air.",
        )?
        .with_enemy(troll)
        .with_puzzle(door_code),
    )?;
    world.add_room(
        "treasure_room",
        Room::new(
            "Treasure Room",
            "Gold and jewels are scattered everywhere. But something guards this place...",
        )?
        .with_enemy(knight)
        .locked_with("Master Key"),
    )?;
    world.add_room(
        GOAL_ROOM,
        Room::new(
            "Throne Room",
            "A massive chamber with a dark throne. The final boss awaits!",
        )?
        .with_enemy(dark_lord),
    )?;

    world.connect("entrance", Direction::North, "armory", true)?;
    world.connect("entrance", Direction::East, "library", true)?;
    world.connect("armory", Direction::West, "dungeon", true)?;
    world.connect("library", Direction::North, "treasure_room", true)?;
    world.connect("treasure_room", Direction::West, GOAL_ROOM, true)?;
    world.connect("dungeon", Direction::North, GOAL_ROOM, true)?;

    Ok(Scenario {
        world,
        player: Player::new(player_name)?,
        start_room: START_ROOM.to_string(),
        goal_room: GOAL_ROOM.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_core::Combatant;

    #[test]
    fn builds_six_connected_rooms() {
        let scenario = dark_tower("Tester").unwrap();
        assert_eq!(scenario.world.len(), 6);
        assert_eq!(
            scenario.world.neighbor("entrance", Direction::North),
            Some("armory")
        );
        assert_eq!(
            scenario.world.neighbor("armory", Direction::South),
            Some("entrance")
        );
        assert_eq!(
            scenario.world.neighbor("throne_room", Direction::South),
            Some("dungeon")
        );
    }

    #[test]
    fn treasure_room_needs_master_key() {
        let scenario = dark_tower("Tester").unwrap();
        let room = scenario.world.room("treasure_room").unwrap();
        assert!(room.is_locked());
        assert_eq!(room.required_key(), Some("Master Key"));
    }

    #[test]
    fn boss_waits_in_goal_room() {
        let scenario = dark_tower("Tester").unwrap();
        let room = scenario.world.room(&scenario.goal_room).unwrap();
        let boss = room.enemies()[0].as_boss().unwrap();
        assert_eq!(boss.name(), "Dark Lord");
        assert_eq!(boss.special_ability(), "Shadow Strike");
        assert_eq!(boss.enemy().loot()[0].name(), "Magic Elixir");
    }

    #[test]
    fn state_starts_in_visited_entrance() {
        let (state, goal) = dark_tower("Tester").unwrap().into_state().unwrap();
        assert_eq!(goal, "throne_room");
        assert_eq!(state.current_room_key(), "entrance");
        assert!(state.current_room().unwrap().is_visited());
        assert_eq!(state.player.name(), "Tester");
    }

    #[test]
    fn rejects_blank_player_name() {
        assert!(dark_tower(" ").is_err());
    }
}
