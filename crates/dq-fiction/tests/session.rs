//! End-to-end sessions driven by a scripted roller.

use dq_core::{Boss, Combatant, Direction, Enemy, Health, Item, Player, Room, World};
use dq_fiction::{FictionError, GameConfig, GameSession, Outcome, Scenario, dark_tower};
use dq_mechanics::ScriptedRoller;
use dq_save::SaveError;
use tempfile::TempDir;

fn config(dir: &TempDir) -> GameConfig {
    GameConfig::default()
        .with_player_name("Tester")
        .with_save_dir(dir.path())
        .with_narrator(false)
}

fn tower(dir: &TempDir) -> GameSession<ScriptedRoller> {
    let scenario = dark_tower("Tester").unwrap();
    GameSession::with_roller(scenario, &config(dir), ScriptedRoller::new()).unwrap()
}

fn arena(player: Player, foe: impl Into<dq_core::Foe>, dir: &TempDir) -> GameSession<ScriptedRoller> {
    let mut world = World::new();
    world
        .add_room("hall", Room::new("Hall", "A bare hall").unwrap())
        .unwrap();
    world
        .add_room(
            "throne",
            Room::new("Throne", "A cold throne").unwrap().with_enemy(foe),
        )
        .unwrap();
    world
        .connect("throne", Direction::South, "hall", true)
        .unwrap();
    let scenario = Scenario {
        world,
        player,
        start_room: "throne".to_string(),
        goal_room: "throne".to_string(),
    };
    GameSession::with_roller(scenario, &config(dir), ScriptedRoller::new()).unwrap()
}

#[test]
fn new_session_greets_player() {
    let dir = TempDir::new().unwrap();
    let session = GameSession::new(&config(&dir).with_seed(7)).unwrap();
    let intro = session.intro().unwrap();
    assert!(intro.starts_with("Welcome, Tester!"));
    assert!(intro.contains("== ENTRANCE HALL =="));
    assert!(intro.contains("Health Potion"));
    assert_eq!(session.goal_room(), "throne_room");
}

#[test]
fn armory_fight_drops_loot_once() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);

    let turn = s.process("n").unwrap();
    assert!(turn.text.contains("== ARMORY =="));
    assert!(matches!(s.process("w"), Err(FictionError::EnemiesBlock)));

    s.process("take iron sword").unwrap();
    let turn = s.process("equip iron sword").unwrap();
    assert!(turn.text.contains("Attack Power: 15"));

    let turn = s.process("attack").unwrap();
    assert!(turn.text.contains("You attack Goblin Warrior for 13 damage!"));
    assert!(turn.text.contains("Goblin Warrior attacks you for 3 damage!"));
    s.process("attack goblin").unwrap();
    let turn = s.process("hit").unwrap();
    assert!(turn.text.contains("Goblin Warrior has been defeated!"));
    assert!(turn.text.contains("Goblin Warrior dropped: Health Potion"));
    assert!(!turn.game_over);

    assert_eq!(s.state().player.health(), 94);
    let room = s.state().current_room().unwrap();
    assert!(room.find_item("Health Potion").is_some());
    assert!(matches!(s.process("attack"), Err(FictionError::NoEnemies)));

    s.process("w").unwrap();
    assert_eq!(s.state().current_room_key(), "dungeon");
}

#[test]
fn attack_unknown_target() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("north").unwrap();
    let err = s.process("attack dragon").unwrap_err();
    assert_eq!(err.to_string(), "No enemy named 'dragon' here.");
}

#[test]
fn potion_heals_after_damage() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("take health potion").unwrap();
    s.process("n").unwrap();
    s.process("attack").unwrap();
    assert_eq!(s.state().player.health(), 97);

    let turn = s.process("drink health potion").unwrap();
    assert!(turn.text.contains("restored 3 HP"));
    assert_eq!(s.state().player.health(), 100);
    assert!(!s.state().player.has_item("Health Potion"));

    let err = s.process("use health potion").unwrap_err();
    assert_eq!(err.to_string(), "You don't have 'health potion'.");
}

#[test]
fn flee_success_and_failure() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    assert!(matches!(s.process("flee"), Err(FictionError::NothingToFlee)));
    s.process("n").unwrap();

    *s.roller_mut() = ScriptedRoller::new().with_chances([0.9]);
    let turn = s.process("flee").unwrap();
    assert!(turn.text.contains("You failed to escape!"));
    assert!(turn.text.contains("attacks you as you try to flee for 3 damage!"));
    assert_eq!(s.state().current_room_key(), "armory");

    // Exits sort south before west, so pick 0 is the entrance.
    *s.roller_mut() = ScriptedRoller::new().with_chances([0.2]).with_picks([0]);
    let turn = s.process("run").unwrap();
    assert!(turn.text.contains("You fled south to the Entrance Hall!"));
    assert_eq!(s.state().current_room_key(), "entrance");
}

#[test]
fn locked_door_needs_the_key() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("e").unwrap();

    let err = s.process("n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "The way is locked. You need the Master Key to enter."
    );
    let err = s.process("unlock north").unwrap_err();
    assert!(matches!(err, FictionError::MissingKey(ref key) if key == "Master Key"));
    assert!(matches!(s.process("unlock west"), Err(FictionError::NotLocked)));
    assert!(matches!(s.process("unlock south"), Err(FictionError::NoExit)));
}

#[test]
fn unlock_with_key_opens_the_way() {
    let dir = TempDir::new().unwrap();
    let mut scenario = dark_tower("Tester").unwrap();
    scenario
        .player
        .add_item(Item::key("Master Key", "An ornate key").unwrap());
    let mut s = GameSession::with_roller(scenario, &config(&dir), ScriptedRoller::new()).unwrap();

    s.process("e").unwrap();
    let turn = s.process("open n").unwrap();
    assert_eq!(turn.text, "You used the Master Key to unlock the door!");
    assert!(matches!(s.process("unlock n"), Err(FictionError::NotLocked)));

    s.process("n").unwrap();
    assert_eq!(s.state().current_room_key(), "treasure_room");
    assert!(s.state().current_room().unwrap().is_visited());
}

#[test]
fn riddle_rewards_the_room() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("e").unwrap();

    assert!(matches!(
        s.process("solve door 17"),
        Err(FictionError::NoSuchPuzzle(_))
    ));
    let turn = s.process("solve riddle the wind").unwrap();
    assert_eq!(turn.text, "Incorrect! 2 attempts remaining.");

    let turn = s.process("answer ancient Echo").unwrap();
    assert!(turn.text.contains("Correct! You solved the Ancient Riddle!"));
    assert!(turn.text.contains("You received: Wooden Shield!"));
    assert!(s
        .state()
        .current_room()
        .unwrap()
        .find_item("wooden shield")
        .is_some());

    let err = s.process("solve riddle echo").unwrap_err();
    assert_eq!(err.to_string(), "The puzzle is already solved.");

    s.process("take wooden shield").unwrap();
    s.process("wear wooden shield").unwrap();
    assert_eq!(s.state().player.stats().defense, 8);
    s.process("remove wooden shield").unwrap();
    assert_eq!(s.state().player.stats().defense, 5);
}

#[test]
fn hermit_cycles_dialogue() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    assert!(matches!(s.process("talk"), Err(FictionError::NobodyHere)));

    s.process("e").unwrap();
    let first = s.process("talk to old hermit").unwrap().text;
    assert!(first.starts_with("Old Hermit says: \"Many have climbed"));
    let second = s.process("chat").unwrap().text;
    assert_ne!(first, second);
    assert!(matches!(
        s.process("talk to ghost"),
        Err(FictionError::NoSuchNpc(_))
    ));
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("take health potion").unwrap();
    let turn = s.process("save slot one").unwrap();
    assert_eq!(turn.text, "Game saved as 'slot_one'.");
    assert!(dir.path().join("slot_one.json").exists());

    s.process("n").unwrap();
    s.process("narrator on").unwrap();
    s.process("drop health potion").unwrap();

    let turn = s.process("load slot one").unwrap();
    assert!(turn.text.contains("== ENTRANCE HALL =="));
    assert_eq!(s.state().current_room_key(), "entrance");
    assert!(s.state().player.has_item("Health Potion"));
    assert!(!s.narrator().is_enabled());
    assert!(!s.state().world.room("armory").unwrap().is_visited());

    let listing = s.process("saves").unwrap().text;
    assert!(listing.contains("slot_one"));
}

#[test]
fn failed_load_keeps_state() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("n").unwrap();
    let before = s.state().clone();

    let err = s.process("load nothing here").unwrap_err();
    assert!(matches!(err, FictionError::Save(SaveError::NotFound(_))));
    assert_eq!(s.state(), &before);
    assert_eq!(s.process("saves").unwrap().text, "No saved games.");
}

#[test]
fn quicksave_by_default() {
    let dir = TempDir::new().unwrap();
    let mut s = tower(&dir);
    s.process("save").unwrap();
    assert!(s.saves().exists("quicksave"));
}

#[test]
fn killing_the_boss_wins() {
    let dir = TempDir::new().unwrap();
    let boss = Boss::new(Enemy::new("Lich", "Bones", 5, 30, 0).unwrap(), "Wail").unwrap();
    let mut s = arena(Player::new("Tester").unwrap(), boss, &dir);

    let turn = s.process("attack lich").unwrap();
    assert!(turn.game_over);
    assert!(turn.text.contains("Lich has been defeated!"));
    assert!(turn.text.contains("conquered the Dark Tower"));
    assert_eq!(s.outcome(), Some(Outcome::Victory));
    assert!(matches!(s.process("look"), Err(FictionError::GameOver)));
}

#[test]
fn boss_special_ability_hits_harder() {
    let dir = TempDir::new().unwrap();
    let boss = Boss::new(Enemy::new("Lich", "Bones", 200, 20, 0).unwrap(), "Wail").unwrap();
    let mut s = arena(Player::new("Tester").unwrap(), boss, &dir);

    // Player crit, boss dodge, boss block, then the boss's special roll.
    *s.roller_mut() = ScriptedRoller::new().with_chances([0.99, 0.99, 0.99, 0.1]);
    let turn = s.process("attack").unwrap();
    assert!(turn.text.contains("Lich uses Wail!"));
    assert!(turn.text.contains("Lich attacks you for 25 damage!"));
    assert_eq!(s.state().player.health(), 75);

    let room = s.state().current_room().unwrap();
    let boss = room.enemies()[0].as_boss().unwrap();
    assert_eq!(boss.cooldown(), 3);
}

#[test]
fn death_ends_the_game_until_load() {
    let dir = TempDir::new().unwrap();
    let player = Player::new("Tester")
        .unwrap()
        .with_health(Health::with_current(3, 100).unwrap());
    let ogre = Enemy::new("Ogre", "Huge", 200, 20, 0).unwrap();
    let mut s = arena(player, ogre, &dir);
    s.process("save").unwrap();

    let turn = s.process("attack").unwrap();
    assert!(turn.game_over);
    assert!(turn.text.contains("You have been defeated."));
    assert_eq!(s.outcome(), Some(Outcome::Defeat));
    assert!(matches!(s.process("s"), Err(FictionError::GameOver)));

    let turn = s.process("load quicksave").unwrap();
    assert!(!turn.game_over);
    assert!(!s.is_over());
    assert_eq!(s.state().player.health(), 3);
}
