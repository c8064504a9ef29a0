//! Rebuild a game from a [`SaveDocument`].
//!
//! Rooms reference each other cyclically, so restoring is two passes:
//!
//! 1. build every room with its contents, unconnected, and index it by name
//! 2. resolve each saved connection's target name through that index
//!
//! The player is rebuilt last and placed in the saved current room.

use dq_core::{Boss, Enemy, Foe, GameState, Health, Item, Npc, Player, Puzzle, Room, World};

use crate::catalog::Catalog;
use crate::error::{SaveError, SaveResult};
use crate::schema::{EnemyDoc, ItemDoc, NpcDoc, PlayerDoc, PuzzleDoc, RoomDoc, SaveDocument};

/// A restored game together with document-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The rebuilt game.
    pub state: GameState,
    /// Whether flavor narration was on when the game was saved.
    pub narrator_enabled: bool,
}

/// Rebuild the game described by `doc`, cloning static data from `catalog`.
pub fn restore(doc: &SaveDocument, catalog: &Catalog) -> SaveResult<Restored> {
    doc.check_version()?;

    let mut world = World::new();
    for (key, room_doc) in &doc.rooms {
        world.add_room(key.clone(), restore_room(room_doc, catalog)?)?;
    }

    for (key, room_doc) in &doc.rooms {
        for (direction, target_name) in &room_doc.connections {
            let target = world
                .find_key_by_name(target_name)
                .ok_or_else(|| SaveError::UnknownRoom(target_name.clone()))?
                .to_string();
            world.connect(key, *direction, &target, false)?;
        }
    }

    let player = restore_player(&doc.player, catalog)?;

    let current = if world.contains(&doc.current_room) {
        doc.current_room.clone()
    } else {
        world
            .find_key_by_name(&doc.current_room)
            .ok_or_else(|| SaveError::UnknownRoom(doc.current_room.clone()))?
            .to_string()
    };

    tracing::debug!(
        rooms = world.len(),
        current_room = %current,
        "save document restored"
    );

    Ok(Restored {
        state: GameState::restore(world, player, current)?,
        narrator_enabled: doc.narrator_enabled,
    })
}

fn restore_item(doc: &ItemDoc, catalog: &Catalog) -> SaveResult<Item> {
    match catalog.item(&doc.name) {
        Some(prototype) => Ok(prototype.clone()),
        None => {
            tracing::warn!(item = %doc.name, "no item prototype, using saved definition");
            Ok(Item::new(
                doc.name.clone(),
                doc.description.clone(),
                doc.kind.clone(),
            )?)
        }
    }
}

fn restore_items(docs: &[ItemDoc], catalog: &Catalog) -> SaveResult<Vec<Item>> {
    docs.iter().map(|doc| restore_item(doc, catalog)).collect()
}

fn restore_enemy(doc: &EnemyDoc, catalog: &Catalog) -> SaveResult<Foe> {
    let mut foe = match catalog.enemy(&doc.name) {
        Some(prototype) => prototype.clone(),
        None => {
            tracing::warn!(enemy = %doc.name, "no enemy prototype, using saved definition");
            let enemy = Enemy::with_stats(
                doc.name.clone(),
                doc.description.clone(),
                doc.max_health,
                doc.stats.into(),
            )?;
            match &doc.boss {
                Some(boss) => Boss::new(enemy, boss.special_ability.clone())?.into(),
                None => enemy.into(),
            }
        }
    };

    foe.enemy_mut().set_health(doc.health);
    foe.enemy_mut().set_loot(restore_items(&doc.loot, catalog)?);
    if let (Foe::Boss(boss), Some(saved)) = (&mut foe, &doc.boss) {
        boss.set_cooldown(saved.cooldown);
    }
    Ok(foe)
}

fn restore_puzzle(doc: &PuzzleDoc, catalog: &Catalog) -> SaveResult<Puzzle> {
    let mut puzzle = match catalog.puzzle(&doc.name) {
        Some(prototype) => prototype.clone(),
        None => {
            tracing::warn!(puzzle = %doc.name, "no puzzle prototype, using saved definition");
            Puzzle::new(doc.name.clone(), doc.description.clone(), doc.kind.clone())?
                .with_max_attempts(doc.max_attempts)?
        }
    };

    puzzle.restore_progress(doc.attempts_left, doc.solved);
    let reward = doc
        .reward
        .as_ref()
        .map(|reward| restore_item(reward, catalog))
        .transpose()?;
    puzzle.set_reward(reward);
    Ok(puzzle)
}

fn restore_npc(doc: &NpcDoc, catalog: &Catalog) -> SaveResult<Npc> {
    let mut npc = match catalog.npc(&doc.name) {
        Some(prototype) => prototype.clone(),
        None => {
            tracing::warn!(npc = %doc.name, "no NPC prototype, using saved definition");
            Npc::new(
                doc.name.clone(),
                doc.description.clone(),
                doc.dialogue.iter().cloned(),
            )?
        }
    };
    npc.restore_progress(doc.state, doc.talked_count, doc.dialogue_index);
    Ok(npc)
}

fn restore_room(doc: &RoomDoc, catalog: &Catalog) -> SaveResult<Room> {
    let mut room = Room::new(doc.name.clone(), doc.description.clone())?;
    room.set_visited(doc.visited);
    room.lock(doc.required_key.clone());
    if !doc.locked {
        room.unlock();
    }
    for item in &doc.items {
        room.add_item(restore_item(item, catalog)?);
    }
    for enemy in &doc.enemies {
        room.add_enemy(restore_enemy(enemy, catalog)?);
    }
    for npc in &doc.npcs {
        room.add_npc(restore_npc(npc, catalog)?);
    }
    for puzzle in &doc.puzzles {
        room.add_puzzle(restore_puzzle(puzzle, catalog)?);
    }
    Ok(room)
}

fn restore_player(doc: &PlayerDoc, catalog: &Catalog) -> SaveResult<Player> {
    let mut player = Player::new(doc.name.clone())?
        .with_base_stats(doc.stats.into())?
        .with_health(Health::with_current(doc.health, doc.max_health)?);
    for item in restore_items(&doc.inventory, catalog)? {
        player.add_item(item);
    }
    let weapon = doc
        .equipped_weapon
        .as_ref()
        .map(|item| restore_item(item, catalog))
        .transpose()?;
    let armor = doc
        .equipped_armor
        .as_ref()
        .map(|item| restore_item(item, catalog))
        .transpose()?;
    player.restore_equipment(weapon, armor)?;
    Ok(player)
}
