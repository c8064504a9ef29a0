//! Snapshot a running game into a [`SaveDocument`].

use chrono::Utc;
use dq_core::{Combatant, Foe, GameState, Item, Npc, Player, Puzzle, Room, World};

use crate::schema::{
    BossDoc, EnemyDoc, ItemDoc, NpcDoc, PlayerDoc, PuzzleDoc, RoomDoc, SAVE_VERSION, SaveDocument,
};

/// Capture the whole game.
///
/// Room connections are written as the target room's name.
pub fn capture(state: &GameState, narrator_enabled: bool) -> SaveDocument {
    let rooms = state
        .world
        .rooms()
        .map(|(key, room)| (key.to_string(), room_doc(room, &state.world)))
        .collect();

    SaveDocument {
        version: SAVE_VERSION,
        saved_at: Utc::now(),
        player: player_doc(&state.player),
        current_room: state.current_room_key().to_string(),
        rooms,
        narrator_enabled,
    }
}

fn item_doc(item: &Item) -> ItemDoc {
    ItemDoc {
        name: item.name().to_string(),
        description: item.description().to_string(),
        kind: item.kind().clone(),
    }
}

fn player_doc(player: &Player) -> PlayerDoc {
    PlayerDoc {
        name: player.name().to_string(),
        health: player.health(),
        max_health: player.max_health(),
        stats: player.base_stats().into(),
        inventory: player.inventory().iter().map(item_doc).collect(),
        equipped_weapon: player.weapon().map(item_doc),
        equipped_armor: player.armor().map(item_doc),
    }
}

fn enemy_doc(foe: &Foe) -> EnemyDoc {
    let enemy = foe.enemy();
    EnemyDoc {
        name: enemy.name().to_string(),
        description: enemy.description().to_string(),
        health: enemy.health(),
        max_health: enemy.max_health(),
        stats: enemy.stats().into(),
        loot: enemy.loot().iter().map(item_doc).collect(),
        boss: foe.as_boss().map(|boss| BossDoc {
            special_ability: boss.special_ability().to_string(),
            cooldown: boss.cooldown(),
        }),
    }
}

fn puzzle_doc(puzzle: &Puzzle) -> PuzzleDoc {
    PuzzleDoc {
        name: puzzle.name().to_string(),
        description: puzzle.description().to_string(),
        kind: puzzle.kind().clone(),
        max_attempts: puzzle.max_attempts(),
        attempts_left: puzzle.attempts_left(),
        solved: puzzle.is_solved(),
        reward: puzzle.reward().map(item_doc),
    }
}

fn npc_doc(npc: &Npc) -> NpcDoc {
    NpcDoc {
        name: npc.name().to_string(),
        description: npc.description().to_string(),
        dialogue: npc.dialogue().to_vec(),
        state: npc.state(),
        talked_count: npc.talked_count(),
        dialogue_index: npc.dialogue_index(),
    }
}

fn room_doc(room: &Room, world: &World) -> RoomDoc {
    let connections = room
        .exits()
        .iter()
        .filter_map(|(direction, target)| {
            world
                .room(target)
                .map(|target| (*direction, target.name().to_string()))
        })
        .collect();

    RoomDoc {
        name: room.name().to_string(),
        description: room.description().to_string(),
        visited: room.is_visited(),
        locked: room.is_locked(),
        required_key: room.required_key().map(str::to_string),
        items: room.items().iter().map(item_doc).collect(),
        enemies: room.enemies().iter().map(enemy_doc).collect(),
        npcs: room.npcs().iter().map(npc_doc).collect(),
        puzzles: room.puzzles().iter().map(puzzle_doc).collect(),
        connections,
    }
}
