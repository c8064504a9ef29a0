//! Command parsing for player input.

use dq_core::Direction;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through an exit.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// Describe the current room.
    Look,
    /// List inventory and equipment.
    Inventory,
    /// Show the character sheet.
    Stats,
    /// Pick up an item.
    Take {
        /// The item name.
        item: String,
    },
    /// Drop an item.
    Drop {
        /// The item name.
        item: String,
    },
    /// Use (consume) an item.
    Use {
        /// The item name.
        item: String,
    },
    /// Equip a weapon or armor.
    Equip {
        /// The item name.
        item: String,
    },
    /// Unequip a weapon or armor.
    Unequip {
        /// The item name.
        item: String,
    },
    /// Attack an enemy.
    Attack {
        /// Part of the enemy's name; the first living enemy when absent.
        target: Option<String>,
    },
    /// Try to run from combat.
    Flee,
    /// Unlock the room in a direction.
    Unlock {
        /// The direction of the locked room.
        direction: Direction,
    },
    /// Attempt a puzzle.
    Solve {
        /// Part of the puzzle's name.
        puzzle: String,
        /// The answer.
        answer: String,
    },
    /// Talk to an NPC.
    Talk {
        /// The NPC's name; the first NPC when absent.
        npc: Option<String>,
    },
    /// Save the game.
    Save {
        /// Save name; a quicksave when absent.
        name: Option<String>,
    },
    /// Load a saved game.
    Load {
        /// Save name.
        name: String,
    },
    /// List saved games.
    Saves,
    /// Switch narration on or off.
    Narrator {
        /// `None` toggles.
        enabled: Option<bool>,
    },
    /// Show help.
    Help,
    /// Quit the game.
    Quit,
    /// Blank input.
    Empty,
    /// A known verb with a missing or invalid argument.
    Incomplete {
        /// What to ask the player.
        prompt: String,
    },
    /// Unrecognized input.
    Unknown {
        /// The input as typed.
        input: String,
    },
}

/// Verb synonyms for command parsing.
pub(crate) const MOVE_VERBS: &[&str] = &["go", "move", "walk", "travel"];
pub(crate) const LOOK_VERBS: &[&str] = &["look", "l", "examine", "inspect"];
pub(crate) const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i", "items"];
pub(crate) const STATS_VERBS: &[&str] = &["stats", "status", "health"];
pub(crate) const TAKE_VERBS: &[&str] = &["take", "get", "pickup", "grab", "pick"];
pub(crate) const DROP_VERBS: &[&str] = &["drop", "leave", "discard"];
pub(crate) const USE_VERBS: &[&str] = &["use", "consume", "drink", "eat"];
pub(crate) const EQUIP_VERBS: &[&str] = &["equip", "wield", "wear"];
pub(crate) const UNEQUIP_VERBS: &[&str] = &["unequip", "unwield", "remove"];
pub(crate) const ATTACK_VERBS: &[&str] = &["attack", "fight", "hit", "strike"];
pub(crate) const FLEE_VERBS: &[&str] = &["flee", "run", "escape", "retreat"];
pub(crate) const UNLOCK_VERBS: &[&str] = &["unlock", "open"];
pub(crate) const SOLVE_VERBS: &[&str] = &["solve", "answer", "attempt"];
pub(crate) const TALK_VERBS: &[&str] = &["talk", "speak", "chat"];
pub(crate) const SAVE_VERBS: &[&str] = &["save"];
pub(crate) const LOAD_VERBS: &[&str] = &["load"];
pub(crate) const SAVES_VERBS: &[&str] = &["saves"];
pub(crate) const NARRATOR_VERBS: &[&str] = &["narrator"];
pub(crate) const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
pub(crate) const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Every verb group, for suggestions.
pub(crate) const ALL_VERBS: &[&[&str]] = &[
    MOVE_VERBS,
    LOOK_VERBS,
    INVENTORY_VERBS,
    STATS_VERBS,
    TAKE_VERBS,
    DROP_VERBS,
    USE_VERBS,
    EQUIP_VERBS,
    UNEQUIP_VERBS,
    ATTACK_VERBS,
    FLEE_VERBS,
    UNLOCK_VERBS,
    SOLVE_VERBS,
    TALK_VERBS,
    SAVE_VERBS,
    LOAD_VERBS,
    SAVES_VERBS,
    NARRATOR_VERBS,
    HELP_VERBS,
    QUIT_VERBS,
];

const DIRECTION_HINT: &str = "north, south, east, west, up, or down";

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let verb = verb.as_str();
    let rest = words.get(1..).unwrap_or(&[]);

    // Check for bare direction
    if let Some(direction) = Direction::parse(verb) {
        return Command::Move { direction };
    }

    if MOVE_VERBS.contains(&verb) {
        return parse_direction(rest, "Move where?", |direction| Command::Move { direction });
    }
    if LOOK_VERBS.contains(&verb) {
        return Command::Look;
    }
    if INVENTORY_VERBS.contains(&verb) {
        return Command::Inventory;
    }
    if STATS_VERBS.contains(&verb) {
        return Command::Stats;
    }
    if TAKE_VERBS.contains(&verb) {
        // "pick up the key"
        let rest = match rest.first() {
            Some(word) if word.eq_ignore_ascii_case("up") => &rest[1..],
            _ => rest,
        };
        return with_object(rest, "Take what?", |item| Command::Take { item });
    }
    if DROP_VERBS.contains(&verb) {
        return with_object(rest, "Drop what?", |item| Command::Drop { item });
    }
    if USE_VERBS.contains(&verb) {
        return with_object(rest, "Use what?", |item| Command::Use { item });
    }
    if EQUIP_VERBS.contains(&verb) {
        return with_object(rest, "Equip what?", |item| Command::Equip { item });
    }
    if UNEQUIP_VERBS.contains(&verb) {
        return with_object(rest, "Unequip what?", |item| Command::Unequip { item });
    }
    if ATTACK_VERBS.contains(&verb) {
        return Command::Attack {
            target: joined(rest),
        };
    }
    if FLEE_VERBS.contains(&verb) {
        return Command::Flee;
    }
    if UNLOCK_VERBS.contains(&verb) {
        return parse_direction(rest, "Unlock which direction?", |direction| {
            Command::Unlock { direction }
        });
    }
    if SOLVE_VERBS.contains(&verb) {
        return parse_solve(rest);
    }
    if TALK_VERBS.contains(&verb) {
        // Skip "to" or "with" if present
        let rest = match rest.first() {
            Some(word) if word.eq_ignore_ascii_case("to") || word.eq_ignore_ascii_case("with") => {
                &rest[1..]
            }
            _ => rest,
        };
        return Command::Talk { npc: joined(rest) };
    }
    if SAVE_VERBS.contains(&verb) {
        return Command::Save {
            name: save_name(rest),
        };
    }
    if LOAD_VERBS.contains(&verb) {
        return match save_name(rest) {
            Some(name) => Command::Load { name },
            None => incomplete("Specify a save to load."),
        };
    }
    if SAVES_VERBS.contains(&verb) {
        return Command::Saves;
    }
    if NARRATOR_VERBS.contains(&verb) {
        return parse_narrator(rest);
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::Quit;
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn incomplete(prompt: &str) -> Command {
    Command::Incomplete {
        prompt: prompt.to_string(),
    }
}

fn joined(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn with_object(rest: &[&str], prompt: &str, build: impl FnOnce(String) -> Command) -> Command {
    match joined(rest) {
        Some(object) => build(object),
        None => incomplete(prompt),
    }
}

fn parse_direction(
    rest: &[&str],
    prompt: &str,
    build: impl FnOnce(Direction) -> Command,
) -> Command {
    match rest.first() {
        None => incomplete(&format!("{prompt} ({DIRECTION_HINT})")),
        Some(word) => match Direction::parse(word) {
            Some(direction) => build(direction),
            None => incomplete(&format!("Invalid direction. Use: {DIRECTION_HINT}")),
        },
    }
}

fn parse_solve(rest: &[&str]) -> Command {
    // First word names the puzzle, the rest is the answer.
    match rest.split_first() {
        None => incomplete("Solve what?"),
        Some((_, [])) => incomplete("What is your answer?"),
        Some((puzzle, answer)) => Command::Solve {
            puzzle: (*puzzle).to_string(),
            answer: answer.join(" "),
        },
    }
}

fn save_name(rest: &[&str]) -> Option<String> {
    if rest.is_empty() {
        None
    } else {
        Some(rest.join("_"))
    }
}

fn parse_narrator(rest: &[&str]) -> Command {
    match rest.first().map(|w| w.to_lowercase()).as_deref() {
        None => Command::Narrator { enabled: None },
        Some("on") => Command::Narrator {
            enabled: Some(true),
        },
        Some("off") => Command::Narrator {
            enabled: Some(false),
        },
        Some(_) => incomplete("Use: narrator on|off"),
    }
}
