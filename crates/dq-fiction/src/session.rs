//! Game session: dispatches commands against the game state.

use dq_core::{Attempt, Combatant, CoreError, Direction, GameState, Item, Room, UseEffect};
use dq_mechanics::{AttackOutcome, Roller, attempt_flee, foe_turn, resolve_attack};
use dq_save::{Catalog, SaveManager, capture, restore};
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::content::{Scenario, dark_tower};
use crate::error::{FictionError, FictionResult};
use crate::narrator::{Cue, Narration, Narrator};
use crate::parser::{Command, parse_command, suggest_verb};

/// Save name used when `save` is given no name.
pub const QUICKSAVE: &str = "quicksave";

const HELP: &str = "\
Available commands:

Movement:
  go/move <direction>      Move north, south, east, west, up, or down
  n, s, e, w, u, d         Shortcuts
  unlock <direction>       Unlock a door with the right key

Interaction:
  look                     Describe the room
  take/get <item>          Pick up an item
  drop <item>              Drop an item
  use <item>               Use or consume an item
  equip/unequip <item>     Ready or stow a weapon or armor
  attack [enemy]           Attack an enemy
  flee                     Try to escape from combat
  solve <puzzle> <answer>  Attempt a puzzle
  talk [to] <npc>          Talk to someone

Information:
  inventory/i              List your items
  stats                    Show your character
  help                     Show this message

Game:
  save [name]              Save the game
  load <name>              Load a saved game
  saves                    List saved games
  narrator [on|off]        Toggle flavor text
  quit                     Leave the game";

/// The response to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Text to show the player.
    pub text: String,
    /// Whether this command ended the game.
    pub game_over: bool,
}

impl Turn {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            game_over: false,
        }
    }

    fn over(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            game_over: true,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The goal room was cleared.
    Victory,
    /// The player died.
    Defeat,
    /// The player quit.
    Quit,
}

/// A game in progress.
pub struct GameSession<R = StdRng> {
    state: GameState,
    narrator: Narrator,
    saves: SaveManager,
    catalog: Catalog,
    goal_room: String,
    roller: R,
    outcome: Option<Outcome>,
}

impl GameSession<StdRng> {
    /// Start a new game in the Dark Tower.
    pub fn new(config: &GameConfig) -> FictionResult<Self> {
        let scenario = dark_tower(&config.player_name)?;
        Self::with_roller(scenario, config, config.rng())
    }
}

impl<R: Roller> GameSession<R> {
    /// Start a new game in `scenario`, drawing all randomness from `roller`.
    ///
    /// The save catalog is built from the scenario's initial world.
    pub fn with_roller(scenario: Scenario, config: &GameConfig, roller: R) -> FictionResult<Self> {
        let catalog = Catalog::from_world(&scenario.world);
        let (state, goal_room) = scenario.into_state()?;
        tracing::debug!(
            player = state.player.name(),
            room = state.current_room_key(),
            "session started"
        );
        Ok(Self {
            state,
            narrator: Narrator::new(config.narrator_enabled),
            saves: SaveManager::new(config.save_dir.clone()),
            catalog,
            goal_room,
            roller,
            outcome: None,
        })
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The narrator.
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// The save manager.
    pub fn saves(&self) -> &SaveManager {
        &self.saves
    }

    /// Key of the room that must be cleared to win.
    pub fn goal_room(&self) -> &str {
        &self.goal_room
    }

    /// The random source, e.g. to script upcoming draws.
    pub fn roller_mut(&mut self) -> &mut R {
        &mut self.roller
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Greeting and the starting room.
    pub fn intro(&self) -> FictionResult<String> {
        Ok(format!(
            "Welcome, {}! Your adventure begins...\n\n{}",
            self.state.player.name(),
            self.room_view()?
        ))
    }

    /// Process a line of player input.
    pub fn process(&mut self, input: &str) -> FictionResult<Turn> {
        let command = parse_command(input);
        self.execute(command)
    }

    /// Execute a parsed command.
    ///
    /// Once the game is over only `load` is accepted.
    pub fn execute(&mut self, command: Command) -> FictionResult<Turn> {
        if self.is_over() && !matches!(command, Command::Load { .. }) {
            return Err(FictionError::GameOver);
        }

        match command {
            Command::Move { direction } => self.do_move(direction),
            Command::Look => self.do_look(),
            Command::Inventory => Ok(Turn::new(self.inventory_text())),
            Command::Stats => Ok(Turn::new(self.stats_text())),
            Command::Take { item } => self.do_take(&item),
            Command::Drop { item } => self.do_drop(&item),
            Command::Use { item } => self.do_use(&item),
            Command::Equip { item } => self.do_equip(&item),
            Command::Unequip { item } => self.do_unequip(&item),
            Command::Attack { target } => self.do_attack(target),
            Command::Flee => self.do_flee(),
            Command::Unlock { direction } => self.do_unlock(direction),
            Command::Solve { puzzle, answer } => self.do_solve(&puzzle, &answer),
            Command::Talk { npc } => self.do_talk(npc),
            Command::Save { name } => self.do_save(name),
            Command::Load { name } => self.do_load(&name),
            Command::Saves => self.do_list_saves(),
            Command::Narrator { enabled } => Ok(self.do_narrator(enabled)),
            Command::Help => Ok(Turn::new(HELP)),
            Command::Quit => Ok(self.finish(Outcome::Quit, Vec::new())),
            Command::Empty => Ok(Turn::new("")),
            Command::Incomplete { prompt } => Err(FictionError::Incomplete(prompt)),
            Command::Unknown { input } => {
                let verb = input.split_whitespace().next().unwrap_or_default();
                Err(FictionError::UnknownCommand {
                    suggestion: suggest_verb(verb),
                    input,
                })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    fn do_move(&mut self, direction: Direction) -> FictionResult<Turn> {
        let here = self.state.current_room()?;
        let target = here.exit(direction).ok_or(FictionError::NoExit)?;
        let destination = self.state.world.get(target)?;
        if !destination.can_enter() {
            return Err(match destination.required_key() {
                Some(key) => FictionError::LockedWithKey(key.to_string()),
                None => FictionError::Locked,
            });
        }
        if here.has_enemies() {
            return Err(FictionError::EnemiesBlock);
        }

        let target = target.to_string();
        self.state.move_to(&target)?;
        tracing::debug!(room = %target, %direction, "moved");

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Move, Narration::new().direction(direction.name())));
        lines.push(self.room_view()?);
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_look(&mut self) -> FictionResult<Turn> {
        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Look, Narration::new()));
        lines.push(self.room_view()?);
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_unlock(&mut self, direction: Direction) -> FictionResult<Turn> {
        let target = self
            .state
            .current_room()?
            .exit(direction)
            .ok_or(FictionError::NoExit)?
            .to_string();
        let room = self.state.world.get_mut(&target)?;
        if !room.is_locked() {
            return Err(FictionError::NotLocked);
        }
        let message = match room.required_key().map(str::to_string) {
            None => "You unlocked the door!".to_string(),
            Some(key) if self.state.player.has_item(&key) => {
                format!("You used the {key} to unlock the door!")
            }
            Some(key) => return Err(FictionError::MissingKey(key)),
        };
        room.unlock();
        tracing::debug!(room = %target, "unlocked");

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Unlock, Narration::new().direction(direction.name())));
        lines.push(message);
        Ok(Turn::new(lines.join("\n")))
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    fn do_take(&mut self, name: &str) -> FictionResult<Turn> {
        let item = self
            .state
            .current_room_mut()?
            .take_item(name)
            .ok_or_else(|| FictionError::ItemNotHere(name.to_string()))?;
        let item_name = item.name().to_string();
        self.state.player.add_item(item);

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Take, Narration::new().item(&item_name)));
        lines.push(format!("You picked up {item_name}."));
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_drop(&mut self, name: &str) -> FictionResult<Turn> {
        let item = self
            .state
            .player
            .remove_item(name)
            .ok_or_else(|| CoreError::ItemNotInInventory(name.to_string()))?;
        let item_name = item.name().to_string();
        self.state.current_room_mut()?.add_item(item);

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Drop, Narration::new().item(&item_name)));
        lines.push(format!("You dropped {item_name}."));
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_use(&mut self, name: &str) -> FictionResult<Turn> {
        let item_name = self
            .state
            .player
            .find_item(name)
            .map(|item| item.name().to_string())
            .ok_or_else(|| CoreError::ItemNotInInventory(name.to_string()))?;
        let effect = self.state.player.use_item(name)?;

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Use, Narration::new().item(&item_name)));
        match effect {
            UseEffect::Healed(amount) => lines.push(format!(
                "You used {item_name} and restored {amount} HP. Health: {}",
                self.state.player.vitals()
            )),
        }
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_equip(&mut self, name: &str) -> FictionResult<Turn> {
        let equipped = self.state.player.equip(name)?;
        let stats = self.state.player.stats();

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Equip, Narration::new().item(&equipped.item)));
        lines.push(format!(
            "You equipped {} as your {}.",
            equipped.item,
            equipped.slot.name()
        ));
        if let Some(replaced) = &equipped.replaced {
            lines.push(format!("You put {replaced} back in your pack."));
        }
        lines.push(format!(
            "Attack Power: {}, Defense: {}",
            stats.attack_power, stats.defense
        ));
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_unequip(&mut self, name: &str) -> FictionResult<Turn> {
        let item = self.state.player.unequip(name)?;
        let item_name = item.name().to_string();

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Unequip, Narration::new().item(&item_name)));
        lines.push(format!("You unequipped {item_name}."));
        Ok(Turn::new(lines.join("\n")))
    }

    // -----------------------------------------------------------------------
    // Combat
    // -----------------------------------------------------------------------

    fn do_attack(&mut self, target: Option<String>) -> FictionResult<Turn> {
        let key = self.state.current_room_key().to_string();
        let room = self.state.world.get(&key)?;
        if !room.has_enemies() {
            return Err(FictionError::NoEnemies);
        }
        let index = room
            .target_index(target.as_deref())
            .ok_or_else(|| FictionError::NoSuchEnemy(target.unwrap_or_default()))?;

        let (attack, retaliation, loot) = {
            let foe = self
                .state
                .world
                .get_mut(&key)?
                .enemy_mut(index)
                .ok_or(FictionError::NoEnemies)?;
            let attack = resolve_attack(&self.state.player, &mut *foe, &mut self.roller)?;
            if foe.is_dead() {
                (attack, None, foe.drop_loot())
            } else {
                let strike = foe_turn(foe, &mut self.state.player, &mut self.roller)?;
                (attack, Some(strike), Vec::new())
            }
        };

        let enemy = attack.defender.clone();
        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Attack, Narration::new().enemy(&enemy)));
        lines.push(player_attack_line(&attack));
        if attack.critical {
            lines.extend(self.narrate(Cue::Critical, Narration::new().enemy(&enemy)));
        }

        let Some(strike) = retaliation else {
            lines.push(format!("{enemy} has been defeated!"));
            if !loot.is_empty() {
                lines.push(format!("{enemy} dropped: {}", item_names(&loot)));
                let room = self.state.world.get_mut(&key)?;
                for item in loot {
                    room.add_item(item);
                }
            }
            if self.goal_cleared() {
                return Ok(self.finish(Outcome::Victory, lines));
            }
            return Ok(Turn::new(lines.join("\n")));
        };

        let strike_lines = self.enemy_attack_lines(&strike, false);
        lines.extend(strike_lines);
        if self.state.player.is_dead() {
            return Ok(self.finish(Outcome::Defeat, lines));
        }
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_flee(&mut self) -> FictionResult<Turn> {
        let room = self.state.current_room()?;
        if !room.has_enemies() {
            return Err(FictionError::NothingToFlee);
        }
        let exits: Vec<(Direction, String)> = room
            .exits()
            .iter()
            .filter(|(_, key)| self.state.world.room(key).is_some_and(Room::can_enter))
            .map(|(direction, key)| (*direction, key.clone()))
            .collect();
        if exits.is_empty() {
            return Ok(Turn::new("You failed to flee! There's nowhere to run!"));
        }

        if let Some(choice) = attempt_flee(exits.len(), &mut self.roller) {
            let (direction, target) = exits.get(choice).ok_or(FictionError::NoExit)?;
            self.state.move_to(target)?;
            tracing::debug!(room = %target, "fled");

            let mut lines = Vec::new();
            lines.extend(self.narrate(Cue::Flee, Narration::new().direction(direction.name())));
            lines.push(format!(
                "You fled {direction} to the {}!",
                self.state.current_room()?.name()
            ));
            lines.push(self.room_view()?);
            return Ok(Turn::new(lines.join("\n")));
        }

        let mut lines = vec!["You failed to escape!".to_string()];
        let key = self.state.current_room_key().to_string();
        let room = self.state.world.get_mut(&key)?;
        if let Some(index) = room.target_index(None) {
            let strike = {
                let foe = room.enemy_mut(index).ok_or(FictionError::NoEnemies)?;
                foe_turn(foe, &mut self.state.player, &mut self.roller)?
            };
            let strike_lines = self.enemy_attack_lines(&strike, true);
            lines.extend(strike_lines);
            if self.state.player.is_dead() {
                return Ok(self.finish(Outcome::Defeat, lines));
            }
        }
        Ok(Turn::new(lines.join("\n")))
    }

    fn enemy_attack_lines(&mut self, strike: &AttackOutcome, fleeing: bool) -> Vec<String> {
        let enemy = &strike.attacker;
        let mut lines = Vec::new();
        if let Some(ability) = &strike.special {
            lines.push(format!("{enemy} uses {ability}!"));
        }
        if strike.dodged {
            lines.extend(self.narrate(Cue::Dodge, Narration::new().enemy(enemy)));
            lines.push(format!("You dodged {enemy}'s attack!"));
            return lines;
        }
        if strike.blocked {
            lines.extend(self.narrate(Cue::Block, Narration::new().enemy(enemy)));
        }
        let verb = if fleeing {
            "attacks you as you try to flee"
        } else {
            "attacks you"
        };
        let mut line = format!("{enemy} {verb} for {} damage!", strike.damage);
        if strike.critical {
            line.insert_str(0, "Critical hit! ");
        }
        if strike.blocked {
            line.push_str(" You blocked part of the blow.");
        }
        lines.push(line);
        lines.push(format!("Your health: {}", self.state.player.vitals()));
        lines
    }

    fn goal_cleared(&self) -> bool {
        self.state
            .world
            .room(&self.goal_room)
            .is_some_and(|room| !room.has_enemies())
    }

    // -----------------------------------------------------------------------
    // Puzzles and NPCs
    // -----------------------------------------------------------------------

    fn do_solve(&mut self, puzzle: &str, answer: &str) -> FictionResult<Turn> {
        let room = self.state.current_room_mut()?;
        let found = room
            .find_puzzle_mut(puzzle)
            .ok_or_else(|| FictionError::NoSuchPuzzle(puzzle.to_string()))?;
        let puzzle_name = found.name().to_string();
        let attempt = found.attempt(answer)?;

        let mut result = Vec::new();
        match attempt {
            Attempt::Solved { reward } => {
                result.push(format!("Correct! You solved the {puzzle_name}!"));
                if let Some(item) = reward {
                    result.push(format!("You received: {}!", item.name()));
                    room.add_item(item);
                }
            }
            Attempt::Incorrect { attempts_left: 0 } => {
                result.push("Incorrect! No attempts remaining.".to_string());
            }
            Attempt::Incorrect { attempts_left } => {
                result.push(format!("Incorrect! {attempts_left} attempts remaining."));
            }
        }

        let mut lines = Vec::new();
        lines.extend(self.narrate(Cue::Solve, Narration::new().puzzle(&puzzle_name)));
        lines.extend(result);
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_talk(&mut self, name: Option<String>) -> FictionResult<Turn> {
        let room = self.state.current_room_mut()?;
        if room.npcs().is_empty() {
            return Err(FictionError::NobodyHere);
        }
        let npc = room
            .find_npc_mut(name.as_deref())
            .ok_or_else(|| FictionError::NoSuchNpc(name.unwrap_or_default()))?;
        let line = npc.talk().to_string();
        Ok(Turn::new(format!("{} says: \"{line}\"", npc.name())))
    }

    // -----------------------------------------------------------------------
    // Saves and settings
    // -----------------------------------------------------------------------

    fn do_save(&mut self, name: Option<String>) -> FictionResult<Turn> {
        let name = name.unwrap_or_else(|| QUICKSAVE.to_string());
        let document = capture(&self.state, self.narrator.is_enabled());
        self.saves.save(&document, &name)?;
        Ok(Turn::new(format!("Game saved as '{name}'.")))
    }

    fn do_load(&mut self, name: &str) -> FictionResult<Turn> {
        let document = self.saves.load(name)?;
        let restored = restore(&document, &self.catalog)?;
        self.state = restored.state;
        self.narrator.set_enabled(restored.narrator_enabled);
        self.outcome = self
            .state
            .player
            .is_dead()
            .then_some(Outcome::Defeat);

        Ok(Turn {
            text: format!("Game loaded from '{name}'.\n\n{}", self.room_view()?),
            game_over: self.is_over(),
        })
    }

    fn do_list_saves(&self) -> FictionResult<Turn> {
        let saves = self.saves.list()?;
        if saves.is_empty() {
            return Ok(Turn::new("No saved games."));
        }
        let mut lines = vec!["Saved games:".to_string()];
        for info in saves {
            lines.push(format!(
                "  {} ({})",
                info.name,
                info.modified.format("%Y-%m-%d %H:%M")
            ));
        }
        Ok(Turn::new(lines.join("\n")))
    }

    fn do_narrator(&mut self, enabled: Option<bool>) -> Turn {
        let enabled = enabled.unwrap_or(!self.narrator.is_enabled());
        self.narrator.set_enabled(enabled);
        Turn::new(if enabled {
            "Narrator enabled."
        } else {
            "Narrator disabled."
        })
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    fn finish(&mut self, outcome: Outcome, mut lines: Vec<String>) -> Turn {
        let closing = match outcome {
            Outcome::Victory => {
                lines.extend(self.narrate(Cue::Victory, Narration::new()));
                "You have conquered the Dark Tower! Your name will be remembered in legends!"
            }
            Outcome::Defeat => {
                lines.extend(self.narrate(Cue::Death, Narration::new()));
                "You have been defeated. GAME OVER."
            }
            Outcome::Quit => "Thanks for playing! Goodbye.",
        };
        lines.push(closing.to_string());
        self.outcome = Some(outcome);
        tracing::info!(?outcome, player = self.state.player.name(), "game over");
        Turn::over(lines.join("\n"))
    }

    fn narrate(&mut self, cue: Cue, context: Narration) -> Option<String> {
        self.narrator.narrate(cue, &context, &mut self.roller)
    }

    fn room_view(&self) -> FictionResult<String> {
        let room = self.state.current_room()?;
        Ok(format!(
            "== {} ==\n{}",
            room.name().to_uppercase(),
            room.describe()
        ))
    }

    fn inventory_text(&self) -> String {
        let player = &self.state.player;
        format!(
            "{}\nWeapon: {}\nArmor: {}",
            player.inventory_list(),
            player.weapon().map_or("none", Item::name),
            player.armor().map_or("none", Item::name),
        )
    }

    fn stats_text(&self) -> String {
        let player = &self.state.player;
        let stats = player.stats();
        format!(
            "Name: {}\nHealth: {}\nAttack Power: {}\nDefense: {}\nDodge: {:.0}%\nBlock: {:.0}%\nCritical: {:.0}% (x{})\nItems: {}",
            player.name(),
            player.vitals(),
            stats.attack_power,
            stats.defense,
            stats.dodge_chance * 100.0,
            stats.block_chance * 100.0,
            stats.crit_chance * 100.0,
            stats.crit_multiplier,
            player.inventory().len(),
        )
    }
}

fn player_attack_line(attack: &AttackOutcome) -> String {
    let enemy = &attack.defender;
    if attack.dodged {
        return format!("{enemy} dodged your attack!");
    }
    let mut line = format!("You attack {enemy} for {} damage!", attack.damage);
    if attack.critical {
        line.insert_str(0, "Critical hit! ");
    }
    if attack.blocked {
        line.push_str(&format!(" {enemy} blocked part of the blow."));
    }
    line
}

fn item_names(items: &[Item]) -> String {
    items.iter().map(Item::name).collect::<Vec<_>>().join(", ")
}
