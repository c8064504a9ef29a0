//! The interactive play loop.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dq_core::{Combatant, Item, Player};
use dq_fiction::{Command, GameConfig, GameSession, Outcome, parse_command};

const BANNER: &str = "\
╔═══════════════════════════════════════════════╗
║        DUNGEON QUEST: THE DARK TOWER          ║
╚═══════════════════════════════════════════════╝";

pub fn run(config: &GameConfig, load: Option<&str>) -> Result<(), String> {
    let mut session =
        GameSession::new(config).map_err(|e| format!("failed to start game: {e}"))?;

    println!("{}", BANNER.bold());
    println!("  Explore the tower, defeat its monsters, and claim the throne room.");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    match load {
        Some(name) => {
            let turn = session
                .execute(Command::Load {
                    name: name.to_string(),
                })
                .map_err(|e| format!("failed to load '{name}': {e}"))?;
            println!("{}\n", turn.text);
        }
        None => {
            let intro = session.intro().map_err(|e| e.to_string())?;
            println!("{intro}\n");
        }
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.is_over() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if parse_command(input) == Command::Stats {
            println!("{}\n", stats_table(&session.state().player));
            continue;
        }

        match session.process(input) {
            Ok(turn) => {
                if !turn.text.is_empty() {
                    println!("{}\n", turn.text);
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    match session.outcome() {
        Some(Outcome::Victory) => {
            println!("{}", "*** CONGRATULATIONS, HERO! ***".green().bold());
        }
        Some(Outcome::Defeat) => {
            println!("{}", "--- GAME OVER ---".red().bold());
        }
        Some(Outcome::Quit) => {}
        None => println!("Thanks for playing! Goodbye."),
    }

    Ok(())
}

fn stats_table(player: &Player) -> Table {
    let stats = player.stats();
    let percent = |chance: f64| format!("{:.0}%", chance * 100.0);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec!["Name".to_string(), player.name().to_string()]);
    table.add_row(vec!["Health".to_string(), player.vitals().to_string()]);
    table.add_row(vec![
        "Attack Power".to_string(),
        stats.attack_power.to_string(),
    ]);
    table.add_row(vec!["Defense".to_string(), stats.defense.to_string()]);
    table.add_row(vec!["Dodge".to_string(), percent(stats.dodge_chance)]);
    table.add_row(vec!["Block".to_string(), percent(stats.block_chance)]);
    table.add_row(vec![
        "Critical".to_string(),
        format!("{} (x{})", percent(stats.crit_chance), stats.crit_multiplier),
    ]);
    table.add_row(vec![
        "Weapon".to_string(),
        player.weapon().map_or("none", Item::name).to_string(),
    ]);
    table.add_row(vec![
        "Armor".to_string(),
        player.armor().map_or("none", Item::name).to_string(),
    ]);
    table.add_row(vec!["Items".to_string(), player.inventory().len().to_string()]);
    table
}
