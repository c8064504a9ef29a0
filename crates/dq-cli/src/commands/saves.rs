//! Save-file management subcommands.

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dq_save::SaveManager;

pub fn list(dir: &Path) -> Result<(), String> {
    let saves = SaveManager::new(dir).list().map_err(|e| e.to_string())?;

    if saves.is_empty() {
        println!("  No saved games.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Modified", "Size"]);
    for info in &saves {
        table.add_row(vec![
            info.name.clone(),
            info.modified.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{} B", info.size),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} saves", saves.len());
    Ok(())
}

pub fn show(dir: &Path, name: &str) -> Result<(), String> {
    let manager = SaveManager::new(dir);
    let info = manager
        .info(name)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no save named '{name}'"))?;
    let document = manager.load(name).map_err(|e| e.to_string())?;
    let room = document
        .rooms
        .get(&document.current_room)
        .map_or(document.current_room.as_str(), |room| room.name.as_str());

    println!("  {}", info.name.bold());
    println!("  File:      {}", info.path.display());
    println!(
        "  Saved at:  {}",
        document.saved_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Version:   {}", document.version);
    println!("  Player:    {}", document.player.name);
    println!(
        "  Health:    {}/{}",
        document.player.health, document.player.max_health
    );
    println!("  Room:      {room}");
    println!("  Items:     {}", document.player.inventory.len());
    println!(
        "  Narrator:  {}",
        if document.narrator_enabled { "on" } else { "off" }
    );
    Ok(())
}

pub fn delete(dir: &Path, name: &str) -> Result<(), String> {
    let deleted = SaveManager::new(dir)
        .delete(name)
        .map_err(|e| e.to_string())?;
    if deleted {
        println!("  {} save '{name}'", "Deleted".bold());
        Ok(())
    } else {
        Err(format!("no save named '{name}'"))
    }
}
