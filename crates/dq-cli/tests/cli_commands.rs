//! Integration tests for the `dq` binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dq() -> Command {
    Command::cargo_bin("dq").unwrap()
}

fn play(dir: &Path, input: &str) -> assert_cmd::assert::Assert {
    dq().args(["play", "--seed", "7", "--quiet-narrator", "--name", "Tess"])
        .arg("--save-dir")
        .arg(dir)
        .write_stdin(input)
        .assert()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_shows_banner_and_first_room() {
    let dir = TempDir::new().unwrap();
    play(dir.path(), "")
        .success()
        .stdout(predicate::str::contains("DUNGEON QUEST"))
        .stdout(predicate::str::contains("Welcome, Tess!"))
        .stdout(predicate::str::contains("== ENTRANCE HALL =="))
        .stdout(predicate::str::contains("Thanks for playing! Goodbye."));
}

#[test]
fn play_runs_commands_until_quit() {
    let dir = TempDir::new().unwrap();
    play(dir.path(), "take health potion\ninventory\nquit\nlook\n")
        .success()
        .stdout(predicate::str::contains("You picked up Health Potion."))
        .stdout(predicate::str::contains("1. Health Potion - Restores 30 HP"))
        .stdout(predicate::str::contains("Thanks for playing! Goodbye."))
        .stdout(predicate::str::contains("== ENTRANCE HALL ==").count(1));
}

#[test]
fn play_reports_errors_and_keeps_going() {
    let dir = TempDir::new().unwrap();
    play(dir.path(), "atack\nwest\nstats\n")
        .success()
        .stdout(predicate::str::contains("Did you mean 'attack'?"))
        .stdout(predicate::str::contains("You cannot go that way."))
        .stdout(predicate::str::contains("Attack Power"));
}

#[test]
fn play_save_then_resume() {
    let dir = TempDir::new().unwrap();
    play(dir.path(), "east\nsave library\nquit\n")
        .success()
        .stdout(predicate::str::contains("Game saved as 'library'."));
    assert!(dir.path().join("library.json").exists());

    play(dir.path(), "look\n")
        .success()
        .stdout(predicate::str::contains("== ENTRANCE HALL =="));

    dq().args(["play", "--quiet-narrator", "--load", "library"])
        .arg("--save-dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game loaded from 'library'."))
        .stdout(predicate::str::contains("== LIBRARY =="));
}

#[test]
fn play_load_missing_save_fails() {
    let dir = TempDir::new().unwrap();
    dq().args(["play", "--load", "ghost"])
        .arg("--save-dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: failed to load 'ghost'"));
}

// ---------------------------------------------------------------------------
// saves
// ---------------------------------------------------------------------------

#[test]
fn saves_list_empty() {
    let dir = TempDir::new().unwrap();
    dq().args(["saves", "list", "--save-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved games."));
}

#[test]
fn saves_list_show_delete() {
    let dir = TempDir::new().unwrap();
    play(dir.path(), "take health potion\nsave first\nsave second\nquit\n").success();

    dq().args(["saves", "list", "--save-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("2 saves"));

    dq().args(["saves", "show", "first", "--save-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Player:    Tess"))
        .stdout(predicate::str::contains("Health:    100/100"))
        .stdout(predicate::str::contains("Room:      Entrance Hall"))
        .stdout(predicate::str::contains("Items:     1"));

    dq().args(["saves", "delete", "first", "--save-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    assert!(!dir.path().join("first.json").exists());

    dq().args(["saves", "delete", "first", "--save-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: no save named 'first'"));
}

#[test]
fn saves_show_missing() {
    let dir = TempDir::new().unwrap();
    dq().args(["saves", "show", "nope", "--save-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no save named 'nope'"));
}

#[test]
fn help_lists_subcommands() {
    dq().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("saves"));
}
