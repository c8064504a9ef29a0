//! Narrator system for flavor text.
//!
//! The narrator is decoration only: every command result is complete
//! without it, and a disabled narrator produces nothing.

mod templates;

use dq_mechanics::Roller;

/// The action a narration line comments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Moving through an exit.
    Move,
    /// Attacking an enemy.
    Attack,
    /// Picking up an item.
    Take,
    /// Using an item.
    Use,
    /// Equipping an item.
    Equip,
    /// Unequipping an item.
    Unequip,
    /// Dropping an item.
    Drop,
    /// Fleeing successfully.
    Flee,
    /// Attempting a puzzle.
    Solve,
    /// Unlocking a door.
    Unlock,
    /// Looking around.
    Look,
    /// Dodging an enemy attack.
    Dodge,
    /// Blocking an enemy attack.
    Block,
    /// Landing a critical hit.
    Critical,
    /// Player death.
    Death,
    /// Winning the game.
    Victory,
}

/// Values substituted into narration templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narration {
    /// Replaces `{enemy}`.
    pub enemy: Option<String>,
    /// Replaces `{item}`.
    pub item: Option<String>,
    /// Replaces `{direction}`.
    pub direction: Option<String>,
    /// Replaces `{puzzle}`.
    pub puzzle: Option<String>,
}

impl Narration {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enemy name.
    pub fn enemy(mut self, name: impl Into<String>) -> Self {
        self.enemy = Some(name.into());
        self
    }

    /// Set the item name.
    pub fn item(mut self, name: impl Into<String>) -> Self {
        self.item = Some(name.into());
        self
    }

    /// Set the direction.
    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set the puzzle name.
    pub fn puzzle(mut self, name: impl Into<String>) -> Self {
        self.puzzle = Some(name.into());
        self
    }
}

/// Picks a flavor line for a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narrator {
    enabled: bool,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Narrator {
    /// Create a narrator.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether narration is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch narration on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// A flavor line for `cue`, or `None` while disabled.
    ///
    /// The variant is chosen with [`Roller::pick`]; placeholders without a
    /// value in `context` are left as written.
    pub fn narrate<R>(&self, cue: Cue, context: &Narration, roller: &mut R) -> Option<String>
    where
        R: Roller + ?Sized,
    {
        if !self.enabled {
            return None;
        }
        let variants = templates::variants(cue);
        let template = variants.get(roller.pick(variants.len()))?;
        Some(templates::fill(template, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_mechanics::ScriptedRoller;

    #[test]
    fn disabled_narrator_is_silent() {
        let narrator = Narrator::new(false);
        let mut roller = ScriptedRoller::new();
        assert_eq!(
            narrator.narrate(Cue::Move, &Narration::new(), &mut roller),
            None
        );
    }

    #[test]
    fn toggles() {
        let mut narrator = Narrator::default();
        assert!(narrator.is_enabled());
        narrator.set_enabled(false);
        assert!(!narrator.is_enabled());
    }

    #[test]
    fn fills_placeholders() {
        let narrator = Narrator::default();
        let context = Narration::new().enemy("Goblin Warrior");
        for pick in 0..4 {
            let mut roller = ScriptedRoller::new().with_picks([pick]);
            let line = narrator.narrate(Cue::Attack, &context, &mut roller).unwrap();
            assert!(line.contains("Goblin Warrior"), "{line}");
            assert!(!line.contains('{'));
        }
    }

    #[test]
    fn every_cue_has_text() {
        let narrator = Narrator::default();
        let context = Narration::new()
            .enemy("Cave Troll")
            .item("Iron Sword")
            .direction("north")
            .puzzle("Ancient Riddle");
        for cue in templates::ALL_CUES {
            let mut roller = ScriptedRoller::new();
            let line = narrator.narrate(cue, &context, &mut roller).unwrap();
            assert!(line.len() > 10);
            assert!(!line.contains('{'), "{cue:?}: {line}");
        }
    }
}
