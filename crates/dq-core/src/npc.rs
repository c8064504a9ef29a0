//! Non-player characters.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Whether the player has spoken to an NPC yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcState {
    /// Never spoken to.
    #[default]
    NotTalked,
    /// Spoken to at least once.
    Talked,
}

/// A character with a fixed list of lines that cycles as it is talked to.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    name: String,
    description: String,
    dialogue: Vec<String>,
    state: NpcState,
    talked_count: u32,
    dialogue_index: usize,
}

impl Npc {
    /// Create an NPC. Dialogue must contain at least one line.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        description: impl Into<String>,
        dialogue: impl IntoIterator<Item = S>,
    ) -> CoreResult<Self> {
        let name = name.into();
        let description = description.into();
        let dialogue: Vec<String> = dialogue.into_iter().map(Into::into).collect();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("NPC name"));
        }
        if description.trim().is_empty() {
            return Err(CoreError::EmptyField("NPC description"));
        }
        if dialogue.is_empty() {
            return Err(CoreError::EmptyField("NPC dialogue"));
        }
        Ok(Self {
            name,
            description,
            dialogue,
            state: NpcState::NotTalked,
            talked_count: 0,
            dialogue_index: 0,
        })
    }

    /// NPC name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// NPC description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All dialogue lines in order.
    pub fn dialogue(&self) -> &[String] {
        &self.dialogue
    }

    /// Conversation state.
    pub fn state(&self) -> NpcState {
        self.state
    }

    /// How many times the NPC has been talked to.
    pub fn talked_count(&self) -> u32 {
        self.talked_count
    }

    /// Index of the line the next [`talk`](Self::talk) returns.
    pub fn dialogue_index(&self) -> usize {
        self.dialogue_index
    }

    /// Overwrite conversation progress from persisted state.
    ///
    /// An out-of-range index wraps around the dialogue length.
    pub fn restore_progress(&mut self, state: NpcState, talked_count: u32, dialogue_index: usize) {
        self.state = state;
        self.talked_count = talked_count;
        self.dialogue_index = dialogue_index % self.dialogue.len();
    }

    /// Return the next line and advance, wrapping to the first line.
    pub fn talk(&mut self) -> &str {
        let index = self.dialogue_index;
        self.state = NpcState::Talked;
        self.talked_count = self.talked_count.saturating_add(1);
        self.dialogue_index = (index + 1) % self.dialogue.len();
        &self.dialogue[index]
    }

    /// Case-insensitive name match.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
