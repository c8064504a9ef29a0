//! Configuration for a game session.

use std::path::PathBuf;

use dq_save::DEFAULT_SAVE_DIR;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Player name used when none is given.
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Name of the player character.
    pub player_name: String,
    /// RNG seed for reproducible games; OS entropy when unset.
    pub seed: Option<u64>,
    /// Directory holding save files.
    pub save_dir: PathBuf,
    /// Whether the narrator starts enabled.
    pub narrator_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: None,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            narrator_enabled: true,
        }
    }
}

impl GameConfig {
    /// Set the player name. Blank names keep the default.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.player_name = name.trim().to_string();
        }
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Enable or disable the narrator.
    pub fn with_narrator(mut self, enabled: bool) -> Self {
        self.narrator_enabled = enabled;
        self
    }

    /// The random number generator for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
