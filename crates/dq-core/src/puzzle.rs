//! Puzzles and their attempt state machine.
//!
//! A puzzle starts [`PuzzleState::Active`] and ends either
//! [`PuzzleState::Solved`] or [`PuzzleState::Exhausted`]. Both end states
//! are terminal: [`Puzzle::attempt`] refuses to run once either is reached.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::item::Item;

/// Attempts granted when none are specified.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The expected answer, by puzzle variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PuzzleKind {
    /// A free-text answer.
    Riddle {
        /// The accepted answer.
        answer: String,
    },
    /// A code such as a lock combination.
    Code {
        /// The accepted code.
        code: String,
    },
    /// An ordered list of tokens, answered comma-separated.
    ///
    /// Tokens are trimmed but compared case-sensitively.
    Sequence {
        /// The accepted tokens in order.
        sequence: Vec<String>,
    },
}

impl PuzzleKind {
    /// Short lowercase tag of the variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Riddle { .. } => "riddle",
            Self::Code { .. } => "code",
            Self::Sequence { .. } => "sequence",
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Riddle { answer } => answer.trim().is_empty(),
            Self::Code { code } => code.trim().is_empty(),
            Self::Sequence { sequence } => {
                sequence.is_empty() || sequence.iter().any(|t| t.trim().is_empty())
            }
        }
    }

    fn accepts(&self, answer: &str) -> bool {
        match self {
            Self::Riddle { answer: expected } | Self::Code { code: expected } => {
                normalize(answer) == normalize(expected)
            }
            Self::Sequence { sequence } => {
                let given: Vec<&str> = answer.split(',').map(str::trim).collect();
                given.len() == sequence.len()
                    && given
                        .iter()
                        .zip(sequence)
                        .all(|(given, expected)| *given == expected.trim())
            }
        }
    }
}

/// Lowercase and collapse runs of whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Where a puzzle sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleState {
    /// Unsolved with attempts remaining.
    Active {
        /// Attempts remaining (always positive).
        attempts_left: u32,
    },
    /// Solved. Terminal.
    Solved,
    /// Out of attempts without a solution. Terminal.
    Exhausted,
}

/// Result of a single accepted attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// The answer matched.
    Solved {
        /// A copy of the puzzle reward, if it has one.
        reward: Option<Item>,
    },
    /// The answer did not match.
    Incorrect {
        /// Attempts remaining after this one.
        attempts_left: u32,
    },
}

/// A named puzzle with limited attempts and an optional reward.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    name: String,
    description: String,
    kind: PuzzleKind,
    max_attempts: u32,
    attempts_left: u32,
    solved: bool,
    reward: Option<Item>,
}

impl Puzzle {
    /// Create a puzzle with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: PuzzleKind,
    ) -> CoreResult<Self> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyField("puzzle name"));
        }
        if description.trim().is_empty() {
            return Err(CoreError::EmptyField("puzzle description"));
        }
        if kind.is_empty() {
            return Err(CoreError::EmptyField("puzzle answer"));
        }
        Ok(Self {
            name,
            description,
            kind,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempts_left: DEFAULT_MAX_ATTEMPTS,
            solved: false,
            reward: None,
        })
    }

    /// A riddle answered with free text.
    pub fn riddle(
        name: impl Into<String>,
        description: impl Into<String>,
        answer: impl Into<String>,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            description,
            PuzzleKind::Riddle {
                answer: answer.into(),
            },
        )
    }

    /// A code lock.
    pub fn code(
        name: impl Into<String>,
        description: impl Into<String>,
        code: impl Into<String>,
    ) -> CoreResult<Self> {
        Self::new(name, description, PuzzleKind::Code { code: code.into() })
    }

    /// An ordered sequence.
    pub fn sequence<S: Into<String>>(
        name: impl Into<String>,
        description: impl Into<String>,
        sequence: impl IntoIterator<Item = S>,
    ) -> CoreResult<Self> {
        Self::new(
            name,
            description,
            PuzzleKind::Sequence {
                sequence: sequence.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Set the attempt limit and refill the attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> CoreResult<Self> {
        if max_attempts == 0 {
            return Err(CoreError::NotPositive("max attempts"));
        }
        self.max_attempts = max_attempts;
        self.attempts_left = max_attempts;
        Ok(self)
    }

    /// Attach a reward.
    pub fn with_reward(mut self, reward: Item) -> Self {
        self.reward = Some(reward);
        self
    }

    /// Overwrite progress from persisted state.
    ///
    /// `attempts_left` is capped at the attempt limit.
    pub fn restore_progress(&mut self, attempts_left: u32, solved: bool) {
        self.attempts_left = attempts_left.min(self.max_attempts);
        self.solved = solved;
    }

    /// Replace the reward, e.g. with a restored copy.
    pub fn set_reward(&mut self, reward: Option<Item>) {
        self.reward = reward;
    }

    /// Puzzle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Puzzle description, shown when it is examined and when it is solved.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The expected answer.
    pub fn kind(&self) -> &PuzzleKind {
        &self.kind
    }

    /// Attempt limit.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Attempts remaining.
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// The reward, if any.
    pub fn reward(&self) -> Option<&Item> {
        self.reward.as_ref()
    }

    /// Whether the puzzle has been solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether the puzzle ran out of attempts unsolved.
    pub fn is_exhausted(&self) -> bool {
        !self.solved && self.attempts_left == 0
    }

    /// Whether another attempt is allowed.
    pub fn can_attempt(&self) -> bool {
        matches!(self.state(), PuzzleState::Active { .. })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PuzzleState {
        if self.solved {
            PuzzleState::Solved
        } else if self.attempts_left == 0 {
            PuzzleState::Exhausted
        } else {
            PuzzleState::Active {
                attempts_left: self.attempts_left,
            }
        }
    }

    /// Spend one attempt on `answer`.
    pub fn attempt(&mut self, answer: &str) -> CoreResult<Attempt> {
        match self.state() {
            PuzzleState::Solved => return Err(CoreError::PuzzleSolved),
            PuzzleState::Exhausted => return Err(CoreError::NoAttemptsLeft),
            PuzzleState::Active { .. } => {}
        }

        self.attempts_left -= 1;
        if self.kind.accepts(answer) {
            self.solved = true;
            Ok(Attempt::Solved {
                reward: self.reward.clone(),
            })
        } else {
            Ok(Attempt::Incorrect {
                attempts_left: self.attempts_left,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn riddle() -> Puzzle {
        Puzzle::riddle("Sphinx", "What walks on four legs...", "Man").unwrap()
    }

    #[test]
    fn starts_active() {
        let p = riddle();
        assert_eq!(p.state(), PuzzleState::Active { attempts_left: 3 });
        assert!(p.can_attempt());
    }

    #[test]
    fn riddle_ignores_case_and_spacing() {
        let mut p = riddle();
        assert_eq!(
            p.attempt("  mAn "),
            Ok(Attempt::Solved { reward: None })
        );
        assert!(p.is_solved());
        assert_eq!(p.attempts_left(), 2);
    }

    #[test]
    fn solved_blocks_further_attempts() {
        let mut p = riddle();
        p.attempt("man").unwrap();
        assert_eq!(p.attempt("man"), Err(CoreError::PuzzleSolved));
        assert_eq!(p.state(), PuzzleState::Solved);
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let mut p = riddle();
        assert_eq!(
            p.attempt("dog"),
            Ok(Attempt::Incorrect { attempts_left: 2 })
        );
        p.attempt("cat").unwrap();
        p.attempt("bird").unwrap();
        assert_eq!(p.state(), PuzzleState::Exhausted);
        assert!(p.is_exhausted());
        assert_eq!(p.attempt("man"), Err(CoreError::NoAttemptsLeft));
        assert_eq!(p.attempts_left(), 0);
    }

    #[test]
    fn code_match() {
        let mut p = Puzzle::code("Vault", "A keypad", "1234").unwrap();
        assert!(matches!(p.attempt("4321"), Ok(Attempt::Incorrect { .. })));
        assert!(matches!(p.attempt(" 1234 "), Ok(Attempt::Solved { .. })));
    }

    #[test]
    fn sequence_is_ordered() {
        let mut p = Puzzle::sequence("Levers", "Three levers", ["red", "green", "blue"])
            .unwrap()
            .with_max_attempts(5)
            .unwrap();
        assert!(matches!(
            p.attempt("green, red, blue"),
            Ok(Attempt::Incorrect { attempts_left: 4 })
        ));
        assert!(matches!(
            p.attempt("red,green"),
            Ok(Attempt::Incorrect { attempts_left: 3 })
        ));
        assert!(matches!(
            p.attempt("Red, Green, Blue"),
            Ok(Attempt::Incorrect { attempts_left: 2 })
        ));
        assert!(matches!(
            p.attempt(" red , green,blue"),
            Ok(Attempt::Solved { .. })
        ));
    }

    #[test]
    fn reward_is_returned_and_kept() {
        let gem = Item::misc("Gem", "Sparkly").unwrap();
        let mut p = riddle().with_reward(gem.clone());
        assert_eq!(
            p.attempt("man"),
            Ok(Attempt::Solved {
                reward: Some(gem.clone())
            })
        );
        assert_eq!(p.reward(), Some(&gem));
    }

    #[test]
    fn restore_progress_overrides_defaults() {
        let mut p = riddle();
        p.restore_progress(1, true);
        assert!(p.is_solved());
        assert_eq!(p.attempts_left(), 1);
        p.restore_progress(99, false);
        assert_eq!(p.attempts_left(), 3);
    }

    #[test]
    fn validation() {
        assert_eq!(
            Puzzle::riddle("", "d", "a"),
            Err(CoreError::EmptyField("puzzle name"))
        );
        assert_eq!(
            Puzzle::riddle("n", "d", "  "),
            Err(CoreError::EmptyField("puzzle answer"))
        );
        assert_eq!(
            Puzzle::sequence("n", "d", Vec::<String>::new()),
            Err(CoreError::EmptyField("puzzle answer"))
        );
        assert_eq!(
            riddle().with_max_attempts(0),
            Err(CoreError::NotPositive("max attempts"))
        );
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let json = serde_json::to_value(PuzzleKind::Code { code: "42".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "code", "code": "42"}));
    }

    proptest! {
        #[test]
        fn wrong_answers_count_down_to_zero(max in 1u32..10, tries in 0usize..15) {
            let mut p = riddle().with_max_attempts(max).unwrap();
            for i in 0..tries {
                let before = p.attempts_left();
                match p.attempt(&format!("wrong {i}")) {
                    Ok(Attempt::Incorrect { attempts_left }) => {
                        prop_assert_eq!(attempts_left, before - 1);
                    }
                    Err(CoreError::NoAttemptsLeft) => prop_assert_eq!(before, 0),
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
            let expected = max.saturating_sub(tries as u32);
            prop_assert_eq!(p.attempts_left(), expected);
            prop_assert!(!p.is_solved());
        }
    }
}
