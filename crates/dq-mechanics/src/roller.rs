//! Sources of randomness for combat.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// Largest absolute attack variance.
pub const VARIANCE: i32 = 2;

/// The three kinds of draw combat needs.
pub trait Roller {
    /// Uniform draw in `[0, 1)`.
    fn chance(&mut self) -> f64;

    /// Uniform integer in `[-VARIANCE, VARIANCE]`.
    fn variance(&mut self) -> i32;

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl Roller for StdRng {
    fn chance(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn variance(&mut self) -> i32 {
        self.random_range(-VARIANCE..=VARIANCE)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.random_range(0..len)
    }
}

/// A roller that replays queued draws.
///
/// Once a queue runs dry it falls back to a neutral draw: `0.99` for
/// chances (so no modifier triggers), `0` for variance, and the first
/// index for picks. Scripted values are clamped into their valid ranges.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    chances: VecDeque<f64>,
    variances: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedRoller {
    /// Chance returned once the chance queue is empty.
    pub const NEUTRAL_CHANCE: f64 = 0.99;

    /// An empty script: every draw is neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue chance draws, consumed in order.
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(chances);
        self
    }

    /// Queue variance draws, consumed in order.
    pub fn with_variances(mut self, variances: impl IntoIterator<Item = i32>) -> Self {
        self.variances.extend(variances);
        self
    }

    /// Queue pick draws, consumed in order.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Whether every queued draw has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.chances.is_empty() && self.variances.is_empty() && self.picks.is_empty()
    }
}

impl Roller for ScriptedRoller {
    fn chance(&mut self) -> f64 {
        self.chances
            .pop_front()
            .map_or(Self::NEUTRAL_CHANCE, |c| c.clamp(0.0, 0.999_999))
    }

    fn variance(&mut self) -> i32 {
        self.variances
            .pop_front()
            .map_or(0, |v| v.clamp(-VARIANCE, VARIANCE))
    }

    fn pick(&mut self, len: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(len.saturating_sub(1))
    }
}
