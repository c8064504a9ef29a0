//! Clamped health track.
//!
//! Health is a current value held between zero and a positive maximum.
//! Every mutation clamps, so `0 <= current <= max` holds at all times.

use crate::error::{CoreError, CoreResult};

/// Current and maximum hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Create a full health track. The maximum must be positive.
    pub fn new(max: u32) -> CoreResult<Self> {
        if max == 0 {
            return Err(CoreError::NotPositive("max health"));
        }
        Ok(Self { current: max, max })
    }

    /// Create a track with an explicit current value, clamped to the maximum.
    pub fn with_current(current: u32, max: u32) -> CoreResult<Self> {
        let mut health = Self::new(max)?;
        health.set(current);
        Ok(health)
    }

    /// Current hit points.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Maximum hit points.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Set the current value, clamping to `[0, max]`.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Remove hit points, never going below zero. Returns the points removed.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Restore hit points, never exceeding the maximum. Returns the points restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    /// Returns true once the track has reached zero.
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
