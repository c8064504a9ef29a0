//! Fleeing from combat.

use crate::roller::Roller;

/// Probability that an attempt to flee succeeds.
pub const FLEE_CHANCE: f64 = 0.5;

/// Roll to flee. On success, returns the index of the exit taken out of
/// `exits` choices; `None` means the attempt failed or there was nowhere
/// to run.
pub fn attempt_flee<R>(exits: usize, roller: &mut R) -> Option<usize>
where
    R: Roller + ?Sized,
{
    if roller.chance() >= FLEE_CHANCE || exits == 0 {
        return None;
    }
    Some(roller.pick(exits))
}
