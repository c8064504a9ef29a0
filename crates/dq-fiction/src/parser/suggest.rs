//! Verb suggestions with fuzzy matching.

use strsim::jaro_winkler;

use super::command::ALL_VERBS;

/// Minimum similarity score for a suggestion (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Suggest the known verb closest to `input`, if any scores above the threshold.
///
/// Single-character verbs are never suggested.
pub fn suggest_verb(input: &str) -> Option<String> {
    let input_lower = input.trim().to_lowercase();
    if input_lower.is_empty() {
        return None;
    }

    ALL_VERBS
        .iter()
        .flat_map(|group| group.iter())
        .filter(|verb| verb.len() > 1)
        .map(|verb| (*verb, jaro_winkler(&input_lower, verb)))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(verb, _)| verb.to_string())
}
