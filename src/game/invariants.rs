//! Game invariants - sanity checks that detect bugs.
//!
//! Every command in the session is built so these can never trigger. If one
//! does, a rule implementation is wrong.

use crate::game::{Faction, Grid, TurnManager};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(
    grid: &Grid,
    factions: &[Faction],
    turns: &TurnManager,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for cell in grid.cells() {
        if cell.population() > cell.population_capacity() {
            violations.push(InvariantViolation::new(format!(
                "Cell at {} has population {} > capacity {}",
                cell.coord(),
                cell.population(),
                cell.population_capacity()
            )));
        }

        if cell.resource_level() == 0 {
            violations.push(InvariantViolation::new(format!(
                "Cell at {} has resource level 0",
                cell.coord()
            )));
        }

        if let Some(owner) = cell.owner()
            && !factions.iter().any(|f| f.id == owner)
        {
            violations.push(InvariantViolation::new(format!(
                "Cell at {} is owned by unknown faction {owner}",
                cell.coord()
            )));
        }
    }

    for (index, faction) in factions.iter().enumerate() {
        if usize::from(faction.id) != index {
            violations.push(InvariantViolation::new(format!(
                "Faction at position {index} has id {}",
                faction.id
            )));
        }
    }

    if turns.current_faction_index() >= factions.len().max(1) {
        violations.push(InvariantViolation::new(format!(
            "Current faction index {} out of range for {} factions",
            turns.current_faction_index(),
            factions.len()
        )));
    }

    if turns.is_game_over() != turns.winner().is_some() {
        violations.push(InvariantViolation::new(format!(
            "Game over flag {} disagrees with winner {:?}",
            turns.is_game_over(),
            turns.winner()
        )));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid, factions: &[Faction], turns: &TurnManager) {
    let violations = check_invariants(grid, factions, turns);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid, _factions: &[Faction], _turns: &TurnManager) {}
