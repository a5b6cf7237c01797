//! Error types for setup, commands and configuration.

use std::path::PathBuf;

use serde::Serialize;

use crate::game::{Coord, FactionId, Resources};

/// Reasons a game cannot be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Fewer factions than a game needs.
    #[error("too few factions: {0} (minimum 2)")]
    TooFewFactions(usize),
    /// More factions than the corner placement supports.
    #[error("too many factions: {0} (maximum 4)")]
    TooManyFactions(usize),
    /// Board too small for non-overlapping starting territories.
    #[error("grid size {size} is too small (minimum {min})")]
    GridTooSmall {
        /// Requested size.
        size: u16,
        /// Smallest accepted size.
        min: u16,
    },
    /// Board larger than the engine accepts.
    #[error("grid size {size} is too large (maximum {max})")]
    GridTooLarge {
        /// Requested size.
        size: u16,
        /// Largest accepted size.
        max: u16,
    },
    /// A starting cell fell outside the board.
    #[error("starting cell {0} is outside the grid")]
    PlacementOutOfBounds(Coord),
    /// Two starting territories overlap.
    #[error("starting cell {0} is already owned")]
    PlacementConflict(Coord),
}

/// Taxonomy of command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The target is not a legal choice. Nothing changed.
    InvalidTarget,
    /// The action point was spent but the cost could not be paid.
    InsufficientResources,
    /// No action points left. Nothing changed.
    ExhaustedActions,
    /// Malformed request (bad coordinates, unknown faction, wrong phase).
    /// Nothing changed.
    Structural,
}

/// Expected failure of a session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The coordinate is outside the grid.
    #[error("{0} is outside the grid")]
    OutOfBounds(Coord),
    /// No faction has this id.
    #[error("unknown faction {0}")]
    UnknownFaction(FactionId),
    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,
    /// Setup commands are no longer accepted.
    #[error("setup is closed once play has started")]
    SetupClosed,
    /// The acting cell does not belong to the current faction.
    #[error("cell {0} is not owned by the current faction")]
    NotOwned(Coord),
    /// The target is not orthogonally adjacent to the origin.
    #[error("cell {to} is not adjacent to {from}")]
    NotAdjacent {
        /// Attacking cell.
        from: Coord,
        /// Target cell.
        to: Coord,
    },
    /// The target already belongs to the attacker.
    #[error("cell {0} already belongs to the current faction")]
    OwnTerritory(Coord),
    /// The origin has no troops to attack with.
    #[error("cell {0} has no troops")]
    NoTroops(Coord),
    /// The cell has no population to recruit from.
    #[error("cell {0} has no population to recruit")]
    NoPopulation(Coord),
    /// A recruit request for zero troops.
    #[error("recruit amount must be at least 1")]
    ZeroAmount,
    /// No action points left this turn.
    #[error("no actions remaining this turn")]
    ActionsExhausted,
    /// The action point was spent but the cost was not covered.
    #[error("cannot afford {cost} (have {available})")]
    InsufficientResources {
        /// Required payment.
        cost: Resources,
        /// Pool at the time of the attempt.
        available: Resources,
    },
}

impl ActionError {
    /// Classify this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds(_) | Self::UnknownFaction(_) | Self::GameOver | Self::SetupClosed => {
                ErrorKind::Structural
            }
            Self::NotOwned(_)
            | Self::NotAdjacent { .. }
            | Self::OwnTerritory(_)
            | Self::NoTroops(_)
            | Self::NoPopulation(_)
            | Self::ZeroAmount => ErrorKind::InvalidTarget,
            Self::ActionsExhausted => ErrorKind::ExhaustedActions,
            Self::InsufficientResources { .. } => ErrorKind::InsufficientResources,
        }
    }

    /// Whether the failed command still spent an action point.
    #[must_use]
    pub const fn consumed_action(&self) -> bool {
        matches!(self.kind(), ErrorKind::InsufficientResources)
    }
}

/// Failure to load a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for a config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be rendered.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The config describes an impossible game.
    #[error("invalid config: {0}")]
    Invalid(#[from] SetupError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(
            ActionError::OutOfBounds(Coord::new(9, 9)).kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            ActionError::NotOwned(Coord::new(1, 1)).kind(),
            ErrorKind::InvalidTarget
        );
        assert_eq!(
            ActionError::ActionsExhausted.kind(),
            ErrorKind::ExhaustedActions
        );
        let short = ActionError::InsufficientResources {
            cost: Resources::new(10, 0, 0),
            available: Resources::new(3, 0, 0),
        };
        assert_eq!(short.kind(), ErrorKind::InsufficientResources);
        assert!(short.consumed_action());
        assert!(!ActionError::ActionsExhausted.consumed_action());
    }

    #[test]
    fn test_error_display() {
        let err = ActionError::NotAdjacent {
            from: Coord::new(0, 0),
            to: Coord::new(2, 0),
        };
        assert_eq!(err.to_string(), "cell (2, 0) is not adjacent to (0, 0)");

        let err = SetupError::GridTooSmall { size: 2, min: 4 };
        assert_eq!(err.to_string(), "grid size 2 is too small (minimum 4)");
    }
}
