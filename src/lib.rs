// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gridreign: a turn-based territorial strategy engine.
//!
//! Factions compete on a square grid for resources, population and military
//! control until one of them owns every remaining territory.
//!
//! This crate is the rules layer only. It owns the game state and enforces
//! every transition; rendering and input belong to whoever drives a
//! [`GameSession`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (CLI, UI, ...)       │
//! ├─────────────────────────────────────┤
//! │   GameSession (commands, events)    │
//! ├─────────────────────────────────────┤
//! │   TurnManager · CombatResolver      │
//! ├─────────────────────────────────────┤
//! │   Grid · Cell · Faction             │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod session;

pub use config::{FactionConfig, GameConfig};
pub use error::{ActionError, ConfigError, ErrorKind, SetupError};

// Re-export key game types at crate root for convenience
pub use game::{
    Cell, CombatResult, Coord, Faction, FactionId, Grid, RandomSource, ResourceType, Resources,
    TurnManager, TurnSnapshot,
};
pub use session::{GameSession, SessionEvent, SessionSnapshot};
