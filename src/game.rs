//! Rules layer for Gridreign.
//!
//! Implements the game rules as plain data and functions:
//! - Grid of cells with ownership, population, troops and fortification
//! - Factions with resource pools and per-turn action budgets
//! - Economy (production, upkeep, population growth)
//! - Combat resolution with injectable randomness
//! - Turn rotation and victory detection

mod cell;
mod combat;
mod economy;
mod faction;
mod grid;
mod invariants;
mod state;

pub use cell::{
    Cell, DEFAULT_POPULATION_CAPACITY, ParseResourceTypeError, ResourceType, STARTING_POPULATION,
};
pub use combat::{CombatResult, FixedRandom, RandomSource, SeededRandom, resolve_attack};
pub use economy::{
    ActionCosts, Resources, UpkeepReport, collect_resources, faction_production, grow_population,
};
pub use faction::{ACTIONS_PER_TURN, Faction, FactionId, STARTING_RESOURCES};
pub use grid::{Coord, Grid};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use state::{
    MAX_FACTIONS, MAX_GRID_SIZE, MIN_FACTIONS, MIN_GRID_SIZE, TurnManager, TurnSnapshot,
};
