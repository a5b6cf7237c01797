//! Faction state management.

use serde::{Deserialize, Serialize};

use crate::game::{Grid, Resources};

/// Index of a faction in turn order.
pub type FactionId = u8;

/// Actions each faction gets at the start of its turn.
pub const ACTIONS_PER_TURN: u8 = 3;

/// Resources a faction starts the game with.
pub const STARTING_RESOURCES: Resources = Resources::new(20, 20, 10);

/// State for a single faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    /// Stable index into the faction list.
    pub id: FactionId,
    /// Display name.
    pub name: String,
    /// Display color, opaque to the engine.
    pub color: String,
    /// Flavor label such as "Economic" or "Military".
    pub specialty: String,
    /// Current resource pool.
    pub resources: Resources,
    /// Actions left this turn.
    pub actions_remaining: u8,
}

impl Faction {
    /// Create a faction with starting resources and a full action budget.
    #[must_use]
    pub fn new(id: FactionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: String::new(),
            specialty: String::new(),
            resources: STARTING_RESOURCES,
            actions_remaining: ACTIONS_PER_TURN,
        }
    }

    /// Set the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the specialty label.
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    /// Replace the starting resource pool.
    #[must_use]
    pub const fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Restore the full action budget.
    pub fn reset_actions(&mut self) {
        self.actions_remaining = ACTIONS_PER_TURN;
    }

    /// Spend one action.
    ///
    /// Returns `false` without changing anything if no actions remain.
    pub fn use_action(&mut self) -> bool {
        if self.actions_remaining == 0 {
            return false;
        }
        self.actions_remaining -= 1;
        true
    }

    /// Whether the pool covers `cost` in every field.
    #[must_use]
    pub const fn can_afford(&self, cost: &Resources) -> bool {
        self.resources.covers(cost)
    }

    /// Atomically pay `cost`.
    ///
    /// Returns `false` and leaves the pool untouched if any field is short.
    pub fn pay(&mut self, cost: &Resources) -> bool {
        match self.resources.checked_sub(cost) {
            Some(remaining) => {
                self.resources = remaining;
                true
            }
            None => false,
        }
    }

    /// Credit income to the pool.
    pub fn add_resources(&mut self, income: &Resources) {
        self.resources = self.resources.saturating_add(income);
    }

    /// Population summed over this faction's cells.
    #[must_use]
    pub fn total_population(&self, grid: &Grid) -> u32 {
        grid.total_population(self.id)
    }

    /// Troops summed over this faction's cells.
    #[must_use]
    pub fn total_troops(&self, grid: &Grid) -> u32 {
        grid.total_troops(self.id)
    }
}
