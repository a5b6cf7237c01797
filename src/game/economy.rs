//! Resource pools, action costs and once-per-rotation upkeep.
//!
//! Upkeep has two phases that always run in this order:
//! 1. Collection: every faction adds the production of each cell it owns.
//! 2. Growth: every owned cell below capacity gains one population.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Faction, Grid};

/// A bundle of the three resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Food stock.
    pub food: u32,
    /// Materials stock.
    pub materials: u32,
    /// Gold stock.
    pub gold: u32,
}

impl Resources {
    /// Create a resource bundle.
    #[must_use]
    pub const fn new(food: u32, materials: u32, gold: u32) -> Self {
        Self {
            food,
            materials,
            gold,
        }
    }

    /// Whether every field of `self` covers the matching field of `cost`.
    #[must_use]
    pub const fn covers(&self, cost: &Resources) -> bool {
        self.food >= cost.food && self.materials >= cost.materials && self.gold >= cost.gold
    }

    /// Subtract `cost` from every field, or `None` if any field would go negative.
    #[must_use]
    pub const fn checked_sub(&self, cost: &Resources) -> Option<Resources> {
        if self.covers(cost) {
            Some(Resources::new(
                self.food - cost.food,
                self.materials - cost.materials,
                self.gold - cost.gold,
            ))
        } else {
            None
        }
    }

    /// Field-wise saturating addition.
    #[must_use]
    pub const fn saturating_add(&self, other: &Resources) -> Resources {
        Resources::new(
            self.food.saturating_add(other.food),
            self.materials.saturating_add(other.materials),
            self.gold.saturating_add(other.gold),
        )
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "food {} / materials {} / gold {}",
            self.food, self.materials, self.gold
        )
    }
}

/// Price of each paid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    /// Cost of recruiting troops.
    pub recruit: Resources,
    /// Cost of a resource upgrade.
    pub upgrade: Resources,
    /// Cost of a fortification level.
    pub fortify: Resources,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            recruit: Resources::new(10, 0, 0),
            upgrade: Resources::new(0, 10, 0),
            fortify: Resources::new(0, 15, 0),
        }
    }
}

/// What one upkeep pass changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpkeepReport {
    /// Resources added to each faction, indexed by faction id.
    pub collected: Vec<Resources>,
    /// Number of cells whose population grew.
    pub cells_grown: usize,
}

/// Sum the production of every cell a faction owns.
#[must_use]
pub fn faction_production(grid: &Grid, faction: &Faction) -> Resources {
    grid.cells_by_faction(faction.id)
        .map(|cell| cell.resource_production())
        .fold(Resources::default(), |acc, p| acc.saturating_add(&p))
}

/// Add each faction's production to its pool.
///
/// Returns the amount credited to each faction, in faction order.
pub fn collect_resources(grid: &Grid, factions: &mut [Faction]) -> Vec<Resources> {
    factions
        .iter_mut()
        .map(|faction| {
            let income = faction_production(grid, faction);
            faction.add_resources(&income);
            income
        })
        .collect()
}

/// Grow every owned cell with headroom by one.
///
/// Returns the number of cells that grew.
pub fn grow_population(grid: &mut Grid) -> usize {
    grid.owned_cells_mut()
        .map(|cell| cell.grow_population())
        .filter(|grew| *grew)
        .count()
}
