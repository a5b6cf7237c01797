//! Cell and resource-type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::{Coord, FactionId, Resources};

/// Population ceiling of a freshly created cell.
pub const DEFAULT_POPULATION_CAPACITY: u32 = 10;

/// Population a cell receives when it is assigned to a faction.
pub const STARTING_POPULATION: u32 = 5;

/// What a cell specializes in producing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Produces extra food.
    Food,
    /// Produces extra materials.
    Materials,
    /// Produces extra gold.
    Gold,
    /// Produces a moderate amount of everything.
    #[default]
    Balanced,
}

impl ResourceType {
    /// All resource types in display order.
    pub const ALL: [Self; 4] = [Self::Food, Self::Materials, Self::Gold, Self::Balanced];

    /// Lowercase name used in configs and commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Materials => "materials",
            Self::Gold => "gold",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a resource type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type '{0}' (expected food, materials, gold or balanced)")]
pub struct ParseResourceTypeError(pub String);

impl FromStr for ResourceType {
    type Err = ParseResourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseResourceTypeError(s.to_string()))
    }
}

/// A single tile of the grid.
///
/// Coordinates never change after creation. The remaining fields are only
/// reachable through methods that keep `population <= population_capacity`
/// and `resource_level >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    owner: Option<FactionId>,
    resource_type: ResourceType,
    resource_level: u32,
    population: u32,
    population_capacity: u32,
    troops: u32,
    fortification: u32,
}

impl Cell {
    /// Create an unowned, balanced, level-1 cell at the given coordinate.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            owner: None,
            resource_type: ResourceType::Balanced,
            resource_level: 1,
            population: 0,
            population_capacity: DEFAULT_POPULATION_CAPACITY,
            troops: 0,
            fortification: 0,
        }
    }

    /// Position of this cell.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Owning faction, `None` when unowned.
    #[must_use]
    pub const fn owner(&self) -> Option<FactionId> {
        self.owner
    }

    /// Whether the given faction owns this cell.
    #[must_use]
    pub fn is_owned_by(&self, faction: FactionId) -> bool {
        self.owner == Some(faction)
    }

    /// Current specialization.
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Current upgrade level (always at least 1).
    #[must_use]
    pub const fn resource_level(&self) -> u32 {
        self.resource_level
    }

    /// Civilian population.
    #[must_use]
    pub const fn population(&self) -> u32 {
        self.population
    }

    /// Maximum civilian population.
    #[must_use]
    pub const fn population_capacity(&self) -> u32 {
        self.population_capacity
    }

    /// Stationed troops.
    #[must_use]
    pub const fn troops(&self) -> u32 {
        self.troops
    }

    /// Fortification level.
    #[must_use]
    pub const fn fortification(&self) -> u32 {
        self.fortification
    }

    /// Troops plus three per fortification level.
    #[must_use]
    pub const fn defense_strength(&self) -> u32 {
        self.troops
            .saturating_add(self.fortification.saturating_mul(3))
    }

    /// Per-upkeep yield of this cell.
    ///
    /// Every field is 1 by default. A specialized cell yields `3 * level` of its
    /// resource; a balanced cell yields `2 * level` of all three.
    #[must_use]
    pub const fn resource_production(&self) -> Resources {
        let level = self.resource_level;
        match self.resource_type {
            ResourceType::Food => Resources::new(level.saturating_mul(3), 1, 1),
            ResourceType::Materials => Resources::new(1, level.saturating_mul(3), 1),
            ResourceType::Gold => Resources::new(1, 1, level.saturating_mul(3)),
            ResourceType::Balanced => {
                let amount = level.saturating_mul(2);
                Resources::new(amount, amount, amount)
            }
        }
    }

    /// Hand this cell to a faction and seed its starting population.
    pub fn assign_to(&mut self, faction: FactionId) {
        self.owner = Some(faction);
        self.population = STARTING_POPULATION.min(self.population_capacity);
    }

    /// Transfer ownership without touching population (conquest).
    pub fn set_owner(&mut self, owner: Option<FactionId>) {
        self.owner = owner;
    }

    /// Overwrite the stationed troop count.
    pub fn set_troops(&mut self, troops: u32) {
        self.troops = troops;
    }

    /// Grow population by one if below capacity.
    ///
    /// Returns `true` if the population changed.
    pub fn grow_population(&mut self) -> bool {
        if self.population < self.population_capacity {
            self.population += 1;
            true
        } else {
            false
        }
    }

    /// Convert up to `amount` population into troops.
    ///
    /// Returns the number actually recruited.
    pub fn recruit(&mut self, amount: u32) -> u32 {
        let recruited = amount.min(self.population);
        self.population -= recruited;
        self.troops = self.troops.saturating_add(recruited);
        recruited
    }

    /// Switch specialization and raise the level by one.
    pub fn upgrade_resource(&mut self, kind: ResourceType) {
        self.resource_type = kind;
        self.resource_level = self.resource_level.saturating_add(1);
    }

    /// Raise fortification by one.
    pub fn fortify(&mut self) {
        self.fortification = self.fortification.saturating_add(1);
    }
}
