//! Turn sequencing, upkeep and victory detection.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::SetupError;
use crate::game::{
    Coord, Faction, FactionId, Grid, Resources, UpkeepReport, collect_resources, grow_population,
};

/// Maximum number of factions the corner placement supports.
pub const MAX_FACTIONS: usize = 4;

/// Minimum number of factions in a game.
pub const MIN_FACTIONS: usize = 2;

/// Smallest board on which the four corner placements do not overlap.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest accepted board side.
pub const MAX_GRID_SIZE: u16 = 256;

/// What `next_turn` reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSnapshot {
    /// Faction whose turn it now is.
    pub faction: FactionId,
    /// Turn counter after the transition.
    pub turn: u32,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winning faction, once decided.
    pub winner: Option<FactionId>,
    /// Upkeep results if the rotation wrapped.
    pub upkeep: Option<UpkeepReport>,
}

/// Round-robin turn state.
///
/// Owns only the counters; the grid and factions are passed in so a session
/// can hold all three side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnManager {
    current_faction: usize,
    turn: u32,
    game_over: bool,
    winner: Option<FactionId>,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnManager {
    /// Start at turn 1 with the first faction to move.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_faction: 0,
            turn: 1,
            game_over: false,
            winner: None,
        }
    }

    /// Index of the faction to move.
    #[must_use]
    pub const fn current_faction_index(&self) -> usize {
        self.current_faction
    }

    /// Completed rotations plus one.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Whether a winner has been decided.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winning faction, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<FactionId> {
        self.winner
    }

    /// Faction whose turn it is.
    #[must_use]
    pub fn current_faction<'a>(&self, factions: &'a [Faction]) -> Option<&'a Faction> {
        factions.get(self.current_faction)
    }

    /// Give every faction its starting corner and two adjacent cells.
    ///
    /// Faction 0 starts top-left, 1 top-right, 2 bottom-left and 3
    /// bottom-right. Even indices extend along +x, odd along -x; indices below
    /// two extend along +y, the others along -y.
    ///
    /// # Errors
    ///
    /// Returns an error if the faction count is outside 2..=4, the grid is
    /// smaller than [`MIN_GRID_SIZE`], or a placement would land on an
    /// already-owned cell.
    pub fn initialize_game(
        &mut self,
        grid: &mut Grid,
        factions: &[Faction],
    ) -> Result<Vec<Coord>, SetupError> {
        if factions.len() < MIN_FACTIONS {
            return Err(SetupError::TooFewFactions(factions.len()));
        }
        if factions.len() > MAX_FACTIONS {
            return Err(SetupError::TooManyFactions(factions.len()));
        }
        if grid.size() < MIN_GRID_SIZE {
            return Err(SetupError::GridTooSmall {
                size: grid.size(),
                min: MIN_GRID_SIZE,
            });
        }

        let far = grid.size() - 1;
        let mut placed = Vec::with_capacity(factions.len() * 3);

        for (index, faction) in factions.iter().enumerate() {
            let x = if index % 2 == 0 { 0 } else { far };
            let y = if index < 2 { 0 } else { far };
            let side_x = if index % 2 == 0 { x + 1 } else { x - 1 };
            let side_y = if index < 2 { y + 1 } else { y - 1 };

            for coord in [Coord::new(x, y), Coord::new(side_x, y), Coord::new(x, side_y)] {
                let cell = grid
                    .get_mut(coord)
                    .ok_or(SetupError::PlacementOutOfBounds(coord))?;
                if cell.owner().is_some() {
                    return Err(SetupError::PlacementConflict(coord));
                }
                cell.assign_to(faction.id);
                placed.push(coord);
            }
            debug!(faction = faction.id, corner = %Coord::new(x, y), "placed starting territory");
        }

        Ok(placed)
    }

    /// Add production to every faction's pool.
    #[allow(clippy::unused_self)]
    pub fn collect_resources(&self, grid: &Grid, factions: &mut [Faction]) -> Vec<Resources> {
        collect_resources(grid, factions)
    }

    /// Grow population on every owned cell.
    #[allow(clippy::unused_self)]
    pub fn grow_population(&self, grid: &mut Grid) -> usize {
        grow_population(grid)
    }

    /// Advance to the next faction.
    ///
    /// Upkeep runs only when the rotation wraps back to the first faction.
    /// A decided game is terminal: the state is returned unchanged.
    pub fn next_turn(&mut self, grid: &mut Grid, factions: &mut [Faction]) -> TurnSnapshot {
        if self.game_over {
            return self.snapshot(factions);
        }

        let mut upkeep = None;

        if !factions.is_empty() {
            self.current_faction = (self.current_faction + 1) % factions.len();
        }

        if self.current_faction == 0 {
            self.turn = self.turn.saturating_add(1);
            let collected = self.collect_resources(grid, factions);
            let cells_grown = self.grow_population(grid);
            debug!(turn = self.turn, cells_grown, "upkeep complete");
            upkeep = Some(UpkeepReport {
                collected,
                cells_grown,
            });
        }

        if let Some(faction) = factions.get_mut(self.current_faction) {
            faction.reset_actions();
        }

        self.check_victory_conditions(grid, factions);

        let snapshot = TurnSnapshot {
            upkeep,
            ..self.snapshot(factions)
        };
        info!(
            turn = self.turn,
            faction = snapshot.faction,
            game_over = self.game_over,
            "turn advanced"
        );
        snapshot
    }

    fn snapshot(&self, factions: &[Faction]) -> TurnSnapshot {
        TurnSnapshot {
            faction: factions.get(self.current_faction).map_or(0, |f| f.id),
            turn: self.turn,
            game_over: self.game_over,
            winner: self.winner,
            upkeep: None,
        }
    }

    /// Declare a winner if exactly one faction still owns territory.
    ///
    /// Once a winner is set it is never replaced. Returns the winner.
    pub fn check_victory_conditions(
        &mut self,
        grid: &Grid,
        factions: &[Faction],
    ) -> Option<FactionId> {
        if self.winner.is_some() {
            return self.winner;
        }

        let mut active = factions.iter().filter(|f| grid.count_cells(f.id) > 0);
        if let (Some(sole), None) = (active.next(), active.next()) {
            self.game_over = true;
            self.winner = Some(sole.id);
            info!(winner = sole.id, name = %sole.name, "game over");
        }

        self.winner
    }
}
