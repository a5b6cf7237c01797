//! Game session: the composition root a presentation layer talks to.
//!
//! A [`GameSession`] owns the grid, the factions, the turn state and the
//! combat random source. Queries hand out plain data. Commands validate,
//! mutate and return the entities they changed; expected failures come back as
//! [`ActionError`] values and never panic.
//!
//! Every command checks, in order: game over, bounds, ownership, target
//! rules, the action budget, and finally the cost. A command that fails on
//! cost has already spent its action point.

use serde::Serialize;
use tracing::debug;

use crate::config::GameConfig;
use crate::error::{ActionError, SetupError};
use crate::game::{
    self, ActionCosts, Cell, CombatResult, Coord, Faction, FactionId, Grid, RandomSource,
    ResourceType, Resources, SeededRandom, TurnManager, TurnSnapshot, assert_invariants,
};

/// Notification for presentation, queued in the order changes happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A cell's state changed.
    CellChanged {
        /// The cell after the change.
        cell: Cell,
    },
    /// A faction's resource pool changed.
    ResourcesChanged {
        /// Faction whose pool changed.
        faction: FactionId,
        /// Pool after the change.
        resources: Resources,
    },
    /// An attack was resolved.
    CombatResolved {
        /// Attacking cell.
        from: Coord,
        /// Defending cell.
        to: Coord,
        /// Casualties and outcome.
        result: CombatResult,
    },
    /// Upkeep ran at the end of a rotation.
    UpkeepApplied {
        /// Number of cells whose population grew.
        cells_grown: usize,
    },
    /// A new faction is to move.
    TurnAdvanced {
        /// Faction to move.
        faction: FactionId,
        /// Turn counter.
        turn: u32,
    },
    /// The game has been decided.
    GameOver {
        /// Winning faction.
        winner: FactionId,
    },
}

/// Result of an upgrade or fortify command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellReport {
    /// The cell after the command.
    pub cell: Cell,
    /// The acting faction's pool after payment.
    pub resources: Resources,
    /// Actions left this turn.
    pub actions_remaining: u8,
}

/// Result of a recruit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecruitReport {
    /// Troops actually recruited (capped by population).
    pub recruited: u32,
    /// The cell after recruiting.
    pub cell: Cell,
    /// The acting faction's pool after payment.
    pub resources: Resources,
    /// Actions left this turn.
    pub actions_remaining: u8,
}

/// Result of an attack command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    /// Casualties and outcome.
    pub combat: CombatResult,
    /// Attacking cell after the battle.
    pub origin: Cell,
    /// Defending cell after the battle.
    pub target: Cell,
    /// Owner of the target before the battle.
    pub previous_owner: Option<FactionId>,
    /// Whether the target changed hands.
    pub conquered: bool,
    /// Actions left this turn.
    pub actions_remaining: u8,
}

/// Totals for one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionSummary {
    /// Faction id.
    pub id: FactionId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Flavor label.
    pub specialty: String,
    /// Resource pool.
    pub resources: Resources,
    /// Actions left this turn.
    pub actions_remaining: u8,
    /// Cells owned.
    pub cells: usize,
    /// Population over owned cells.
    pub population: u32,
    /// Troops over owned cells.
    pub troops: u32,
}

/// Full read-only view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Turn counter.
    pub turn: u32,
    /// Faction to move.
    pub current_faction: FactionId,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winning faction, once decided.
    pub winner: Option<FactionId>,
    /// Grid side length.
    pub grid_size: u16,
    /// Every cell in row-major order.
    pub cells: Vec<Cell>,
    /// Per-faction totals in turn order.
    pub factions: Vec<FactionSummary>,
}

/// A running game.
#[derive(Debug)]
pub struct GameSession<R: RandomSource = SeededRandom> {
    grid: Grid,
    factions: Vec<Faction>,
    turns: TurnManager,
    costs: ActionCosts,
    rng: R,
    events: Vec<SessionEvent>,
    setup_open: bool,
}

impl GameSession {
    /// Start a game seeded from `config.seed`, or from entropy when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the config describes an impossible game.
    pub fn new(config: &GameConfig) -> Result<Self, SetupError> {
        let rng = config
            .seed
            .map_or_else(SeededRandom::from_entropy, SeededRandom::new);
        Self::with_random(config, rng)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Start a game with an explicit combat random source.
    ///
    /// Starting territory is placed immediately; the first faction moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the config describes an impossible game.
    pub fn with_random(config: &GameConfig, rng: R) -> Result<Self, SetupError> {
        config.validate()?;
        let mut grid = Grid::new(config.grid_size).ok_or(SetupError::GridTooSmall {
            size: config.grid_size,
            min: game::MIN_GRID_SIZE,
        })?;
        let factions = config.build_factions();
        let mut turns = TurnManager::new();
        let placed = turns.initialize_game(&mut grid, &factions)?;

        let events = placed
            .iter()
            .filter_map(|coord| grid.get(*coord))
            .map(|cell| SessionEvent::CellChanged { cell: *cell })
            .collect();

        debug!(
            grid_size = config.grid_size,
            factions = factions.len(),
            "session started"
        );

        Ok(Self {
            grid,
            factions,
            turns,
            costs: config.costs,
            rng,
            events,
            setup_open: true,
        })
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// The board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bounds-checked cell lookup.
    #[must_use]
    pub fn get_cell(&self, coord: Coord) -> Option<&Cell> {
        self.grid.get(coord)
    }

    /// Orthogonal neighbors, ordered up, right, down, left.
    #[must_use]
    pub fn adjacent_cells(&self, coord: Coord) -> Vec<&Cell> {
        self.grid.adjacent_cells(coord)
    }

    /// Cells a faction owns, in row-major order.
    #[must_use]
    pub fn cells_by_faction(&self, faction: FactionId) -> Vec<&Cell> {
        self.grid.cells_by_faction(faction).collect()
    }

    /// All factions in turn order.
    #[must_use]
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    /// Look up a faction.
    #[must_use]
    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(usize::from(id))
    }

    /// Faction whose turn it is.
    #[must_use]
    pub fn current_faction(&self) -> &Faction {
        &self.factions[self.turns.current_faction_index()]
    }

    /// Turn state.
    #[must_use]
    pub const fn turn_manager(&self) -> &TurnManager {
        &self.turns
    }

    /// Turn counter.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turns.turn()
    }

    /// Whether the game has been decided.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.turns.is_game_over()
    }

    /// The winning faction, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<&Faction> {
        self.turns.winner().and_then(|id| self.faction(id))
    }

    /// Prices of paid actions.
    #[must_use]
    pub const fn costs(&self) -> &ActionCosts {
        &self.costs
    }

    /// Whether setup commands are still accepted.
    #[must_use]
    pub const fn is_setup_open(&self) -> bool {
        self.setup_open
    }

    /// Totals for a faction.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownFaction`] for an id with no faction.
    pub fn faction_summary(&self, id: FactionId) -> Result<FactionSummary, ActionError> {
        let faction = self.faction(id).ok_or(ActionError::UnknownFaction(id))?;
        Ok(FactionSummary {
            id: faction.id,
            name: faction.name.clone(),
            color: faction.color.clone(),
            specialty: faction.specialty.clone(),
            resources: faction.resources,
            actions_remaining: faction.actions_remaining,
            cells: self.grid.count_cells(id),
            population: faction.total_population(&self.grid),
            troops: faction.total_troops(&self.grid),
        })
    }

    /// Full read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turn: self.turns.turn(),
            current_faction: self.current_faction().id,
            game_over: self.turns.is_game_over(),
            winner: self.turns.winner(),
            grid_size: self.grid.size(),
            cells: self.grid.cells().to_vec(),
            factions: self
                .factions
                .iter()
                .filter_map(|f| self.faction_summary(f.id).ok())
                .collect(),
        }
    }

    /// Neighbors of `from` the current faction could attack from there.
    ///
    /// Empty if `from` is not a current-faction cell.
    #[must_use]
    pub fn attack_targets(&self, from: Coord) -> Vec<Coord> {
        let current = self.current_faction().id;
        match self.grid.get(from) {
            Some(cell) if cell.is_owned_by(current) => self
                .grid
                .adjacent_cells(from)
                .into_iter()
                .filter(|target| !target.is_owned_by(current))
                .map(Cell::coord)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Take all queued notifications.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Give a cell to a faction during setup.
    ///
    /// Seeds the cell's starting population. Costs no action.
    ///
    /// # Errors
    ///
    /// Fails once play has started, or for unknown cells or factions.
    pub fn assign_to_faction(
        &mut self,
        coord: Coord,
        faction: FactionId,
    ) -> Result<Cell, ActionError> {
        if !self.setup_open {
            return Err(ActionError::SetupClosed);
        }
        if self.faction(faction).is_none() {
            return Err(ActionError::UnknownFaction(faction));
        }
        let cell = self
            .grid
            .get_mut(coord)
            .ok_or(ActionError::OutOfBounds(coord))?;
        cell.assign_to(faction);
        let cell = *cell;

        debug!(%coord, faction, "cell assigned");
        self.events.push(SessionEvent::CellChanged { cell });
        self.check_invariants();
        Ok(cell)
    }

    /// Convert up to `amount` population of an owned cell into troops.
    ///
    /// # Errors
    ///
    /// See the module docs for the check order. A shortfall in food still
    /// spends the action.
    pub fn recruit_troops(&mut self, coord: Coord, amount: u32) -> Result<RecruitReport, ActionError> {
        self.ensure_running()?;
        let cell = self.owned_cell(coord)?;
        if amount == 0 {
            return Err(ActionError::ZeroAmount);
        }
        if cell.population() == 0 {
            return Err(ActionError::NoPopulation(coord));
        }

        self.spend_action()?;
        self.pay(self.costs.recruit)?;

        let cell = self.cell_mut(coord)?;
        let recruited = cell.recruit(amount);
        let cell = *cell;

        debug!(%coord, requested = amount, recruited, "troops recruited");
        self.events.push(SessionEvent::CellChanged { cell });
        self.check_invariants();

        let faction = self.current_faction();
        Ok(RecruitReport {
            recruited,
            cell,
            resources: faction.resources,
            actions_remaining: faction.actions_remaining,
        })
    }

    /// Respecialize an owned cell and raise its level by one.
    ///
    /// # Errors
    ///
    /// See the module docs for the check order. A shortfall in materials
    /// still spends the action.
    pub fn upgrade_resource(
        &mut self,
        coord: Coord,
        kind: ResourceType,
    ) -> Result<CellReport, ActionError> {
        self.ensure_running()?;
        self.owned_cell(coord)?;
        self.spend_action()?;
        self.pay(self.costs.upgrade)?;

        let cell = self.cell_mut(coord)?;
        cell.upgrade_resource(kind);
        let cell = *cell;

        debug!(%coord, %kind, level = cell.resource_level(), "resource upgraded");
        Ok(self.finish_cell_command(cell))
    }

    /// Raise an owned cell's fortification by one.
    ///
    /// # Errors
    ///
    /// See the module docs for the check order. A shortfall in materials
    /// still spends the action.
    pub fn upgrade_fortification(&mut self, coord: Coord) -> Result<CellReport, ActionError> {
        self.ensure_running()?;
        self.owned_cell(coord)?;
        self.spend_action()?;
        self.pay(self.costs.fortify)?;

        let cell = self.cell_mut(coord)?;
        cell.fortify();
        let cell = *cell;

        debug!(%coord, fortification = cell.fortification(), "cell fortified");
        Ok(self.finish_cell_command(cell))
    }

    /// Attack an adjacent cell with every troop stationed at `from`.
    ///
    /// On victory the target changes hands and receives the surviving
    /// attackers while the origin is left empty. On defeat both sides just
    /// take their casualties.
    ///
    /// # Errors
    ///
    /// Fails without spending an action if the origin is not the current
    /// faction's, holds no troops, or the target is not an adjacent foreign
    /// cell.
    pub fn resolve_attack(&mut self, from: Coord, to: Coord) -> Result<AttackReport, ActionError> {
        self.ensure_running()?;
        let current = self.current_faction().id;
        let origin = *self.owned_cell(from)?;
        let target = *self.grid.get(to).ok_or(ActionError::OutOfBounds(to))?;
        if !from.is_adjacent_to(to) {
            return Err(ActionError::NotAdjacent { from, to });
        }
        if target.is_owned_by(current) {
            return Err(ActionError::OwnTerritory(to));
        }
        if origin.troops() == 0 {
            return Err(ActionError::NoTroops(from));
        }

        self.spend_action()?;

        let combat = game::resolve_attack(&origin, &target, &mut self.rng);
        let (origin_cell, target_cell) = self
            .grid
            .get_pair_mut(from, to)
            .ok_or(ActionError::NotAdjacent { from, to })?;

        if combat.attacker_wins {
            target_cell.set_owner(Some(current));
            target_cell.set_troops(combat.attacker_remaining);
            origin_cell.set_troops(0);
        } else {
            origin_cell.set_troops(combat.attacker_remaining);
            target_cell.set_troops(combat.defender_remaining);
        }
        let (origin, target_after) = (*origin_cell, *target_cell);

        debug!(
            %from,
            %to,
            attacker_losses = combat.attacker_losses,
            defender_losses = combat.defender_losses,
            conquered = combat.attacker_wins,
            "attack resolved"
        );
        self.events.push(SessionEvent::CombatResolved {
            from,
            to,
            result: combat,
        });
        self.events.push(SessionEvent::CellChanged { cell: origin });
        self.events.push(SessionEvent::CellChanged { cell: target_after });
        self.check_invariants();

        Ok(AttackReport {
            combat,
            origin,
            target: target_after,
            previous_owner: target.owner(),
            conquered: combat.attacker_wins,
            actions_remaining: self.current_faction().actions_remaining,
        })
    }

    /// Pass play to the next faction, running upkeep after a full rotation.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameOver`] once a winner is decided.
    pub fn end_turn(&mut self) -> Result<TurnSnapshot, ActionError> {
        self.ensure_running()?;
        self.setup_open = false;

        let snapshot = self.turns.next_turn(&mut self.grid, &mut self.factions);

        if let Some(upkeep) = &snapshot.upkeep {
            for (faction, income) in self.factions.iter().zip(&upkeep.collected) {
                if *income != Resources::default() {
                    self.events.push(SessionEvent::ResourcesChanged {
                        faction: faction.id,
                        resources: faction.resources,
                    });
                }
            }
            self.events.push(SessionEvent::UpkeepApplied {
                cells_grown: upkeep.cells_grown,
            });
        }
        self.events.push(SessionEvent::TurnAdvanced {
            faction: snapshot.faction,
            turn: snapshot.turn,
        });
        if let Some(winner) = snapshot.winner {
            self.events.push(SessionEvent::GameOver { winner });
        }

        self.check_invariants();
        Ok(snapshot)
    }

    /// Re-run the victory check without advancing the turn.
    pub fn check_victory_conditions(&mut self) -> Option<FactionId> {
        let already = self.turns.winner();
        let winner = self.turns.check_victory_conditions(&self.grid, &self.factions);
        if let (None, Some(winner)) = (already, winner) {
            self.events.push(SessionEvent::GameOver { winner });
        }
        winner
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn ensure_running(&self) -> Result<(), ActionError> {
        if self.turns.is_game_over() {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }

    fn owned_cell(&self, coord: Coord) -> Result<&Cell, ActionError> {
        let cell = self.grid.get(coord).ok_or(ActionError::OutOfBounds(coord))?;
        if cell.is_owned_by(self.current_faction().id) {
            Ok(cell)
        } else {
            Err(ActionError::NotOwned(coord))
        }
    }

    fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell, ActionError> {
        self.grid
            .get_mut(coord)
            .ok_or(ActionError::OutOfBounds(coord))
    }

    fn current_faction_mut(&mut self) -> &mut Faction {
        let index = self.turns.current_faction_index();
        &mut self.factions[index]
    }

    fn spend_action(&mut self) -> Result<(), ActionError> {
        if !self.current_faction_mut().use_action() {
            debug!(faction = self.current_faction().id, "no actions remaining");
            return Err(ActionError::ActionsExhausted);
        }
        self.setup_open = false;
        Ok(())
    }

    fn pay(&mut self, cost: Resources) -> Result<(), ActionError> {
        let faction = self.current_faction_mut();
        if faction.pay(&cost) {
            let (id, resources) = (faction.id, faction.resources);
            self.events.push(SessionEvent::ResourcesChanged {
                faction: id,
                resources,
            });
            Ok(())
        } else {
            debug!(faction = faction.id, %cost, available = %faction.resources, "cannot afford action");
            Err(ActionError::InsufficientResources {
                cost,
                available: faction.resources,
            })
        }
    }

    fn finish_cell_command(&mut self, cell: Cell) -> CellReport {
        self.events.push(SessionEvent::CellChanged { cell });
        self.check_invariants();
        let faction = self.current_faction();
        CellReport {
            cell,
            resources: faction.resources,
            actions_remaining: faction.actions_remaining,
        }
    }

    fn check_invariants(&self) {
        assert_invariants(&self.grid, &self.factions, &self.turns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::game::FixedRandom;

    fn two_player() -> GameSession<FixedRandom> {
        let config = GameConfig {
            grid_size: 4,
            ..GameConfig::default().with_faction_count(2)
        };
        GameSession::with_random(&config, FixedRandom(0.5)).unwrap()
    }

    #[test]
    fn test_session_starts_with_placement() {
        let session = two_player();
        assert_eq!(session.turn(), 1);
        assert_eq!(session.current_faction().id, 0);
        assert_eq!(session.cells_by_faction(0).len(), 3);
        assert_eq!(session.cells_by_faction(1).len(), 3);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_recruit_pays_food() {
        let mut session = two_player();
        let report = session.recruit_troops(Coord::new(0, 0), 3).unwrap();
        assert_eq!(report.recruited, 3);
        assert_eq!(report.cell.troops(), 3);
        assert_eq!(report.cell.population(), 2);
        assert_eq!(report.resources, Resources::new(10, 20, 10));
        assert_eq!(report.actions_remaining, 2);
    }

    #[test]
    fn test_failed_payment_still_spends_action() {
        let mut session = two_player();
        session.recruit_troops(Coord::new(0, 0), 1).unwrap();
        session.recruit_troops(Coord::new(1, 0), 1).unwrap();

        // Food is now 0: the third recruit spends the action but changes nothing else.
        let err = session.recruit_troops(Coord::new(0, 1), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientResources);
        assert_eq!(session.current_faction().actions_remaining, 0);
        assert_eq!(session.get_cell(Coord::new(0, 1)).unwrap().troops(), 0);

        let err = session.upgrade_fortification(Coord::new(0, 0)).unwrap_err();
        assert_eq!(err, ActionError::ActionsExhausted);
    }

    #[test]
    fn test_invalid_target_spends_nothing() {
        let mut session = two_player();
        let before = session.current_faction().clone();

        assert_eq!(
            session.upgrade_fortification(Coord::new(3, 0)),
            Err(ActionError::NotOwned(Coord::new(3, 0)))
        );
        assert_eq!(
            session.upgrade_fortification(Coord::new(9, 0)),
            Err(ActionError::OutOfBounds(Coord::new(9, 0)))
        );
        assert_eq!(
            session.resolve_attack(Coord::new(1, 0), Coord::new(2, 0)),
            Err(ActionError::NoTroops(Coord::new(1, 0)))
        );
        assert_eq!(
            session.resolve_attack(Coord::new(0, 0), Coord::new(1, 0)),
            Err(ActionError::OwnTerritory(Coord::new(1, 0)))
        );
        assert_eq!(
            session.resolve_attack(Coord::new(0, 0), Coord::new(2, 2)),
            Err(ActionError::NotAdjacent {
                from: Coord::new(0, 0),
                to: Coord::new(2, 2)
            })
        );
        assert_eq!(
            session.recruit_troops(Coord::new(0, 0), 0),
            Err(ActionError::ZeroAmount)
        );

        assert_eq!(session.current_faction(), &before);
    }

    #[test]
    fn test_conquest_moves_surviving_troops() {
        let mut session = two_player();
        session.recruit_troops(Coord::new(1, 0), 5).unwrap();

        let report = session
            .resolve_attack(Coord::new(1, 0), Coord::new(2, 0))
            .unwrap();
        assert!(report.conquered);
        assert_eq!(report.previous_owner, Some(1));
        assert_eq!(report.target.owner(), Some(0));
        assert_eq!(report.target.troops(), report.combat.attacker_remaining);
        assert_eq!(report.origin.troops(), 0);
        assert_eq!(session.cells_by_faction(1).len(), 2);
    }

    #[test]
    fn test_defeat_applies_casualties_only() {
        let mut session = two_player();
        session.recruit_troops(Coord::new(1, 0), 2).unwrap();
        session.grid.get_mut(Coord::new(2, 0)).unwrap().set_troops(10);

        let report = session
            .resolve_attack(Coord::new(1, 0), Coord::new(2, 0))
            .unwrap();
        assert!(!report.conquered);
        assert_eq!(report.target.owner(), Some(1));
        assert_eq!(report.origin.troops(), report.combat.attacker_remaining);
        assert_eq!(report.target.troops(), report.combat.defender_remaining);
    }

    #[test]
    fn test_setup_closes_after_first_action() {
        let mut session = two_player();
        assert!(session.assign_to_faction(Coord::new(2, 2), 1).is_ok());
        assert_eq!(
            session.assign_to_faction(Coord::new(2, 2), 9),
            Err(ActionError::UnknownFaction(9))
        );

        session.upgrade_resource(Coord::new(0, 0), ResourceType::Food).unwrap();
        assert_eq!(
            session.assign_to_faction(Coord::new(2, 3), 0),
            Err(ActionError::SetupClosed)
        );
    }

    #[test]
    fn test_attack_targets() {
        let session = two_player();
        assert_eq!(session.attack_targets(Coord::new(1, 0)), vec![
            Coord::new(2, 0),
            Coord::new(1, 1)
        ]);
        assert!(session.attack_targets(Coord::new(3, 0)).is_empty());
    }

    #[test]
    fn test_events_are_drained() {
        let mut session = two_player();
        assert_eq!(session.drain_events().len(), 6);
        session.upgrade_fortification(Coord::new(0, 0)).unwrap();
        let events = session.drain_events();
        assert!(matches!(events[0], SessionEvent::ResourcesChanged { faction: 0, .. }));
        assert!(matches!(events[1], SessionEvent::CellChanged { .. }));
        assert!(session.drain_events().is_empty());
    }
}
