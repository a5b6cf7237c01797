//! Output formatting utilities for CLI.

use gridreign::session::{AttackReport, CellReport, RecruitReport};
use gridreign::{Cell, Coord, ErrorKind, FactionId, SessionEvent, SessionSnapshot, TurnSnapshot};
use serde::Serialize;
use std::fmt::Write;

/// One line of JSON output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum JsonMessage<'a> {
    /// Full board and faction totals.
    Snapshot(&'a SessionSnapshot),
    /// Outcome of `recruit`.
    Recruit(&'a RecruitReport),
    /// Outcome of `upgrade` or `fortify`.
    Cell(&'a CellReport),
    /// Outcome of `attack`.
    Attack(&'a AttackReport),
    /// Outcome of `end`.
    Turn(&'a TurnSnapshot),
    /// Outcome of `targets`.
    Targets {
        /// Attacking cell.
        from: Coord,
        /// Legal targets.
        targets: &'a [Coord],
    },
    /// A queued session notification.
    Event(&'a SessionEvent),
    /// Command reference.
    Help {
        /// Help text.
        text: &'a str,
    },
    /// A rejected command.
    Error {
        /// Failure class, absent for input that did not parse.
        kind: Option<ErrorKind>,
        /// Whether an action point was spent anyway.
        action_spent: bool,
        /// Human-readable reason.
        message: String,
    },
}

/// Letter used for a faction on the board.
pub(super) fn faction_letter(id: FactionId) -> char {
    char::from(b'A'.saturating_add(id))
}

fn cell_token(cell: &Cell) -> String {
    let owner = cell.owner().map_or('.', faction_letter);
    let fort = if cell.fortification() > 0 { "#" } else { "" };
    format!("{owner}{}/{}{fort}", cell.population(), cell.troops())
}

/// Render the board as a grid of `owner population/troops` tokens.
///
/// Fortified cells carry a trailing `#`.
pub(super) fn format_board(snapshot: &SessionSnapshot) -> String {
    let size = usize::from(snapshot.grid_size);
    let mut output = String::new();

    output.push_str("    ");
    for x in 0..size {
        let _ = write!(output, "{x:>7}");
    }
    output.push('\n');

    for (y, row) in snapshot.cells.chunks(size.max(1)).enumerate() {
        let _ = write!(output, "{y:>4}");
        for cell in row {
            let _ = write!(output, "{:>7}", cell_token(cell));
        }
        output.push('\n');
    }
    output
}

/// Render turn state and per-faction totals.
pub(super) fn format_status(snapshot: &SessionSnapshot) -> String {
    let mut output = String::new();
    let current = snapshot
        .factions
        .iter()
        .find(|f| f.id == snapshot.current_faction);

    if let Some(winner) = snapshot
        .winner
        .and_then(|id| snapshot.factions.iter().find(|f| f.id == id))
    {
        let _ = writeln!(output, "Game over after turn {}: {} wins", snapshot.turn, winner.name);
    } else if let Some(current) = current {
        let _ = writeln!(
            output,
            "Turn {}: {} to move ({} actions left)",
            snapshot.turn, current.name, current.actions_remaining
        );
    }

    for faction in &snapshot.factions {
        let marker = if faction.id == snapshot.current_faction {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            output,
            "{marker} {} {:<12} {:>2} cells {:>3} pop {:>3} troops  {}",
            faction_letter(faction.id),
            faction.name,
            faction.cells,
            faction.population,
            faction.troops,
            faction.resources
        );
    }
    output
}

/// Describe a recruit outcome.
pub(super) fn format_recruit(report: &RecruitReport) -> String {
    format!(
        "Recruited {} troops at {} ({} population left). {}; {} actions left",
        report.recruited,
        report.cell.coord(),
        report.cell.population(),
        report.resources,
        report.actions_remaining
    )
}

/// Describe an upgrade or fortify outcome.
pub(super) fn format_cell(report: &CellReport) -> String {
    let cell = &report.cell;
    format!(
        "{} is now {} level {} with fortification {}. {}; {} actions left",
        cell.coord(),
        cell.resource_type(),
        cell.resource_level(),
        cell.fortification(),
        report.resources,
        report.actions_remaining
    )
}

/// Describe an attack outcome.
pub(super) fn format_attack(report: &AttackReport) -> String {
    let combat = &report.combat;
    let outcome = if report.conquered {
        format!(
            "{} captured with {} troops",
            report.target.coord(),
            report.target.troops()
        )
    } else {
        "attack repelled".to_string()
    };
    format!(
        "Attack {} -> {}: attacker lost {}, defender lost {}; {outcome}. {} actions left",
        report.origin.coord(),
        report.target.coord(),
        combat.attacker_losses,
        combat.defender_losses,
        report.actions_remaining
    )
}

/// Describe legal attack targets.
pub(super) fn format_targets(from: Coord, targets: &[Coord]) -> String {
    if targets.is_empty() {
        return format!("No targets from {from}");
    }
    let list: Vec<String> = targets.iter().map(ToString::to_string).collect();
    format!("Targets from {from}: {}", list.join(", "))
}
