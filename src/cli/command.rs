//! Line-oriented command parser for interactive play.
//!
//! Coordinates are two numbers, `x y` or `x,y`, so a session looks like:
//!
//! ```text
//! recruit 1,0 5
//! attack 1,0 2,0
//! end
//! ```

use gridreign::{Coord, ResourceType};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Command {
    /// Print the board and faction totals.
    Show,
    /// Print the command reference.
    Help,
    /// List legal attack targets from a cell.
    Targets(Coord),
    /// Recruit troops at a cell.
    Recruit(Coord, u32),
    /// Respecialize a cell.
    Upgrade(Coord, ResourceType),
    /// Fortify a cell.
    Fortify(Coord),
    /// Attack from one cell into another.
    Attack(Coord, Coord),
    /// End the current faction's turn.
    End,
    /// Leave the game.
    Quit,
}

/// Reference text printed by `help`.
pub(super) const HELP: &str = "\
commands:
  show                     board and faction totals
  targets X Y              cells attackable from X Y
  recruit X Y N            turn up to N population into troops
  upgrade X Y KIND         respecialize (food, materials, gold, balanced)
  fortify X Y              raise fortification
  attack X1 Y1 X2 Y2       attack an adjacent cell
  end                      end the turn
  quit                     leave the game";

/// Rejected input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(super) enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("'{command}' expects: {usage}")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },
    #[error("invalid coordinate '{0}' (expected X Y)")]
    BadCoord(String),
    #[error("invalid amount '{0}'")]
    BadAmount(String),
    #[error("unknown resource type '{0}'")]
    BadResource(String),
}

/// Parse one input line.
///
/// Commas are treated as spaces, so `1,0` and `1 0` name the same cell.
/// Returns `Ok(None)` for blank lines and `#` comments.
pub(super) fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let normalized = line.replace(',', " ");
    let mut parts = normalized.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("show" | "board", []) => Command::Show,
        ("help" | "?", []) => Command::Help,
        ("targets", [x, y]) => Command::Targets(parse_coord(x, y)?),
        ("recruit", [x, y, amount]) => Command::Recruit(
            parse_coord(x, y)?,
            amount
                .parse()
                .map_err(|_| ParseError::BadAmount((*amount).to_string()))?,
        ),
        ("upgrade", [x, y, kind]) => Command::Upgrade(
            parse_coord(x, y)?,
            kind.parse()
                .map_err(|_| ParseError::BadResource((*kind).to_string()))?,
        ),
        ("fortify", [x, y]) => Command::Fortify(parse_coord(x, y)?),
        ("attack", [x1, y1, x2, y2]) => {
            Command::Attack(parse_coord(x1, y1)?, parse_coord(x2, y2)?)
        }
        ("end" | "pass", []) => Command::End,
        ("quit" | "exit", []) => Command::Quit,
        (verb, _) => return Err(usage_error(verb)),
    };
    Ok(Some(command))
}

fn usage_error(verb: &str) -> ParseError {
    let (command, usage) = match verb {
        "show" | "board" => ("show", "no arguments"),
        "help" | "?" => ("help", "no arguments"),
        "targets" => ("targets", "targets X Y"),
        "recruit" => ("recruit", "recruit X Y N"),
        "upgrade" => ("upgrade", "upgrade X Y KIND"),
        "fortify" => ("fortify", "fortify X Y"),
        "attack" => ("attack", "attack X1 Y1 X2 Y2"),
        "end" | "pass" => ("end", "no arguments"),
        "quit" | "exit" => ("quit", "no arguments"),
        _ => return ParseError::UnknownCommand(verb.to_string()),
    };
    ParseError::Usage { command, usage }
}

fn parse_coord(x: &str, y: &str) -> Result<Coord, ParseError> {
    let bad = || ParseError::BadCoord(format!("{x} {y}"));
    Ok(Coord::new(
        x.parse().map_err(|_| bad())?,
        y.parse().map_err(|_| bad())?,
    ))
}
