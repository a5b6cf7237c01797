//! Play command implementation.

use super::command::{Command, HELP, ParseError, parse_command};
use super::output::{
    JsonMessage, format_attack, format_board, format_cell, format_recruit, format_status,
    format_targets,
};
use super::{CliError, OutputFormat};
use gridreign::config::FactionConfig;
use gridreign::{ActionError, GameConfig, GameSession, RandomSource, SessionEvent};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, trace};

/// Execute the play command against stdin and stdout.
///
/// # Errors
///
/// Returns an error if the config is unusable or terminal I/O fails.
pub(crate) fn execute(
    config: Option<PathBuf>,
    size: Option<u16>,
    factions: Option<usize>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut game_config = match &config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = size {
        game_config.grid_size = size;
    }
    if let Some(count) = factions {
        game_config = set_faction_count(game_config, count);
    }
    if seed.is_some() {
        game_config.seed = seed;
    }

    info!(
        grid_size = game_config.grid_size,
        factions = game_config.factions.len(),
        seed = ?game_config.seed,
        "starting game"
    );
    let mut session = GameSession::new(&game_config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_loop(&mut session, stdin.lock(), &mut out, format)
}

/// Print the default config as TOML.
///
/// # Errors
///
/// Returns an error if the config cannot be rendered.
pub(crate) fn print_default_config() -> Result<(), CliError> {
    print!("{}", GameConfig::default().to_toml_string()?);
    Ok(())
}

/// Truncate the faction list, or pad it with generic entries.
fn set_faction_count(config: GameConfig, count: usize) -> GameConfig {
    let mut config = config.with_faction_count(count);
    while config.factions.len() < count {
        config.factions.push(FactionConfig {
            name: format!("Faction {}", config.factions.len() + 1),
            ..FactionConfig::default()
        });
    }
    config
}

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Writes command outcomes in the selected format.
struct Printer<'w, W: Write> {
    out: &'w mut W,
    format: OutputFormat,
}

impl<W: Write> Printer<'_, W> {
    fn emit(&mut self, message: &JsonMessage<'_>, text: &str) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *self.out, message)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn show<R: RandomSource>(&mut self, session: &GameSession<R>) -> Result<(), CliError> {
        let snapshot = session.snapshot();
        let text = format!("{}\n{}", format_status(&snapshot), format_board(&snapshot));
        self.emit(&JsonMessage::Snapshot(&snapshot), &text)
    }

    fn action_error(&mut self, err: &ActionError) -> Result<(), CliError> {
        let spent = if err.consumed_action() {
            " (action spent)"
        } else {
            ""
        };
        self.emit(
            &JsonMessage::Error {
                kind: Some(err.kind()),
                action_spent: err.consumed_action(),
                message: err.to_string(),
            },
            &format!("error: {err}{spent}"),
        )
    }

    fn parse_error(&mut self, err: &ParseError) -> Result<(), CliError> {
        self.emit(
            &JsonMessage::Error {
                kind: None,
                action_spent: false,
                message: err.to_string(),
            },
            &format!("error: {err}"),
        )
    }

    fn events(&mut self, events: &[SessionEvent]) -> Result<(), CliError> {
        for event in events {
            match self.format {
                OutputFormat::Text => trace!(?event, "session event"),
                OutputFormat::Json => self.emit(&JsonMessage::Event(event), "")?,
            }
        }
        Ok(())
    }
}

/// Read commands until `quit`, end of input, or a decided game.
///
/// # Errors
///
/// Returns an error only if reading or writing fails; rejected commands are
/// reported on `out` and the loop continues.
pub(crate) fn run_loop<R, I, W>(
    session: &mut GameSession<R>,
    input: I,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), CliError>
where
    R: RandomSource,
    I: BufRead,
    W: Write,
{
    let mut printer = Printer { out, format };

    // Placement events are implied by the opening snapshot.
    session.drain_events();
    printer.show(session)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                printer.parse_error(&err)?;
                continue;
            }
        };

        let flow = dispatch(session, command, &mut printer)?;
        let events = session.drain_events();
        printer.events(&events)?;

        if flow == Flow::Quit || session.is_game_over() {
            break;
        }
    }

    printer.out.flush()?;
    Ok(())
}

fn dispatch<R: RandomSource, W: Write>(
    session: &mut GameSession<R>,
    command: Command,
    printer: &mut Printer<'_, W>,
) -> Result<Flow, CliError> {
    match command {
        Command::Show => printer.show(session)?,
        Command::Help => printer.emit(&JsonMessage::Help { text: HELP }, HELP)?,
        Command::Targets(from) => {
            let targets = session.attack_targets(from);
            printer.emit(
                &JsonMessage::Targets {
                    from,
                    targets: &targets,
                },
                &format_targets(from, &targets),
            )?;
        }
        Command::Recruit(at, amount) => match session.recruit_troops(at, amount) {
            Ok(report) => printer.emit(&JsonMessage::Recruit(&report), &format_recruit(&report))?,
            Err(err) => printer.action_error(&err)?,
        },
        Command::Upgrade(at, kind) => match session.upgrade_resource(at, kind) {
            Ok(report) => printer.emit(&JsonMessage::Cell(&report), &format_cell(&report))?,
            Err(err) => printer.action_error(&err)?,
        },
        Command::Fortify(at) => match session.upgrade_fortification(at) {
            Ok(report) => printer.emit(&JsonMessage::Cell(&report), &format_cell(&report))?,
            Err(err) => printer.action_error(&err)?,
        },
        Command::Attack(from, to) => match session.resolve_attack(from, to) {
            Ok(report) => printer.emit(&JsonMessage::Attack(&report), &format_attack(&report))?,
            Err(err) => printer.action_error(&err)?,
        },
        Command::End => match session.end_turn() {
            Ok(turn) => {
                let snapshot = session.snapshot();
                let mut text = String::new();
                if let Some(upkeep) = &turn.upkeep {
                    text.push_str(&format!(
                        "Upkeep: resources collected, {} cells grew\n",
                        upkeep.cells_grown
                    ));
                }
                text.push_str(&format_status(&snapshot));
                text.push('\n');
                text.push_str(&format_board(&snapshot));
                printer.emit(&JsonMessage::Turn(&turn), &text)?;
            }
            Err(err) => printer.action_error(&err)?,
        },
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridreign::game::FixedRandom;
    use std::io::Cursor;

    fn two_player() -> GameSession<FixedRandom> {
        let config = GameConfig {
            grid_size: 4,
            ..GameConfig::default().with_faction_count(2)
        };
        GameSession::with_random(&config, FixedRandom(0.5)).unwrap()
    }

    fn play(script: &str, format: OutputFormat) -> (GameSession<FixedRandom>, String) {
        let mut session = two_player();
        let mut out = Vec::new();
        run_loop(&mut session, Cursor::new(script), &mut out, format).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    const VICTORY: &str = "\
recruit 1,0 5
attack 1,0 2,0
attack 2,0 3,0
end
end
attack 3,0 3,1
end
show
";

    #[test]
    fn test_text_game_to_victory() {
        let (session, out) = play(VICTORY, OutputFormat::Text);
        assert!(session.is_game_over());
        assert_eq!(session.winner().map(|f| f.id), Some(0));
        assert!(out.contains("Recruited 5 troops at (1, 0)"));
        assert!(out.contains("(2, 0) captured with 5 troops"));
        assert!(out.contains("Faction 1 wins"));
        // Input after the deciding turn is never read.
        assert_eq!(out.matches("Game over").count(), 1);
    }

    #[test]
    fn test_json_lines_parse() {
        let (_, out) = play("fortify 3,0\nrecruit 0,0 2\nbogus\nquit\nend\n", OutputFormat::Json);
        let messages: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(messages[0]["type"], "snapshot");
        assert_eq!(messages[1]["type"], "error");
        assert_eq!(messages[1]["kind"], "invalid_target");
        assert_eq!(messages[2]["type"], "recruit");
        assert_eq!(messages[2]["recruited"], 2);
        assert!(messages.iter().any(|m| m["type"] == "event"));
        let last = messages.last().unwrap();
        assert_eq!(last["type"], "error");
        assert!(last["kind"].is_null());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, _) = play("quit\nend\n", OutputFormat::Text);
        assert_eq!(session.current_faction().id, 0);
    }

    #[test]
    fn test_spent_action_is_reported() {
        let script = "recruit 0,0 1\nrecruit 1,0 1\nrecruit 0,1 1\n";
        let (session, out) = play(script, OutputFormat::Text);
        assert!(out.contains("(action spent)"));
        assert_eq!(session.current_faction().actions_remaining, 0);
    }

    #[test]
    fn test_set_faction_count_pads() {
        let config = set_faction_count(GameConfig::default().with_faction_count(2), 3);
        assert_eq!(config.factions.len(), 3);
        assert_eq!(config.factions[2].name, "Faction 3");
        assert!(config.validate().is_ok());

        let config = set_faction_count(GameConfig::default(), 5);
        assert!(config.validate().is_err());
    }
}
