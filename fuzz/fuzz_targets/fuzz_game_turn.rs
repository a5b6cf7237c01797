#![no_main]

//! Full session fuzzer.
//!
//! Drives a session with arbitrary commands and checks that every command
//! either succeeds or fails cleanly, and that the state invariants hold after
//! each step. This catches integration bugs that the component fuzzers miss.

use arbitrary::Arbitrary;
use gridreign::game::{FixedRandom, check_invariants};
use gridreign::{Coord, ErrorKind, GameConfig, GameSession, ResourceType};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCommand {
    Recruit { x: u8, y: u8, amount: u8 },
    Upgrade { x: u8, y: u8, kind: u8 },
    Fortify { x: u8, y: u8 },
    Attack { x: u8, y: u8, dir: u8 },
    Assign { x: u8, y: u8, faction: u8 },
    End,
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Extra grid size beyond the minimum.
    extra_size: u8,
    /// Faction count selector.
    factions: u8,
    /// Combat luck.
    roll: f64,
    /// Commands in order.
    commands: Vec<FuzzCommand>,
}

fn coord(x: u8, y: u8) -> Coord {
    Coord::new(u16::from(x % 12), u16::from(y % 12))
}

fuzz_target!(|input: SessionInput| {
    let config = GameConfig {
        grid_size: 4 + u16::from(input.extra_size % 6),
        ..GameConfig::default().with_faction_count(2 + usize::from(input.factions % 3))
    };
    let Ok(mut session) = GameSession::with_random(&config, FixedRandom(input.roll)) else {
        return;
    };

    for command in input.commands.into_iter().take(200) {
        let actions_before = session.current_faction().actions_remaining;
        let result = match command {
            FuzzCommand::Recruit { x, y, amount } => session
                .recruit_troops(coord(x, y), u32::from(amount))
                .map(|_| ()),
            FuzzCommand::Upgrade { x, y, kind } => {
                let kind = ResourceType::ALL[usize::from(kind) % ResourceType::ALL.len()];
                session.upgrade_resource(coord(x, y), kind).map(|_| ())
            }
            FuzzCommand::Fortify { x, y } => session.upgrade_fortification(coord(x, y)).map(|_| ()),
            FuzzCommand::Attack { x, y, dir } => {
                let from = coord(x, y);
                let to = match dir % 4 {
                    0 => Coord::new(from.x, from.y.wrapping_sub(1)),
                    1 => Coord::new(from.x + 1, from.y),
                    2 => Coord::new(from.x, from.y + 1),
                    _ => Coord::new(from.x.wrapping_sub(1), from.y),
                };
                session.resolve_attack(from, to).map(|_| ())
            }
            FuzzCommand::Assign { x, y, faction } => {
                session.assign_to_faction(coord(x, y), faction % 5).map(|_| ())
            }
            FuzzCommand::End => session.end_turn().map(|_| ()),
        };

        if let Err(err) = result {
            let actions_after = session.current_faction().actions_remaining;
            if err.kind() == ErrorKind::InsufficientResources {
                assert_eq!(actions_after + 1, actions_before);
            } else {
                assert_eq!(actions_after, actions_before);
            }
        }

        let violations =
            check_invariants(session.grid(), session.factions(), session.turn_manager());
        assert!(violations.is_empty(), "{violations:?}");
        session.drain_events();
    }
});
