//! Property-based tests for game mechanics.
//!
//! These tests drive sessions with arbitrary command sequences and check that
//! the rules never leave the game in an inconsistent state.
//! Run with: cargo test --release prop_game

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use gridreign::game::{FixedRandom, SeededRandom, check_invariants, resolve_attack};
use gridreign::{
    ActionError, Cell, Coord, ErrorKind, GameConfig, GameSession, RandomSource, ResourceType,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Recruit(Coord, u32),
    Upgrade(Coord, ResourceType),
    Fortify(Coord),
    Attack(Coord, Coord),
    End,
}

fn coord(size: u16) -> impl Strategy<Value = Coord> {
    // One past the edge so out-of-bounds requests are exercised too.
    (0..=size, 0..=size).prop_map(|(x, y)| Coord::new(x, y))
}

fn op(size: u16) -> impl Strategy<Value = Op> {
    prop_oneof![
        (coord(size), 0u32..8).prop_map(|(c, n)| Op::Recruit(c, n)),
        (coord(size), prop::sample::select(ResourceType::ALL.to_vec()))
            .prop_map(|(c, k)| Op::Upgrade(c, k)),
        coord(size).prop_map(Op::Fortify),
        (coord(size), 0u8..4).prop_map(|(c, dir)| {
            let to = match dir {
                0 => Coord::new(c.x, c.y.saturating_sub(1)),
                1 => Coord::new(c.x + 1, c.y),
                2 => Coord::new(c.x, c.y + 1),
                _ => Coord::new(c.x.saturating_sub(1), c.y),
            };
            Op::Attack(c, to)
        }),
        Just(Op::End),
    ]
}

fn apply<R: RandomSource>(session: &mut GameSession<R>, op: Op) -> Result<(), ActionError> {
    match op {
        Op::Recruit(at, n) => session.recruit_troops(at, n).map(|_| ()),
        Op::Upgrade(at, kind) => session.upgrade_resource(at, kind).map(|_| ()),
        Op::Fortify(at) => session.upgrade_fortification(at).map(|_| ()),
        Op::Attack(from, to) => session.resolve_attack(from, to).map(|_| ()),
        Op::End => session.end_turn().map(|_| ()),
    }
}

fn cell_with(troops: u32, fortification: u32) -> Cell {
    let mut cell = Cell::new(Coord::new(0, 0));
    cell.set_troops(troops);
    for _ in 0..fortification {
        cell.fortify();
    }
    cell
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// No command sequence breaks the state invariants.
    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        factions in 2usize..=4,
        ops in prop::collection::vec(op(6), 1..120)
    ) {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default().with_faction_count(factions)
        };
        let mut session = GameSession::new(&config).unwrap();

        for op in ops {
            let _ = apply(&mut session, op);
            prop_assert!(
                check_invariants(session.grid(), session.factions(), session.turn_manager()).is_empty()
            );
            for faction in session.factions() {
                prop_assert!(faction.actions_remaining <= 3);
            }
        }
    }

    /// A failed command changes faction state only by spending an action
    /// when payment was the cause, and never touches the grid.
    #[test]
    fn prop_failures_are_atomic(
        seed in any::<u64>(),
        prefix in prop::collection::vec(op(4), 0..40),
        last in op(4)
    ) {
        let config = GameConfig {
            grid_size: 4,
            seed: Some(seed),
            ..GameConfig::default().with_faction_count(2)
        };
        let mut session = GameSession::new(&config).unwrap();
        for op in prefix {
            let _ = apply(&mut session, op);
        }

        let grid_before = session.grid().clone();
        let faction_before = session.current_faction().clone();
        let turn_before = *session.turn_manager();

        if let Err(err) = apply(&mut session, last) {
            prop_assert_eq!(session.grid(), &grid_before);
            prop_assert_eq!(session.turn_manager(), &turn_before);
            let after = session.current_faction();
            prop_assert_eq!(after.resources, faction_before.resources);
            if err.kind() == ErrorKind::InsufficientResources {
                prop_assert_eq!(after.actions_remaining + 1, faction_before.actions_remaining);
            } else {
                prop_assert_eq!(after.actions_remaining, faction_before.actions_remaining);
            }
        }
    }

    /// Casualties never exceed the troops that fought.
    #[test]
    fn prop_combat_bounded(
        attackers in 0u32..100_000,
        defenders in 0u32..100_000,
        fortification in 0u32..20,
        seed in any::<u64>()
    ) {
        let attacker = cell_with(attackers, 0);
        let defender = cell_with(defenders, fortification);
        let result = resolve_attack(&attacker, &defender, &mut SeededRandom::new(seed));

        prop_assert!(result.attacker_losses <= attackers);
        prop_assert!(result.defender_losses <= defenders);
        prop_assert_eq!(result.attacker_remaining, attackers - result.attacker_losses);
        prop_assert_eq!(result.defender_remaining, defenders - result.defender_losses);
        if attackers == 0 {
            prop_assert!(!result.attacker_wins);
        }
    }

    /// With neutral luck, the stronger side wins.
    #[test]
    fn prop_even_luck_favors_strength(
        attackers in 0u32..10_000,
        defenders in 0u32..10_000,
        fortification in 0u32..10
    ) {
        let attacker = cell_with(attackers, 0);
        let defender = cell_with(defenders, fortification);
        let result = resolve_attack(&attacker, &defender, &mut FixedRandom(0.5));
        prop_assert_eq!(result.attacker_wins, attackers > defender.defense_strength());
    }
}
