#![no_main]

use arbitrary::Arbitrary;
use gridreign::game::{FixedRandom, resolve_attack};
use gridreign::{Cell, Coord};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Troops on the attacking cell.
    attacker_troops: u32,
    /// Troops on the defending cell.
    defender_troops: u32,
    /// Fortification levels on the defending cell.
    fortification: u8,
    /// Attack effectiveness roll.
    attack_roll: f64,
    /// Defense effectiveness roll.
    defense_roll: f64,
}

/// Replays two fixed rolls.
struct Rolls([f64; 2], usize);

impl gridreign::RandomSource for Rolls {
    fn next_f64(&mut self) -> f64 {
        let roll = self.0[self.1 % 2];
        self.1 += 1;
        roll
    }
}

fuzz_target!(|input: CombatInput| {
    let mut attacker = Cell::new(Coord::new(0, 0));
    attacker.set_troops(input.attacker_troops);
    let mut defender = Cell::new(Coord::new(1, 0));
    defender.set_troops(input.defender_troops);
    for _ in 0..input.fortification {
        defender.fortify();
    }

    // Rolls outside [0, 1) and NaN must still produce a sane result.
    let mut rolls = Rolls([input.attack_roll, input.defense_roll], 0);
    let result = resolve_attack(&attacker, &defender, &mut rolls);

    assert!(result.attacker_losses <= input.attacker_troops);
    assert!(result.defender_losses <= input.defender_troops);
    assert_eq!(
        result.attacker_remaining + result.attacker_losses,
        input.attacker_troops
    );
    assert_eq!(
        result.defender_remaining + result.defender_losses,
        input.defender_troops
    );
    if input.attacker_troops == 0 {
        assert!(!result.attacker_wins, "an empty cell cannot win");
    }

    // Neutral luck: strength alone decides.
    let even = resolve_attack(&attacker, &defender, &mut FixedRandom(0.5));
    assert_eq!(
        even.attacker_wins,
        input.attacker_troops > defender.defense_strength()
    );
});
