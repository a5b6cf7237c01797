//! Combat resolution.
//!
//! An attack rolls two effectiveness multipliers in `[0.8, 1.2)`, one for
//! each side. Casualties are proportional to the opposing side's share of the
//! combined adjusted strength, scaled by 0.8. Fortification adds three
//! defense per level but never absorbs casualties. Ties go to the defender.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::game::Cell;

/// Lower bound of an effectiveness roll.
const MIN_EFFECTIVENESS: f64 = 0.8;

/// Width of the effectiveness range.
const EFFECTIVENESS_SPREAD: f64 = 0.4;

/// Fraction of the proportional share that turns into casualties.
const CASUALTY_RATE: f64 = 0.8;

/// Source of uniform floats for combat rolls.
pub trait RandomSource {
    /// Next float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// Seeded pseudo-random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    /// Create a source with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// A source that always returns the same value.
///
/// `FixedRandom(0.5)` makes both effectiveness rolls exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Outcome of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatResult {
    /// Troops the attacker lost.
    pub attacker_losses: u32,
    /// Troops the defender lost.
    pub defender_losses: u32,
    /// Attacking troops left after casualties.
    pub attacker_remaining: u32,
    /// Defending troops left after casualties.
    pub defender_remaining: u32,
    /// Whether adjusted attack strictly exceeded adjusted defense.
    pub attacker_wins: bool,
}

fn roll_effectiveness<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    MIN_EFFECTIVENESS + rng.next_f64().clamp(0.0, 1.0) * EFFECTIVENESS_SPREAD
}

/// Casualties for one side, rounded and clamped to `[0, troops]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn casualties(share: f64, troops: u32) -> u32 {
    let losses = (share * f64::from(troops) * CASUALTY_RATE).round();
    if losses.is_nan() || losses <= 0.0 {
        0
    } else {
        (losses as u32).min(troops)
    }
}

/// Resolve an attack from `attacker` against `defender`.
///
/// Pure: neither cell is modified. The attack roll is drawn before the
/// defense roll.
#[must_use]
pub fn resolve_attack<R: RandomSource + ?Sized>(
    attacker: &Cell,
    defender: &Cell,
    rng: &mut R,
) -> CombatResult {
    let attack_troops = attacker.troops();
    let defend_troops = defender.troops();

    let eff_attack = roll_effectiveness(rng);
    let eff_defense = roll_effectiveness(rng);

    let adjusted_attack = f64::from(attack_troops) * eff_attack;
    let adjusted_defense = f64::from(defender.defense_strength()) * eff_defense;
    let total = adjusted_attack + adjusted_defense;

    let (attacker_losses, defender_losses) = if total > 0.0 {
        (
            casualties(adjusted_defense / total, attack_troops),
            casualties(adjusted_attack / total, defend_troops),
        )
    } else {
        (0, 0)
    };

    CombatResult {
        attacker_losses,
        defender_losses,
        attacker_remaining: attack_troops - attacker_losses,
        defender_remaining: defend_troops - defender_losses,
        attacker_wins: adjusted_attack > adjusted_defense,
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    /// Prove that clamped casualties never underflow the remaining count.
    #[kani::proof]
    fn prove_remaining_subtraction_safe() {
        let troops: u32 = kani::any();
        let losses: u32 = kani::any();
        let clamped = losses.min(troops);
        let remaining = troops - clamped;
        assert!(remaining <= troops);
    }
}
