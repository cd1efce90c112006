//! Deterministic per-character and simulation-level RNG wrappers, plus the
//! dice check used by narrative branches.
//!
//! # Determinism strategy
//!
//! Each character gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (index * MIXING_CONSTANT)
//!
//! The behavior pipeline itself never draws random numbers; randomness is
//! reserved for content-level checks such as [`DiceCheck`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CharacterRng ──────────────────────────────────────────────────────────────

/// Per-character deterministic RNG.
pub struct CharacterRng(SmallRng);

impl CharacterRng {
    /// Seed deterministically from the run's global seed and the character's
    /// position in the driver's ordered character list.
    pub fn new(global_seed: u64, index: u32) -> Self {
        let seed = global_seed ^ (index as u64).wrapping_mul(MIXING_CONSTANT);
        CharacterRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `CharacterRng` for the character at `index`.
    pub fn character(&mut self, index: u32) -> CharacterRng {
        let base: u64 = self.0.r#gen();
        CharacterRng::new(base, index)
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── DiceCheck ─────────────────────────────────────────────────────────────────

/// Result of a [`DiceCheck`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiceOutcome {
    Success,
    Failure,
}

/// A single-die skill check: roll `1..=sides` and succeed on `>= difficulty_class`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceCheck {
    pub difficulty_class: i32,
    pub sides:            u32,
}

impl DiceCheck {
    pub const D20: u32 = 20;

    pub fn d20(difficulty_class: i32) -> Self {
        Self { difficulty_class, sides: Self::D20 }
    }

    /// Resolve the check.
    ///
    /// A difficulty class of 0 or below succeeds without drawing from `rng`,
    /// so trivial checks never perturb the character's random stream.
    pub fn resolve(&self, rng: &mut CharacterRng) -> DiceOutcome {
        if self.difficulty_class <= 0 {
            return DiceOutcome::Success;
        }
        let roll = rng.gen_range(1..=self.sides.max(1)) as i64;
        if roll >= self.difficulty_class as i64 {
            DiceOutcome::Success
        } else {
            DiceOutcome::Failure
        }
    }
}
