use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod character;
pub mod combat;
pub mod encounter;
pub mod error;
pub mod sim;

pub use character::{Ability, AbilityScores, Character, ClassKind, Roster};
pub use combat::{resolve, saving_throw};
pub use encounter::{EncounterKind, EncounterPool};
pub use error::SimError;
pub use sim::{HitGrid, LEVELS, RateMatrix, SimConfig, SimReport};

/// How the primary d20 for an action is produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollShape {
    Single,
    KeepHighest,
    KeepLowest,
}

/// A seeded uniform roll source. Each simulation worker owns exactly one;
/// instances are never shared between threads.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Roll a d20 with the given shape. Two-roll shapes draw two independent
    /// values from the same stream and combine with max (or min).
    pub fn d20(&mut self, shape: RollShape) -> u8 {
        let mut roll = || self.rng.gen_range(1..=20);
        match shape {
            RollShape::Single => roll(),
            RollShape::KeepHighest => {
                let a = roll();
                let b = roll();
                a.max(b)
            }
            RollShape::KeepLowest => {
                let a = roll();
                let b = roll();
                a.min(b)
            }
        }
    }

    /// Uniform index into a pool of `len` entries.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
