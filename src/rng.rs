//! Deterministic random number generation.
//!
//! One seedable generator per simulation, threaded through the city
//! context. Growth tie-breaking, traffic, and civic spawns all draw from
//! it, so a fixed seed reproduces the whole run. The trait keeps the
//! operations dyn-safe so tests can script exact sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The uniform-draw operations the simulation consumes.
pub trait Randomizer {
    /// Next raw 16-bit draw. Every other operation derives from this.
    fn next_u16(&mut self) -> u16;

    /// Uniform integer in `0..=max`.
    fn get_random(&mut self, max: u16) -> u16 {
        // Scale rather than mod to keep the distribution flat.
        ((u32::from(self.next_u16()) * (u32::from(max) + 1)) >> 16) as u16
    }

    fn get_random16(&mut self) -> u16 {
        self.next_u16()
    }

    fn get_random16_signed(&mut self) -> i16 {
        self.next_u16() as i16
    }

    /// True roughly one time in `mask + 1` (mask must be 2^n - 1).
    fn get_chance(&mut self, mask: u16) -> bool {
        self.next_u16() & mask == 0
    }
}

/// Production generator backed by ChaCha8.
pub struct CityRng {
    inner: ChaCha8Rng,
}

impl CityRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Randomizer for CityRng {
    fn next_u16(&mut self) -> u16 {
        self.inner.gen()
    }
}

/// Test double replaying a fixed sequence, then repeating its last value.
pub struct ScriptedRng {
    values: Vec<u16>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u16>) -> Self {
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        Self { values, cursor: 0 }
    }
}

impl Randomizer for ScriptedRng {
    fn next_u16(&mut self) -> u16 {
        let value = self.values[self.cursor.min(self.values.len() - 1)];
        self.cursor += 1;
        value
    }
}
