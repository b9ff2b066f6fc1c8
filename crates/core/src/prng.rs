//! Deterministic PRNG for stochastic renderers.
//!
//! Xorshift64 with shifts (13, 7, 17). The generator is a plain value owned
//! by one render call and threaded through it explicitly; there is no global
//! generator. The core algorithm is pure integer arithmetic, so a seed
//! reproduces the same stroke set on every platform.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// A seed of 0 is replaced with a fixed non-zero fallback, since 0 is a
/// fixed point of xorshift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [0, max). Used for positions inside a buffer edge.
    pub fn next_below(&mut self, max: f64) -> f64 {
        self.next_f64() * max
    }

    /// Uniform angle in [0, 2π).
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }

    /// True with probability `p` (one draw, regardless of `p`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
