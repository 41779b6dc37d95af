//! Shared utilities

use crate::geometry::{Point, Triangle};

/// Simple deterministic RNG using xorshift64
/// Reproducible test triangles without external dependencies
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random i32 in [min, max]
    ///
    /// # Panics
    /// Panics in debug builds if `min > max`
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "range_i32: min ({}) must be <= max ({})", min, max);
        if min >= max {
            return min;
        }
        let range = (i64::from(max) - i64::from(min) + 1) as u64;
        (i64::from(min) + (self.next_u64() % range) as i64) as i32
    }

    /// Triangle with every vertex inside `[0, width) x [0, height)`
    pub fn triangle_in(&mut self, width: i32, height: i32) -> Triangle {
        let mut point = || {
            Point::new(
                self.range_i32(0, (width - 1).max(0)),
                self.range_i32(0, (height - 1).max(0)),
            )
        };
        Triangle::new(point(), point(), point())
    }
}
