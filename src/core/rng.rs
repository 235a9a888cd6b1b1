//! Randomness source for every roll in the game.
//!
//! All rolls are derived from a single `uniform()` primitive so a run can be
//! replayed exactly by feeding the same values back in.

use rand::Rng;
use std::collections::VecDeque;

/// Produces uniform values in `[0, 1)` and the integer rolls built on them.
pub trait RandomSource {
    fn uniform(&mut self) -> f64;

    /// Integer roll in `0..n`. Returns 0 when `n` is 0.
    fn roll_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.uniform() * n as f64) as u32).min(n - 1)
    }

    /// Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Uniform index into a sequence of `len` elements (`len` must be > 0).
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.uniform() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: rand::RngCore> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of uniform values, then yields 0.0 forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        self.values
            .pop_front()
            .map(|v| v.clamp(0.0, 0.999_999_999))
            .unwrap_or(0.0)
    }
}
