//! Bundled start-time strategies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{StartWindow, TimeAssigner};
use crate::error::AssignError;
use crate::models::ActionId;

/// Uniformly random starts from an injected generator.
///
/// Reproducible when built with [`UniformStarts::seeded`].
#[derive(Debug, Clone)]
pub struct UniformStarts<R = StdRng> {
    rng: R,
}

impl UniformStarts<StdRng> {
    /// Creates a strategy backed by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformStarts<R> {
    /// Creates a strategy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TimeAssigner for UniformStarts<R> {
    fn choose_start(
        &mut self,
        _action: ActionId,
        _duration: i64,
        window: StartWindow,
    ) -> Result<i64, AssignError> {
        Ok(self.rng.random_range(window.min..=window.max))
    }
}

/// Explicit start ticks, consumed in scan order.
#[derive(Debug, Clone, Default)]
pub struct FixedStarts {
    starts: Vec<i64>,
    cursor: usize,
}

impl FixedStarts {
    /// Creates a strategy that hands out `starts` one per action.
    pub fn new(starts: Vec<i64>) -> Self {
        Self { starts, cursor: 0 }
    }

    /// Number of starts not yet handed out.
    pub fn remaining(&self) -> usize {
        self.starts.len() - self.cursor
    }
}

impl TimeAssigner for FixedStarts {
    fn choose_start(
        &mut self,
        action: ActionId,
        _duration: i64,
        _window: StartWindow,
    ) -> Result<i64, AssignError> {
        let start = self
            .starts
            .get(self.cursor)
            .copied()
            .ok_or(AssignError::Exhausted {
                action,
                provided: self.starts.len(),
            })?;
        self.cursor += 1;
        Ok(start)
    }
}

/// Every action starts at the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantStart(pub i64);

impl TimeAssigner for ConstantStart {
    fn choose_start(
        &mut self,
        _action: ActionId,
        _duration: i64,
        _window: StartWindow,
    ) -> Result<i64, AssignError> {
        Ok(self.0)
    }
}
