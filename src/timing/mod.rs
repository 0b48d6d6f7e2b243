//! Start-time assignment.
//!
//! A [`TimeAssigner`] picks a start tick for every action; [`assign_times`]
//! drives it over a shop floor and writes `start`/`end` back, keeping
//! `end == start + duration`. Assigners never touch `done` or `occupied`.
//!
//! How starts are chosen is up to the strategy. The bundled ones are
//! placeholders for trial schedules, not scheduling algorithms:
//!
//! | Strategy | Start |
//! |----------|-------|
//! | [`UniformStarts`] | uniform in `[min, max]`, seeded generator |
//! | [`FixedStarts`] | explicit list in scan order |
//! | [`ConstantStart`] | same tick for every action |

mod strategies;

pub use strategies::{ConstantStart, FixedStarts, UniformStarts};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AssignError;
use crate::models::{ActionId, ShopFloor};

/// Inclusive range of allowed start ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWindow {
    /// Earliest start.
    pub min: i64,
    /// Latest start.
    pub max: i64,
}

impl StartWindow {
    /// Creates a window, rejecting `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, AssignError> {
        let window = Self { min, max };
        window.validate()?;
        Ok(window)
    }

    /// A window holding exactly one tick.
    pub fn at(tick: i64) -> Self {
        Self {
            min: tick,
            max: tick,
        }
    }

    /// Whether `tick` lies in the window.
    #[inline]
    pub fn contains(&self, tick: i64) -> bool {
        self.min <= tick && tick <= self.max
    }

    fn validate(&self) -> Result<(), AssignError> {
        if self.min > self.max {
            return Err(AssignError::EmptyWindow {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Strategy that chooses a start tick for one action.
pub trait TimeAssigner {
    /// Returns the start tick for `action`, which has `duration` ticks of work.
    ///
    /// The result must lie in `window`.
    fn choose_start(
        &mut self,
        action: ActionId,
        duration: i64,
        window: StartWindow,
    ) -> Result<i64, AssignError>;
}

impl<T: TimeAssigner + ?Sized> TimeAssigner for &mut T {
    fn choose_start(
        &mut self,
        action: ActionId,
        duration: i64,
        window: StartWindow,
    ) -> Result<i64, AssignError> {
        (**self).choose_start(action, duration, window)
    }
}

/// Assigns a start to every action of `floor`, in scan order.
///
/// All starts are chosen before any is written, so on error the floor
/// is left untouched.
///
/// # Errors
/// - [`AssignError::EmptyWindow`] if `window.min > window.max`
/// - [`AssignError::OutOfWindow`] if the strategy picks a tick outside `window`
/// - [`AssignError::EndOverflow`] if `start + duration` overflows
/// - any error the strategy itself returns
pub fn assign_times<A: TimeAssigner + ?Sized>(
    floor: &mut ShopFloor,
    assigner: &mut A,
    window: StartWindow,
) -> Result<(), AssignError> {
    window.validate()?;

    let mut spans = Vec::with_capacity(floor.action_count());
    for (id, action) in floor.actions() {
        let start = assigner.choose_start(id, action.duration, window)?;
        if !window.contains(start) {
            return Err(AssignError::OutOfWindow {
                action: id,
                start,
                min: window.min,
                max: window.max,
            });
        }
        let end = action.end_for(start).ok_or(AssignError::EndOverflow {
            action: id,
            start,
            duration: action.duration,
        })?;
        spans.push((start, end));
    }

    for ((_, action), (start, end)) in floor.actions_mut().zip(spans) {
        action.start = start;
        action.end = end;
    }

    debug!(
        actions = floor.action_count(),
        min = window.min,
        max = window.max,
        makespan = floor.makespan(),
        "assigned start times"
    );

    Ok(())
}
