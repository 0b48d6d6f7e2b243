//! Action model.
//!
//! An action is the smallest simulated unit: one operation's work on one
//! machine. Every operation carries one action per machine column of the
//! source table.
//!
//! # Lifecycle
//!
//! ```text
//! PENDING --start event, machine idle--> RUNNING --end event--> DONE
//! ```
//!
//! `start` and `end` are written by a [`TimeAssigner`](crate::timing::TimeAssigner);
//! `done` is written only by the [`Simulator`](crate::simulator::Simulator).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MachineId, OperationId};

/// Handle to an action: its owning operation plus its position there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId {
    /// Owning operation.
    pub operation: OperationId,
    /// Position within the operation (0-indexed, header column order).
    pub index: usize,
}

/// One unit of work bound to exactly one machine.
///
/// Invariant once times are assigned: `end == start + duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Start tick.
    pub start: i64,
    /// Processing time in ticks.
    pub duration: i64,
    /// End tick (`start + duration`).
    pub end: i64,
    /// Set when the simulator observes a clean end event.
    pub done: bool,
    /// Machine this action runs on.
    pub machine: MachineId,
    /// Operation this action belongs to.
    pub operation: OperationId,
}

/// Observable state of an action during or after a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionState {
    /// Not holding its machine and not done: never started, started into a
    /// collision, or claimed the machine and then lost it to another
    /// action's release.
    Pending,
    /// Holding its machine.
    Running,
    /// Ended cleanly.
    Done,
}

impl ActionId {
    /// Creates a handle.
    pub fn new(operation: OperationId, index: usize) -> Self {
        Self { operation, index }
    }
}

impl Action {
    /// Creates an unscheduled action (`start = end = 0`).
    pub fn new(machine: MachineId, operation: OperationId) -> Self {
        Self {
            start: 0,
            duration: 0,
            end: 0,
            done: false,
            machine,
            operation,
        }
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the start tick and derives `end`.
    ///
    /// Leaves the action unscheduled if `start + duration` overflows.
    pub fn with_start(mut self, start: i64) -> Self {
        self.schedule_at(start);
        self
    }

    /// End tick for a start at `start`, `None` on overflow.
    #[inline]
    pub fn end_for(&self, start: i64) -> Option<i64> {
        start.checked_add(self.duration)
    }

    /// Places the action at `start`, keeping `end == start + duration`.
    ///
    /// Returns the new end tick. On overflow the action is left unchanged
    /// and `None` is returned.
    #[inline]
    pub fn schedule_at(&mut self, start: i64) -> Option<i64> {
        let end = self.end_for(start)?;
        self.start = start;
        self.end = end;
        Some(end)
    }

    /// Whether `end == start + duration` holds.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.end == self.start + self.duration
    }

    /// Whether both events of this action fall inside `[0, limit)`.
    #[inline]
    pub fn fits_horizon(&self, limit: i64) -> bool {
        self.start >= 0 && self.end < limit
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.operation, self.index)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Action [start={}, duration={}, end={}, done={}]",
            self.start, self.duration, self.end, self.done
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobId;

    fn op() -> OperationId {
        OperationId::new(JobId(0), 0)
    }

    #[test]
    fn test_action_builder() {
        let a = Action::new(MachineId(1), op())
            .with_duration(5)
            .with_start(10);

        assert_eq!(a.start, 10);
        assert_eq!(a.duration, 5);
        assert_eq!(a.end, 15);
        assert!(!a.done);
        assert_eq!(a.machine, MachineId(1));
        assert!(a.is_consistent());
    }

    #[test]
    fn test_schedule_at_rewrites_end() {
        let mut a = Action::new(MachineId(0), op()).with_duration(3);
        assert_eq!(a.schedule_at(7), Some(10));
        assert_eq!(a.end, 10);
        assert_eq!(a.schedule_at(0), Some(3));
        assert_eq!(a.end, 3);
    }

    #[test]
    fn test_schedule_at_overflow_leaves_action_unchanged() {
        let mut a = Action::new(MachineId(0), op())
            .with_duration(i64::MAX)
            .with_start(0);
        assert_eq!(a.end, i64::MAX);

        assert_eq!(a.schedule_at(977), None);
        assert_eq!((a.start, a.end), (0, i64::MAX));
        assert!(a.is_consistent());
    }

    #[test]
    fn test_fits_horizon() {
        let a = Action::new(MachineId(0), op()).with_duration(5).with_start(4);
        assert!(a.fits_horizon(10));
        // end tick 9 is the last replayed tick of a 10-tick horizon
        assert!(!a.fits_horizon(9));

        let late = Action::new(MachineId(0), op()).with_duration(0).with_start(10);
        assert!(!late.fits_horizon(10));
    }

    #[test]
    fn test_action_id_display() {
        let id = ActionId::new(OperationId::new(JobId(2), 1), 4);
        assert_eq!(id.to_string(), "J2.1.4");
    }
}
