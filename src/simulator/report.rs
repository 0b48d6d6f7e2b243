//! Simulation output.
//!
//! A run produces an ordered list of [`Violation`]s plus enough final
//! state to answer "what is still pending" and "who holds which machine".
//!
//! # Summary Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Collisions | start events on an occupied machine |
//! | Omissions | end events on an idle machine |
//! | Completed | actions marked done |
//! | Unfinished | actions not done at the horizon |
//! | Machines left occupied | machines still held at the horizon |
//! | Makespan | latest `end` across all actions |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ActionId, ActionState, MachineId, ShopFloor};

/// Classification of a schedule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// An action started on a machine that was already occupied.
    Collision,
    /// An action ended on a machine that was not occupied.
    Omission,
}

/// One detected violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Tick at which it was detected.
    pub tick: i64,
    /// Action whose event triggered it.
    pub action: ActionId,
    /// Machine involved.
    pub machine: MachineId,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Exclusive tick horizon that was replayed.
    pub limit: i64,
    /// Violations in tick order, then scan order.
    pub violations: Vec<Violation>,
    /// Actions not done when the run ended, in scan order.
    pub unfinished: Vec<ActionId>,
    /// Action holding each machine when the run ended, indexed by machine.
    pub holders: Vec<Option<ActionId>>,
}

/// Counts derived from a report and its shop floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of collisions.
    pub collisions: usize,
    /// Number of omissions.
    pub omissions: usize,
    /// Actions marked done.
    pub completed: usize,
    /// Actions not done.
    pub unfinished: usize,
    /// Machines still held at the horizon.
    pub machines_left_occupied: usize,
    /// Latest end tick across all actions.
    pub makespan: i64,
}

impl Violation {
    /// Whether this is a collision.
    #[inline]
    pub fn is_collision(&self) -> bool {
        self.kind == ViolationKind::Collision
    }

    /// Whether this is an omission.
    #[inline]
    pub fn is_omission(&self) -> bool {
        self.kind == ViolationKind::Omission
    }

    /// Renders the violation with resolved names.
    pub fn describe(&self, floor: &ShopFloor) -> String {
        let label = match self.kind {
            ViolationKind::Collision => "Schedule collision for",
            ViolationKind::Omission => "Schedule omission for",
        };
        match floor.describe_action(self.action) {
            Some(action) => format!("[t={}] {label}: {action}", self.tick),
            None => format!("[t={}] {label}: {}", self.tick, self.action),
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Collision => f.write_str("collision"),
            ViolationKind::Omission => f.write_str("omission"),
        }
    }
}

impl SimulationReport {
    /// Whether no violation was reported.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Collisions, in report order.
    pub fn collisions(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_collision())
    }

    /// Omissions, in report order.
    pub fn omissions(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_omission())
    }

    /// Violations on a given machine.
    pub fn violations_for_machine(&self, machine: MachineId) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.machine == machine)
            .collect()
    }

    /// Violations triggered by a given action.
    pub fn violations_for_action(&self, action: ActionId) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.action == action)
            .collect()
    }

    /// State of `action` after the run.
    ///
    /// Returns `None` if the handle does not resolve in `floor`.
    pub fn action_state(&self, floor: &ShopFloor, action: ActionId) -> Option<ActionState> {
        let a = floor.action(action)?;
        if a.done {
            Some(ActionState::Done)
        } else if self.holders.get(a.machine.0).copied().flatten() == Some(action) {
            Some(ActionState::Running)
        } else {
            Some(ActionState::Pending)
        }
    }

    /// Computes summary counts.
    pub fn summary(&self, floor: &ShopFloor) -> ReportSummary {
        let collisions = self.collisions().count();
        let completed = floor.actions().filter(|(_, a)| a.done).count();
        ReportSummary {
            collisions,
            omissions: self.violations.len() - collisions,
            completed,
            unfinished: self.unfinished.len(),
            machines_left_occupied: floor.machines.iter().filter(|m| m.occupied).count(),
            makespan: floor.makespan(),
        }
    }

    /// Renders every violation, one line each.
    pub fn render(&self, floor: &ShopFloor) -> Vec<String> {
        self.violations.iter().map(|v| v.describe(floor)).collect()
    }
}
