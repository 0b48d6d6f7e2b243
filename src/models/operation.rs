//! Operation model.
//!
//! An operation is a named step of a job. It owns one action per machine
//! column of the source table, in header order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Action, JobId};

/// Handle to an operation: its owning job plus its position there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationId {
    /// Owning job.
    pub job: JobId,
    /// Position within the job (0-indexed, table row order).
    pub index: usize,
}

/// A named step of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Diagnostic label. May be empty and need not be unique.
    pub name: String,
    /// Owned actions, one per machine column.
    pub actions: Vec<Action>,
    /// Job this operation belongs to.
    pub job: JobId,
}

impl OperationId {
    /// Creates a handle.
    pub fn new(job: JobId, index: usize) -> Self {
        Self { job, index }
    }
}

impl Operation {
    /// Creates an operation with no actions.
    pub fn new(name: impl Into<String>, job: JobId) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            job,
        }
    }

    /// Adds an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Number of actions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.job, self.index)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Operation [name={}, actions={}]",
            self.name,
            self.actions.len()
        )
    }
}
