//! Job model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Operation;

/// Handle to a job in the [`ShopFloor`](super::ShopFloor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub usize);

/// Top-level unit of work: an ordered sequence of operations.
///
/// Operation order is the table's row order. It is kept for diagnostics
/// only; precedence between operations is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Diagnostic label. May be empty and need not be unique.
    pub name: String,
    /// Owned operations.
    pub operations: Vec<Operation>,
}

impl Job {
    /// Creates a job with no operations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    /// Adds an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Number of actions across all operations.
    pub fn action_count(&self) -> usize {
        self.operations.iter().map(|o| o.actions.len()).sum()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J{}", self.0)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job [name={}, operations={}]",
            self.name,
            self.operations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, MachineId, OperationId};

    #[test]
    fn test_job_counts() {
        let op_id = OperationId::new(JobId(0), 0);
        let job = Job::new("J1")
            .with_operation(
                Operation::new("O11", JobId(0))
                    .with_action(Action::new(MachineId(0), op_id).with_duration(2))
                    .with_action(Action::new(MachineId(1), op_id).with_duration(5)),
            )
            .with_operation(Operation::new("O12", JobId(0)));

        assert_eq!(job.operation_count(), 2);
        assert_eq!(job.action_count(), 2);
        assert_eq!(job.to_string(), "Job [name=J1, operations=2]");
    }

    #[test]
    fn test_empty_job() {
        let job = Job::new("");
        assert_eq!(job.action_count(), 0);
        assert_eq!(job.operation_count(), 0);
    }
}
