//! Shop floor: the owning context of a simulation.
//!
//! `ShopFloor` owns the machine registry and every job. Jobs own their
//! operations, operations own their actions. All cross-references
//! (action → machine, action → operation, operation → job) are plain
//! index handles resolved through this type, so there is exactly one
//! owner for every entity and no reference cycle.
//!
//! # Iteration Order
//!
//! [`ShopFloor::actions`] yields actions job by job, operation by
//! operation, in the order they were added. The loader adds them in
//! table row order, then header column order, which is the scan order
//! the simulator depends on for collision attribution.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Action, ActionId, Job, JobId, Machine, MachineId, Operation, OperationId};

/// Machines and jobs of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopFloor {
    /// Machine registry, in header order.
    pub machines: Vec<Machine>,
    /// Jobs, in table order.
    pub jobs: Vec<Job>,
}

impl ShopFloor {
    /// Creates an empty shop floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an idle machine.
    pub fn add_machine(&mut self, name: impl Into<String>) -> MachineId {
        self.machines.push(Machine::new(name));
        MachineId(self.machines.len() - 1)
    }

    /// Adds an empty job.
    pub fn add_job(&mut self, name: impl Into<String>) -> JobId {
        self.jobs.push(Job::new(name));
        JobId(self.jobs.len() - 1)
    }

    /// Appends an operation to `job`.
    ///
    /// Returns `None` if `job` does not exist.
    pub fn add_operation(&mut self, job: JobId, name: impl Into<String>) -> Option<OperationId> {
        let owner = self.jobs.get_mut(job.0)?;
        owner.operations.push(Operation::new(name, job));
        Some(OperationId::new(job, owner.operations.len() - 1))
    }

    /// Appends an unscheduled action on `machine` to `operation`.
    ///
    /// Returns `None` if either handle does not resolve.
    pub fn add_action(
        &mut self,
        operation: OperationId,
        machine: MachineId,
        duration: i64,
    ) -> Option<ActionId> {
        if machine.0 >= self.machines.len() {
            return None;
        }
        let owner = self.operation_mut(operation)?;
        owner
            .actions
            .push(Action::new(machine, operation).with_duration(duration));
        Some(ActionId::new(operation, owner.actions.len() - 1))
    }

    /// Looks up a machine.
    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(id.0)
    }

    /// Looks up a job.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id.0)
    }

    /// Looks up an operation.
    pub fn operation(&self, id: OperationId) -> Option<&Operation> {
        self.job(id.job)?.operations.get(id.index)
    }

    fn operation_mut(&mut self, id: OperationId) -> Option<&mut Operation> {
        self.jobs.get_mut(id.job.0)?.operations.get_mut(id.index)
    }

    /// Looks up an action.
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.operation(id.operation)?.actions.get(id.index)
    }

    /// Looks up an action for mutation.
    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.operation_mut(id.operation)?.actions.get_mut(id.index)
    }

    /// All actions in scan order, with their handles.
    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.jobs.iter().enumerate().flat_map(|(j, job)| {
            job.operations.iter().enumerate().flat_map(move |(o, op)| {
                let op_id = OperationId::new(JobId(j), o);
                op.actions
                    .iter()
                    .enumerate()
                    .map(move |(a, action)| (ActionId::new(op_id, a), action))
            })
        })
    }

    /// All actions in scan order, mutable.
    pub fn actions_mut(&mut self) -> impl Iterator<Item = (ActionId, &mut Action)> {
        self.jobs.iter_mut().enumerate().flat_map(|(j, job)| {
            job.operations.iter_mut().enumerate().flat_map(move |(o, op)| {
                let op_id = OperationId::new(JobId(j), o);
                op.actions
                    .iter_mut()
                    .enumerate()
                    .map(move |(a, action)| (ActionId::new(op_id, a), action))
            })
        })
    }

    /// Handles of all actions in scan order.
    pub fn action_ids(&self) -> Vec<ActionId> {
        self.actions().map(|(id, _)| id).collect()
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of operations across all jobs.
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(|j| j.operations.len()).sum()
    }

    /// Number of actions across all jobs.
    pub fn action_count(&self) -> usize {
        self.jobs.iter().map(Job::action_count).sum()
    }

    /// Latest end tick across all actions (0 if there are none).
    pub fn makespan(&self) -> i64 {
        self.actions().map(|(_, a)| a.end).max().unwrap_or(0)
    }

    /// Clears `done` on every action and `occupied` on every machine.
    ///
    /// Start and end times are kept, so the same assignment can be replayed.
    pub fn reset_runtime_state(&mut self) {
        for machine in &mut self.machines {
            machine.occupied = false;
        }
        for (_, action) in self.actions_mut() {
            action.done = false;
        }
    }

    /// Renders an action together with its machine, operation and job names.
    ///
    /// Returns `None` if the handle does not resolve.
    pub fn describe_action(&self, id: ActionId) -> Option<ActionDescription<'_>> {
        let action = self.action(id)?;
        let operation = self.operation(id.operation)?;
        let job = self.job(id.operation.job)?;
        let machine = self.machine(action.machine)?;
        Some(ActionDescription {
            action,
            machine,
            operation,
            job,
        })
    }
}

/// Borrowed view of an action with its resolved relations.
#[derive(Debug, Clone, Copy)]
pub struct ActionDescription<'a> {
    /// The action.
    pub action: &'a Action,
    /// The machine it runs on.
    pub machine: &'a Machine,
    /// The owning operation.
    pub operation: &'a Operation,
    /// The owning job.
    pub job: &'a Job,
}

impl fmt::Display for ActionDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Action [start={}, duration={}, end={}, done={}, machine={}, operation={}, job={}]",
            self.action.start,
            self.action.duration,
            self.action.end,
            self.action.done,
            self.machine.name,
            self.operation.name,
            self.job.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_job_floor() -> ShopFloor {
        let mut floor = ShopFloor::new();
        let m1 = floor.add_machine("M1");
        let m2 = floor.add_machine("M2");
        let j1 = floor.add_job("J1");
        let o11 = floor.add_operation(j1, "O11").unwrap();
        floor.add_action(o11, m1, 2).unwrap();
        floor.add_action(o11, m2, 5).unwrap();
        let j2 = floor.add_job("J2");
        let o21 = floor.add_operation(j2, "O21").unwrap();
        floor.add_action(o21, m1, 4).unwrap();
        floor.add_action(o21, m2, 1).unwrap();
        floor
    }

    #[test]
    fn test_counts() {
        let floor = two_job_floor();
        assert_eq!(floor.machine_count(), 2);
        assert_eq!(floor.job_count(), 2);
        assert_eq!(floor.operation_count(), 2);
        assert_eq!(floor.action_count(), 4);
    }

    #[test]
    fn test_actions_in_insertion_order() {
        let floor = two_job_floor();
        let durations: Vec<i64> = floor.actions().map(|(_, a)| a.duration).collect();
        assert_eq!(durations, vec![2, 5, 4, 1]);

        let ids = floor.action_ids();
        assert_eq!(ids[0], ActionId::new(OperationId::new(JobId(0), 0), 0));
        assert_eq!(ids[3], ActionId::new(OperationId::new(JobId(1), 0), 1));
    }

    #[test]
    fn test_back_references_resolve() {
        let floor = two_job_floor();
        let id = floor.action_ids()[2];
        let action = floor.action(id).unwrap();
        assert_eq!(floor.machine(action.machine).unwrap().name, "M1");
        let op = floor.operation(action.operation).unwrap();
        assert_eq!(op.name, "O21");
        assert_eq!(floor.job(op.job).unwrap().name, "J2");
    }

    #[test]
    fn test_dangling_handles_rejected() {
        let mut floor = two_job_floor();
        assert!(floor.add_operation(JobId(9), "O").is_none());
        let op = OperationId::new(JobId(0), 0);
        assert!(floor.add_action(op, MachineId(7), 1).is_none());
        assert!(floor
            .add_action(OperationId::new(JobId(0), 4), MachineId(0), 1)
            .is_none());
        assert_eq!(floor.action_count(), 4);
    }

    #[test]
    fn test_reset_runtime_state_keeps_times() {
        let mut floor = two_job_floor();
        for (_, a) in floor.actions_mut() {
            a.schedule_at(3);
            a.done = true;
        }
        floor.machines[0].occupied = true;

        floor.reset_runtime_state();

        assert!(floor.machines.iter().all(|m| !m.occupied));
        assert!(floor.actions().all(|(_, a)| !a.done && a.start == 3));
        assert_eq!(floor.makespan(), 8);
    }

    #[test]
    fn test_describe_action() {
        let floor = two_job_floor();
        let id = floor.action_ids()[1];
        let text = floor.describe_action(id).unwrap().to_string();
        assert_eq!(
            text,
            "Action [start=0, duration=5, end=0, done=false, machine=M2, operation=O11, job=J1]"
        );
    }
}
