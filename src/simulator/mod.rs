//! Discrete-time schedule replay.
//!
//! Walks ticks `0..limit` and, at each tick, visits every not-yet-done
//! action in scan order:
//!
//! - **start event** (`tick == start`): claim the machine if idle,
//!   otherwise report a [`ViolationKind::Collision`].
//! - **end event** (`tick == end`): if the machine is occupied, mark the
//!   action done and free the machine, otherwise report a
//!   [`ViolationKind::Omission`].
//!
//! Within one action the start event is checked before the end event.
//! When two actions claim the same machine at the same tick, the one
//! scanned first wins and the later one is reported.
//!
//! Violations never stop the run. Actions whose events fall outside the
//! horizon stay pending without a report; they are listed in
//! [`SimulationReport::unfinished`].
//!
//! # Complexity
//! - [`ScanMode::Naive`]: O(limit × actions)
//! - [`ScanMode::Indexed`]: O(actions × log actions); only ticks with
//!   events are visited. Produces identical reports and final state.

mod index;
mod report;

pub use report::{ReportSummary, SimulationReport, Violation, ViolationKind};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{ActionId, ShopFloor};
use index::{EventKind, TickIndex};

/// Horizon used when none is configured.
pub const DEFAULT_LIMIT: i64 = 10_000_000;

/// How the replay finds the events of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Re-examine every action at every tick.
    Naive,
    /// Visit only ticks that carry start or end events.
    #[default]
    Indexed,
}

impl ScanMode {
    fn as_str(self) -> &'static str {
        match self {
            ScanMode::Naive => "naive",
            ScanMode::Indexed => "indexed",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(ScanMode::Naive),
            "indexed" => Ok(ScanMode::Indexed),
            other => Err(format!("unknown scan mode '{other}' (expected naive or indexed)")),
        }
    }
}

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Exclusive tick horizon.
    pub limit: i64,
    /// Event lookup strategy.
    pub scan: ScanMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            scan: ScanMode::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a config with the given horizon and the default scan mode.
    pub fn new(limit: i64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sets the scan mode.
    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }
}

/// Replays a schedule over discrete time.
///
/// # Example
///
/// ```
/// use u_shopsim::models::ShopFloor;
/// use u_shopsim::simulator::{SimulationConfig, Simulator, ViolationKind};
///
/// let mut floor = ShopFloor::new();
/// let m = floor.add_machine("M");
/// let job = floor.add_job("J1");
/// let op = floor.add_operation(job, "O11").unwrap();
/// let a = floor.add_action(op, m, 5).unwrap();
/// let b = floor.add_action(op, m, 3).unwrap();
/// floor.action_mut(a).unwrap().schedule_at(0);
/// floor.action_mut(b).unwrap().schedule_at(2);
///
/// let report = Simulator::new(SimulationConfig::new(10)).run(&mut floor);
/// assert_eq!(report.violations[0].kind, ViolationKind::Collision);
/// assert_eq!(report.violations[0].tick, 2);
/// assert_eq!(report.violations[0].action, b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replays `floor`, mutating `done` and `occupied` in place.
    pub fn run(&self, floor: &mut ShopFloor) -> SimulationReport {
        let limit = self.config.limit;
        let mut replay = Replay::new(floor);

        match self.config.scan {
            ScanMode::Naive => {
                let ids = replay.floor.action_ids();
                for tick in 0..limit {
                    for &id in &ids {
                        replay.visit(tick, id);
                    }
                }
            }
            ScanMode::Indexed => {
                let index = TickIndex::build(replay.floor, limit);
                debug!(events = index.event_count(), "built tick index");
                for (tick, events) in index.iter() {
                    for event in events {
                        match event.kind {
                            EventKind::Start => replay.start_event(tick, event.action),
                            EventKind::End => replay.end_event(tick, event.action),
                        }
                    }
                }
            }
        }

        let report = replay.finish(limit);
        info!(
            limit,
            scan = ?self.config.scan,
            violations = report.violations.len(),
            unfinished = report.unfinished.len(),
            "simulation finished"
        );
        report
    }
}

/// Replays `floor` over `[0, limit)` with the default scan mode.
pub fn simulate(limit: i64, floor: &mut ShopFloor) -> SimulationReport {
    Simulator::new(SimulationConfig::new(limit)).run(floor)
}

/// Mutable state of one run.
struct Replay<'a> {
    floor: &'a mut ShopFloor,
    holders: Vec<Option<ActionId>>,
    violations: Vec<Violation>,
}

impl<'a> Replay<'a> {
    fn new(floor: &'a mut ShopFloor) -> Self {
        let holders = vec![None; floor.machine_count()];
        Self {
            floor,
            holders,
            violations: Vec::new(),
        }
    }

    /// Full-scan visit: both events of `id` at `tick`, start first.
    fn visit(&mut self, tick: i64, id: ActionId) {
        let Some(action) = self.floor.action(id) else {
            return;
        };
        let (start, end) = (action.start, action.end);
        if tick == start {
            self.start_event(tick, id);
        }
        if tick == end {
            self.end_event(tick, id);
        }
    }

    fn start_event(&mut self, tick: i64, id: ActionId) {
        let Some(action) = self.floor.action(id) else {
            return;
        };
        if action.done {
            return;
        }
        let m = action.machine;
        let occupied = match self.floor.machines.get(m.0) {
            Some(machine) => machine.occupied,
            None => return,
        };

        if occupied {
            self.report(ViolationKind::Collision, tick, id);
            return;
        }
        self.floor.machines[m.0].occupied = true;
        self.holders[m.0] = Some(id);
    }

    fn end_event(&mut self, tick: i64, id: ActionId) {
        let Some(action) = self.floor.action(id) else {
            return;
        };
        if action.done {
            return;
        }
        let m = action.machine;
        let occupied = match self.floor.machines.get(m.0) {
            Some(machine) => machine.occupied,
            None => return,
        };

        if !occupied {
            self.report(ViolationKind::Omission, tick, id);
            return;
        }
        if let Some(action) = self.floor.action_mut(id) {
            action.done = true;
        }
        self.floor.machines[m.0].occupied = false;
        self.holders[m.0] = None;
    }

    fn report(&mut self, kind: ViolationKind, tick: i64, id: ActionId) {
        let Some(action) = self.floor.action(id) else {
            return;
        };
        let machine = action.machine;
        if let Some(description) = self.floor.describe_action(id) {
            match kind {
                ViolationKind::Collision => warn!(
                    tick,
                    machine = %description.machine.name,
                    action = %id,
                    "Schedule collision for: {description}"
                ),
                ViolationKind::Omission => warn!(
                    tick,
                    machine = %description.machine.name,
                    action = %id,
                    "Schedule omission for: {description}"
                ),
            }
        }
        self.violations.push(Violation {
            kind,
            tick,
            action: id,
            machine,
        });
    }

    fn finish(self, limit: i64) -> SimulationReport {
        let unfinished: Vec<ActionId> = self
            .floor
            .actions()
            .filter(|(_, a)| !a.done)
            .map(|(id, _)| id)
            .collect();
        if !unfinished.is_empty() {
            debug!(
                count = unfinished.len(),
                limit,
                "actions left pending at horizon"
            );
        }
        SimulationReport {
            limit,
            violations: self.violations,
            unfinished,
            holders: self.holders,
        }
    }
}
