//! Table-to-graph loader.
//!
//! Builds a [`ShopFloor`] from a [`Table`]. Each header machine column
//! becomes one registry entry; each data row becomes one operation that
//! carries one action **per machine column**, not a single chosen machine.
//!
//! # Failure
//! Loading is all-or-nothing: the floor is assembled in a local value and
//! only returned once every row has been accepted. The first problem found
//! aborts the load with a [`MalformedInputError`] naming its row and column.

mod table;

pub use table::{Cell, Table};

use std::path::Path;

use tracing::debug;

use crate::error::{LoadResult, MalformedInputError, MalformedKind, TableError};
use crate::models::{Action, Job, JobId, MachineId, Operation, OperationId, ShopFloor};

/// Column holding the job name (blank continues the previous job).
pub const JOB_COLUMN: usize = 0;
/// Column holding the operation name.
pub const OPERATION_COLUMN: usize = 1;
/// First column holding a machine name (header) or duration (data rows).
pub const FIRST_MACHINE_COLUMN: usize = 2;

/// Builds a shop floor from a table.
///
/// # Errors
/// - empty table, or a header with no data rows
/// - a row whose width differs from the header's
/// - a duration cell that is not a non-negative integer
/// - a first data row with a blank job name
pub fn load_table(table: &Table) -> LoadResult<ShopFloor> {
    let rows = table.rows();
    let header = rows
        .first()
        .ok_or_else(|| MalformedInputError::new(0, 0, MalformedKind::MissingHeader))?;
    if header.len() < FIRST_MACHINE_COLUMN {
        return Err(MalformedInputError::new(
            0,
            header.len(),
            MalformedKind::ColumnCount {
                expected: FIRST_MACHINE_COLUMN,
                found: header.len(),
            },
        ));
    }
    if rows.len() < 2 {
        return Err(MalformedInputError::new(1, 0, MalformedKind::MissingDataRows));
    }

    let width = header.len();
    let mut floor = ShopFloor::new();
    let machines: Vec<MachineId> = header[FIRST_MACHINE_COLUMN..]
        .iter()
        .map(|cell| floor.add_machine(cell.label()))
        .collect();

    let mut current_job: Option<JobId> = None;

    for (r, row) in rows.iter().enumerate().skip(1) {
        if row.len() != width {
            return Err(MalformedInputError::new(
                r,
                row.len().min(width),
                MalformedKind::ColumnCount {
                    expected: width,
                    found: row.len(),
                },
            ));
        }

        let job_id = if row[JOB_COLUMN].is_blank() {
            current_job.ok_or_else(|| {
                MalformedInputError::new(r, JOB_COLUMN, MalformedKind::OrphanContinuation)
            })?
        } else {
            floor.jobs.push(Job::new(row[JOB_COLUMN].label()));
            let id = JobId(floor.jobs.len() - 1);
            current_job = Some(id);
            id
        };

        let job = &mut floor.jobs[job_id.0];
        let op_id = OperationId::new(job_id, job.operations.len());
        let mut operation = Operation::new(row[OPERATION_COLUMN].label(), job_id);

        for (offset, &machine) in machines.iter().enumerate() {
            let c = FIRST_MACHINE_COLUMN + offset;
            let duration =
                parse_duration(&row[c]).map_err(|kind| MalformedInputError::new(r, c, kind))?;
            operation
                .actions
                .push(Action::new(machine, op_id).with_duration(duration));
        }

        job.operations.push(operation);
    }

    debug!(
        machines = floor.machine_count(),
        jobs = floor.job_count(),
        operations = floor.operation_count(),
        actions = floor.action_count(),
        "loaded shop floor"
    );

    Ok(floor)
}

/// Parses a JSON table and builds a shop floor from it.
pub fn load_json(json: &str) -> Result<ShopFloor, TableError> {
    let table = Table::from_json_str(json)?;
    Ok(load_table(&table)?)
}

/// Reads a JSON table file and builds a shop floor from it.
pub fn load_path(path: impl AsRef<Path>) -> Result<ShopFloor, TableError> {
    let file = std::fs::File::open(path.as_ref())?;
    let table = Table::from_reader(std::io::BufReader::new(file))?;
    Ok(load_table(&table)?)
}

fn parse_duration(cell: &Cell) -> Result<i64, MalformedKind> {
    let value = cell.as_integer().map_err(MalformedKind::NotAnInteger)?;
    if value < 0 {
        return Err(MalformedKind::NegativeDuration(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> Table {
        Table::new()
            .with_header("Job", "Op", ["M1", "M2", "M3"])
            .with_row("J1", "O11", [2, 5, 4])
            .with_row("", "O12", [5, 4, 5])
            .with_row("J2", "O21", [2, 5, 4])
    }

    #[test]
    fn test_load_builds_registry_and_jobs() {
        let floor = load_table(&small_table()).unwrap();

        let names: Vec<&str> = floor.machines.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["M1", "M2", "M3"]);
        assert!(floor.machines.iter().all(|m| !m.occupied));

        assert_eq!(floor.job_count(), 2);
        assert_eq!(floor.jobs[0].name, "J1");
        assert_eq!(floor.jobs[0].operation_count(), 2);
        assert_eq!(floor.jobs[1].name, "J2");
        assert_eq!(floor.jobs[1].operation_count(), 1);
    }

    #[test]
    fn test_one_action_per_machine_column() {
        let floor = load_table(&small_table()).unwrap();
        assert_eq!(floor.action_count(), 9);

        let op = &floor.jobs[0].operations[1];
        assert_eq!(op.name, "O12");
        let machines: Vec<MachineId> = op.actions.iter().map(|a| a.machine).collect();
        assert_eq!(machines, vec![MachineId(0), MachineId(1), MachineId(2)]);
        let durations: Vec<i64> = op.actions.iter().map(|a| a.duration).collect();
        assert_eq!(durations, vec![5, 4, 5]);
    }

    #[test]
    fn test_back_references_point_to_owners() {
        let floor = load_table(&small_table()).unwrap();
        for (id, action) in floor.actions() {
            assert_eq!(action.operation, id.operation);
            let op = floor.operation(action.operation).unwrap();
            assert_eq!(op.job, id.operation.job);
            assert!(!action.done);
            assert_eq!((action.start, action.end), (0, 0));
        }
    }

    #[test]
    fn test_load_is_repeatable() {
        let table = small_table();
        let a = load_table(&table).unwrap();
        let b = load_table(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_row_rejected() {
        let row = vec!["J3".into(), "O31".into(), Cell::Int(1)];
        let table = small_table().with_raw_row(row);
        let err = load_table(&table).unwrap_err();
        assert_eq!(err.row, 4);
        assert_eq!(err.column, 3);
        assert_eq!(
            err.kind,
            MalformedKind::ColumnCount {
                expected: 5,
                found: 3
            }
        );
    }

    #[test]
    fn test_long_row_rejected() {
        let table = small_table().with_row("J3", "O31", [1, 2, 3, 4]);
        let err = load_table(&table).unwrap_err();
        assert_eq!((err.row, err.column), (4, 5));
    }

    #[test]
    fn test_non_integer_rejected() {
        let table = small_table().with_raw_row(vec![
            "".into(),
            "O22".into(),
            Cell::Int(1),
            "fast".into(),
            Cell::Int(3),
        ]);
        let err = load_table(&table).unwrap_err();
        assert_eq!((err.row, err.column), (4, 3));
        assert_eq!(err.kind, MalformedKind::NotAnInteger("fast".into()));
    }

    #[test]
    fn test_numeric_text_accepted() {
        let table = small_table().with_raw_row(vec![
            "".into(),
            "O22".into(),
            "1".into(),
            " 2".into(),
            Cell::Int(3),
        ]);
        let floor = load_table(&table).unwrap();
        assert_eq!(floor.jobs[1].operations[1].actions[1].duration, 2);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let table = small_table().with_row("", "O22", [1, -2, 3]);
        let err = load_table(&table).unwrap_err();
        assert_eq!((err.row, err.column), (4, 3));
        assert_eq!(err.kind, MalformedKind::NegativeDuration(-2));
    }

    #[test]
    fn test_orphan_continuation_rejected() {
        let table = Table::new()
            .with_header("Job", "Op", ["M1"])
            .with_row("", "O11", [2]);
        let err = load_table(&table).unwrap_err();
        assert_eq!((err.row, err.column), (1, JOB_COLUMN));
        assert_eq!(err.kind, MalformedKind::OrphanContinuation);
    }

    #[test]
    fn test_empty_tables_rejected() {
        let err = load_table(&Table::new()).unwrap_err();
        assert_eq!(err.kind, MalformedKind::MissingHeader);

        let header_only = Table::new().with_header("Job", "Op", ["M1"]);
        let err = load_table(&header_only).unwrap_err();
        assert_eq!(err.kind, MalformedKind::MissingDataRows);
    }

    #[test]
    fn test_header_without_machines() {
        let table = Table::new()
            .with_header("Job", "Op", Vec::<String>::new())
            .with_row("J1", "O11", Vec::new());
        let floor = load_table(&table).unwrap();
        assert_eq!(floor.machine_count(), 0);
        assert_eq!(floor.operation_count(), 1);
        assert_eq!(floor.action_count(), 0);
    }

    #[test]
    fn test_load_json() {
        let json = r#"[["Job","Op","M1"],["J1","O11",3],["","O12","4"]]"#;
        let floor = load_json(json).unwrap();
        assert_eq!(floor.action_count(), 2);

        let json = r#"[["Job","Op","M1"],["J1","O11",0.5]]"#;
        let err = load_json(json).unwrap_err();
        match err {
            TableError::Malformed(e) => {
                assert_eq!((e.row, e.column), (1, 2));
                assert_eq!(e.kind, MalformedKind::NotAnInteger("0.5".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
