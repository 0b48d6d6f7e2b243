//! Embedded sample dataset.
//!
//! Four jobs on five machines. Every operation lists a processing time
//! for each machine.

use crate::loader::Table;

/// Machine names of the sample table, in header order.
pub const SAMPLE_MACHINES: [&str; 5] = ["M1", "M2", "M3", "M4", "M5"];

/// `(job, operation, durations)` rows of the sample table.
const SAMPLE_ROWS: [(&str, &str, [i64; 5]); 12] = [
    ("J1", "O11", [2, 5, 4, 1, 2]),
    ("", "O12", [5, 4, 5, 7, 5]),
    ("", "O13", [4, 5, 5, 4, 5]),
    ("J2", "O21", [2, 5, 4, 7, 8]),
    ("", "O22", [5, 6, 9, 8, 5]),
    ("", "O23", [4, 5, 4, 54, 5]),
    ("J3", "O31", [9, 8, 6, 7, 9]),
    ("", "O32", [6, 1, 2, 5, 4]),
    ("", "O33", [2, 5, 4, 2, 4]),
    ("", "O34", [4, 5, 2, 1, 5]),
    ("J4", "O41", [1, 5, 2, 4, 12]),
    ("", "O42", [5, 1, 2, 1, 2]),
];

/// Builds the sample table.
pub fn sample_table() -> Table {
    SAMPLE_ROWS.iter().fold(
        Table::new().with_header("Pikj", "O", SAMPLE_MACHINES),
        |table, (job, op, durations)| table.with_row(*job, *op, *durations),
    )
}
