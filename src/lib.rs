//! # u-shopsim
//!
//! Discrete-time replay of job-shop schedules.
//!
//! Loads jobs, operations and per-machine processing times from a table,
//! assigns trial start times, then steps through time reporting machine
//! collisions (double bookings) and omissions (releases of machines that
//! were never claimed).
//!
//! # Modules
//!
//! - [`models`]: Machines, actions, operations, jobs, and the owning shop floor
//! - [`loader`]: Table input and table-to-graph construction
//! - [`timing`]: Pluggable start-time strategies
//! - [`simulator`]: Tick-by-tick replay and violation reports
//! - [`dataset`]: Embedded sample table
//! - [`error`]: Structural error types
//!
//! # Example
//!
//! ```
//! use u_shopsim::dataset::sample_table;
//! use u_shopsim::loader::load_table;
//! use u_shopsim::simulator::simulate;
//! use u_shopsim::timing::{assign_times, StartWindow, UniformStarts};
//!
//! let mut floor = load_table(&sample_table()).unwrap();
//! let window = StartWindow::new(100, 1000).unwrap();
//! assign_times(&mut floor, &mut UniformStarts::seeded(1), window).unwrap();
//!
//! let report = simulate(2_000, &mut floor);
//! assert_eq!(report.summary(&floor).completed + report.unfinished.len(), 60);
//! ```

pub mod dataset;
pub mod error;
pub mod loader;
pub mod models;
pub mod simulator;
pub mod timing;
