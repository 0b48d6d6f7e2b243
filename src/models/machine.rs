//! Machine model.
//!
//! A machine is one unit of exclusive capacity. Many actions across
//! different jobs reference the same machine, so machines live in the
//! shop floor's registry rather than under any job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a machine in the [`ShopFloor`](super::ShopFloor) registry.
///
/// The index is the machine's position in the table header, counted
/// from the first machine column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MachineId(pub usize);

/// A machine that runs at most one action at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Display label taken from the table header.
    pub name: String,
    /// Whether some running action currently holds this machine.
    pub occupied: bool,
}

impl Machine {
    /// Creates an idle machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            occupied: false,
        }
    }

}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Machine [name={}, occupied={}]",
            self.name, self.occupied
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_starts_idle() {
        let m = Machine::new("M1");
        assert_eq!(m.name, "M1");
        assert!(!m.occupied);
    }

    #[test]
    fn test_machine_display() {
        let mut m = Machine::new("M3");
        m.occupied = true;
        assert_eq!(m.to_string(), "Machine [name=M3, occupied=true]");
    }
}
