//! Shop-floor entity model.
//!
//! Ownership runs one way: [`ShopFloor`] owns machines and jobs, a
//! [`Job`] owns its operations, an [`Operation`] owns its actions.
//! Relations back up the tree (action → machine, action → operation,
//! operation → job) are copyable index handles, resolved through the
//! shop floor.
//!
//! | Entity | Handle | Owned by |
//! |--------|--------|----------|
//! | Machine | [`MachineId`] | `ShopFloor` registry |
//! | Job | [`JobId`] | `ShopFloor` |
//! | Operation | [`OperationId`] | `Job` |
//! | Action | [`ActionId`] | `Operation` |

mod action;
mod job;
mod machine;
mod operation;
mod shop;

pub use action::{Action, ActionId, ActionState};
pub use job::{Job, JobId};
pub use machine::{Machine, MachineId};
pub use operation::{Operation, OperationId};
pub use shop::{ActionDescription, ShopFloor};
