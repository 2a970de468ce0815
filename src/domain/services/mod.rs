//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod planner;
mod process_table;

pub use planner::{ContributionPlanner, PersistedRecord};
pub use process_table::process_type_lines;
