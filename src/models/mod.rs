//! Scheduling domain models.
//!
//! Provides the data types for identical parallel-machine scheduling with
//! sequence-dependent setups and release dates (`P | r_j, s_ij | C_max`).
//!
//! # Domain Mappings
//!
//! | u-pmsp | Manufacturing | Printing | Logistics |
//! |--------|--------------|----------|-----------|
//! | Job | Order | Print run | Shipment |
//! | SetupMatrix | Changeover | Ink/plate change | Repositioning |
//! | Solution | Machine loading | Press plan | Dock plan |
//! | Schedule | Production timeline | Press timeline | Dock timeline |

mod instance;
mod job;
mod schedule;
mod setup;
mod solution;

pub use instance::Instance;
pub use job::{Job, JobId, MachineId};
pub use schedule::{Assignment, Schedule};
pub use setup::SetupMatrix;
pub use solution::Solution;
