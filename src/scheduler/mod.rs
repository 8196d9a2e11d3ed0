//! Construction, local search, and bounding.
//!
//! # Algorithm
//!
//! [`FfdConstructor`] builds a greedy initial solution in descending
//! processing-time order. [`LocalSearch`] then improves it by steepest
//! descent over transfer and swap moves anchored on the most and least
//! loaded machines. [`lower_bound`] measures the result against a
//! data-dependent bound. [`Solver`] chains the three.
//!
//! # KPI
//!
//! [`SearchKpi`] summarizes a run: makespans, bound ratio, improvement,
//! iterations, and search time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

mod bound;
mod construction;
pub mod evaluator;
mod kpi;
mod local_search;
mod solver;

pub use bound::{exit_setups, lower_bound, LowerBound};
pub use construction::FfdConstructor;
pub use kpi::SearchKpi;
pub use local_search::{
    IterationRecord, LocalSearch, LocalSearchConfig, LocalSearchResult, Move, MoveKind,
    SearchState,
};
pub use solver::{SolveReport, Solver};
