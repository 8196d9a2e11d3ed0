//! Makespan scheduling on identical parallel machines with
//! sequence-dependent setups and release dates.
//!
//! Builds an initial solution greedily, improves it by constrained
//! steepest-descent local search, and measures the result against a
//! data-dependent lower bound.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `SetupMatrix`, `Instance`, `Solution`,
//!   `Schedule`, `Assignment`
//! - **`scheduler`**: Sequence evaluation, `FfdConstructor`, `LocalSearch`,
//!   `lower_bound`, `SearchKpi`, `Solver`
//! - **`loader`**: JSON instance files
//! - **`generator`**: Seeded random instances
//! - **`validation`**: Input, model, and solution integrity checks
//! - **`report`**: Plain-text rendering of a `SolveReport`
//!
//! # Example
//!
//! ```
//! use u_pmsp::loader::parse_instance;
//! use u_pmsp::scheduler::Solver;
//!
//! let instance = parse_instance(r#"{
//!     "configuracao": { "n_jobs": 3, "n_maquinas": 2, "codigo_cenario": "S2" },
//!     "tempos_processamento": [10, 4, 6],
//!     "ready_times": [0, 0, 0],
//!     "matriz_setup": [[null, 0, 0], [0, null, 0], [0, 0, null]]
//! }"#)
//! .unwrap();
//!
//! let report = Solver::default().solve(&instance);
//! assert_eq!(report.result.makespan, 10);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Allahverdi et al. (2008), "A survey of scheduling problems with setup times or costs"

pub mod error;
pub mod generator;
pub mod loader;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
