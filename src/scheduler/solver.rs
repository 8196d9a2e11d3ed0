//! End-to-end solve pipeline.
//!
//! # Algorithm
//!
//! 1. Build an initial solution with [`FfdConstructor`].
//! 2. Improve it with [`LocalSearch`], timing only this step.
//! 3. Compute the [`LowerBound`] and the run KPIs.
//!
//! The pipeline performs no output; [`SolveReport`] carries everything a
//! reporter needs.

use std::time::Instant;

use super::bound::{lower_bound, LowerBound};
use super::construction::FfdConstructor;
use super::kpi::SearchKpi;
use super::local_search::{LocalSearch, LocalSearchConfig, LocalSearchResult};
use crate::models::{Instance, Solution};

/// Everything produced by one solve.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Scenario identifier of the solved instance.
    pub scenario: Option<String>,
    /// Constructed solution.
    pub initial: Solution,
    /// Per-machine completion times of the constructed solution.
    pub initial_times: Vec<i64>,
    /// Local search outcome.
    pub result: LocalSearchResult,
    /// Per-machine completion times of the final solution.
    pub final_times: Vec<i64>,
    /// Instance lower bound.
    pub bound: LowerBound,
    /// Run KPIs.
    pub kpi: SearchKpi,
}

/// Construction followed by local search.
///
/// # Example
///
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
/// use u_pmsp::scheduler::Solver;
///
/// let instance = Instance::new(
///     vec![
///         Job::new(1).with_processing_time(10),
///         Job::new(2).with_processing_time(4),
///     ],
///     SetupMatrix::zeros(2),
///     1,
/// )
/// .unwrap();
///
/// let report = Solver::default().solve(&instance);
/// assert_eq!(report.result.makespan, 14);
/// assert_eq!(report.kpi.ratio, 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    constructor: FfdConstructor,
    search: LocalSearch,
}

impl Solver {
    /// Creates a solver with the given search configuration.
    pub fn new(config: LocalSearchConfig) -> Self {
        Self {
            constructor: FfdConstructor::new(),
            search: LocalSearch::new(config),
        }
    }

    /// Solves `instance`.
    pub fn solve(&self, instance: &Instance) -> SolveReport {
        let initial = self.constructor.construct(instance);
        let initial_times = initial.machine_times(instance);

        let started = Instant::now();
        let result = self.search.run(instance, initial.clone());
        let search_duration = started.elapsed();

        let final_times = result.solution.machine_times(instance);
        let bound = lower_bound(instance);
        let kpi = SearchKpi::calculate(instance, &result, &bound, search_duration);

        tracing::info!(
            scenario = instance.scenario().unwrap_or("-"),
            initial = kpi.initial_makespan,
            makespan = kpi.final_makespan,
            bound = kpi.lower_bound,
            ratio = kpi.ratio,
            iterations = kpi.iterations,
            elapsed_ms = search_duration.as_millis() as u64,
            "solve finished"
        );

        SolveReport {
            scenario: instance.scenario().map(str::to_string),
            initial,
            initial_times,
            result,
            final_times,
            bound,
            kpi,
        }
    }
}
