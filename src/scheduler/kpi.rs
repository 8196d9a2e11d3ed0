//! Search quality metrics (KPIs).
//!
//! Summarizes one construction + local search run against the lower bound.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Initial makespan | C_max of the constructed solution |
//! | Final makespan | C_max after local search |
//! | Lower bound | DDLB value |
//! | Ratio | final / bound (0 when the bound is 0) |
//! | Improvement | initial - final |
//! | Total setup | Setup time paid by the final solution |
//! | Avg utilization | Mean busy share of every machine over the makespan |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::time::Duration;

use serde::Serialize;

use super::bound::LowerBound;
use super::local_search::LocalSearchResult;
use crate::models::{Instance, Schedule};

/// Run performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct SearchKpi {
    /// Makespan of the constructed solution.
    pub initial_makespan: i64,
    /// Makespan after local search.
    pub final_makespan: i64,
    /// Lower bound value.
    pub lower_bound: f64,
    /// `final_makespan / lower_bound`, 0 when the bound is 0.
    pub ratio: f64,
    /// `initial_makespan - final_makespan`.
    pub improvement: i64,
    /// Search passes, including the final one without improvement.
    pub iterations: usize,
    /// Improving moves applied.
    pub moves_applied: usize,
    /// Wall-clock time spent in local search.
    pub search_duration: Duration,
    /// Setup time paid by the final solution.
    pub total_setup: i64,
    /// Average machine utilization over the final makespan (0.0..1.0).
    pub avg_utilization: f64,
}

impl SearchKpi {
    /// Computes KPIs from a finished search.
    ///
    /// # Arguments
    /// * `instance` - The instance that was solved.
    /// * `result` - The local search outcome.
    /// * `bound` - The instance lower bound.
    /// * `search_duration` - Time measured around the search only.
    pub fn calculate(
        instance: &Instance,
        result: &LocalSearchResult,
        bound: &LowerBound,
        search_duration: Duration,
    ) -> Self {
        let schedule = result.solution.to_schedule(instance);
        Self {
            initial_makespan: result.initial_makespan,
            final_makespan: result.makespan,
            lower_bound: bound.value,
            ratio: bound.ratio(result.makespan),
            improvement: result.improvement(),
            iterations: result.iterations,
            moves_applied: result.moves_applied,
            search_duration,
            total_setup: schedule.total_setup(),
            avg_utilization: average_utilization(&schedule, instance.machine_count()),
        }
    }

    /// Relative distance to the bound: `(final - bound) / bound`.
    ///
    /// Returns `None` when the bound is not positive.
    pub fn gap(&self) -> Option<f64> {
        if self.lower_bound > 0.0 {
            Some((self.final_makespan as f64 - self.lower_bound) / self.lower_bound)
        } else {
            None
        }
    }

    /// Whether the run meets the given quality thresholds.
    ///
    /// An unbounded gap (bound 0) only passes when the makespan is 0 as well.
    pub fn meets_thresholds(&self, max_gap: f64, min_utilization: f64) -> bool {
        let gap_ok = match self.gap() {
            Some(gap) => gap <= max_gap,
            None => self.final_makespan == 0,
        };
        gap_ok && self.avg_utilization >= min_utilization
    }
}

/// Idle machines count as 0.
fn average_utilization(schedule: &Schedule, machine_count: usize) -> f64 {
    let horizon = schedule.makespan();
    if machine_count == 0 || horizon <= 0 {
        return 0.0;
    }
    let sum: f64 = (1..=machine_count)
        .filter_map(|m| schedule.machine_utilization(m, horizon))
        .sum();
    sum / machine_count as f64
}
