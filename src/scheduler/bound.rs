//! Data-dependent lower bound (DDLB) on the optimal makespan.
//!
//! # Formula
//!
//! With `δ_i` the cheapest setup leaving job `i` towards another job:
//!
//! ```text
//! workload      = (Σ p_i + Σ δ_i - Σ_{m largest} δ_i) / m
//! critical_path = max_i (r_i + p_i + δ_i)
//! DDLB          = max(workload, critical_path)
//! ```
//!
//! At most `m` jobs end a machine sequence and skip an exit setup, hence the
//! `m` largest `δ_i` are dropped from the workload term.
//!
//! The critical-path term charges `δ_i` even when job `i` ends its
//! machine's sequence. With non-zero setups it can therefore exceed the
//! optimum; the workload term never does.
//!
//! The bound depends on the instance only.

use serde::Serialize;

use crate::models::Instance;

/// Lower bound on the optimal makespan, with both components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LowerBound {
    /// Workload-balance term.
    pub workload: f64,
    /// Critical-path term.
    pub critical_path: i64,
    /// `max(workload, critical_path)`.
    pub value: f64,
}

impl LowerBound {
    /// `makespan / value`, or 0 when the bound is not positive.
    pub fn ratio(&self, makespan: i64) -> f64 {
        if self.value > 0.0 {
            makespan as f64 / self.value
        } else {
            0.0
        }
    }

    /// Whether `makespan` provably equals the bound.
    pub fn certifies(&self, makespan: i64) -> bool {
        (makespan as f64 - self.value).abs() < 1e-9
    }
}

/// Cheapest exit setup `δ_i` of every job, in id order.
///
/// A job with no other job to switch to has `δ = 0`.
pub fn exit_setups(instance: &Instance) -> Vec<i64> {
    (1..=instance.job_count())
        .map(|job| instance.setups().min_exit_setup(job).unwrap_or(0))
        .collect()
}

/// Computes the data-dependent lower bound of `instance`.
///
/// # Example
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
/// use u_pmsp::scheduler::lower_bound;
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
/// let bound = lower_bound(&instance);
/// assert_eq!(bound.value, 14.0);
/// assert_eq!(bound.ratio(14), 1.0);
/// ```
pub fn lower_bound(instance: &Instance) -> LowerBound {
    let machines = instance.machine_count();
    let deltas = exit_setups(instance);

    let total_delta: i64 = deltas.iter().sum();
    let mut sorted = deltas.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let skipped: i64 = sorted.iter().take(machines).sum();
    let workload =
        (instance.total_processing_time() + total_delta - skipped) as f64 / machines as f64;

    let critical_path = instance
        .jobs()
        .iter()
        .zip(&deltas)
        .map(|(job, delta)| job.earliest_completion() + delta)
        .max()
        .unwrap_or(0);

    LowerBound {
        workload,
        critical_path,
        value: workload.max(critical_path as f64),
    }
}
