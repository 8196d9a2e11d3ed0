//! Problem instance.
//!
//! An instance bundles the jobs, their setup matrix, and the number of
//! identical parallel machines. It is validated once on construction and
//! never mutated afterwards; every algorithm borrows it read-only.

use serde::Serialize;

use super::{Job, JobId, SetupMatrix};
use crate::error::InstanceError;
use crate::validation::validate_model;

/// An identical parallel-machine scheduling instance with
/// sequence-dependent setups and release dates.
///
/// # Example
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
///
/// let instance = Instance::new(
///     vec![
///         Job::new(1).with_processing_time(10),
///         Job::new(2).with_processing_time(4).with_release_date(2),
///     ],
///     SetupMatrix::uniform(2, 1),
///     1,
/// )
/// .unwrap();
/// assert_eq!(instance.job_count(), 2);
/// assert_eq!(instance.setup(1, 2), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    scenario: Option<String>,
    machine_count: usize,
    jobs: Vec<Job>,
    setups: SetupMatrix,
}

impl Instance {
    /// Builds a validated instance.
    ///
    /// # Errors
    /// - [`InstanceError::Degenerate`] when `machine_count` is 0.
    /// - [`InstanceError::Malformed`] when job ids are not `1..=n`, the setup
    ///   matrix size differs from the job count, or values are negative.
    pub fn new(
        jobs: Vec<Job>,
        setups: SetupMatrix,
        machine_count: usize,
    ) -> Result<Self, InstanceError> {
        validate_model(&jobs, &setups, machine_count)?;
        Ok(Self {
            scenario: None,
            machine_count,
            jobs,
            setups,
        })
    }

    /// Sets the scenario identifier.
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Scenario identifier, if the instance carries one.
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    /// Number of parallel machines (always at least 1).
    #[inline]
    pub fn machine_count(&self) -> usize {
        self.machine_count
    }

    /// Number of jobs.
    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// All jobs in id order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// The job with the given 1-based id.
    #[inline]
    pub fn job(&self, id: JobId) -> &Job {
        &self.jobs[id - 1]
    }

    /// Processing time of a job.
    #[inline]
    pub fn processing_time(&self, id: JobId) -> i64 {
        self.jobs[id - 1].processing_time
    }

    /// Release date of a job.
    #[inline]
    pub fn release_date(&self, id: JobId) -> i64 {
        self.jobs[id - 1].release_date
    }

    /// Setup time when `to` directly follows `from`.
    #[inline]
    pub fn setup(&self, from: JobId, to: JobId) -> i64 {
        self.setups.cost(from, to)
    }

    /// The full setup matrix.
    pub fn setups(&self) -> &SetupMatrix {
        &self.setups
    }

    /// Sum of processing times over all jobs.
    pub fn total_processing_time(&self) -> i64 {
        self.jobs.iter().map(|j| j.processing_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(times: &[i64]) -> Vec<Job> {
        times
            .iter()
            .enumerate()
            .map(|(i, &p)| Job::new(i + 1).with_processing_time(p))
            .collect()
    }

    #[test]
    fn test_instance_accessors() {
        let mut setups = SetupMatrix::zeros(3);
        setups.set_cost(1, 3, 4);
        let instance = Instance::new(jobs(&[5, 6, 7]), setups, 2)
            .unwrap()
            .with_scenario("SC-01");

        assert_eq!(instance.scenario(), Some("SC-01"));
        assert_eq!(instance.machine_count(), 2);
        assert_eq!(instance.job_count(), 3);
        assert_eq!(instance.processing_time(2), 6);
        assert_eq!(instance.release_date(3), 0);
        assert_eq!(instance.setup(1, 3), 4);
        assert_eq!(instance.setup(3, 1), 0);
        assert_eq!(instance.total_processing_time(), 18);
        assert_eq!(instance.job(3).id, 3);
    }

    #[test]
    fn test_zero_machines_is_degenerate() {
        let err = Instance::new(jobs(&[1]), SetupMatrix::zeros(1), 0).unwrap_err();
        assert!(matches!(err, InstanceError::Degenerate(_)));
    }

    #[test]
    fn test_mismatched_matrix_is_malformed() {
        let err = Instance::new(jobs(&[1, 2]), SetupMatrix::zeros(3), 1).unwrap_err();
        assert!(matches!(err, InstanceError::Malformed(_)));
    }

    #[test]
    fn test_zero_jobs_allowed() {
        let instance = Instance::new(Vec::new(), SetupMatrix::zeros(0), 3).unwrap();
        assert_eq!(instance.job_count(), 0);
        assert_eq!(instance.total_processing_time(), 0);
    }
}
