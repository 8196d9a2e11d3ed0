//! Schedule (timeline) model.
//!
//! A schedule is the timed view of a [`Solution`](super::Solution): every job
//! gets a machine, a start time, its setup portion, and an end time.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{JobId, MachineId};

/// A complete timed schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Job assignments (job → machine × time), in machine then sequence order.
    pub assignments: Vec<Assignment>,
}

/// A job-machine-time assignment.
///
/// The job occupies `[start, end)`; the first `setup` units of that
/// interval are changeover time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned job.
    pub job_id: JobId,
    /// Machine processing the job.
    pub machine_id: MachineId,
    /// Start time (setup begins here).
    pub start: i64,
    /// End time.
    pub end: i64,
    /// Setup portion of `[start, end)`.
    pub setup: i64,
}

impl Assignment {
    /// Creates a new assignment without setup.
    pub fn new(job_id: JobId, machine_id: MachineId, start: i64, end: i64) -> Self {
        Self {
            job_id,
            machine_id,
            start,
            end,
            setup: 0,
        }
    }

    /// Sets the setup time.
    pub fn with_setup(mut self, setup: i64) -> Self {
        self.setup = setup;
        self
    }

    /// Total occupied duration (end - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Processing duration excluding setup.
    #[inline]
    pub fn processing(&self) -> i64 {
        self.duration() - self.setup
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all assignments.
    pub fn makespan(&self) -> i64 {
        self.assignments.iter().map(|a| a.end).max().unwrap_or(0)
    }

    /// Finds the assignment for a given job.
    pub fn assignment_for_job(&self, job_id: JobId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.job_id == job_id)
    }

    /// Returns all assignments for a given machine, in sequence order.
    pub fn assignments_for_machine(&self, machine_id: MachineId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.machine_id == machine_id)
            .collect()
    }

    /// Completion time of a machine (0 if it processes nothing).
    pub fn machine_completion(&self, machine_id: MachineId) -> i64 {
        self.assignments
            .iter()
            .filter(|a| a.machine_id == machine_id)
            .map(|a| a.end)
            .max()
            .unwrap_or(0)
    }

    /// Total setup time paid across the schedule.
    pub fn total_setup(&self) -> i64 {
        self.assignments.iter().map(|a| a.setup).sum()
    }

    /// Computes machine utilization: busy time (setup + processing) / horizon.
    ///
    /// Returns `None` if `horizon` is not positive.
    pub fn machine_utilization(&self, machine_id: MachineId, horizon: i64) -> Option<f64> {
        if horizon <= 0 {
            return None;
        }
        let busy: i64 = self
            .assignments_for_machine(machine_id)
            .iter()
            .map(|a| a.duration())
            .sum();
        Some(busy as f64 / horizon as f64)
    }

    /// Utilization of every machine that has assignments, over the makespan.
    pub fn all_utilizations(&self) -> BTreeMap<MachineId, f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return BTreeMap::new();
        }

        let mut busy: BTreeMap<MachineId, i64> = BTreeMap::new();
        for a in &self.assignments {
            *busy.entry(a.machine_id).or_insert(0) += a.duration();
        }

        busy.into_iter()
            .map(|(id, b)| (id, b as f64 / horizon as f64))
            .collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
