//! Job model.
//!
//! A job is a single, indivisible unit of work processed on exactly one
//! machine. Jobs are identified by their 1-based position in the instance.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2.1

use serde::{Deserialize, Serialize};

/// 1-based job identifier (index order in the instance file).
pub type JobId = usize;

/// 1-based machine identifier.
pub type MachineId = usize;

/// A job to be scheduled on one of the parallel machines.
///
/// # Time Representation
/// All times are integers in the instance's own time unit, relative to t=0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier (1..=n).
    pub id: JobId,
    /// Processing time on any machine.
    pub processing_time: i64,
    /// Earliest time processing (including setup) may begin.
    pub release_date: i64,
}

impl Job {
    /// Creates a job with zero processing time and release date.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            processing_time: 0,
            release_date: 0,
        }
    }

    /// Sets the processing time.
    pub fn with_processing_time(mut self, processing_time: i64) -> Self {
        self.processing_time = processing_time;
        self
    }

    /// Sets the release date.
    pub fn with_release_date(mut self, release_date: i64) -> Self {
        self.release_date = release_date;
        self
    }

    /// Earliest possible completion if the job ran alone: `r + p`.
    #[inline]
    pub fn earliest_completion(&self) -> i64 {
        self.release_date + self.processing_time
    }
}
