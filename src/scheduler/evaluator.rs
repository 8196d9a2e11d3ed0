//! Sequence evaluation.
//!
//! Computes when a single machine finishes an ordered list of jobs.
//!
//! # Semantics
//! - An empty sequence completes at 0.
//! - Every job starts at `max(previous completion, release date)`.
//! - The first job on a machine pays no setup (not even the virtual
//!   row-0 cost of the setup matrix).
//! - Every later job pays `setup(previous, job)` before processing.
//!
//! All functions are pure and run in O(sequence length).

use crate::models::{Instance, JobId};

/// Completion time of `sequence` on one machine.
///
/// # Example
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
/// use u_pmsp::scheduler::evaluator::completion_time;
///
/// let instance = Instance::new(
///     vec![
///         Job::new(1).with_processing_time(10),
///         Job::new(2).with_processing_time(4),
///     ],
///     SetupMatrix::uniform(2, 3),
///     1,
/// )
/// .unwrap();
/// assert_eq!(completion_time(&instance, &[]), 0);
/// assert_eq!(completion_time(&instance, &[1, 2]), 17);
/// ```
#[inline]
pub fn completion_time(instance: &Instance, sequence: &[JobId]) -> i64 {
    completion_of(instance, sequence.iter().copied())
}

/// Completion time of a job sequence given as an iterator.
///
/// Lets callers evaluate a modified view of a sequence (a job removed,
/// two positions exchanged) without materializing it.
pub fn completion_of<I>(instance: &Instance, jobs: I) -> i64
where
    I: IntoIterator<Item = JobId>,
{
    let mut completion = 0;
    let mut last = None;
    for job in jobs {
        completion = append_completion(instance, completion, last, job);
        last = Some(job);
    }
    completion
}

/// Completion time after appending `job` to a sequence that currently
/// finishes at `completion` with `last` as its final job.
#[inline]
pub fn append_completion(
    instance: &Instance,
    completion: i64,
    last: Option<JobId>,
    job: JobId,
) -> i64 {
    let start = completion.max(instance.release_date(job));
    let setup = last.map_or(0, |prev| instance.setup(prev, job));
    start + setup + instance.processing_time(job)
}

/// One job's position on a machine timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// The job.
    pub job: JobId,
    /// Start time; setup begins here.
    pub start: i64,
    /// Setup paid before processing.
    pub setup: i64,
    /// Completion time.
    pub end: i64,
}

/// Timeline of `sequence`: start, setup, and end of every job.
///
/// The last slot's `end` equals [`completion_time`].
pub fn timeline(instance: &Instance, sequence: &[JobId]) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(sequence.len());
    let mut completion = 0;
    let mut last: Option<JobId> = None;
    for &job in sequence {
        let start = completion.max(instance.release_date(job));
        let setup = last.map_or(0, |prev| instance.setup(prev, job));
        let end = start + setup + instance.processing_time(job);
        slots.push(Slot {
            job,
            start,
            setup,
            end,
        });
        completion = end;
        last = Some(job);
    }
    slots
}
