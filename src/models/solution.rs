//! Solution model.
//!
//! A solution assigns every job to exactly one machine and fixes the order
//! of jobs on each machine. Timing is derived from the order by the
//! sequence evaluator; see [`Solution::to_schedule`].

use serde::{Deserialize, Serialize};

use super::{Assignment, Instance, JobId, MachineId, Schedule};
use crate::scheduler::evaluator;

/// Machine → ordered job sequence. Machine ids are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    sequences: Vec<Vec<JobId>>,
}

impl Solution {
    /// A solution with `machine_count` empty sequences.
    pub fn empty(machine_count: usize) -> Self {
        Self {
            sequences: vec![Vec::new(); machine_count],
        }
    }

    /// Wraps explicit sequences; index 0 is machine 1.
    pub fn from_sequences(sequences: Vec<Vec<JobId>>) -> Self {
        Self { sequences }
    }

    /// Number of machines.
    #[inline]
    pub fn machine_count(&self) -> usize {
        self.sequences.len()
    }

    /// Job sequence of a machine.
    #[inline]
    pub fn sequence(&self, machine: MachineId) -> &[JobId] {
        &self.sequences[machine - 1]
    }

    /// Iterates `(machine id, sequence)` in machine id order.
    pub fn sequences(&self) -> impl Iterator<Item = (MachineId, &[JobId])> + '_ {
        self.sequences
            .iter()
            .enumerate()
            .map(|(i, s)| (i + 1, s.as_slice()))
    }

    /// Total number of placed jobs (counting duplicates, if any).
    pub fn job_count(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }

    /// Machine holding `job`, if any.
    pub fn machine_of(&self, job: JobId) -> Option<MachineId> {
        self.sequences
            .iter()
            .position(|s| s.contains(&job))
            .map(|i| i + 1)
    }

    /// Completion time of every machine; index 0 is machine 1.
    pub fn machine_times(&self, instance: &Instance) -> Vec<i64> {
        self.sequences
            .iter()
            .map(|s| evaluator::completion_time(instance, s))
            .collect()
    }

    /// Maximum completion time over all machines (0 without machines).
    pub fn makespan(&self, instance: &Instance) -> i64 {
        self.machine_times(instance).into_iter().max().unwrap_or(0)
    }

    /// Expands the solution into a timed schedule.
    pub fn to_schedule(&self, instance: &Instance) -> Schedule {
        let mut schedule = Schedule::new();
        for (machine, sequence) in self.sequences() {
            for slot in evaluator::timeline(instance, sequence) {
                schedule.add_assignment(
                    Assignment::new(slot.job, machine, slot.start, slot.end).with_setup(slot.setup),
                );
            }
        }
        schedule
    }

    /// Appends a job at the end of a machine's sequence.
    pub(crate) fn push(&mut self, machine: MachineId, job: JobId) {
        self.sequences[machine - 1].push(job);
    }

    /// Mutable access to a machine's sequence.
    pub(crate) fn sequence_mut(&mut self, machine: MachineId) -> &mut Vec<JobId> {
        &mut self.sequences[machine - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, SetupMatrix};

    fn instance() -> Instance {
        let mut setups = SetupMatrix::zeros(3);
        setups.set_cost(1, 3, 2);
        Instance::new(
            vec![
                Job::new(1).with_processing_time(4),
                Job::new(2).with_processing_time(6).with_release_date(3),
                Job::new(3).with_processing_time(5),
            ],
            setups,
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_solution() {
        let s = Solution::empty(3);
        assert_eq!(s.machine_count(), 3);
        assert_eq!(s.job_count(), 0);
        assert!(s.sequence(2).is_empty());
    }

    #[test]
    fn test_machine_times_and_makespan() {
        let inst = instance();
        let s = Solution::from_sequences(vec![vec![1, 3], vec![2]]);
        // M1: 0+4 = 4, then max(4,0)+2+5 = 11; M2: max(0,3)+6 = 9
        assert_eq!(s.machine_times(&inst), vec![11, 9]);
        assert_eq!(s.makespan(&inst), 11);
        assert_eq!(s.machine_of(3), Some(1));
        assert_eq!(s.machine_of(2), Some(2));
        assert_eq!(s.machine_of(9), None);
    }

    #[test]
    fn test_to_schedule() {
        let inst = instance();
        let s = Solution::from_sequences(vec![vec![1, 3], vec![2]]);
        let schedule = s.to_schedule(&inst);

        assert_eq!(schedule.assignment_count(), 3);
        assert_eq!(schedule.makespan(), 11);
        let a3 = schedule.assignment_for_job(3).unwrap();
        assert_eq!((a3.machine_id, a3.start, a3.setup, a3.end), (1, 4, 2, 11));
        let a2 = schedule.assignment_for_job(2).unwrap();
        assert_eq!((a2.machine_id, a2.start, a2.end), (2, 3, 9));
    }

    #[test]
    fn test_push_and_sequence_mut() {
        let mut s = Solution::empty(2);
        s.push(2, 5);
        s.push(2, 1);
        s.sequence_mut(2).swap(0, 1);
        assert_eq!(s.sequence(2), &[1, 5]);
        assert_eq!(s.sequences().map(|(m, _)| m).collect::<Vec<_>>(), vec![1, 2]);
    }
}
