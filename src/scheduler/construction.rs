//! Greedy FFD-style construction.
//!
//! # Algorithm
//!
//! 1. Sort jobs by processing time, longest first (stable: ties keep id order).
//! 2. For each job, evaluate appending it to every machine.
//! 3. Place it on the machine with the smallest resulting completion time
//!    (lowest machine id on ties). No backtracking.
//!
//! # Complexity
//! O(n log n + n * m): appends are evaluated in O(1) from the cached
//! completion time and last job of each machine, which gives the same value
//! as re-evaluating the grown sequence.
//!
//! # Reference
//! Graham (1969), "Bounds on multiprocessing timing anomalies" (LPT list scheduling)

use tracing::{debug, trace};

use super::evaluator::append_completion;
use crate::models::{Instance, Job, JobId, MachineId, Solution};
use crate::validation::validate_solution;

/// Longest-processing-time-first list scheduler.
///
/// # Example
///
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
/// use u_pmsp::scheduler::FfdConstructor;
///
/// let instance = Instance::new(
///     vec![
///         Job::new(1).with_processing_time(10),
///         Job::new(2).with_processing_time(4),
///         Job::new(3).with_processing_time(6),
///     ],
///     SetupMatrix::zeros(3),
///     2,
/// )
/// .unwrap();
///
/// let solution = FfdConstructor::new().construct(&instance);
/// assert_eq!(solution.sequence(1), &[1]);
/// assert_eq!(solution.sequence(2), &[3, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FfdConstructor;

impl FfdConstructor {
    /// Creates a new constructor.
    pub fn new() -> Self {
        Self
    }

    /// Builds an initial solution for `instance`.
    pub fn construct(&self, instance: &Instance) -> Solution {
        let mut loads = MachineLoads::new(instance.machine_count());

        for job in self.job_order(instance) {
            let (machine, completion) = loads.best_machine_for(instance, job.id);
            trace!(job = job.id, machine, completion, "placed job");
            loads.assign(machine, job.id, completion);
        }

        let solution = loads.into_solution();
        debug_assert!(validate_solution(instance, &solution).is_ok());
        debug!(
            makespan = solution.makespan(instance),
            machines = instance.machine_count(),
            jobs = instance.job_count(),
            "initial solution constructed"
        );
        solution
    }

    /// Jobs sorted by processing time descending; ties keep id order.
    fn job_order<'a>(&self, instance: &'a Instance) -> Vec<&'a Job> {
        let mut order: Vec<&Job> = instance.jobs().iter().collect();
        order.sort_by(|a, b| b.processing_time.cmp(&a.processing_time));
        order
    }
}

/// Growing machine sequences plus their running completion time and last job.
struct MachineLoads {
    solution: Solution,
    completion: Vec<i64>,
    last: Vec<Option<JobId>>,
}

impl MachineLoads {
    fn new(machine_count: usize) -> Self {
        Self {
            solution: Solution::empty(machine_count),
            completion: vec![0; machine_count],
            last: vec![None; machine_count],
        }
    }

    /// Machine whose completion time after appending `job` is smallest.
    ///
    /// `min_by_key` keeps the first minimum, so ties go to the lowest id.
    fn best_machine_for(&self, instance: &Instance, job: JobId) -> (MachineId, i64) {
        (0..self.completion.len())
            .map(|i| {
                (
                    i + 1,
                    append_completion(instance, self.completion[i], self.last[i], job),
                )
            })
            .min_by_key(|&(_, completion)| completion)
            .unwrap_or((1, 0))
    }

    fn assign(&mut self, machine: MachineId, job: JobId, completion: i64) {
        self.solution.push(machine, job);
        self.completion[machine - 1] = completion;
        self.last[machine - 1] = Some(job);
    }

    fn into_solution(self) -> Solution {
        self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::InstanceGenerator;
    use crate::models::SetupMatrix;
    use crate::scheduler::evaluator::completion_time;

    fn make_instance(times: &[i64], releases: &[i64], setups: SetupMatrix, machines: usize) -> Instance {
        let jobs = times
            .iter()
            .zip(releases)
            .enumerate()
            .map(|(i, (&p, &r))| Job::new(i + 1).with_processing_time(p).with_release_date(r))
            .collect();
        Instance::new(jobs, setups, machines).unwrap()
    }

    #[test]
    fn test_single_machine_longest_first() {
        let inst = make_instance(&[10, 4], &[0, 0], SetupMatrix::zeros(2), 1);
        let solution = FfdConstructor::new().construct(&inst);
        assert_eq!(solution.sequence(1), &[1, 2]);
        assert_eq!(solution.makespan(&inst), 14);
    }

    #[test]
    fn test_two_machine_scenario() {
        // Job 1 → M1 (10); job 3 → M2 (6 < 16); job 2 → M2 (10 < 14).
        let inst = make_instance(&[10, 4, 6], &[0, 0, 0], SetupMatrix::zeros(3), 2);
        let solution = FfdConstructor::new().construct(&inst);
        assert_eq!(solution.sequence(1), &[1]);
        assert_eq!(solution.sequence(2), &[3, 2]);
        assert_eq!(solution.machine_times(&inst), vec![10, 10]);
    }

    #[test]
    fn test_ties_go_to_lowest_machine_and_lowest_job_id() {
        // Equal processing times: jobs placed in id order, each on the
        // lowest-id machine among equally good ones.
        let inst = make_instance(&[5, 5, 5, 5], &[0; 4], SetupMatrix::zeros(4), 3);
        let solution = FfdConstructor::new().construct(&inst);
        assert_eq!(solution.sequence(1), &[1, 4]);
        assert_eq!(solution.sequence(2), &[2]);
        assert_eq!(solution.sequence(3), &[3]);
    }

    #[test]
    fn test_setup_and_release_steer_placement() {
        // Job 1 (p=8) on M1. Job 2 (p=6) goes to idle M2. Job 3 (p=2) would
        // finish at 8+1+2=11 on M1 and 6+9+2=17 on M2 → M1.
        let mut setups = SetupMatrix::zeros(3);
        setups.set_cost(1, 3, 1);
        setups.set_cost(2, 3, 9);
        let inst = make_instance(&[8, 6, 2], &[0, 0, 0], setups, 2);
        let solution = FfdConstructor::new().construct(&inst);
        assert_eq!(solution.sequence(1), &[1, 3]);
        assert_eq!(solution.sequence(2), &[2]);
        assert_eq!(solution.machine_times(&inst), vec![11, 6]);
    }

    #[test]
    fn test_zero_jobs() {
        let inst = make_instance(&[], &[], SetupMatrix::zeros(0), 2);
        let solution = FfdConstructor::new().construct(&inst);
        assert_eq!(solution.machine_count(), 2);
        assert_eq!(solution.job_count(), 0);
        assert_eq!(solution.makespan(&inst), 0);
    }

    #[test]
    fn test_covers_every_job_on_random_instances() {
        for seed in 0..20 {
            let inst = InstanceGenerator::new(15, 4).with_seed(seed).generate().unwrap();
            let solution = FfdConstructor::new().construct(&inst);
            assert!(validate_solution(&inst, &solution).is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn test_accumulated_times_match_full_evaluation() {
        let inst = InstanceGenerator::new(12, 3).with_seed(7).generate().unwrap();
        let mut loads = MachineLoads::new(inst.machine_count());
        for job in FfdConstructor::new().job_order(&inst) {
            let (machine, completion) = loads.best_machine_for(&inst, job.id);
            loads.assign(machine, job.id, completion);
            assert_eq!(
                loads.completion[machine - 1],
                completion_time(&inst, loads.solution.sequence(machine))
            );
        }
    }
}
