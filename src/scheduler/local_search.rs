//! Constrained steepest-descent local search on makespan.
//!
//! # Algorithm
//!
//! Each iteration anchors on the machine with the largest completion time
//! (`m_max`) and the one with the smallest (`m_min`), then scans three
//! neighborhoods in a fixed order:
//!
//! 1. **Transfer**: move the job at position `i` of `m_max` to the end of `m_min`.
//! 2. **Inter-machine swap**: exchange position `i` of `m_max` with position
//!    `j` of `m_min` (`i` outer, `j` inner).
//! 3. **Intra-machine swap**: exchange positions `i < j` inside `m_max`.
//!
//! Machines other than the two anchors are untouched, so their largest
//! completion time is computed once per iteration. The best candidate that
//! strictly lowers the makespan is committed; among equal candidates the
//! first one scanned wins. The search stops at the first iteration without
//! an improving candidate.
//!
//! Candidates are evaluated through iterator views over the current
//! sequences. Only the winning move is materialized.
//!
//! # Reference
//! Aarts & Lenstra (2003), "Local Search in Combinatorial Optimization", Ch. 1

use serde::Serialize;
use tracing::debug;

use super::evaluator::{append_completion, completion_of};
use crate::models::{Instance, JobId, MachineId, Solution};
use crate::validation::validate_solution;

/// Local search configuration.
///
/// # Examples
///
/// ```
/// use u_pmsp::scheduler::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_max_iterations(100)
///     .with_trace(false);
/// assert_eq!(config.max_iterations, Some(100));
/// assert!(!config.record_trace);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    /// Upper bound on applied improving moves (`None` = run to a local optimum).
    pub max_iterations: Option<usize>,
    /// Whether to keep a per-iteration trace in the result.
    pub record_trace: bool,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            record_trace: true,
        }
    }
}

impl LocalSearchConfig {
    /// Caps the number of improving moves.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Enables or disables the iteration trace.
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }
}

/// Search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchState {
    /// Still looking for improving moves.
    Searching,
    /// No neighborhood improves the current solution.
    LocalOptimum,
    /// Stopped by `max_iterations` before reaching a local optimum.
    IterationLimit,
}

/// Neighborhood a move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveKind {
    /// Job moved from `m_max` to the end of `m_min`.
    Transfer,
    /// Jobs exchanged between `m_max` and `m_min`.
    InterSwap,
    /// Jobs exchanged inside `m_max`.
    IntraSwap,
}

/// A concrete neighborhood move. Positions are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Move {
    /// Remove `from[position]` and append it to `to`.
    Transfer {
        from: MachineId,
        to: MachineId,
        position: usize,
    },
    /// Exchange `first[first_pos]` with `second[second_pos]`.
    InterSwap {
        first: MachineId,
        second: MachineId,
        first_pos: usize,
        second_pos: usize,
    },
    /// Exchange positions `i` and `j` of `machine`.
    IntraSwap { machine: MachineId, i: usize, j: usize },
}

impl Move {
    /// Neighborhood of this move.
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Transfer { .. } => MoveKind::Transfer,
            Move::InterSwap { .. } => MoveKind::InterSwap,
            Move::IntraSwap { .. } => MoveKind::IntraSwap,
        }
    }

    /// Returns the solution obtained by applying this move.
    ///
    /// Only the affected sequences change.
    pub fn apply(self, mut solution: Solution) -> Solution {
        match self {
            Move::Transfer { from, to, position } => {
                let job = solution.sequence_mut(from).remove(position);
                solution.sequence_mut(to).push(job);
            }
            Move::InterSwap {
                first,
                second,
                first_pos,
                second_pos,
            } => {
                let a = solution.sequence(first)[first_pos];
                let b = solution.sequence(second)[second_pos];
                solution.sequence_mut(first)[first_pos] = b;
                solution.sequence_mut(second)[second_pos] = a;
            }
            Move::IntraSwap { machine, i, j } => {
                solution.sequence_mut(machine).swap(i, j);
            }
        }
        solution
    }
}

/// One improving iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationRecord {
    /// Iteration number (1-based).
    pub iteration: usize,
    /// Makespan after the move.
    pub makespan: i64,
    /// Makespan reduction achieved by the move.
    pub gain: i64,
    /// The applied move.
    pub applied: Move,
}

impl IterationRecord {
    /// Neighborhood of the applied move.
    pub fn kind(&self) -> MoveKind {
        self.applied.kind()
    }
}

/// Outcome of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// Final solution.
    pub solution: Solution,
    /// Makespan of the final solution.
    pub makespan: i64,
    /// Makespan of the starting solution.
    pub initial_makespan: i64,
    /// Number of search passes, counting the final pass without improvement.
    pub iterations: usize,
    /// Number of improving moves applied.
    pub moves_applied: usize,
    /// Terminal state.
    pub state: SearchState,
    /// Per-iteration records (empty when tracing is disabled).
    pub trace: Vec<IterationRecord>,
}

impl LocalSearchResult {
    /// Absolute makespan improvement over the starting solution.
    pub fn improvement(&self) -> i64 {
        self.initial_makespan - self.makespan
    }
}

/// Steepest-descent local search over transfer and swap neighborhoods.
///
/// # Example
///
/// ```
/// use u_pmsp::models::{Instance, Job, SetupMatrix};
/// use u_pmsp::scheduler::{FfdConstructor, LocalSearch, SearchState};
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
/// let initial = FfdConstructor::new().construct(&instance);
/// let result = LocalSearch::default().run(&instance, initial);
/// assert_eq!(result.makespan, 10);
/// assert_eq!(result.iterations, 1);
/// assert_eq!(result.state, SearchState::LocalOptimum);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearch {
    config: LocalSearchConfig,
}

impl LocalSearch {
    /// Creates a search with the given configuration.
    pub fn new(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Improves `initial` until no neighborhood yields a lower makespan.
    #[tracing::instrument(
        level = "debug",
        name = "Local Search",
        skip_all,
        fields(jobs = instance.job_count(), machines = instance.machine_count())
    )]
    pub fn run(&self, instance: &Instance, initial: Solution) -> LocalSearchResult {
        let mut solution = initial;
        let mut times = solution.machine_times(instance);
        let initial_makespan = times.iter().copied().max().unwrap_or(0);
        let mut makespan = initial_makespan;
        let mut iterations = 0;
        let mut moves_applied = 0;
        let mut trace = Vec::new();
        let mut state = SearchState::Searching;

        while state == SearchState::Searching {
            if self
                .config
                .max_iterations
                .is_some_and(|cap| moves_applied >= cap)
            {
                state = SearchState::IterationLimit;
                break;
            }
            iterations += 1;

            let Some((applied, candidate)) = best_move(instance, &solution, &times, makespan) else {
                state = SearchState::LocalOptimum;
                break;
            };

            solution = applied.apply(solution);
            times = solution.machine_times(instance);
            let next = times.iter().copied().max().unwrap_or(0);
            debug_assert_eq!(next, candidate);
            debug_assert!(validate_solution(instance, &solution).is_ok());

            let gain = makespan - next;
            makespan = next;
            moves_applied += 1;
            debug!(iteration = iterations, makespan, gain, kind = ?applied.kind(), "improving move");

            if self.config.record_trace {
                trace.push(IterationRecord {
                    iteration: iterations,
                    makespan,
                    gain,
                    applied,
                });
            }
        }

        debug!(?state, iterations, makespan, "local search finished");
        LocalSearchResult {
            solution,
            makespan,
            initial_makespan,
            iterations,
            moves_applied,
            state,
            trace,
        }
    }
}

/// Anchor machines of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchors {
    max: MachineId,
    min: MachineId,
    /// Largest completion time among the other machines (0 if none).
    max_others: i64,
}

/// Picks `m_max` (first machine with the largest time) and `m_min` (first
/// machine other than `m_max` with the smallest time). With one machine
/// both anchors are that machine.
fn anchors(times: &[i64]) -> Anchors {
    let mut max = 0;
    for (i, &t) in times.iter().enumerate() {
        if t > times[max] {
            max = i;
        }
    }

    let mut min = None;
    for (i, &t) in times.iter().enumerate() {
        if i == max {
            continue;
        }
        match min {
            Some(m) if times[m] <= t => {}
            _ => min = Some(i),
        }
    }
    let min = min.unwrap_or(max);

    let max_others = times
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != max && i != min)
        .map(|(_, &t)| t)
        .max()
        .unwrap_or(0);

    Anchors {
        max: max + 1,
        min: min + 1,
        max_others,
    }
}

/// Best improving candidate found so far.
struct Incumbent {
    best: Option<Move>,
    value: i64,
}

impl Incumbent {
    fn offer(&mut self, candidate: Move, value: i64) {
        if value < self.value {
            self.value = value;
            self.best = Some(candidate);
        }
    }
}

/// Scans the three neighborhoods and returns the best strictly improving
/// move with its resulting makespan.
fn best_move(
    instance: &Instance,
    solution: &Solution,
    times: &[i64],
    makespan: i64,
) -> Option<(Move, i64)> {
    let Anchors {
        max,
        min,
        max_others,
    } = anchors(times);
    let seq_max = solution.sequence(max);
    let seq_min = solution.sequence(min);
    let single_machine = max == min;
    let mut incumbent = Incumbent {
        best: None,
        value: makespan,
    };

    if !single_machine {
        let time_min = times[min - 1];
        let last_min = seq_min.last().copied();

        for position in 0..seq_max.len() {
            let job = seq_max[position];
            let t_max = completion_of(instance, without(seq_max, position));
            let t_min = append_completion(instance, time_min, last_min, job);
            incumbent.offer(
                Move::Transfer {
                    from: max,
                    to: min,
                    position,
                },
                t_max.max(t_min).max(max_others),
            );
        }

        for (first_pos, &a) in seq_max.iter().enumerate() {
            for (second_pos, &b) in seq_min.iter().enumerate() {
                let t_max = completion_of(instance, replaced(seq_max, first_pos, b));
                let t_min = completion_of(instance, replaced(seq_min, second_pos, a));
                incumbent.offer(
                    Move::InterSwap {
                        first: max,
                        second: min,
                        first_pos,
                        second_pos,
                    },
                    t_max.max(t_min).max(max_others),
                );
            }
        }
    }

    for i in 0..seq_max.len() {
        for j in i + 1..seq_max.len() {
            let t_max = completion_of(instance, swapped(seq_max, i, j));
            let value = if single_machine {
                t_max
            } else {
                t_max.max(times[min - 1]).max(max_others)
            };
            incumbent.offer(Move::IntraSwap { machine: max, i, j }, value);
        }
    }

    incumbent.best.map(|m| (m, incumbent.value))
}

/// `seq` with position `skip` removed.
fn without(seq: &[JobId], skip: usize) -> impl Iterator<Item = JobId> + '_ {
    seq.iter()
        .enumerate()
        .filter(move |&(k, _)| k != skip)
        .map(|(_, &j)| j)
}

/// `seq` with position `pos` holding `job` instead.
fn replaced(seq: &[JobId], pos: usize, job: JobId) -> impl Iterator<Item = JobId> + '_ {
    seq.iter()
        .enumerate()
        .map(move |(k, &j)| if k == pos { job } else { j })
}

/// `seq` with positions `i` and `j` exchanged.
fn swapped(seq: &[JobId], i: usize, j: usize) -> impl Iterator<Item = JobId> + '_ {
    seq.iter().enumerate().map(move |(k, &job)| {
        if k == i {
            seq[j]
        } else if k == j {
            seq[i]
        } else {
            job
        }
    })
}
