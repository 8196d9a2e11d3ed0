//! Input and solution validation.
//!
//! Checks structural integrity before and after optimization. Detects:
//! - List lengths that disagree with the declared job count
//! - Non-square setup matrices
//! - Negative times or setup costs
//! - Non-consecutive job ids
//! - Instances without machines
//! - Instances whose completion times would not fit in `i64`
//! - Solutions that miss or double-assign a job
//!
//! All checks collect every problem they find instead of stopping at the
//! first one.

use std::collections::HashSet;
use std::fmt;

use crate::loader::InstanceFile;
use crate::models::{Instance, Job, SetupMatrix, Solution};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A per-job list does not have one entry per job.
    LengthMismatch,
    /// The setup matrix is not `n x n`.
    NonSquareMatrix,
    /// A processing time, release date, or setup cost is negative.
    NegativeValue,
    /// Job ids are not exactly `1..=n` in order.
    InvalidJobId,
    /// The instance declares zero machines.
    NoMachines,
    /// A generator range is empty or negative.
    InvalidRange,
    /// Completion times could exceed `i64::MAX`.
    HorizonOverflow,
    /// A solution does not place some job.
    MissingJob,
    /// A solution places some job more than once.
    DuplicateJob,
    /// A solution references a job id outside `1..=n`.
    UnknownJob,
    /// A solution has a different number of machines than the instance.
    MachineCountMismatch,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the shape of a raw instance file.
///
/// Checks:
/// 1. At least one machine
/// 2. `tempos_processamento` and `ready_times` have `n_jobs` entries
/// 3. `matriz_setup` has `n_jobs` rows of `n_jobs` columns
/// 4. No negative processing times, release dates, or setup costs
pub fn validate_input(file: &InstanceFile) -> ValidationResult {
    let mut errors = Vec::new();
    let n = file.configuration.n_jobs;

    if file.configuration.n_machines == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoMachines,
            "instance declares zero machines",
        ));
    }

    check_len(&mut errors, "processing times", file.processing_times.len(), n);
    check_len(&mut errors, "release dates", file.release_dates.len(), n);
    check_len(&mut errors, "setup matrix rows", file.setup_matrix.len(), n);

    for (i, row) in file.setup_matrix.iter().enumerate() {
        if row.len() != n {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonSquareMatrix,
                format!(
                    "setup matrix row {} has {} columns, expected {}",
                    i + 1,
                    row.len(),
                    n
                ),
            ));
        }
    }

    check_non_negative(&mut errors, "processing time", &file.processing_times);
    check_non_negative(&mut errors, "release date", &file.release_dates);
    for (i, row) in file.setup_matrix.iter().enumerate() {
        for (j, cost) in row.iter().enumerate() {
            if let Some(c) = cost {
                if *c < 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NegativeValue,
                        format!("setup ({}, {}) is negative: {}", i + 1, j + 1, c),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates already-built model parts before they form an [`Instance`].
///
/// Checks:
/// 1. At least one machine
/// 2. Job ids are `1..=n` in order
/// 3. The setup matrix covers exactly the jobs
/// 4. No negative times or setup costs
/// 5. The schedule horizon fits in `i64`
pub fn validate_model(jobs: &[Job], setups: &SetupMatrix, machine_count: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if machine_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoMachines,
            "instance declares zero machines",
        ));
    }

    for (idx, job) in jobs.iter().enumerate() {
        if job.id != idx + 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJobId,
                format!("job at position {} has id {}", idx + 1, job.id),
            ));
        }
        if job.processing_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("job {} has negative processing time", job.id),
            ));
        }
        if job.release_date < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("job {} has negative release date", job.id),
            ));
        }
    }

    if setups.size() != jobs.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonSquareMatrix,
            format!(
                "setup matrix covers {} jobs, instance has {}",
                setups.size(),
                jobs.len()
            ),
        ));
    } else {
        for from in 1..=jobs.len() {
            for to in 1..=jobs.len() {
                if setups.cost(from, to) < 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NegativeValue,
                        format!("setup ({from}, {to}) is negative"),
                    ));
                }
            }
        }
    }

    if errors.iter().all(|e| e.kind == ValidationErrorKind::NoMachines)
        && schedule_horizon(jobs, setups).is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "release dates plus processing and setup times exceed the i64 range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on every time the scheduler computes: the latest release
/// date plus, per job, its processing time, the largest setup into it, and
/// its cheapest exit setup. `None` on overflow.
///
/// Expects consecutive ids and a matching, non-negative setup matrix.
fn schedule_horizon(jobs: &[Job], setups: &SetupMatrix) -> Option<i64> {
    let latest_release = jobs.iter().map(|j| j.release_date).max().unwrap_or(0);
    jobs.iter().try_fold(latest_release, |acc, job| {
        acc.checked_add(job.processing_time)?
            .checked_add(setups.initial_setup(job.id))?
            .checked_add(setups.min_exit_setup(job.id).unwrap_or(0))
    })
}

/// Checks that a solution assigns every job of `instance` exactly once.
///
/// A failure here is a defect in whatever produced the solution; callers
/// inside the crate only use it in debug assertions.
pub fn validate_solution(instance: &Instance, solution: &Solution) -> ValidationResult {
    let mut errors = Vec::new();
    let n = instance.job_count();

    if solution.machine_count() != instance.machine_count() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MachineCountMismatch,
            format!(
                "solution has {} machines, instance has {}",
                solution.machine_count(),
                instance.machine_count()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (machine, sequence) in solution.sequences() {
        for &job in sequence {
            if job == 0 || job > n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownJob,
                    format!("machine {machine} holds unknown job {job}"),
                ));
            } else if !seen.insert(job) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateJob,
                    format!("job {job} assigned more than once (again on machine {machine})"),
                ));
            }
        }
    }

    for job in 1..=n {
        if !seen.contains(&job) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingJob,
                format!("job {job} is not assigned to any machine"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_len(errors: &mut Vec<ValidationError>, what: &str, actual: usize, expected: usize) {
    if actual != expected {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!("{what} has {actual} entries, expected {expected}"),
        ));
    }
}

fn check_non_negative(errors: &mut Vec<ValidationError>, what: &str, values: &[i64]) {
    for (i, &v) in values.iter().enumerate() {
        if v < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("{} of job {} is negative: {}", what, i + 1, v),
            ));
        }
    }
}
