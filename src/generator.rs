//! Random instance generation.
//!
//! Draws processing times, release dates, and off-diagonal setup costs
//! uniformly from configurable inclusive ranges. A fixed seed makes the
//! output reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::InstanceError;
use crate::models::{Instance, Job, SetupMatrix};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Builder for random instances.
///
/// # Examples
///
/// ```
/// use u_pmsp::generator::InstanceGenerator;
///
/// let instance = InstanceGenerator::new(20, 3)
///     .with_processing_range(10, 50)
///     .with_setup_range(0, 5)
///     .with_seed(42)
///     .generate()
///     .unwrap();
/// assert_eq!(instance.job_count(), 20);
/// assert_eq!(instance.machine_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    /// Number of jobs.
    pub job_count: usize,
    /// Number of machines.
    pub machine_count: usize,
    /// Inclusive processing time range.
    pub processing: (i64, i64),
    /// Inclusive release date range.
    pub release: (i64, i64),
    /// Inclusive off-diagonal setup range.
    pub setup: (i64, i64),
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
    /// Scenario identifier attached to generated instances.
    pub scenario: Option<String>,
}

impl InstanceGenerator {
    /// Generator with default ranges: processing 1..=99, release 0..=50,
    /// setup 1..=20.
    pub fn new(job_count: usize, machine_count: usize) -> Self {
        Self {
            job_count,
            machine_count,
            processing: (1, 99),
            release: (0, 50),
            setup: (1, 20),
            seed: None,
            scenario: None,
        }
    }

    /// Sets the processing time range.
    pub fn with_processing_range(mut self, min: i64, max: i64) -> Self {
        self.processing = (min, max);
        self
    }

    /// Sets the release date range.
    pub fn with_release_range(mut self, min: i64, max: i64) -> Self {
        self.release = (min, max);
        self
    }

    /// Sets the setup cost range.
    pub fn with_setup_range(mut self, min: i64, max: i64) -> Self {
        self.setup = (min, max);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the scenario identifier.
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Draws an instance.
    ///
    /// # Errors
    /// [`InstanceError::Malformed`] for empty or negative ranges and
    /// [`InstanceError::Degenerate`] for zero machines.
    pub fn generate(&self) -> Result<Instance, InstanceError> {
        self.check_ranges()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let jobs: Vec<Job> = (1..=self.job_count)
            .map(|id| {
                Job::new(id)
                    .with_processing_time(rng.random_range(self.processing.0..=self.processing.1))
                    .with_release_date(rng.random_range(self.release.0..=self.release.1))
            })
            .collect();

        let mut setups = SetupMatrix::zeros(self.job_count);
        for from in 1..=self.job_count {
            for to in 1..=self.job_count {
                if from != to {
                    setups.set_cost(from, to, rng.random_range(self.setup.0..=self.setup.1));
                }
            }
        }

        let instance = Instance::new(jobs, setups, self.machine_count)?;
        Ok(match &self.scenario {
            Some(code) => instance.with_scenario(code.clone()),
            None => instance,
        })
    }

    fn check_ranges(&self) -> Result<(), InstanceError> {
        let errors: Vec<ValidationError> = [
            ("processing", self.processing),
            ("release", self.release),
            ("setup", self.setup),
        ]
        .into_iter()
        .filter(|&(_, (min, max))| min > max || min < 0)
        .map(|(name, (min, max))| {
            ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!("{name} range {min}..={max} is empty or negative"),
            )
        })
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InstanceError::Malformed(errors))
        }
    }
}
