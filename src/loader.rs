//! JSON instance files.
//!
//! # Format
//!
//! ```json
//! {
//!   "configuracao": { "n_jobs": 3, "n_maquinas": 2, "codigo_cenario": "S1" },
//!   "tempos_processamento": [10, 4, 6],
//!   "ready_times": [0, 0, 5],
//!   "matriz_setup": [[null, 2, 3], [1, null, 4], [2, 2, null]]
//! }
//! ```
//!
//! List index `k` describes job `k + 1`. `null` matrix entries are read as
//! 0. English keys (`configuration`, `n_machines`, `scenario`,
//! `processing_times`, `release_dates`, `setup_matrix`) are accepted as
//! aliases. Unknown keys are ignored.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InstanceError;
use crate::models::{Instance, Job, SetupMatrix};
use crate::validation::validate_input;

/// Raw instance file as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFile {
    /// Configuration block.
    #[serde(rename = "configuracao", alias = "configuration")]
    pub configuration: InstanceConfig,
    /// Processing time per job.
    #[serde(rename = "tempos_processamento", alias = "processing_times")]
    pub processing_times: Vec<i64>,
    /// Release date per job.
    #[serde(rename = "ready_times", alias = "release_dates")]
    pub release_dates: Vec<i64>,
    /// `n_jobs x n_jobs` setup matrix; `null` means 0.
    #[serde(rename = "matriz_setup", alias = "setup_matrix")]
    pub setup_matrix: Vec<Vec<Option<i64>>>,
}

/// Configuration block of an instance file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Number of jobs.
    pub n_jobs: usize,
    /// Number of machines.
    #[serde(rename = "n_maquinas", alias = "n_machines")]
    pub n_machines: usize,
    /// Scenario identifier.
    #[serde(
        rename = "codigo_cenario",
        alias = "scenario",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scenario: Option<String>,
}

impl InstanceFile {
    /// Validates the file and builds the instance.
    ///
    /// # Errors
    /// [`InstanceError::Malformed`] or [`InstanceError::Degenerate`] when
    /// [`validate_input`] rejects the file.
    pub fn into_instance(self) -> Result<Instance, InstanceError> {
        validate_input(&self)?;

        let jobs = self
            .processing_times
            .iter()
            .zip(&self.release_dates)
            .enumerate()
            .map(|(i, (&p, &r))| Job::new(i + 1).with_processing_time(p).with_release_date(r))
            .collect();
        let setups = SetupMatrix::from_nullable_rows(&self.setup_matrix)?;
        let instance = Instance::new(jobs, setups, self.configuration.n_machines)?;

        Ok(match self.configuration.scenario {
            Some(code) => instance.with_scenario(code),
            None => instance,
        })
    }
}

impl From<&Instance> for InstanceFile {
    fn from(instance: &Instance) -> Self {
        let jobs = instance.jobs();
        Self {
            configuration: InstanceConfig {
                n_jobs: jobs.len(),
                n_machines: instance.machine_count(),
                scenario: instance.scenario().map(str::to_string),
            },
            processing_times: jobs.iter().map(|j| j.processing_time).collect(),
            release_dates: jobs.iter().map(|j| j.release_date).collect(),
            setup_matrix: instance
                .setups()
                .rows()
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, c)| if i == j { None } else { Some(c) })
                        .collect()
                })
                .collect(),
        }
    }
}

/// Parses an instance from JSON text.
pub fn parse_instance(json: &str) -> Result<Instance, InstanceError> {
    let file: InstanceFile = serde_json::from_str(json)?;
    file.into_instance()
}

/// Loads an instance from a JSON file.
///
/// # Errors
/// - [`InstanceError::NotFound`] when `path` does not exist.
/// - [`InstanceError::Io`] for other read failures.
/// - [`InstanceError::Json`] when the content is not a valid instance document.
/// - [`InstanceError::Malformed`] / [`InstanceError::Degenerate`] on bad shapes.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance, InstanceError> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InstanceError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let instance = parse_instance(&text)?;
    debug!(
        path = %path.display(),
        jobs = instance.job_count(),
        machines = instance.machine_count(),
        "instance loaded"
    );
    Ok(instance)
}

/// Writes an instance as pretty-printed JSON in the same format.
pub fn save_instance(instance: &Instance, path: impl AsRef<Path>) -> Result<(), InstanceError> {
    let json = serde_json::to_string_pretty(&InstanceFile::from(instance))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::InstanceGenerator;
    use crate::validation::ValidationErrorKind;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{
        "configuracao": { "n_jobs": 3, "n_maquinas": 2, "codigo_cenario": "S1", "seed": 7 },
        "tempos_processamento": [10, 4, 6],
        "ready_times": [0, 0, 5],
        "matriz_setup": [[null, 2, 3], [1, null, 4], [2, 2, null]]
    }"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("u_pmsp_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance(SAMPLE).unwrap();
        assert_eq!(inst.scenario(), Some("S1"));
        assert_eq!(inst.job_count(), 3);
        assert_eq!(inst.machine_count(), 2);
        assert_eq!(inst.processing_time(1), 10);
        assert_eq!(inst.release_date(3), 5);
        assert_eq!(inst.setup(2, 3), 4);
        assert_eq!(inst.setup(2, 2), 0);
        // Virtual row: max into job 1 from jobs 2, 3.
        assert_eq!(inst.setups().initial_setup(1), 2);
    }

    #[test]
    fn test_english_aliases() {
        let json = r#"{
            "configuration": { "n_jobs": 2, "n_machines": 1, "scenario": "EN" },
            "processing_times": [1, 2],
            "release_dates": [0, 1],
            "setup_matrix": [[0, 1], [1, 0]]
        }"#;
        let inst = parse_instance(json).unwrap();
        assert_eq!(inst.scenario(), Some("EN"));
        assert_eq!(inst.setup(1, 2), 1);
    }

    #[test]
    fn test_missing_scenario_is_allowed() {
        let json = r#"{
            "configuracao": { "n_jobs": 1, "n_maquinas": 1 },
            "tempos_processamento": [3],
            "ready_times": [0],
            "matriz_setup": [[null]]
        }"#;
        let inst = parse_instance(json).unwrap();
        assert_eq!(inst.scenario(), None);
    }

    #[test]
    fn test_wrong_length_is_malformed() {
        let json = r#"{
            "configuracao": { "n_jobs": 3, "n_maquinas": 1 },
            "tempos_processamento": [3, 4],
            "ready_times": [0, 0, 0],
            "matriz_setup": [[null, 1, 1], [1, null, 1], [1, 1, null]]
        }"#;
        assert!(matches!(
            parse_instance(json).unwrap_err(),
            InstanceError::Malformed(_)
        ));
    }

    #[test]
    fn test_zero_machines_is_degenerate() {
        let json = r#"{
            "configuracao": { "n_jobs": 1, "n_maquinas": 0 },
            "tempos_processamento": [3],
            "ready_times": [0],
            "matriz_setup": [[null]]
        }"#;
        assert!(matches!(
            parse_instance(json).unwrap_err(),
            InstanceError::Degenerate(_)
        ));
    }

    #[test]
    fn test_overflowing_times_are_malformed() {
        let json = r#"{
            "configuracao": { "n_jobs": 2, "n_maquinas": 1 },
            "tempos_processamento": [9000000000000000000, 9000000000000000000],
            "ready_times": [0, 0],
            "matriz_setup": [[null, 0], [0, null]]
        }"#;
        match parse_instance(json).unwrap_err() {
            InstanceError::Malformed(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::HorizonOverflow));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let json = r#"{ "configuracao": { "n_jobs": 1, "n_maquinas": 1 } }"#;
        assert!(matches!(
            parse_instance(json).unwrap_err(),
            InstanceError::Json(_)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("does_not_exist.json");
        match load_instance(&path).unwrap_err() {
            InstanceError::NotFound { path: p } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_then_load() {
        let original = InstanceGenerator::new(6, 2)
            .with_seed(4)
            .with_scenario("GEN")
            .generate()
            .unwrap();
        let path = temp_path("roundtrip.json");
        save_instance(&original, &path).unwrap();
        let loaded = load_instance(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.jobs(), original.jobs());
        assert_eq!(loaded.setups(), original.setups());
        assert_eq!(loaded.scenario(), Some("GEN"));
    }

    #[test]
    fn test_file_uses_null_diagonal() {
        let inst = parse_instance(SAMPLE).unwrap();
        let file = InstanceFile::from(&inst);
        assert_eq!(file.setup_matrix[0], vec![None, Some(2), Some(3)]);
        assert_eq!(file.configuration.n_machines, 2);
    }
}
