//! Sequence-dependent setup matrix.
//!
//! Maps an ordered job pair (from, to) to the changeover time paid when
//! `to` directly follows `from` on the same machine.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use serde::{Deserialize, Serialize};

use super::JobId;
use crate::error::InstanceError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Square job-to-job setup matrix with a derived virtual row 0.
///
/// Job ids are 1-based. The diagonal is always 0.
///
/// The virtual row holds, for each job `j`, the worst-case setup to reach
/// `j` from an unknown prior state: `max_{i != j} cost(i, j)`. It is derived
/// data only; neither the sequence evaluator nor the lower bound reads it.
///
/// Serialized as dense rows; deserialization goes through
/// [`SetupMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct SetupMatrix {
    size: usize,
    /// Row-major costs, 0-based internally.
    costs: Vec<i64>,
    /// Virtual row 0.
    initial: Vec<i64>,
}

impl SetupMatrix {
    /// All-zero matrix for `size` jobs.
    pub fn zeros(size: usize) -> Self {
        Self::uniform(size, 0)
    }

    /// Matrix where every off-diagonal entry equals `cost`.
    pub fn uniform(size: usize, cost: i64) -> Self {
        let mut costs = vec![cost; size * size];
        for i in 0..size {
            costs[i * size + i] = 0;
        }
        let mut matrix = Self {
            size,
            costs,
            initial: Vec::new(),
        };
        matrix.derive_initial_row();
        matrix
    }

    /// Builds a matrix from dense rows.
    ///
    /// Diagonal entries are ignored and stored as 0.
    ///
    /// # Errors
    /// [`InstanceError::Malformed`] if the rows do not form a square matrix.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, InstanceError> {
        let size = rows.len();
        let errors: Vec<ValidationError> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != size)
            .map(|(i, row)| {
                ValidationError::new(
                    ValidationErrorKind::NonSquareMatrix,
                    format!(
                        "setup matrix row {} has {} columns, expected {}",
                        i + 1,
                        row.len(),
                        size
                    ),
                )
            })
            .collect();
        if !errors.is_empty() {
            return Err(InstanceError::Malformed(errors));
        }

        let mut costs = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                costs.push(if i == j { 0 } else { c });
            }
        }
        let mut matrix = Self {
            size,
            costs,
            initial: Vec::new(),
        };
        matrix.derive_initial_row();
        Ok(matrix)
    }

    /// Builds a matrix from rows where missing entries are `None`.
    ///
    /// Missing entries (typically the diagonal) are read as 0.
    pub fn from_nullable_rows(rows: &[Vec<Option<i64>>]) -> Result<Self, InstanceError> {
        let dense: Vec<Vec<i64>> = rows
            .iter()
            .map(|row| row.iter().map(|c| c.unwrap_or(0)).collect())
            .collect();
        Self::from_rows(&dense)
    }

    /// Number of jobs covered by the matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Setup time when `to` directly follows `from`. Zero on the diagonal.
    #[inline]
    pub fn cost(&self, from: JobId, to: JobId) -> i64 {
        self.costs[(from - 1) * self.size + (to - 1)]
    }

    /// Defines the setup time for an ordered pair. Diagonal writes are ignored.
    pub fn set_cost(&mut self, from: JobId, to: JobId, cost: i64) {
        if from == to {
            return;
        }
        self.costs[(from - 1) * self.size + (to - 1)] = cost;
        self.initial[to - 1] = self.column_max(to - 1);
    }

    /// Virtual row 0 entry for `to`: the largest setup into `to` from any
    /// other job (0 when `to` is the only job).
    #[inline]
    pub fn initial_setup(&self, to: JobId) -> i64 {
        self.initial[to - 1]
    }

    /// Smallest setup leaving `from` towards any other job (`δ_from`).
    ///
    /// Returns `None` when the matrix holds a single job.
    pub fn min_exit_setup(&self, from: JobId) -> Option<i64> {
        let row = &self.costs[(from - 1) * self.size..from * self.size];
        row.iter()
            .enumerate()
            .filter(|&(j, _)| j != from - 1)
            .map(|(_, &c)| c)
            .min()
    }

    /// Dense rows (diagonal as 0), in job id order.
    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.costs
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.to_vec())
            .collect()
    }

    fn derive_initial_row(&mut self) {
        self.initial = (0..self.size).map(|j| self.column_max(j)).collect();
    }

    fn column_max(&self, j: usize) -> i64 {
        (0..self.size)
            .filter(|&i| i != j)
            .map(|i| self.costs[i * self.size + j])
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<Vec<Vec<i64>>> for SetupMatrix {
    type Error = InstanceError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<SetupMatrix> for Vec<Vec<i64>> {
    fn from(matrix: SetupMatrix) -> Self {
        matrix.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SetupMatrix {
        SetupMatrix::from_rows(&[vec![0, 3, 7], vec![2, 0, 4], vec![9, 1, 0]]).unwrap()
    }

    #[test]
    fn test_cost_lookup_is_one_based() {
        let m = sample();
        assert_eq!(m.size(), 3);
        assert_eq!(m.cost(1, 2), 3);
        assert_eq!(m.cost(3, 1), 9);
        assert_eq!(m.cost(2, 3), 4);
    }

    #[test]
    fn test_diagonal_forced_to_zero() {
        let m = SetupMatrix::from_rows(&[vec![5, 1], vec![1, 8]]).unwrap();
        assert_eq!(m.cost(1, 1), 0);
        assert_eq!(m.cost(2, 2), 0);
    }

    #[test]
    fn test_nullable_rows() {
        let m = SetupMatrix::from_nullable_rows(&[vec![None, Some(4)], vec![Some(6), None]])
            .unwrap();
        assert_eq!(m.cost(1, 2), 4);
        assert_eq!(m.cost(2, 1), 6);
        assert_eq!(m.cost(1, 1), 0);
    }

    #[test]
    fn test_initial_row_is_column_max_over_other_jobs() {
        let m = sample();
        // column 1: rows 2,3 -> max(2, 9)
        assert_eq!(m.initial_setup(1), 9);
        // column 2: rows 1,3 -> max(3, 1)
        assert_eq!(m.initial_setup(2), 3);
        // column 3: rows 1,2 -> max(7, 4)
        assert_eq!(m.initial_setup(3), 7);
    }

    #[test]
    fn test_min_exit_setup() {
        let m = sample();
        assert_eq!(m.min_exit_setup(1), Some(3));
        assert_eq!(m.min_exit_setup(2), Some(2));
        assert_eq!(m.min_exit_setup(3), Some(1));
        assert_eq!(SetupMatrix::zeros(1).min_exit_setup(1), None);
    }

    #[test]
    fn test_set_cost_updates_initial_row() {
        let mut m = SetupMatrix::zeros(3);
        m.set_cost(2, 1, 11);
        m.set_cost(1, 1, 99);
        assert_eq!(m.cost(2, 1), 11);
        assert_eq!(m.cost(1, 1), 0);
        assert_eq!(m.initial_setup(1), 11);
        assert_eq!(m.initial_setup(2), 0);
    }

    #[test]
    fn test_uniform() {
        let m = SetupMatrix::uniform(3, 5);
        assert_eq!(m.cost(1, 3), 5);
        assert_eq!(m.cost(3, 3), 0);
        assert_eq!(m.rows(), vec![vec![0, 5, 5], vec![5, 0, 5], vec![5, 5, 0]]);
    }

    #[test]
    fn test_non_square_rejected() {
        let err = SetupMatrix::from_rows(&[vec![0, 1, 2], vec![1, 0], vec![]]).unwrap_err();
        match err {
            InstanceError::Malformed(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .all(|e| e.kind == ValidationErrorKind::NonSquareMatrix));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_matrix() {
        let m = SetupMatrix::from_rows(&[]).unwrap();
        assert_eq!(m.size(), 0);
        assert!(m.rows().is_empty());
    }

    #[test]
    fn test_serde_goes_through_rows() {
        let m = sample();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0,3,7],[2,0,4],[9,1,0]]");
        let back: SetupMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.initial_setup(1), 9);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_matrix() {
        assert!(serde_json::from_str::<SetupMatrix>(r#"{"size":3,"costs":[],"initial":[]}"#).is_err());
        assert!(serde_json::from_str::<SetupMatrix>("[[0,1],[1]]").is_err());
    }
}
