//! AHP Weighting Engine - priority weights and consistency ratio.
//!
//! Weights come from the row geometric-mean method. The principal eigenvalue
//! is approximated as `mean_i((A·w)_i / w_i)`, giving
//! `CI = (λmax − n) / (n − 1)` and `CR = CI / RI[n]` with Saaty's random
//! index table.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Saaty random index for n = 1..=10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// RI used for sizes outside the table.
pub const RANDOM_INDEX_FALLBACK: f64 = 1.49;

/// Conventional acceptability threshold for CR.
pub const CR_THRESHOLD: f64 = 0.1;

const WEIGHT_FLOOR: f64 = 1e-12;

/// Square matrix of positive pairwise comparisons.
///
/// Reciprocity (`a[j][i] == 1 / a[i][j]`) is not enforced; see
/// [`PairwiseMatrix::reciprocity_violations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PairwiseMatrix {
    rows: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Validates shape and entries.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for an empty matrix
    /// - `DimensionMismatch` when a row length differs from the row count
    /// - `OutOfRange` for a non-positive or non-finite entry
    pub fn try_new(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n = rows.len();
        if n == 0 {
            return Err(ValidationError::empty_field("matrix"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(ValidationError::dimension_mismatch(
                    format!("matrix[{}]", i),
                    n,
                    row.len(),
                ));
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ValidationError::out_of_range(
                        format!("matrix[{}][{}]", i, j),
                        f64::MIN_POSITIVE,
                        f64::MAX,
                        value,
                    ));
                }
            }
        }
        Ok(Self { rows })
    }

    /// All-ones n×n matrix: every pair judged equally important.
    pub fn equal(n: usize) -> Result<Self, ValidationError> {
        Self::try_new(vec![vec![1.0; n]; n])
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Index pairs `(i, j)`, `i < j`, where `a[i][j] * a[j][i]` deviates
    /// from 1 by more than `tolerance`.
    pub fn reciprocity_violations(&self, tolerance: f64) -> Vec<(usize, usize)> {
        let n = self.size();
        let mut violations = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.rows[i][j] * self.rows[j][i] - 1.0).abs() > tolerance {
                    violations.push((i, j));
                }
            }
        }
        violations
    }

    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        self.reciprocity_violations(tolerance).is_empty()
    }
}

impl TryFrom<Vec<Vec<f64>>> for PairwiseMatrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::try_new(rows)
    }
}

impl From<PairwiseMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PairwiseMatrix) -> Self {
        matrix.rows
    }
}

/// Result of evaluating a pairwise matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpResult {
    /// Normalized priority weights, summing to 1.
    pub weights: Vec<f64>,
    pub lambda_max: f64,
    pub ci: f64,
    pub cr: f64,
}

impl AhpResult {
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.cr <= threshold
    }
}

/// Stateless AHP engine.
pub struct AhpEngine;

impl AhpEngine {
    /// Computes weights and consistency for a validated matrix.
    pub fn evaluate(matrix: &PairwiseMatrix) -> AhpResult {
        let n = matrix.size();
        let rows = matrix.rows();

        let geometric_means: Vec<f64> = rows
            .iter()
            .map(|row| row.iter().product::<f64>().powf(1.0 / n as f64))
            .collect();
        let total: f64 = geometric_means.iter().sum();
        let total = if total > 0.0 { total } else { 1.0 };
        let weights: Vec<f64> = geometric_means.iter().map(|g| g / total).collect();

        let lambda_max = rows
            .iter()
            .zip(&weights)
            .map(|(row, w_i)| {
                let aw_i: f64 = row.iter().zip(&weights).map(|(a, w)| a * w).sum();
                aw_i / w_i.max(WEIGHT_FLOOR)
            })
            .sum::<f64>()
            / n as f64;

        let ci = if n > 2 {
            (lambda_max - n as f64) / (n as f64 - 1.0)
        } else {
            0.0
        };
        let ri = Self::random_index(n);
        let cr = if ri > 0.0 { ci / ri } else { 0.0 };

        AhpResult {
            weights,
            lambda_max,
            ci,
            cr,
        }
    }

    /// Saaty random index, 1.49 outside 1..=10.
    pub fn random_index(n: usize) -> f64 {
        n.checked_sub(1)
            .and_then(|i| RANDOM_INDEX.get(i))
            .copied()
            .unwrap_or(RANDOM_INDEX_FALLBACK)
    }
}

/// Convenience form: validates raw rows and returns `(weights, cr)`.
pub fn ahp_weights(rows: Vec<Vec<f64>>) -> Result<(Vec<f64>, f64), ValidationError> {
    let result = AhpEngine::evaluate(&PairwiseMatrix::try_new(rows)?);
    Ok((result.weights, result.cr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_matrix_is_rejected() {
        assert!(matches!(
            PairwiseMatrix::try_new(vec![]),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn non_square_matrix_is_rejected() {
        let err = PairwiseMatrix::try_new(vec![vec![1.0, 2.0], vec![0.5]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::dimension_mismatch("matrix[1]", 2, 1)
        );
    }

    #[test]
    fn non_positive_entry_is_rejected() {
        let err = PairwiseMatrix::try_new(vec![vec![1.0, 0.0], vec![1.0, 1.0]]).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn equal_matrix_gives_uniform_weights_and_zero_cr() {
        for n in 1..=12 {
            let result = AhpEngine::evaluate(&PairwiseMatrix::equal(n).unwrap());
            for w in &result.weights {
                assert!(approx(*w, 1.0 / n as f64));
            }
            assert!(result.cr.abs() < 1e-9);
        }
    }

    #[test]
    fn equal_matrix_of_size_zero_is_invalid() {
        assert!(PairwiseMatrix::equal(0).is_err());
    }

    #[test]
    fn reference_three_by_three_matrix() {
        let (weights, cr) = ahp_weights(vec![
            vec![1.0, 3.0, 2.0],
            vec![1.0 / 3.0, 1.0, 0.5],
            vec![0.5, 2.0, 1.0],
        ])
        .unwrap();

        assert!(approx(weights.iter().sum::<f64>(), 1.0));
        assert!(weights[0] > weights[2] && weights[2] > weights[1]);
        assert!(cr >= 0.0 && cr < CR_THRESHOLD);

        let again = ahp_weights(vec![
            vec![1.0, 3.0, 2.0],
            vec![1.0 / 3.0, 1.0, 0.5],
            vec![0.5, 2.0, 1.0],
        ])
        .unwrap();
        assert_eq!(again, (weights, cr));
    }

    #[test]
    fn default_category_matrix_prefers_env_and_fin_over_soc() {
        let result = AhpEngine::evaluate(
            &PairwiseMatrix::try_new(vec![
                vec![1.0, 3.0, 1.0],
                vec![1.0 / 3.0, 1.0, 1.0 / 3.0],
                vec![1.0, 3.0, 1.0],
            ])
            .unwrap(),
        );
        assert!(approx(result.weights[0], 3.0 / 7.0));
        assert!(approx(result.weights[1], 1.0 / 7.0));
        assert!(approx(result.weights[2], 3.0 / 7.0));
        assert!(result.cr.abs() < 1e-9);
    }

    #[test]
    fn two_by_two_has_zero_cr_even_if_inconsistent() {
        let result = AhpEngine::evaluate(&PairwiseMatrix::try_new(vec![vec![1.0, 9.0], vec![9.0, 1.0]]).unwrap());
        assert_eq!(result.cr, 0.0);
        assert_eq!(result.ci, 0.0);
    }

    #[test]
    fn inconsistent_matrix_has_high_cr() {
        // A > B, B > C but C > A
        let result = AhpEngine::evaluate(
            &PairwiseMatrix::try_new(vec![
                vec![1.0, 9.0, 1.0 / 9.0],
                vec![1.0 / 9.0, 1.0, 9.0],
                vec![9.0, 1.0 / 9.0, 1.0],
            ])
            .unwrap(),
        );
        assert!(result.cr > CR_THRESHOLD);
        assert!(!result.is_consistent(CR_THRESHOLD));
    }

    #[test]
    fn random_index_lookup_and_fallback() {
        assert_eq!(AhpEngine::random_index(1), 0.0);
        assert_eq!(AhpEngine::random_index(3), 0.58);
        assert_eq!(AhpEngine::random_index(10), 1.49);
        assert_eq!(AhpEngine::random_index(15), 1.49);
        assert_eq!(AhpEngine::random_index(0), 1.49);
    }

    #[test]
    fn reciprocity_check_reports_offending_pairs() {
        let m = PairwiseMatrix::try_new(vec![
            vec![1.0, 3.0, 2.0],
            vec![1.0 / 3.0, 1.0, 4.0],
            vec![0.5, 4.0, 1.0],
        ])
        .unwrap();
        assert_eq!(m.reciprocity_violations(1e-6), vec![(1, 2)]);
        assert!(!m.is_reciprocal(1e-6));
    }

    #[test]
    fn matrix_deserializes_with_validation() {
        let ok: PairwiseMatrix = serde_json::from_str("[[1,2],[0.5,1]]").unwrap();
        assert_eq!(ok.size(), 2);
        assert!(serde_json::from_str::<PairwiseMatrix>("[[1,2],[0.5]]").is_err());
    }
}
