//! Item-item similarity matrix and top-k ranking.
//!
//! Ranking order: score descending, then row index ascending. Both keys are
//! total (`f64::total_cmp`, load rejects NaN), so the order never depends on
//! sort stability or input order.

use crate::error::{AppError, IntegrityCheck, Result};
use crate::models::RowIndex;
use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: RowIndex,
    pub score: f64,
}

fn ranking_order(a: &ScoredRow, b: &ScoredRow) -> Ordering {
    b.score.total_cmp(&a.score).then(a.row.cmp(&b.row))
}

#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Validates shape, finiteness and symmetry before accepting the rows.
    pub fn from_rows(rows: Vec<Vec<f64>>, tolerance: f64) -> Result<Self> {
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(AppError::integrity(
                    IntegrityCheck::NonSquare,
                    format!("row {} has {} scores, expected {}", i, row.len(), n),
                ));
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(AppError::integrity(
                    IntegrityCheck::NonFiniteScore,
                    format!("score at ({}, {}) is {}", i, j, row[j]),
                ));
            }
            flat.extend(row);
        }

        let scores = Array2::from_shape_vec((n, n), flat).map_err(|err| {
            AppError::integrity(IntegrityCheck::NonSquare, err.to_string())
        })?;
        let matrix = Self { scores };

        if let Some((i, j)) = matrix.first_asymmetry(tolerance) {
            return Err(AppError::integrity(
                IntegrityCheck::Asymmetric,
                format!(
                    "scores[{}][{}] = {} but scores[{}][{}] = {} (tolerance {})",
                    i,
                    j,
                    matrix.scores[[i, j]],
                    j,
                    i,
                    matrix.scores[[j, i]],
                    tolerance
                ),
            ));
        }

        Ok(matrix)
    }

    pub fn dimension(&self) -> usize {
        self.scores.nrows()
    }

    pub fn score(&self, i: RowIndex, j: RowIndex) -> Option<f64> {
        self.scores.get((i, j)).copied()
    }

    pub fn row(&self, row: RowIndex) -> Option<ArrayView1<'_, f64>> {
        (row < self.dimension()).then(|| self.scores.row(row))
    }

    fn first_asymmetry(&self, tolerance: f64) -> Option<(RowIndex, RowIndex)> {
        let n = self.dimension();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .find(|&(i, j)| (self.scores[[i, j]] - self.scores[[j, i]]).abs() > tolerance)
    }

    /// Top `k` rows most similar to `row`, never including `row` itself.
    ///
    /// Returns fewer than `k` entries when the matrix has fewer other rows.
    pub fn rank(&self, row: RowIndex, k: usize) -> Result<Vec<ScoredRow>> {
        let scores = self.row(row).ok_or_else(|| {
            AppError::InvalidArgument(format!(
                "row {} is outside a {}-row similarity matrix",
                row,
                self.dimension()
            ))
        })?;

        let mut candidates: Vec<ScoredRow> = scores
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .map(|(other, &score)| ScoredRow { row: other, score })
            .collect();

        if k < candidates.len() {
            if k == 0 {
                return Ok(Vec::new());
            }
            candidates.select_nth_unstable_by(k - 1, ranking_order);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(ranking_order);

        Ok(candidates)
    }
}
