use crate::error::{AppError, IntegrityCheck, Result};
use crate::services::artifacts::InteractionArtifact;
use ndarray::Array2;

/// Book × user rating pivot the similarity scores were derived from.
///
/// Only its row labels drive serving (title → row); the values back the
/// engine stats.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    row_labels: Vec<String>,
    values: Array2<f64>,
}

impl InteractionMatrix {
    pub fn from_artifact(artifact: InteractionArtifact) -> Result<Self> {
        let InteractionArtifact {
            row_labels,
            column_labels,
            values,
        } = artifact;

        if values.len() != row_labels.len() {
            return Err(AppError::integrity(
                IntegrityCheck::RaggedInteractionRow,
                format!(
                    "{} row labels but {} value rows",
                    row_labels.len(),
                    values.len()
                ),
            ));
        }

        let width = column_labels.len();
        let mut flat = Vec::with_capacity(row_labels.len() * width);
        for (row, ratings) in values.into_iter().enumerate() {
            if ratings.len() != width {
                return Err(AppError::integrity(
                    IntegrityCheck::RaggedInteractionRow,
                    format!(
                        "row {} ('{}') has {} values, expected {}",
                        row,
                        row_labels[row],
                        ratings.len(),
                        width
                    ),
                ));
            }
            flat.extend(ratings);
        }

        let values = Array2::from_shape_vec((row_labels.len(), width), flat).map_err(|err| {
            AppError::integrity(IntegrityCheck::RaggedInteractionRow, err.to_string())
        })?;

        Ok(Self { row_labels, values })
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Number of (book, user) cells holding a rating.
    pub fn nonzero_ratings(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }
}
