use crate::config::EngineConfig;
use crate::error::{AppError, IntegrityCheck, Result};
use crate::services::artifacts::{ArtifactPaths, ArtifactSet, SimilarityArtifact};
use crate::services::catalog::Catalog;
use crate::services::engine::EngineHandle;
use crate::services::interaction::InteractionMatrix;
use crate::services::popularity::PopularityIndex;
use crate::services::similarity::SimilarityMatrix;
use crate::services::title_index::TitleIndex;
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// Reads the four artifacts and builds an engine, or fails as a whole.
pub fn load(paths: &ArtifactPaths, config: &EngineConfig) -> Result<EngineHandle> {
    let started = Instant::now();
    info!(
        catalog = %paths.catalog.display(),
        popularity = %paths.popularity.display(),
        interaction = %paths.interaction.display(),
        similarity = %paths.similarity.display(),
        "Loading recommendation artifacts"
    );

    let set = ArtifactSet::read(paths)?;
    let engine = assemble(set, config.clone())?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Recommendation artifacts loaded"
    );
    Ok(engine)
}

/// Validates already-deserialized artifacts and builds an engine from them.
pub fn assemble(set: ArtifactSet, config: EngineConfig) -> Result<EngineHandle> {
    config.validate()?;

    let catalog = Catalog::from_books(set.catalog)?;
    let popularity = PopularityIndex::from_records(set.popularity)?;
    let interaction = InteractionMatrix::from_artifact(set.interaction)?;

    let SimilarityArtifact { labels, scores } = set.similarity;
    if let Some(labels) = labels {
        check_label_alignment(&labels, interaction.row_labels())?;
    }

    let similarity = SimilarityMatrix::from_rows(scores, config.symmetry_tolerance)?;
    if similarity.dimension() != interaction.rows() {
        return Err(AppError::integrity(
            IntegrityCheck::DimensionMismatch,
            format!(
                "similarity matrix is {0}x{0} but the interaction matrix has {1} rows",
                similarity.dimension(),
                interaction.rows()
            ),
        ));
    }

    let titles = TitleIndex::build(interaction.row_labels().to_vec())?;
    if let Some((row, title)) = titles
        .labels()
        .iter()
        .enumerate()
        .find(|(_, title)| !catalog.contains(title))
    {
        return Err(AppError::integrity(
            IntegrityCheck::MissingCatalogEntry,
            format!("row {} ('{}') has no catalog entry", row, title),
        ));
    }

    info!(
        catalog_books = catalog.len(),
        retained_books = titles.len(),
        users = interaction.columns(),
        popular_books = popularity.len(),
        "Recommendation engine assembled"
    );

    Ok(EngineHandle {
        catalog,
        popularity,
        interaction,
        titles,
        similarity,
        config,
        loaded_at: Utc::now(),
    })
}

fn check_label_alignment(similarity_labels: &[String], row_labels: &[String]) -> Result<()> {
    if similarity_labels.len() != row_labels.len() {
        return Err(AppError::integrity(
            IntegrityCheck::DimensionMismatch,
            format!(
                "similarity artifact has {} labels but the interaction matrix has {} rows",
                similarity_labels.len(),
                row_labels.len()
            ),
        ));
    }

    if let Some(row) = similarity_labels
        .iter()
        .zip(row_labels)
        .position(|(a, b)| a != b)
    {
        return Err(AppError::integrity(
            IntegrityCheck::RowOrdering,
            format!(
                "row {} is '{}' in the similarity artifact but '{}' in the interaction matrix",
                row, similarity_labels[row], row_labels[row]
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_alignment() {
        let rows = vec!["A".to_string(), "B".to_string()];
        assert!(check_label_alignment(&rows, &rows).is_ok());

        let swapped = vec!["B".to_string(), "A".to_string()];
        assert!(matches!(
            check_label_alignment(&swapped, &rows),
            Err(AppError::DataIntegrity {
                check: IntegrityCheck::RowOrdering,
                ..
            })
        ));

        let short = vec!["A".to_string()];
        assert!(matches!(
            check_label_alignment(&short, &rows),
            Err(AppError::DataIntegrity {
                check: IntegrityCheck::DimensionMismatch,
                ..
            })
        ));
    }
}
