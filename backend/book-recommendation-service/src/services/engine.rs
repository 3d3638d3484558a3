use crate::config::EngineConfig;
use crate::error::{AppError, IntegrityCheck, Result};
use crate::models::{Book, EngineStats, PopularBook, Recommendation, RowIndex};
use crate::services::catalog::Catalog;
use crate::services::interaction::InteractionMatrix;
use crate::services::popularity::PopularityIndex;
use crate::services::similarity::{ScoredRow, SimilarityMatrix};
use crate::services::title_index::{normalize_title, TitleIndex};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Loaded, read-only recommendation state.
///
/// Built once by [`crate::services::load`]; every method takes `&self` and
/// nothing is mutated afterwards, so a handle can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug)]
pub struct EngineHandle {
    pub(crate) catalog: Catalog,
    pub(crate) popularity: PopularityIndex,
    pub(crate) interaction: InteractionMatrix,
    pub(crate) titles: TitleIndex,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) config: EngineConfig,
    pub(crate) loaded_at: DateTime<Utc>,
}

impl EngineHandle {
    /// Books most similar to `title`, best first.
    ///
    /// Resolver errors (`NotFound`, `Ambiguous`) are returned as-is. Fewer
    /// than `k` results come back only when fewer other books exist.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        self.check_k(k)?;
        let row = self.titles.resolve(title)?;
        let ranked = self.similarity.rank(row, k)?;

        debug!(
            title,
            row,
            k,
            results = ranked.len(),
            "Ranked similar books"
        );

        ranked
            .into_iter()
            .map(|ScoredRow { row, score }| {
                let book = self.book_at(row)?;
                Ok(Recommendation {
                    row,
                    book: book.clone(),
                    score,
                })
            })
            .collect()
    }

    pub fn resolve(&self, title: &str) -> Result<RowIndex> {
        self.titles.resolve(title)
    }

    pub fn rank(&self, row: RowIndex, k: usize) -> Result<Vec<ScoredRow>> {
        self.check_k(k)?;
        self.similarity.rank(row, k)
    }

    /// Prefix of the popularity list; `n` beyond its length returns all of it.
    pub fn top_popular(&self, n: usize) -> &[PopularBook] {
        self.popularity.top(n)
    }

    /// Autocomplete over retained titles: prefix matches, then substring matches.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let limit = self.check_search(query, limit)?;
        Ok(self
            .titles
            .search(query, limit)
            .into_iter()
            .filter_map(|row| self.titles.label(row).map(str::to_string))
            .collect())
    }

    /// Title or author search over the popular books.
    ///
    /// A blank query matches nothing and returns an empty list.
    pub fn search_books(&self, query: &str, limit: usize) -> Result<Vec<PopularBook>> {
        if normalize_title(query).is_empty() {
            return Ok(Vec::new());
        }
        let limit = self.check_search(query, limit)?;
        Ok(self
            .popularity
            .search(query, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn available_titles(&self) -> &[String] {
        self.titles.labels()
    }

    pub fn healthy(&self) -> bool {
        let rows = self.titles.len();
        self.similarity.dimension() == rows && self.interaction.rows() == rows
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            catalog_books: self.catalog.len(),
            retained_books: self.titles.len(),
            users: self.interaction.columns(),
            ratings: self.interaction.nonzero_ratings(),
            popular_books: self.popularity.len(),
            loaded_at: self.loaded_at,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    fn book_at(&self, row: RowIndex) -> Result<&Book> {
        self.titles
            .label(row)
            .and_then(|title| self.catalog.get(title))
            .ok_or_else(|| {
                AppError::integrity(
                    IntegrityCheck::MissingCatalogEntry,
                    format!("row {} has no catalog entry", row),
                )
            })
    }

    fn check_k(&self, k: usize) -> Result<()> {
        if k == 0 || k > self.config.max_recommendations {
            return Err(AppError::InvalidArgument(format!(
                "Number of recommendations must be between 1 and {}, got {}",
                self.config.max_recommendations, k
            )));
        }
        Ok(())
    }

    fn check_search(&self, query: &str, limit: usize) -> Result<usize> {
        if normalize_title(query).is_empty() {
            return Err(AppError::InvalidArgument(
                "Search query is required".to_string(),
            ));
        }
        if limit == 0 {
            return Err(AppError::InvalidArgument(
                "Search limit must be at least 1".to_string(),
            ));
        }
        Ok(limit.min(self.config.max_search_limit))
    }
}
