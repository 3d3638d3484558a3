use crate::error::{AppError, IntegrityCheck, Result};
use crate::models::{PopularBook, PopularRecord};
use crate::services::title_index::normalize_title;
use tracing::info;

/// Precomputed top-N list, most popular first.
///
/// `top(n)` returns a prefix of the list; asking for more than the artifact
/// holds returns the whole list rather than an error.
#[derive(Debug, Clone, Default)]
pub struct PopularityIndex {
    entries: Vec<PopularBook>,
}

impl PopularityIndex {
    pub fn from_records(records: Vec<PopularRecord>) -> Result<Self> {
        for (position, record) in records.iter().enumerate() {
            if record.title.trim().is_empty() {
                return Err(AppError::integrity(
                    IntegrityCheck::EmptyTitle,
                    format!("popular entry {} has a blank title", position),
                ));
            }
        }

        // scores are optional; the ones present must already be ranked,
        // even across entries without a score
        let mut last_scored: Option<(usize, f64)> = None;
        for (position, record) in records.iter().enumerate() {
            let Some(score) = record.score else {
                continue;
            };
            if !score.is_finite() {
                return Err(AppError::integrity(
                    IntegrityCheck::NonFiniteScore,
                    format!("popular entry {} has score {}", position, score),
                ));
            }
            if let Some((prev_position, prev)) = last_scored {
                if score > prev {
                    return Err(AppError::integrity(
                        IntegrityCheck::PopularityOrder,
                        format!(
                            "entry {} scores {} after entry {} scored {}",
                            position, score, prev_position, prev
                        ),
                    ));
                }
            }
            last_scored = Some((position, score));
        }

        let entries: Vec<PopularBook> = records.into_iter().map(PopularBook::from).collect();
        info!(entries = entries.len(), "Popularity index loaded");

        Ok(Self { entries })
    }

    pub fn top(&self, n: usize) -> &[PopularBook] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Case-insensitive match on title or author, in popularity order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&PopularBook> {
        let needle = normalize_title(query);
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                normalize_title(&entry.book.title).contains(&needle)
                    || normalize_title(&entry.book.author).contains(&needle)
            })
            .take(limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
