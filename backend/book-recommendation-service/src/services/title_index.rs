//! Title → row resolution.
//!
//! Lookup order for a query:
//! 1. exact match on the normalized title (trim, lowercase, collapsed whitespace)
//! 2. titles that start with the normalized query
//! 3. titles that contain the normalized query
//!
//! Steps 2 and 3 only resolve when exactly one title matches. Several matches
//! fail with `AppError::Ambiguous` listing the candidates in row order; a
//! fallback never silently picks one of them.

use crate::error::{AppError, IntegrityCheck, Result};
use crate::models::RowIndex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Upper bound on candidates returned with an ambiguity error.
pub const MAX_AMBIGUOUS_CANDIDATES: usize = 10;

pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    labels: Vec<String>,
    normalized: Vec<String>,
    lookup: HashMap<String, RowIndex>,
    /// Rows that own their normalized title (first occurrence).
    canonical: Vec<RowIndex>,
}

impl TitleIndex {
    /// Builds the index from interaction row labels, in row order.
    ///
    /// Exact duplicate labels are rejected. Distinct labels that normalize to
    /// the same key resolve to the first of them.
    pub fn build(labels: Vec<String>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(labels.len());
        for (row, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(AppError::integrity(
                    IntegrityCheck::EmptyTitle,
                    format!("row {} has a blank label", row),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(AppError::integrity(
                    IntegrityCheck::DuplicateRowLabel,
                    format!("'{}' appears more than once (again at row {})", label, row),
                ));
            }
        }

        let normalized: Vec<String> = labels.iter().map(|l| normalize_title(l)).collect();
        let mut lookup = HashMap::with_capacity(labels.len());
        let mut canonical = Vec::with_capacity(labels.len());

        for (row, key) in normalized.iter().enumerate() {
            match lookup.get(key) {
                Some(&first) => warn!(
                    row,
                    first_row = first,
                    title = %labels[row],
                    "Row label collides with an earlier title after normalization"
                ),
                None => {
                    lookup.insert(key.clone(), row);
                    canonical.push(row);
                }
            }
        }

        Ok(Self {
            labels,
            normalized,
            lookup,
            canonical,
        })
    }

    pub fn resolve(&self, query: &str) -> Result<RowIndex> {
        let key = normalize_title(query);
        if key.is_empty() {
            return Err(AppError::InvalidArgument(
                "Book title is required".to_string(),
            ));
        }

        if let Some(&row) = self.lookup.get(&key) {
            debug!(query, row, "Resolved title by exact match");
            return Ok(row);
        }

        let prefix = self.matching_rows(|title| title.starts_with(&key));
        if let Some(row) = self.single_match(query, prefix)? {
            debug!(query, row, "Resolved title by prefix");
            return Ok(row);
        }

        let substring = self.matching_rows(|title| title.contains(&key));
        if let Some(row) = self.single_match(query, substring)? {
            debug!(query, row, "Resolved title by substring");
            return Ok(row);
        }

        Err(AppError::NotFound(query.trim().to_string()))
    }

    /// Prefix matches first, then the remaining substring matches, each in row order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<RowIndex> {
        let key = normalize_title(query);
        if key.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut rows = self.matching_rows(|title| title.starts_with(&key));
        rows.truncate(limit);
        if rows.len() < limit {
            let extra = self
                .matching_rows(|title| !title.starts_with(&key) && title.contains(&key))
                .into_iter()
                .take(limit - rows.len());
            rows.extend(extra);
        }
        rows
    }

    pub fn label(&self, row: RowIndex) -> Option<&str> {
        self.labels.get(row).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn matching_rows<F>(&self, predicate: F) -> Vec<RowIndex>
    where
        F: Fn(&str) -> bool,
    {
        self.canonical
            .iter()
            .copied()
            .filter(|&row| predicate(&self.normalized[row]))
            .collect()
    }

    fn single_match(&self, query: &str, rows: Vec<RowIndex>) -> Result<Option<RowIndex>> {
        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(rows[0])),
            _ => Err(AppError::Ambiguous {
                query: query.trim().to_string(),
                candidates: rows
                    .into_iter()
                    .take(MAX_AMBIGUOUS_CANDIDATES)
                    .map(|row| self.labels[row].clone())
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TitleIndex {
        TitleIndex::build(
            [
                "1984",
                "Animal Farm",
                "Brave New World",
                "Harry Potter and the Chamber of Secrets (Book 2)",
                "Harry Potter and the Sorcerer's Stone (Book 1)",
                "The Hobbit",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  The   HOBBIT \t"), "the hobbit");
        assert_eq!(normalize_title("   "), "");
    }

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let idx = index();
        assert_eq!(idx.resolve("Animal Farm").unwrap(), 1);
        assert_eq!(idx.resolve("  animal   FARM ").unwrap(), 1);
    }

    #[test]
    fn test_resolution_is_stable() {
        let idx = index();
        for (row, label) in idx.labels().iter().enumerate() {
            for _ in 0..3 {
                assert_eq!(idx.resolve(label).unwrap(), row);
            }
        }
    }

    #[test]
    fn test_unique_prefix_resolves() {
        let idx = index();
        assert_eq!(idx.resolve("brave").unwrap(), 2);
        // prefix matches win over substring matches
        assert_eq!(idx.resolve("the").unwrap(), 5);
    }

    #[test]
    fn test_unique_substring_resolves() {
        let idx = index();
        assert_eq!(idx.resolve("hobb").unwrap(), 5);
        assert_eq!(idx.resolve("sorcerer").unwrap(), 4);
    }

    #[test]
    fn test_ambiguous_prefix_lists_candidates() {
        let idx = index();
        match idx.resolve("harry potter") {
            Err(AppError::Ambiguous { query, candidates }) => {
                assert_eq!(query, "harry potter");
                assert_eq!(
                    candidates,
                    vec![
                        "Harry Potter and the Chamber of Secrets (Book 2)".to_string(),
                        "Harry Potter and the Sorcerer's Stone (Book 1)".to_string(),
                    ]
                );
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_and_blank_queries() {
        let idx = index();
        assert!(matches!(idx.resolve("Zebra Crossing"), Err(AppError::NotFound(_))));
        assert!(matches!(idx.resolve("   "), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_duplicate_labels_are_rejected() {
        let err = TitleIndex::build(vec!["1984".into(), "Emma".into(), "1984".into()]).unwrap_err();
        assert!(matches!(
            err,
            AppError::DataIntegrity {
                check: IntegrityCheck::DuplicateRowLabel,
                ..
            }
        ));
    }

    #[test]
    fn test_normalized_collision_resolves_to_first_row() {
        let idx = TitleIndex::build(vec!["Dune".into(), "Emma".into(), "DUNE".into()]).unwrap();
        assert_eq!(idx.resolve("dune").unwrap(), 0);
        assert_eq!(idx.resolve("DUNE").unwrap(), 0);
        // collisions do not make fallback matching ambiguous
        assert_eq!(idx.resolve("dun").unwrap(), 0);
    }

    #[test]
    fn test_search_orders_prefix_before_substring() {
        let idx = index();
        assert_eq!(idx.search("the", 10), vec![5, 3, 4]);
        assert_eq!(idx.search("the", 2), vec![5, 3]);
        assert_eq!(idx.search("harry", 10), vec![3, 4]);
        assert!(idx.search("", 10).is_empty());
        assert!(idx.search("zzz", 10).is_empty());
    }
}
