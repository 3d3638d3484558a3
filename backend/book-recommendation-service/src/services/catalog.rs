use crate::error::{AppError, IntegrityCheck, Result};
use crate::models::Book;
use std::collections::HashMap;
use tracing::{info, warn};

/// Canonical book metadata keyed by exact title.
///
/// The raw catalog repeats titles (one row per edition); the first row
/// for a title is kept and later rows are dropped.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_books(records: Vec<Book>) -> Result<Self> {
        let total = records.len();
        let mut books = Vec::with_capacity(total);
        let mut by_title = HashMap::with_capacity(total);

        for (position, book) in records.into_iter().enumerate() {
            if book.title.trim().is_empty() {
                return Err(AppError::integrity(
                    IntegrityCheck::EmptyTitle,
                    format!("catalog entry {} has a blank title", position),
                ));
            }

            if by_title.contains_key(&book.title) {
                continue;
            }
            by_title.insert(book.title.clone(), books.len());
            books.push(book);
        }

        let dropped = total - books.len();
        if dropped > 0 {
            warn!(
                dropped,
                kept = books.len(),
                "Catalog contained duplicate titles, kept first occurrence"
            );
        }
        info!(books = books.len(), "Catalog loaded");

        Ok(Self { books, by_title })
    }

    pub fn get(&self, title: &str) -> Option<&Book> {
        self.by_title.get(title).map(|&idx| &self.books[idx])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
