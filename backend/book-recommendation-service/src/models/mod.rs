use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a book within the interaction and similarity matrices.
pub type RowIndex = usize;

/// Catalog entry. Titles are the lookup key.
///
/// JSON aliases accept the column names produced by the offline notebook
/// (`Book-Title`, `Book-Author`, `Image-URL-M`, `num_ratings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(alias = "Book-Title")]
    pub title: String,
    #[serde(alias = "Book-Author")]
    pub author: String,
    #[serde(alias = "Image-URL-M", alias = "cover")]
    pub image_url: String,
    #[serde(default, alias = "num_ratings")]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

/// One row of the popularity artifact, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularRecord {
    #[serde(alias = "Book-Title")]
    pub title: String,
    #[serde(alias = "Book-Author")]
    pub author: String,
    #[serde(alias = "Image-URL-M", alias = "cover")]
    pub image_url: String,
    #[serde(alias = "votes")]
    pub num_ratings: u64,
    #[serde(alias = "rating")]
    pub avg_rating: f64,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularBook {
    pub book: Book,
    pub score: Option<f64>,
}

impl From<PopularRecord> for PopularBook {
    fn from(record: PopularRecord) -> Self {
        Self {
            book: Book {
                title: record.title,
                author: record.author,
                image_url: record.image_url,
                rating_count: Some(record.num_ratings),
                avg_rating: Some(record.avg_rating),
            },
            score: record.score,
        }
    }
}

/// A similar book together with its similarity to the queried title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub row: RowIndex,
    pub book: Book,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub catalog_books: usize,
    pub retained_books: usize,
    pub users: usize,
    /// Non-zero cells of the rating pivot.
    pub ratings: usize,
    pub popular_books: usize,
    pub loaded_at: DateTime<Utc>,
}
