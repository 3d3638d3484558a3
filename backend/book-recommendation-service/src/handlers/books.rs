/// Book API Handlers
///
/// HTTP endpoints over the loaded recommendation engine
use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{EngineStats, PopularBook, Recommendation};
use crate::services::EngineHandle;

/// Handler state for the book endpoints
pub struct BookHandlerState {
    pub engine: Arc<EngineHandle>,
}

/// Query parameters for GET /api/books/popular
#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<i64>,
}

/// Query parameters for GET /api/books/recommendations
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Title of a book the user liked
    #[serde(default)]
    pub book: String,
    /// Number of similar books (default: 5)
    pub limit: Option<i64>,
}

/// Query parameters for the search endpoints
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PopularBookItem {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub votes: Option<u64>,
    pub rating: Option<f64>,
}

impl From<&PopularBook> for PopularBookItem {
    fn from(popular: &PopularBook) -> Self {
        Self {
            title: popular.book.title.clone(),
            author: popular.book.author.clone(),
            image_url: popular.book.image_url.clone(),
            votes: popular.book.rating_count,
            rating: popular.book.avg_rating,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationItem {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub similarity_score: f64,
}

impl From<Recommendation> for RecommendationItem {
    fn from(rec: Recommendation) -> Self {
        Self {
            title: rec.book.title,
            author: rec.book.author,
            image_url: rec.book.image_url,
            similarity_score: rec.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularBooksResponse {
    pub books: Vec<PopularBookItem>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub book: String,
    pub recommendations: Vec<RecommendationItem>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub count: usize,
}

fn resolve_limit(limit: Option<i64>, default: usize) -> Result<usize> {
    match limit {
        None => Ok(default),
        Some(value) => usize::try_from(value).map_err(|_| {
            AppError::InvalidArgument(format!("limit must not be negative, got {}", value))
        }),
    }
}

/// Records metrics for a finished query and turns it into a JSON response.
fn respond<T: Serialize>(
    operation: &str,
    started: Instant,
    result: Result<T>,
) -> Result<HttpResponse> {
    metrics::record_query(operation, &result, started.elapsed());

    match result {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(err @ (AppError::NotFound(_)
        | AppError::Ambiguous { .. }
        | AppError::InvalidArgument(_))) => {
            info!(operation, kind = err.kind(), "Query rejected: {}", err);
            Err(err)
        }
        Err(err) => {
            error!(operation, "Query failed: {}", err);
            Err(err)
        }
    }
}

/// GET /api/books/popular
#[get("/api/books/popular")]
pub async fn get_popular_books(
    query: web::Query<PopularQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let started = Instant::now();
    let engine = &state.engine;

    let result = resolve_limit(query.limit, engine.config().default_popular_limit).map(|limit| {
        let books: Vec<PopularBookItem> = engine
            .top_popular(limit)
            .iter()
            .map(PopularBookItem::from)
            .collect();
        PopularBooksResponse {
            count: books.len(),
            books,
        }
    });

    respond("top_popular", started, result)
}

/// GET /api/books/recommendations?book=...&limit=...
#[get("/api/books/recommendations")]
pub async fn get_recommendations(
    query: web::Query<RecommendationQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let started = Instant::now();
    let engine = &state.engine;
    debug!(book = %query.book, limit = ?query.limit, "Recommendation request");

    let result = resolve_limit(query.limit, engine.config().default_recommendations)
        .and_then(|k| engine.recommend(&query.book, k))
        .map(|recs| {
            let recommendations: Vec<RecommendationItem> =
                recs.into_iter().map(RecommendationItem::from).collect();
            RecommendationsResponse {
                book: query.book.trim().to_string(),
                count: recommendations.len(),
                recommendations,
            }
        });

    respond("recommend", started, result)
}

/// GET /api/books/search?q=...&limit=...
/// Title or author search over the popular books
#[get("/api/books/search")]
pub async fn search_books(
    query: web::Query<SearchQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let started = Instant::now();
    let engine = &state.engine;

    let result = resolve_limit(query.limit, engine.config().default_search_limit)
        .and_then(|limit| engine.search_books(&query.q, limit))
        .map(|found| {
            let books: Vec<PopularBookItem> = found.iter().map(PopularBookItem::from).collect();
            PopularBooksResponse {
                count: books.len(),
                books,
            }
        });

    respond("search_books", started, result)
}

/// GET /api/books/autocomplete?q=...&limit=...
/// Title lookup over the recommendable books
#[get("/api/books/autocomplete")]
pub async fn autocomplete_titles(
    query: web::Query<SearchQuery>,
    state: web::Data<BookHandlerState>,
) -> Result<HttpResponse> {
    let started = Instant::now();
    let engine = &state.engine;

    let result = resolve_limit(query.limit, engine.config().default_search_limit)
        .and_then(|limit| engine.search(&query.q, limit))
        .map(|titles| TitlesResponse {
            count: titles.len(),
            titles,
        });

    respond("autocomplete", started, result)
}

/// GET /api/books/titles
#[get("/api/books/titles")]
pub async fn get_available_titles(state: web::Data<BookHandlerState>) -> HttpResponse {
    let titles = state.engine.available_titles().to_vec();
    HttpResponse::Ok().json(TitlesResponse {
        count: titles.len(),
        titles,
    })
}

/// GET /api/books/stats
#[get("/api/books/stats")]
pub async fn get_engine_stats(state: web::Data<BookHandlerState>) -> HttpResponse {
    let stats: EngineStats = state.engine.stats();
    HttpResponse::Ok().json(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 5).unwrap(), 5);
        assert_eq!(resolve_limit(Some(0), 5).unwrap(), 0);
        assert_eq!(resolve_limit(Some(12), 5).unwrap(), 12);
        assert!(matches!(
            resolve_limit(Some(-1), 5),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
