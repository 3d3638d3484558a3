pub mod books;
pub mod health;

use actix_web::web;

pub use books::{
    autocomplete_titles, get_available_titles, get_engine_stats, get_popular_books,
    get_recommendations, search_books, BookHandlerState, PopularBookItem, RecommendationItem,
};
pub use health::{health_check, HealthResponse};

/// Registers every HTTP route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_popular_books)
        .service(get_recommendations)
        .service(search_books)
        .service(autocomplete_titles)
        .service(get_available_titles)
        .service(get_engine_stats)
        .route("/metrics", web::get().to(crate::metrics::metrics_handler));
}
