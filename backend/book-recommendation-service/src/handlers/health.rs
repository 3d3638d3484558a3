use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use super::BookHandlerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub recommender_available: bool,
}

/// GET /health
#[get("/health")]
pub async fn health_check(state: web::Data<BookHandlerState>) -> HttpResponse {
    if state.engine.healthy() {
        HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            recommender_available: true,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "unhealthy",
            recommender_available: false,
        })
    }
}
