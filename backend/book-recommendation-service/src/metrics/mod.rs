//! Book Recommendation Metrics
//!
//! Prometheus metrics for engine queries

use crate::error::{AppError, Result};
use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};
use std::time::Duration;

static QUERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "book_recommendation_queries_total",
        "Engine queries by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("Failed to register book recommendation queries metric")
});

static QUERY_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "book_recommendation_query_duration_seconds",
        "Duration of engine queries",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
    )
    .expect("Failed to register book recommendation duration metric")
});

static RETAINED_BOOKS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "book_recommendation_retained_books",
        "Books present in the loaded similarity matrix"
    )
    .expect("Failed to register retained books metric")
});

fn outcome_label<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(AppError::Ambiguous { .. }) => "ambiguous",
        Err(AppError::InvalidArgument(_)) => "invalid",
        Err(err) => err.kind(),
    }
}

/// Record the outcome and duration of a query
pub fn record_query<T>(operation: &str, result: &Result<T>, duration: Duration) {
    let outcome = outcome_label(result);
    QUERIES_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    QUERY_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

pub fn set_retained_books(count: usize) {
    RETAINED_BOOKS.set(count as i64);
}

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}
