use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Load-time check that rejected a set of model artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityCheck {
    /// Similarity matrix is not R×R.
    NonSquare,
    /// `scores[i][j]` and `scores[j][i]` differ by more than the tolerance.
    Asymmetric,
    /// Similarity dimension differs from the interaction row count.
    DimensionMismatch,
    /// Similarity labels are not the interaction row labels in the same order.
    RowOrdering,
    DuplicateRowLabel,
    RaggedInteractionRow,
    NonFiniteScore,
    /// A retained row label has no catalog book.
    MissingCatalogEntry,
    EmptyTitle,
    PopularityOrder,
}

impl IntegrityCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrityCheck::NonSquare => "non_square",
            IntegrityCheck::Asymmetric => "asymmetric",
            IntegrityCheck::DimensionMismatch => "dimension_mismatch",
            IntegrityCheck::RowOrdering => "row_ordering",
            IntegrityCheck::DuplicateRowLabel => "duplicate_row_label",
            IntegrityCheck::RaggedInteractionRow => "ragged_interaction_row",
            IntegrityCheck::NonFiniteScore => "non_finite_score",
            IntegrityCheck::MissingCatalogEntry => "missing_catalog_entry",
            IntegrityCheck::EmptyTitle => "empty_title",
            IntegrityCheck::PopularityOrder => "popularity_order",
        }
    }
}

impl fmt::Display for IntegrityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data integrity error ({check}): {detail}")]
    DataIntegrity {
        check: IntegrityCheck,
        detail: String,
    },

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Ambiguous title '{query}' matches {} books", .candidates.len())]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn integrity(check: IntegrityCheck, detail: impl Into<String>) -> Self {
        AppError::DataIntegrity {
            check,
            detail: detail.into(),
        }
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DataIntegrity { .. } => "data_integrity",
            AppError::NotFound(_) => "not_found",
            AppError::Ambiguous { .. } => "ambiguous",
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::Io(_) => "io",
            AppError::Serialization(_) => "serialization",
            AppError::Configuration(_) => "configuration",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        let candidates = match self {
            AppError::Ambiguous { candidates, .. } => Some(candidates.clone()),
            _ => None,
        };

        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
            candidates,
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Ambiguous { .. } => StatusCode::CONFLICT,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for AppError {
    fn from(err: bincode::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
