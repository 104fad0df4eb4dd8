use libris_http::error::AppError;
use serde_json::json;
use thiserror::Error;

use super::models::BookId;

/// Failures reported by the book store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid book: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    #[error("no book found with id {0}")]
    NotFound(BookId),

    #[error("no free book id left below {upper_bound}")]
    IdSpaceExhausted { upper_bound: BookId },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::InvalidInput { field, reason } => AppError::bad_request(message)
                .with_code("invalid_input")
                .with_detail(json!({ "field": field, "error": reason })),
            StoreError::NotFound(_) => AppError::not_found(message),
            StoreError::IdSpaceExhausted { .. } => {
                AppError::conflict(message).with_code("id_space_exhausted")
            }
        }
    }
}
