//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::views::ErrorView;

/// Errors that propagate to the boundary.
///
/// Rejected form input and blocked deletes are not errors: the mutation
/// service returns them as renderable outcomes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Presentable form of the error; internal details stay in the logs
    pub fn view(&self) -> ErrorView {
        let message = match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => {
                "Something went wrong while loading the catalog. Please try again later."
                    .to_string()
            }
        };
        let status = self.status();
        ErrorView {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            status: status.as_u16(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
        }

        (self.status(), Json(self.view())).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_details_not_rendered() {
        let err = AppError::Internal("connection reset by peer".to_string());
        let view = err.view();
        assert_eq!(view.status, 500);
        assert!(!view.message.contains("connection reset"));
    }

    #[test]
    fn test_not_found_view() {
        let view = AppError::NotFound("Author not found".to_string()).view();
        assert_eq!(view.status, 404);
        assert_eq!(view.title, "Not Found");
        assert_eq!(view.message, "Author not found");
    }
}
