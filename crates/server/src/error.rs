//! Unified error handling for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use shopwise_store::{ConstraintKind, StoreError};

/// Application-level error type for API handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::ConstraintViolation { rule, .. }) => match rule.kind() {
                ConstraintKind::Unique | ConstraintKind::ForeignKey => StatusCode::CONFLICT,
                ConstraintKind::NotNull | ConstraintKind::Check => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            Self::Store(StoreError::Dataset(_)) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, status = status.as_u16(), "API request rejected");

        let error = self.to_string();
        let rule = match &self {
            Self::Store(err) => err.rule().map(|rule| rule.name()),
            Self::BadRequest(_) => None,
        };

        (status, Json(ErrorBody { error, rule })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use shopwise_store::{Constraint, EntityKind};

    use super::*;

    fn violation(rule: Constraint) -> AppError {
        AppError::Store(StoreError::ConstraintViolation {
            rule,
            detail: "test".to_string(),
        })
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("unknown table: carts".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown table: carts");

        let err = AppError::Store(StoreError::NotFound {
            kind: EntityKind::Users,
            id: 7,
        });
        assert_eq!(err.to_string(), "users row 7 not found");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Store(StoreError::NotFound {
                kind: EntityKind::Orders,
                id: 1
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(violation(Constraint::UsersEmailKey)), StatusCode::CONFLICT);
        assert_eq!(get_status(violation(Constraint::OrdersUserIdFkey)), StatusCode::CONFLICT);
        assert_eq!(
            get_status(violation(Constraint::ProductsPriceCheck)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(violation(Constraint::UsersNameNotNull)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
