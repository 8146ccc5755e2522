use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface. Storage and Internal render an
/// opaque message; the real cause is logged server-side only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{1}")]
    Validation(&'static str, String),
    #[error("Invalid id format")]
    InvalidId,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Access denied")]
    Forbidden,
    #[error("A user with this email already exists")]
    UserExists,
    #[error("OAuth login is not configured")]
    OAuthDisabled,
    #[error("An error occurred")]
    Storage(#[from] sqlx::Error),
    #[error("An error occurred")]
    Internal(#[source] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(..) | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::OAuthDisabled => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserExists => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(e) => error!(error = %e, "storage failure"),
            AppError::Internal(e) => error!(error = %e, "unexpected failure"),
            _ => {}
        }
        let body = json!({ "success": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// True when the database rejected an insert on a unique index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            AppError::Validation("name", "Name is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Meal").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::UserExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn opaque_errors_never_leak_internals() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.to_string(), "An error occurred");
        let err = AppError::Storage(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "An error occurred");
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(AppError::NotFound("Subscription").to_string(), "Subscription not found");
    }
}
