//! HTTP error responses.
//!
//! Every failure leaves the server as `{"message": ..., "code": ...}` with a
//! status derived from `code`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use voyager_core::errors::CoreError;
use voyager_db::error::DatabaseError;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Serialize, Deserialize)]
pub struct HttpError {
    pub message: String,
    pub code: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            NOT_FOUND => StatusCode::NOT_FOUND,
            VALIDATION_ERROR | INVALID_INPUT => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<DatabaseError> for HttpError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(_) => Self::new(error.to_string(), NOT_FOUND),
            DatabaseError::Core(core) => Self::from(core),
            other => {
                tracing::error!(error = %other, "database operation failed");
                Self::new(other.to_string(), DATABASE_ERROR)
            }
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(inner) => Self::new(inner.to_string(), VALIDATION_ERROR),
            other if other.is_client_error() => Self::new(other.to_string(), INVALID_INPUT),
            other => {
                tracing::error!(error = %other, "unexpected domain error");
                Self::new(other.to_string(), INTERNAL_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.body_text(), INVALID_INPUT)
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.body_text(), INVALID_INPUT)
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.body_text(), INVALID_INPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voyager_core::errors::ValidationError;

    #[test]
    fn not_found_maps_to_404() {
        let error = HttpError::from(DatabaseError::NotFound(3));
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.message, "exoplanet not found: 3");
    }

    #[test]
    fn client_errors_map_to_400() {
        for error in [
            DatabaseError::from(ValidationError::MissingMass),
            DatabaseError::Core(CoreError::InvalidInput("crew capacity must be positive".into())),
            DatabaseError::Core(CoreError::UnknownType("IceGiant".into())),
        ] {
            assert_eq!(HttpError::from(error).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn persistence_errors_map_to_500() {
        let error = HttpError::from(DatabaseError::Pool("connection pool is closed".into()));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code, DATABASE_ERROR);
    }

    #[test]
    fn validation_message_is_preserved() {
        let error = HttpError::from(DatabaseError::from(ValidationError::InvalidData));
        assert_eq!(error.message, "invalid exoplanet data");
        assert_eq!(error.code, VALIDATION_ERROR);
    }
}
