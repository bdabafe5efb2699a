use crate::i18n::BundleError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Bundle(e) => {
                error!("Message bundle for {} unavailable: {}", e.locale(), e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Bundle details stay in the log
        let message = match &self {
            AppError::Bundle(_) => "internal error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("/fr-FR".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("name".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Bundle(BundleError::Missing {
                locale: "ar-AE".to_string()
            })
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
