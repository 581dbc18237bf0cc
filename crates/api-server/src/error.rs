use analysis_core::AnalysisError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Handler error mapped onto an HTTP status with a `{"detail": ..}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// Request body that could not be read as the expected JSON; keeps the
    /// rejection's own status (400, 415 or 422).
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    /// 500, carrying the underlying error message unchanged.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// `Json` extractor whose rejections render as `{"detail": ..}` like every
/// other error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self);
        }

        (status, axum::Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_analysis_error_keeps_message() {
        let err: AppError = AnalysisError::UnknownMetric("foo".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.to_string(), "Unknown metric: 'foo'");
    }

    #[test]
    fn test_anyhow_error_keeps_context() {
        let err: AppError = anyhow::anyhow!("boom").context("forecast failed").into();
        assert_eq!(err.to_string(), "forecast failed: boom");
    }

    #[test]
    fn test_invalid_body_keeps_rejection_status() {
        let err = AppError::InvalidBody {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `years`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `years`");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("No data found for year 2030".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
