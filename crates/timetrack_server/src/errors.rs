use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::{error, warn};
use serde::Serialize;
use std::fmt::Display;
use timetrack_core::ServiceError;

/// HTTP-facing error: a status plus the `{message, error?}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 with `message = "Error <action>"` and the cause in `error`.
    pub fn internal(action: &str, detail: impl Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Error {action}"),
            detail: Some(detail.to_string()),
        }
    }

    pub fn from_service(err: ServiceError, action: &str) -> Self {
        match err {
            ServiceError::Validation(_) | ServiceError::MissingReference { .. } => {
                Self::bad_request(err.to_string())
            }
            ServiceError::NotFound { .. } => Self::not_found(err.to_string()),
            ServiceError::Repo(inner) => Self::internal(action, inner),
        }
    }

    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }

    pub fn from_path_rejection(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            error!(
                "event=http_error module=server status={} message={} error={}",
                self.status.as_u16(),
                self.message,
                self.detail.as_deref().unwrap_or("-")
            );
        } else {
            warn!(
                "event=http_reject module=server status={} message={}",
                self.status.as_u16(),
                self.message
            );
        }

        let body = ErrorEnvelope {
            message: self.message,
            error: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use timetrack_core::{RepoError, ServiceError, ValidationError};

    #[test]
    fn service_errors_map_to_statuses() {
        let not_found = ApiError::from_service(
            ServiceError::NotFound {
                entity: "User",
                id: 4,
            },
            "retrieving user",
        );
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "User with ID 4 not found");

        let missing = ApiError::from_service(
            ServiceError::MissingReference {
                entity: "Project",
                id: 9,
            },
            "creating task",
        );
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let invalid = ApiError::from_service(
            ServiceError::Validation(ValidationError::EndNotAfterStart),
            "creating time entry",
        );
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert!(invalid.detail.is_none());

        let failed = ApiError::from_service(
            ServiceError::Repo(RepoError::InvalidData("bad row".to_string())),
            "retrieving users",
        );
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.message, "Error retrieving users");
        assert!(failed.detail.unwrap().contains("bad row"));
    }
}
