//! Response envelope shared by every endpoint.
//!
//! # Invariants
//! - Success: `status = "success"`, `is_exception = false`, HTTP 200.
//! - Failure: `status = "failed"`, `is_exception = true`, `error_message` and
//!   `kind` set. Registry failures use HTTP 500 whatever their kind; only the
//!   routing fallbacks answer 404 and 405.
//! - Database paths never reach `error_message`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use monument_core::db::DbError;
use monument_core::logging::sanitize_message;
use monument_core::{RepoError, SeedError, ServiceError};
use serde::Serialize;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

const MAX_PANIC_DETAIL_CHARS: usize = 160;
const DATABASE_UNAVAILABLE: &str = "database unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Coarse failure class carried next to the legacy fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
    pub is_exception: bool,
    pub error_message: Option<String>,
    pub kind: Option<ErrorKind>,
    #[serde(skip)]
    pub http_status: StatusCode,
}

impl<T> NetworkResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
            is_exception: false,
            error_message: None,
            kind: None,
            http_status: StatusCode::OK,
        }
    }

    pub fn failure(message: impl Into<String>, error: &ApiError) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message: message.into(),
            data: None,
            is_exception: true,
            error_message: Some(error.detail.clone()),
            kind: Some(error.kind),
            http_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn method_not_allowed(detail: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message: "METHOD NOT ALLOWED".to_string(),
            data: None,
            is_exception: true,
            error_message: Some(detail.into()),
            kind: Some(ErrorKind::Validation),
            http_status: StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn endpoint_not_found(detail: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            message: "ENDPOINT NOT FOUND".to_string(),
            data: None,
            is_exception: true,
            error_message: Some(detail.into()),
            kind: Some(ErrorKind::NotFound),
            http_status: StatusCode::NOT_FOUND,
        }
    }
}

impl<T: Serialize> IntoResponse for NetworkResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

/// Failure of a single request, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl ApiError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            detail: detail.into(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        let kind = match &value {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Repo(_) | ServiceError::InconsistentState(_) => ErrorKind::Internal,
        };
        Self {
            kind,
            detail: value.to_string(),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::from(ServiceError::from(value))
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Open { path, source } => {
                error!(
                    "event=db_open module=api status=error path={} error={}",
                    path.display(),
                    source
                );
                Self::internal(DATABASE_UNAVAILABLE)
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<SeedError> for ApiError {
    fn from(value: SeedError) -> Self {
        match value {
            SeedError::Service(err) => Self::from(err),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        if value.is_panic() {
            let payload = value.into_panic();
            Self::internal(format!("worker panicked: {}", panic_detail(payload.as_ref())))
        } else {
            Self::internal("worker cancelled")
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::validation(value.body_text())
    }
}

/// Single-line text of a panic payload.
pub(crate) fn panic_detail(payload: &(dyn Any + Send)) -> String {
    let text = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    sanitize_message(&text, MAX_PANIC_DETAIL_CHARS)
}

#[cfg(test)]
mod tests {
    use super::{ApiError, ErrorKind, NetworkResponse};
    use axum::http::StatusCode;
    use monument_core::db::DbError;
    use monument_core::{RepoError, ServiceError};
    use std::path::PathBuf;

    #[test]
    fn success_envelope_has_legacy_shape() {
        let value = serde_json::to_value(NetworkResponse::success("Hello World", 3)).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "Hello World");
        assert_eq!(value["data"], 3);
        assert_eq!(value["is_exception"], false);
        assert!(value["error_message"].is_null());
        assert!(value["kind"].is_null());
        assert!(value.get("http_status").is_none());
    }

    #[test]
    fn failures_are_server_errors_with_kind() {
        let error = ApiError::from(ServiceError::NotFound(4));
        let response = NetworkResponse::<()>::failure("Failed to update monument", &error);
        assert_eq!(response.http_status, StatusCode::INTERNAL_SERVER_ERROR);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["is_exception"], true);
        assert_eq!(value["kind"], "not_found");
        assert_eq!(value["error_message"], "monument not found: 4");
        assert!(value["data"].is_null());
    }

    #[test]
    fn repo_errors_map_to_service_kinds() {
        assert_eq!(
            ApiError::from(RepoError::NotFound(2)).kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            ApiError::from(RepoError::InvalidData("bad flag".to_string())).kind,
            ErrorKind::Internal
        );
        assert_eq!(
            ApiError::from(ServiceError::InconsistentState("missing read-back")).kind,
            ErrorKind::Internal
        );
    }

    #[test]
    fn unknown_route_answers_not_found() {
        let response = NetworkResponse::<()>::endpoint_not_found("/nope");
        assert_eq!(response.http_status, StatusCode::NOT_FOUND);
        assert_eq!(response.message, "ENDPOINT NOT FOUND");
    }

    #[test]
    fn open_failure_hides_database_path() {
        let error = ApiError::from(DbError::Open {
            path: PathBuf::from("/srv/private/registry.sqlite3"),
            source: rusqlite::Error::InvalidQuery,
        });
        assert_eq!(error.kind, ErrorKind::Internal);
        assert_eq!(error.detail, "database unavailable");
        assert!(!error.detail.contains("/srv/private"));
    }

    #[test]
    fn schema_version_failure_keeps_its_text() {
        let error = ApiError::from(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 2,
        });
        assert_eq!(error.kind, ErrorKind::Internal);
        assert!(error.detail.contains("schema version 9"));
    }

    #[test]
    fn wrong_method_answers_method_not_allowed() {
        let response = NetworkResponse::<()>::method_not_allowed("DELETE /reports");
        assert_eq!(response.http_status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.message, "METHOD NOT ALLOWED");
        assert_eq!(response.kind, Some(ErrorKind::Validation));
        assert!(response.is_exception);
    }
}
