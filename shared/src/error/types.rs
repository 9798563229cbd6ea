//! `AppError` and the `ApiResponse` envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Failed front desk request: code, message and the ids involved
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Ids of the venue / table / visit / entry concerned
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Table claimed by another visit between decision and commit
    pub fn table_occupied(occupancy_key: impl Into<String>, holder_visit_id: impl Into<String>) -> Self {
        let key = occupancy_key.into();
        let holder = holder_visit_id.into();
        Self::with_message(
            ErrorCode::TableOccupied,
            format!("Table {} already held by visit {}", key, holder),
        )
        .with_detail("occupancy_key", key)
        .with_detail("visit_id", holder)
    }

    pub fn visit_not_found(visit_id: impl Into<String>) -> Self {
        Self::for_visit(ErrorCode::VisitNotFound, visit_id.into())
    }

    pub fn visit_already_finished(visit_id: impl Into<String>) -> Self {
        Self::for_visit(ErrorCode::VisitAlreadyFinished, visit_id.into())
    }

    pub fn waitlist_entry_not_found(entry_id: impl Into<String>) -> Self {
        Self::for_entry(ErrorCode::WaitlistEntryNotFound, entry_id.into())
    }

    pub fn waitlist_entry_seated(entry_id: impl Into<String>) -> Self {
        Self::for_entry(ErrorCode::WaitlistEntryAlreadySeated, entry_id.into())
    }

    fn for_visit(code: ErrorCode, visit_id: String) -> Self {
        Self::with_message(code, format!("{}: {}", code.message(), visit_id))
            .with_detail("visit_id", visit_id)
    }

    fn for_entry(code: ErrorCode, entry_id: String) -> Self {
        Self::with_message(code, format!("{}: {}", code.message(), entry_id))
            .with_detail("entry_id", entry_id)
    }
}

/// Response envelope
///
/// `{"code": 0, "message": "OK", "data": ...}` on success,
/// `{"code": 7002, "message": "...", "details": {...}}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: ErrorCode::Success.message().to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (self.http_status(), Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_table_occupied_carries_holder() {
        let err = AppError::table_occupied("central/0/3", "v-1");
        assert_eq!(err.code, ErrorCode::TableOccupied);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        let details = err.details.unwrap();
        assert_eq!(details.get("occupancy_key").unwrap(), "central/0/3");
        assert_eq!(details.get("visit_id").unwrap(), "v-1");
    }

    #[test]
    fn test_visit_and_entry_errors() {
        let err = AppError::visit_already_finished("v-9");
        assert_eq!(err.message, "Visit already finished: v-9");
        assert_eq!(err.details.unwrap().get("visit_id").unwrap(), "v-9");

        let err = AppError::waitlist_entry_not_found("w-1");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap().get("entry_id").unwrap(), "w-1");
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_string(&ApiResponse::success(vec![1, 2, 4])).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"OK","data":[1,2,4]}"#);
    }

    #[test]
    fn test_error_envelope_status() {
        let response = AppError::validation("client_name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = ApiResponse::<()>::error(&AppError::database("disk full"));
        assert_eq!(body.code, 9002);
        assert!(body.data.is_none());
    }
}
