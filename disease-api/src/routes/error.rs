use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::DiseaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    UnknownFunction,
    NotFound,
    StorageError,
}

#[derive(Serialize)]
#[serde(tag = "status", rename = "error", rename_all = "camelCase")]
struct ErrorBody {
    error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_message: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DiseaseError> for ApiError {
    fn from(err: DiseaseError) -> Self {
        match err {
            DiseaseError::Validation(_) | DiseaseError::QueryCannotMutate(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::ValidationError)
            }
            DiseaseError::UnknownFunction(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::UnknownFunction)
            }
            DiseaseError::NotFound(_) => {
                Self::not_found(err.to_string()).with_code(ErrorCode::NotFound)
            }
            DiseaseError::Storage(ref message) => {
                tracing::error!("Storage error: {}", message);
                Self::internal(err.to_string()).with_code(ErrorCode::StorageError)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text()).with_code(ErrorCode::ValidationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DiseaseId;

    #[test]
    fn domain_errors_map_to_status_and_code() {
        let cases = [
            (
                DiseaseError::Validation("missing field `query`".into()),
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
            ),
            (
                DiseaseError::QueryCannotMutate("addDisease".into()),
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
            ),
            (
                DiseaseError::UnknownFunction("nope".into()),
                StatusCode::BAD_REQUEST,
                ErrorCode::UnknownFunction,
            ),
            (
                DiseaseError::NotFound(DiseaseId::new(4)),
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
            ),
            (
                DiseaseError::storage("connection reset"),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StorageError,
            ),
        ];

        for (err, status, code) in cases {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.code, Some(code));
        }
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody {
            error_message: "disease not found: 4".to_string(),
            code: Some(ErrorCode::NotFound),
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({
                "status": "error",
                "errorMessage": "disease not found: 4",
                "code": "NOT_FOUND"
            })
        );
    }
}
