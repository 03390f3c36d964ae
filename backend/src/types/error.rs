//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use todo_storage::todo::TodoStorageError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, code: &'static str, msg: &'static str) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                error: ErrorBody { code, message: msg },
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert todo storage errors to application errors
impl From<TodoStorageError> for AppError {
    fn from(err: TodoStorageError) -> Self {
        use TodoStorageError::{
            DynamoDbDeleteError, DynamoDbPutError, DynamoDbScanError, DynamoDbUpdateError,
            EmptyUpdate, SerializationError, TodoNotFound,
        };

        match &err {
            EmptyUpdate => Self::new(StatusCode::BAD_REQUEST, "no_updates", "No updates provided"),
            TodoNotFound => Self::new(StatusCode::NOT_FOUND, "not_found", "Todo not found"),
            DynamoDbPutError(_) | DynamoDbScanError(_) | DynamoDbUpdateError(_)
            | DynamoDbDeleteError(_) | SerializationError(_) => {
                tracing::error!("Todo storage error: {err}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
