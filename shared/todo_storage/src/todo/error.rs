//! Error types for todo storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, put_item::PutItemError, scan::ScanError,
    update_item::UpdateItemError,
};
use thiserror::Error;

/// Result type alias for todo storage operations
pub type TodoStorageResult<T> = Result<T, TodoStorageError>;

/// Errors that can occur during todo storage operations
#[derive(Debug, Error)]
pub enum TodoStorageError {
    /// Failed to insert todo into `DynamoDB`
    #[error("Failed to insert todo into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to scan todos from `DynamoDB`
    #[error("Failed to scan todos from DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to update todo in `DynamoDB`
    #[error("Failed to update todo in DynamoDB: {0:?}")]
    DynamoDbUpdateError(#[from] SdkError<UpdateItemError>),

    /// Failed to delete todo from `DynamoDB`
    #[error("Failed to delete todo from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// Update was called with no fields to change
    ///
    /// Signaled before any backend call is made so the caller can report a
    /// client-side error instead of a server failure.
    #[error("No updates provided")]
    EmptyUpdate,

    /// Update targeted an id that does not exist
    #[error("Todo not found")]
    TodoNotFound,

    /// Failed to parse todo from `DynamoDB` item
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for TodoStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
