//! Table bootstrap for local development
//!
//! Ensures the todos table exists before the HTTP layer starts accepting
//! connections. Deployed environments provision the table through
//! infrastructure, so this runs only against DynamoDB Local.

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    create_table::CreateTableError, describe_table::DescribeTableError,
};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

use crate::todo::TodoAttribute;

/// Result type alias for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Errors that can occur while ensuring the todos table exists
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Describe failed for a reason other than the table being absent
    #[error("Failed to describe todos table: {0:?}")]
    DynamoDbDescribeError(#[from] SdkError<DescribeTableError>),

    /// Failed to create the todos table
    #[error("Failed to create todos table: {0:?}")]
    DynamoDbCreateError(#[from] SdkError<CreateTableError>),

    /// Failed to assemble the table schema
    #[error("Invalid table schema: {0}")]
    SchemaError(#[from] aws_sdk_dynamodb::error::BuildError),
}

/// Idempotently ensures the todos table exists
///
/// Describes the table first; only a `ResourceNotFoundException` triggers a
/// create, with the fixed schema (partition key `id`, string) and on-demand
/// billing. Any other describe failure is propagated instead of being
/// masked by a create attempt. Must run to completion before the listener
/// binds its port.
///
/// # Errors
///
/// Returns `BootstrapError` if the describe fails for a reason other than
/// absence, or if the create itself fails
pub async fn ensure_table(client: &DynamoDbClient, table_name: &str) -> BootstrapResult<()> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!(table_name, "todos table already exists");
            return Ok(());
        }
        Err(err) => {
            let absent = matches!(
                err,
                SdkError::ServiceError(ref svc) if svc.err().is_resource_not_found_exception()
            );
            if !absent {
                return Err(err.into());
            }
        }
    }

    tracing::info!(table_name, "creating todos table");

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(TodoAttribute::Id.to_string())
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(TodoAttribute::Id.to_string())
                .key_type(KeyType::Hash)
                .build()?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await?;

    Ok(())
}
