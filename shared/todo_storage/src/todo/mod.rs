//! Todo storage integration using Dynamo DB
//!
//! Holds the todo items served by the REST API. The table is a flat
//! key-value layout with `id` as the only key attribute.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{error::SdkError, types::AttributeValue, Client as DynamoDbClient};
use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::{TodoStorageError, TodoStorageResult};
use strum::Display;

/// Attribute names for the todos table
///
/// The wire names are fixed for compatibility with existing tables, so the
/// enum serializes as camelCase.
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "camelCase")]
pub enum TodoAttribute {
    /// Todo ID (Primary Key)
    Id,
    /// Todo text
    ///
    /// `text` is a DynamoDB reserved word and must be aliased through
    /// `ExpressionAttributeNames` in update expressions.
    Text,
    /// Completion flag
    Completed,
    /// Creation timestamp (RFC 3339 UTC, millisecond precision)
    CreatedAt,
    /// Last-update timestamp, same format as `CreatedAt`
    UpdatedAt,
}

/// Todo data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Todo ID (Primary Key)
    pub id: String,
    /// Todo text
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last-update timestamp
    pub updated_at: String,
}

/// Partial update to a todo
///
/// Only the fields that are `Some` end up in the update expression.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    /// New text, if supplied
    pub text: Option<String>,
    /// New completion flag, if supplied
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Returns true when the patch carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

/// Current time as an RFC 3339 UTC string with millisecond precision.
///
/// The fixed width keeps lexicographic order identical to chronological
/// order, which the list operation relies on.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Todo storage client for Dynamo DB operations
pub struct TodoStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl TodoStorage {
    /// Creates a new todo storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for todos
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Lists all todos, ordered by creation time ascending
    ///
    /// Issues a single full-table scan. Multi-page scans are not followed;
    /// the table is expected to stay far below the 1 MB scan limit.
    ///
    /// # Errors
    ///
    /// Returns `TodoStorageError` if the Dynamo DB operation fails
    pub async fn list(&self) -> TodoStorageResult<Vec<Todo>> {
        let response = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await?;

        let mut todos: Vec<Todo> = response
            .items()
            .iter()
            .map(|item| serde_dynamo::from_item(item.clone()).map_err(TodoStorageError::from))
            .collect::<TodoStorageResult<_>>()?;

        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(todos)
    }

    /// Creates a new todo with the given text
    ///
    /// Assigns a fresh UUID, sets `completed` to false and stamps both
    /// timestamps with the same instant. The caller is responsible for
    /// rejecting empty or whitespace-only text.
    ///
    /// # Errors
    ///
    /// Returns `TodoStorageError` if the Dynamo DB operation fails
    pub async fn create(&self, text: String) -> TodoStorageResult<Todo> {
        let now = now_timestamp();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            created_at: now.clone(),
            updated_at: now,
        };

        let item = serde_dynamo::to_item(&todo)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(todo)
    }

    /// Applies a partial update to a todo and returns its new state
    ///
    /// Builds the update expression from only the fields present in the
    /// patch, always refreshing `updatedAt`. The update is guarded with
    /// `attribute_exists` so a missing id fails instead of upserting a
    /// partial item.
    ///
    /// # Errors
    ///
    /// * `TodoStorageError::EmptyUpdate` if the patch carries no fields;
    ///   no backend call is made in that case
    /// * `TodoStorageError::TodoNotFound` if the id does not exist
    /// * `TodoStorageError` if the Dynamo DB operation fails
    pub async fn update(&self, id: &str, patch: TodoPatch) -> TodoStorageResult<Todo> {
        if patch.is_empty() {
            return Err(TodoStorageError::EmptyUpdate);
        }

        let mut clauses: Vec<String> = Vec::new();
        let mut request = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::Id.to_string(),
                AttributeValue::S(id.to_string()),
            );

        if let Some(text) = patch.text {
            clauses.push("#text = :text".to_string());
            request = request
                .expression_attribute_names("#text", TodoAttribute::Text.to_string())
                .expression_attribute_values(":text", AttributeValue::S(text));
        }

        if let Some(completed) = patch.completed {
            clauses.push(format!("{} = :completed", TodoAttribute::Completed));
            request = request
                .expression_attribute_values(":completed", AttributeValue::Bool(completed));
        }

        clauses.push(format!("{} = :updatedAt", TodoAttribute::UpdatedAt));
        request = request
            .expression_attribute_values(":updatedAt", AttributeValue::S(now_timestamp()));

        let response = request
            .update_expression(format!("SET {}", clauses.join(", ")))
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", TodoAttribute::Id.to_string())
            .return_values(aws_sdk_dynamodb::types::ReturnValue::AllNew)
            .send()
            .await
            .map_err(|err| {
                if matches!(
                    err,
                    SdkError::ServiceError(ref svc) if svc.err().is_conditional_check_failed_exception()
                ) {
                    TodoStorageError::TodoNotFound
                } else {
                    err.into()
                }
            })?;

        let attributes = response.attributes().ok_or_else(|| {
            TodoStorageError::SerializationError("update returned no attributes".to_string())
        })?;

        Ok(serde_dynamo::from_item(attributes.clone())?)
    }

    /// Deletes a todo by id
    ///
    /// Unconditional: deleting an id that is already absent succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TodoStorageError` if the Dynamo DB operation fails
    pub async fn delete(&self, id: &str) -> TodoStorageResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::Id.to_string(),
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_names_match_wire_contract() {
        assert_eq!(TodoAttribute::Id.to_string(), "id");
        assert_eq!(TodoAttribute::Text.to_string(), "text");
        assert_eq!(TodoAttribute::Completed.to_string(), "completed");
        assert_eq!(TodoAttribute::CreatedAt.to_string(), "createdAt");
        assert_eq!(TodoAttribute::UpdatedAt.to_string(), "updatedAt");
    }

    #[test]
    fn timestamps_are_fixed_width_and_sortable() {
        let earlier = now_timestamp();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let later = now_timestamp();

        // "2024-01-01T00:00:00.000Z" is 24 characters
        assert_eq!(earlier.len(), 24);
        assert_eq!(later.len(), 24);
        assert!(earlier.ends_with('Z'));
        assert!(earlier < later);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TodoPatch::default().is_empty());
        assert!(!TodoPatch {
            text: Some("x".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!TodoPatch {
            completed: Some(true),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn todo_serializes_with_camel_case_attributes() {
        let todo = Todo {
            id: "abc".to_string(),
            text: "Buy milk".to_string(),
            completed: false,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };

        let item: std::collections::HashMap<String, AttributeValue> =
            serde_dynamo::to_item(&todo).unwrap();
        assert!(item.contains_key("createdAt"));
        assert!(item.contains_key("updatedAt"));
        assert!(item.contains_key("completed"));
    }
}
