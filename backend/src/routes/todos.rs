use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use todo_storage::todo::{Todo, TodoPatch, TodoStorage};
use tracing::instrument;
use validator::Validate;

use crate::types::{AppError, ValidatedJson};

/// Request to create a new todo
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    /// Todo text; must not be empty or whitespace-only
    #[validate(custom(function = "validate_text"))]
    pub text: String,
}

/// Request to partially update a todo
///
/// Absent fields are left untouched; an entirely empty request is rejected
/// with a client error before the storage layer is reached with work to do.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    /// New todo text
    #[validate(custom(function = "validate_text"))]
    pub text: Option<String>,
    /// New completion flag
    pub completed: Option<bool>,
}

// Custom validator rejecting whitespace-only text; the storage layer trusts
// its callers and never re-validates
fn validate_text(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        let mut error = validator::ValidationError::new("empty_text");
        error.message = Some(std::borrow::Cow::Borrowed("text is required"));
        return Err(error);
    }
    Ok(())
}

/// Lists all todos ordered by creation time
#[instrument(skip(todo_storage))]
pub async fn list_todos(
    Extension(todo_storage): Extension<Arc<TodoStorage>>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = todo_storage.list().await?;

    Ok(Json(todos))
}

/// Creates a new todo from the supplied text
#[instrument(skip(todo_storage, payload))]
pub async fn create_todo(
    Extension(todo_storage): Extension<Arc<TodoStorage>>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = todo_storage.create(payload.text.trim().to_string()).await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Applies a partial update to a todo and returns its new state
#[instrument(skip(todo_storage, payload))]
pub async fn update_todo(
    Extension(todo_storage): Extension<Arc<TodoStorage>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let patch = TodoPatch {
        text: payload.text.map(|text| text.trim().to_string()),
        completed: payload.completed,
    };

    let todo = todo_storage.update(&id, patch).await?;

    Ok(Json(todo))
}

/// Deletes a todo by id
///
/// Returns 204 regardless of whether the id existed.
#[instrument(skip(todo_storage))]
pub async fn delete_todo(
    Extension(todo_storage): Extension<Arc<TodoStorage>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    todo_storage.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
