mod docs;

/// Health check route
pub mod health;
/// Todo CRUD routes
pub mod todos;

use aide::axum::{
    routing::{get, patch},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/api/health", get(health::handler))
        .api_route(
            "/api/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .api_route(
            "/api/todos/{id}",
            patch(todos::update_todo).delete(todos::delete_todo),
        )
}
