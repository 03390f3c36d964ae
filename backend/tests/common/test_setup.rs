use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Extension, Router};
use backend::{routes, types::Environment};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use todo_storage::{bootstrap::ensure_table, todo::TodoStorage};
use tower::ServiceExt;
use uuid::Uuid;

/// Setup test environment
pub fn setup_test_env() {
    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Base test setup with a router wired to a unique todos table
pub struct TestContext {
    pub router: Router,
    pub todo_storage: Arc<TodoStorage>,
    table_name: String,
    dynamodb_client: Arc<DynamoDbClient>,
}

impl TestContext {
    pub async fn new() -> Self {
        setup_test_env();

        let environment = Environment::Development;

        let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));

        // Bootstrap a unique table per test, the same way local startup does
        let table_name = format!("test-todos-{}", Uuid::new_v4());
        ensure_table(&dynamodb_client, &table_name)
            .await
            .expect("Failed to bootstrap test table");

        let todo_storage = Arc::new(TodoStorage::new(
            dynamodb_client.clone(),
            table_name.clone(),
        ));

        let router = routes::handler()
            .layer(Extension(environment))
            .layer(Extension(todo_storage.clone()))
            .into();

        Self {
            router,
            todo_storage,
            table_name,
            dynamodb_client,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_patch_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("PATCH")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_delete_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn parse_response_body(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        use http_body_util::BodyExt;

        let body = response.into_body().collect().await?.to_bytes();
        let json = serde_json::from_slice(&body)?;
        Ok(json)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Clean up the table
        let client = self.dynamodb_client.clone();
        let table = self.table_name.clone();

        let handle = tokio::runtime::Handle::try_current();
        if let Ok(handle) = handle {
            handle.spawn(async move {
                let _ = client.delete_table().table_name(&table).send().await;
            });
        }
    }
}
