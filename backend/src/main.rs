use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;

use backend::{server, types::Environment};
use todo_storage::{bootstrap, todo::TodoStorage};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    // A missing table name is a fatal configuration error, caught here
    // before any network call
    let table_name = environment.table_name()?;

    let aws_config = environment.aws_config().await;
    let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));

    // Deployed environments provision the table through infrastructure;
    // locally it must exist before the listener binds
    if matches!(environment, Environment::Development) {
        bootstrap::ensure_table(&dynamodb_client, &table_name).await?;
    }

    let todo_storage = Arc::new(TodoStorage::new(dynamodb_client, table_name));

    server::start(environment, todo_storage).await
}
