//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use thiserror::Error;
use tracing::Level;

/// Default table name for local development
const LOCAL_TABLE_NAME: &str = "TodosLocal";

/// Default DynamoDB Local endpoint for local development
const LOCAL_DYNAMODB_ENDPOINT: &str = "http://localhost:8000";

/// Configuration errors detected at startup
///
/// Raised before any network call is attempted; a missing setting aborts
/// the process instead of failing per-request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The todos table name is not configured
    #[error("TODOS_TABLE_NAME environment variable is not set")]
    MissingTableName,
}

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses DynamoDB Local)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Resolves the todos table name
    ///
    /// Read once at startup and injected into the storage constructor, so
    /// individual requests never depend on process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingTableName` if `TODOS_TABLE_NAME` is
    /// unset or blank outside of development
    pub fn table_name(&self) -> Result<String, ConfigError> {
        let configured = env::var("TODOS_TABLE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty());

        match self {
            Self::Production | Self::Staging => configured.ok_or(ConfigError::MissingTableName),
            Self::Development => Ok(configured.unwrap_or_else(|| LOCAL_TABLE_NAME.to_string())),
        }
    }

    /// Returns the endpoint URL to use for DynamoDB
    ///
    /// Only development overrides the endpoint, pointing at DynamoDB Local
    /// (configurable via `DDB_ENDPOINT`); production and staging use the
    /// managed endpoint.
    #[must_use]
    pub fn override_dynamodb_endpoint(&self) -> Option<String> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some(
                env::var("DDB_ENDPOINT")
                    .ok()
                    .filter(|endpoint| !endpoint.trim().is_empty())
                    .unwrap_or_else(|| LOCAL_DYNAMODB_ENDPOINT.to_string()),
            ),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// AWS configuration with retry and timeout settings
    ///
    /// When the endpoint is overridden, placeholder static credentials are
    /// installed so the SDK never consults the ambient credential chain
    /// against a local backend; otherwise the default chain applies.
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_dynamodb_endpoint() {
            config_builder = config_builder
                .endpoint_url(endpoint_url)
                .credentials_provider(SharedCredentialsProvider::new(Credentials::from_keys(
                    "local", "local", None,
                )));
        }

        config_builder.build()
    }

    /// Log level for the environment, overridable via `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Development is the default
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_table_name_defaults_in_development() {
        env::remove_var("TODOS_TABLE_NAME");
        assert_eq!(
            Environment::Development.table_name(),
            Ok(LOCAL_TABLE_NAME.to_string())
        );

        env::set_var("TODOS_TABLE_NAME", "Todos");
        assert_eq!(
            Environment::Development.table_name(),
            Ok("Todos".to_string())
        );

        env::remove_var("TODOS_TABLE_NAME");
    }

    #[test]
    #[serial]
    fn test_table_name_required_outside_development() {
        env::remove_var("TODOS_TABLE_NAME");
        assert_eq!(
            Environment::Production.table_name(),
            Err(ConfigError::MissingTableName)
        );

        // Blank counts as missing
        env::set_var("TODOS_TABLE_NAME", "  ");
        assert_eq!(
            Environment::Staging.table_name(),
            Err(ConfigError::MissingTableName)
        );

        env::set_var("TODOS_TABLE_NAME", "Todos");
        assert_eq!(
            Environment::Production.table_name(),
            Ok("Todos".to_string())
        );

        env::remove_var("TODOS_TABLE_NAME");
    }

    #[test]
    #[serial]
    fn test_endpoint_override() {
        env::remove_var("DDB_ENDPOINT");
        assert_eq!(Environment::Production.override_dynamodb_endpoint(), None);
        assert_eq!(
            Environment::Development.override_dynamodb_endpoint(),
            Some(LOCAL_DYNAMODB_ENDPOINT.to_string())
        );

        env::set_var("DDB_ENDPOINT", "http://dynamodb-local:9000");
        assert_eq!(
            Environment::Development.override_dynamodb_endpoint(),
            Some("http://dynamodb-local:9000".to_string())
        );

        env::remove_var("DDB_ENDPOINT");
    }
}
