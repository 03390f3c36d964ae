mod environment;
mod error;
mod extractors;

pub use environment::{ConfigError, Environment};
pub use error::AppError;
pub use extractors::ValidatedJson;
