
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollateError {
    #[error("Malformed rule: {message}")]
    MalformedRule { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl CollateError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRule { message: message.into(), line: None, col: None }
    }
}

pub type Result<T> = std::result::Result<T, CollateError>;

// Helper conversions
impl From<config::ConfigError> for CollateError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for CollateError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<serde_json::Error> for CollateError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}
impl<T> From<std::sync::PoisonError<T>> for CollateError {
    fn from(e: std::sync::PoisonError<T>) -> Self { Self::Lock(e.to_string()) }
}
