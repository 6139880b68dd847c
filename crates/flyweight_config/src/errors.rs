//! Errors that can be returned from the config store
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("json parsing error: {0}")]
    JsonSerde(#[from] serde_json::Error),
}
