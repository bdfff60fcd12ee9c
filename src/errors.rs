use thiserror::Error;
use crate::manager_tplink_cloud::errors::CloudError;

#[derive(Error, Debug)]
pub enum EmeterError {
    #[error("EmeterError::Transport: {0}")]
    Transport(#[from] CloudError),
    #[error("EmeterError::MalformedResponse: {command}: {reason}")]
    MalformedResponse { command: String, reason: String },
    #[error("EmeterError::Runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("EmeterError::NestedRuntime: blocking call made from within an async runtime, use the async variant")]
    NestedRuntime,
}

impl EmeterError {
    pub fn malformed(command: &str, reason: &str) -> Self {
        EmeterError::MalformedResponse { command: command.to_string(), reason: reason.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Content: {0}")]
    Content(String),
}

impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Content(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LoggingError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("LoggingError::Config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("LoggingError::Init: {0}")]
    Init(#[from] log::SetLoggerError),
}
