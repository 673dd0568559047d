use thiserror::Error;

/// Failures while decoding the external quiz record.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Quiz decoding error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Unsupported additional content type: {0}")]
    UnsupportedContent(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings loading error: {0}")]
    Load(String),
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session {0} is no longer running")]
    Closed(uuid::Uuid),
    #[error("Session {0} did not respond")]
    NoResponse(uuid::Uuid),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Quiz configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings parsing error: {0}")]
    SettingsParsing(#[from] config::ConfigError),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
