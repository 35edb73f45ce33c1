use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("No default value defined for setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid setting '{0}': {1}")]
    InvalidSetting(String, String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Launch error: {0}")]
    LaunchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
