use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while turning a host-supplied preference bag into
/// typed preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preferences must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("preference '{key}' expects {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum WebtermError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("{0}")]
    Other(String),
}
