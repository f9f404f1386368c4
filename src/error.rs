use thiserror::Error;

/// Unified error type for git-autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid tag template: {0}")]
    InvalidTemplate(String),

    #[error("Cannot parse tag: {0}")]
    CannotParseTag(String),

    #[error("Invalid tag: {0}")]
    TagValidation(String),

    #[error("Tag already exists: {0}")]
    TagAlreadyExists(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

impl AutotagError {
    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        AutotagError::InvalidTemplate(msg.into())
    }

    /// Create a tag-parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        AutotagError::CannotParseTag(msg.into())
    }

    /// Create a tag-validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        AutotagError::TagValidation(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        AutotagError::Repository(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        AutotagError::Remote(msg.into())
    }
}
