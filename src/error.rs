use std::path::PathBuf;
use thiserror::Error;

/// Reflectdoc error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Unsupported entity kind `{kind}` on {id}")]
    UnsupportedEntityKind { id: String, kind: String },

    #[error("Root set matched no entities")]
    EmptyRootSet,

    #[error("Failed to write {path}: {source}")]
    DestinationWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for reflectdoc operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create an unsupported-entity-kind error
    pub fn unsupported_kind(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Error::UnsupportedEntityKind {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Create a destination write error
    pub fn destination_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::DestinationWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Error::Render(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True for errors that abort a whole generation run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::UnsupportedEntityKind { .. })
    }
}
