use std::path::PathBuf;
use thiserror::Error;

/// Core error type for unimod operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The parent's second path segment is not the namespace root.
    #[error("invalid parent while loading module from absolute path (parent: {parent})")]
    InvalidParent { parent: String },

    /// The parent's subtree marker is neither `app` nor `packages`.
    #[error("cannot determine parent when loading module from absolute path (parent: {parent})")]
    UnresolvableParent { parent: String },

    /// A canonical id reached content loading without being registered.
    #[error("module {name} doesn't exist")]
    ModuleNotFound { name: String },

    /// Failure reported by the host loader's own normalization.
    #[error("host loader failed to normalize {name}: {message}")]
    Host { name: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::ConfigRead { .. } => "CONFIG_READ",
            Self::ConfigParse { .. } => "CONFIG_PARSE",
            Self::InvalidParent { .. } => "INVALID_PARENT",
            Self::UnresolvableParent { .. } => "UNRESOLVABLE_PARENT",
            Self::ModuleNotFound { .. } => "MODULE_NOT_FOUND",
            Self::Host { .. } => "HOST",
            Self::Other(_) => "OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parent_message() {
        let err = Error::InvalidParent {
            parent: "/foo/app/x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("invalid parent while loading module from absolute path"));
        assert!(msg.contains("/foo/app/x"));
        assert_eq!(err.code(), "INVALID_PARENT");
    }

    #[test]
    fn test_module_not_found_message() {
        let err = Error::ModuleNotFound {
            name: "app/foo".to_string(),
        };
        assert_eq!(err.to_string(), "module app/foo doesn't exist");
    }
}
