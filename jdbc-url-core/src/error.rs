//! Error types for connect-string parsing.

use thiserror::Error;

/// Result type for connect-string operations.
pub type JdbcUrlResult<T> = Result<T, JdbcUrlError>;

/// Errors that can occur while decomposing a connect string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JdbcUrlError {
    /// The normalized connect string was rejected by the URL parser.
    #[error("Malformed connect string URL: {input}; reason is {source}")]
    Malformed {
        /// The connect string as supplied by the caller.
        input: String,
        /// The underlying parser error.
        #[source]
        source: url::ParseError,
    },

    /// Environment variable not found.
    #[error("Environment variable not found: {0}")]
    EnvNotFound(String),
}

impl JdbcUrlError {
    /// Create a malformed-input error for the given connect string.
    pub fn malformed(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::Malformed {
            input: input.into(),
            source,
        }
    }

    /// Create an environment lookup error.
    pub fn env_not_found(name: impl Into<String>) -> Self {
        Self::EnvNotFound(name.into())
    }

    /// Check if this is a malformed-input error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// The connect string that failed to parse, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Malformed { input, .. } => Some(input),
            Self::EnvNotFound(_) => None,
        }
    }
}
