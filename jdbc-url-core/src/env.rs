//! Where connect strings and logging settings are read from.
//!
//! [`ConnectString::from_env`](crate::ConnectString::from_env) reads the
//! process environment through [`StdEnvSource`]. Any `HashMap<String, String>`
//! is also a source, which keeps tests off the real environment.

use std::collections::HashMap;

use crate::error::{JdbcUrlError, JdbcUrlResult};

/// Conventional variable holding a connect string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// A lookup of named settings.
pub trait EnvSource: Send + Sync {
    /// Raw value of a variable.
    fn get(&self, name: &str) -> Option<String>;

    /// Connect string held by `name`, trimmed.
    ///
    /// A variable that is unset, or set to only whitespace, is
    /// [`JdbcUrlError::EnvNotFound`]: an empty connect string would parse as
    /// a hostless URL and hide the misconfiguration.
    fn connect_string(&self, name: &str) -> JdbcUrlResult<String> {
        self.get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| JdbcUrlError::env_not_found(name))
    }

    /// Case-insensitive boolean flag: `true`, `1`, `yes` and `on` are set.
    fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
        })
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_connect_string_trimmed() {
        let source = vars(&[(DATABASE_URL, "  jdbc:mysql://h/db\n")]);
        assert_eq!(source.connect_string(DATABASE_URL).unwrap(), "jdbc:mysql://h/db");
    }

    #[test]
    fn test_connect_string_blank_is_missing() {
        let source = vars(&[(DATABASE_URL, "   ")]);
        let err = source.connect_string(DATABASE_URL).unwrap_err();
        assert!(matches!(err, JdbcUrlError::EnvNotFound(ref name) if name == DATABASE_URL));

        let err = source.connect_string("JDBC_URL_MISSING").unwrap_err();
        assert!(matches!(err, JdbcUrlError::EnvNotFound(ref name) if name == "JDBC_URL_MISSING"));
    }

    #[test]
    fn test_flag() {
        let source = vars(&[("A", "YES"), ("B", " on "), ("C", "0"), ("D", "enabled")]);
        assert!(source.flag("A"));
        assert!(source.flag("B"));
        assert!(!source.flag("C"));
        assert!(!source.flag("D"));
        assert!(!source.flag("E"));
    }

    #[test]
    fn test_std_source_missing() {
        assert!(StdEnvSource.get("JDBC_URL_SURELY_UNSET_VARIABLE").is_none());
        assert!(StdEnvSource.connect_string("JDBC_URL_SURELY_UNSET_VARIABLE").is_err());
    }
}
