//! Connect-string lookups.
//!
//! Each lookup comes in two forms. The `try_` form returns a
//! [`JdbcUrlResult`]; the plain form logs any failure through the parser's
//! [`ParseLog`] and returns a sentinel instead:
//!
//! | Lookup | Sentinel |
//! |---|---|
//! | [`database_name`](ConnectStringParser::database_name) | `None` |
//! | [`host`](ConnectStringParser::host) | `None` |
//! | [`port`](ConnectStringParser::port) | `-1` |
//! | [`connection_url`](ConnectStringParser::connection_url) | the input, unchanged |
//! | [`connection_properties`](ConnectStringParser::connection_properties) | credentials only |
//!
//! `port` returns `-1` both when parsing fails and when no port was written.

use tracing::debug;

use crate::error::{JdbcUrlError, JdbcUrlResult};
use crate::normalize::{self, PLACEHOLDER_SCHEME};
use crate::properties::ConnectionProperties;
use crate::sink::{ParseLog, TracingLog};

/// Port reported when none is known.
pub const UNKNOWN_PORT: i32 = -1;

/// What to do with a connect string that has no `://`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingScheme {
    /// Hand the string to the URL parser untouched.
    Keep,
    /// Prepend the placeholder scheme and warn.
    PrependAndWarn,
}

/// Stateless parser for JDBC-style connect strings.
///
/// The parser owns a [`ParseLog`] used for diagnostics. It holds no other
/// state and is safe to share between threads.
///
/// ```rust
/// use jdbc_url_core::ConnectStringParser;
///
/// let parser = ConnectStringParser::new();
/// let s = "jdbc:mysql://dbhost.example.com:3306/myschema";
///
/// assert_eq!(parser.database_name(s).as_deref(), Some("myschema"));
/// assert_eq!(parser.host(s).as_deref(), Some("dbhost.example.com"));
/// assert_eq!(parser.port(s), 3306);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectStringParser<L: ParseLog = TracingLog> {
    log: L,
}

impl ConnectStringParser<TracingLog> {
    /// Create a parser that logs through `tracing`.
    pub fn new() -> Self {
        Self { log: TracingLog }
    }
}

impl Default for ConnectStringParser<TracingLog> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ParseLog> ConnectStringParser<L> {
    /// Create a parser with a custom log sink.
    pub fn with_log(log: L) -> Self {
        Self { log }
    }

    /// The log sink.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Database name: the URL path without leading `/` characters.
    ///
    /// The name is taken from the connect string text as written; spaces,
    /// non-ASCII characters and `..` segments are kept. The URL parser only
    /// validates. A connect string without `://` is parsed as
    /// `http://<input>` and a warning is logged.
    pub fn try_database_name(&self, connect_string: &str) -> JdbcUrlResult<String> {
        let normalized = self.authority_url(connect_string, MissingScheme::PrependAndWarn);
        normalize::parse_normalized(&normalized, connect_string)?;
        Ok(normalize::raw_database_path(&normalized).to_string())
    }

    /// Database name, or `None` if the connect string is malformed.
    pub fn database_name(&self, connect_string: &str) -> Option<String> {
        self.try_database_name(connect_string)
            .map_err(|e| self.report(&e))
            .ok()
    }

    /// Host name, if the URL has one.
    ///
    /// The host is reported the way the `url` crate serializes it for the
    /// `http` placeholder: lowercased, internationalized names IDNA-encoded
    /// to punycode, IPv6 addresses in brackets.
    pub fn try_host(&self, connect_string: &str) -> JdbcUrlResult<Option<String>> {
        let normalized = self.authority_url(connect_string, MissingScheme::Keep);
        let url = normalize::parse_normalized(&normalized, connect_string)?;
        Ok(url.host_str().map(str::to_string))
    }

    /// Host name, or `None` if absent or the connect string is malformed.
    ///
    /// Hosts come back lowercased and IDNA-encoded; see
    /// [`try_host`](Self::try_host).
    pub fn host(&self, connect_string: &str) -> Option<String> {
        self.try_host(connect_string)
            .map_err(|e| self.report(&e))
            .ok()
            .flatten()
    }

    /// Explicitly written port, if any.
    ///
    /// A port outside `0..=65535` is a [`JdbcUrlError::Malformed`] error, so
    /// [`port`](Self::port) reports it as [`UNKNOWN_PORT`].
    pub fn try_port(&self, connect_string: &str) -> JdbcUrlResult<Option<u16>> {
        let normalized = self.authority_url(connect_string, MissingScheme::Keep);
        let url = normalize::parse_normalized(&normalized, connect_string)?;
        Ok(normalize::explicit_port(&url, &normalized))
    }

    /// Port, or [`UNKNOWN_PORT`] if none was written or the connect string is
    /// malformed. The two cases are indistinguishable here; use
    /// [`try_port`](Self::try_port) to tell them apart. Ports above 65535
    /// count as malformed and also yield [`UNKNOWN_PORT`].
    pub fn port(&self, connect_string: &str) -> i32 {
        match self.try_port(connect_string) {
            Ok(port) => port.map_or(UNKNOWN_PORT, i32::from),
            Err(e) => {
                self.report(&e);
                UNKNOWN_PORT
            }
        }
    }

    /// The connect string with its `?query` tail removed.
    ///
    /// Returns the input unchanged when there is no query.
    pub fn try_connection_url<'a>(&self, connect_string: &'a str) -> JdbcUrlResult<&'a str> {
        let url = normalize::to_generic_url(connect_string)?;
        Ok(match url.query() {
            Some(_) => normalize::strip_query(connect_string),
            None => connect_string,
        })
    }

    /// The connect string without its query, or the input unchanged if it is
    /// malformed.
    ///
    /// ```rust
    /// use jdbc_url_core::ConnectStringParser;
    ///
    /// let parser = ConnectStringParser::new();
    /// let base = parser.connection_url("jdbc:mysql://host/db?useSSL=true");
    /// assert_eq!(base, "jdbc:mysql://host/db");
    /// assert_eq!(parser.connection_url(base), base);
    /// ```
    pub fn connection_url<'a>(&self, connect_string: &'a str) -> &'a str {
        self.try_connection_url(connect_string)
            .unwrap_or_else(|e| {
                self.report(&e);
                connect_string
            })
    }

    /// Decoded query parameters only.
    pub fn try_query_properties(&self, connect_string: &str) -> JdbcUrlResult<ConnectionProperties> {
        let url = normalize::to_generic_url(connect_string)?;
        Ok(url
            .query()
            .map(ConnectionProperties::from_query)
            .unwrap_or_default())
    }

    /// Query parameters merged with optional credentials.
    ///
    /// When `username` is given, `user` and `password` are written after the
    /// query parameters, overriding any of the same name. `password` is
    /// written even when it is `None`. A malformed connect string is logged
    /// and contributes no query parameters; the credentials are still added.
    pub fn connection_properties(
        &self,
        connect_string: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ConnectionProperties {
        let mut props = self
            .try_query_properties(connect_string)
            .unwrap_or_else(|e| {
                self.report(&e);
                ConnectionProperties::new()
            });

        if let Some(username) = username {
            props.set_credentials(username, password);
        }

        debug!(count = props.len(), "Connection properties assembled");
        props
    }

    fn authority_url(&self, connect_string: &str, missing: MissingScheme) -> String {
        match (normalize::replace_scheme(connect_string), missing) {
            (Some(replaced), _) => replaced,
            (None, MissingScheme::Keep) => connect_string.to_string(),
            (None, MissingScheme::PrependAndWarn) => {
                self.log.warn(
                    connect_string,
                    "Could not find database access scheme in connect string",
                );
                format!("{}{}", PLACEHOLDER_SCHEME, connect_string)
            }
        }
    }

    fn report(&self, err: &JdbcUrlError) {
        let input = err.input().unwrap_or_default();
        self.log.error(input, &err.to_string());
    }
}

/// Database name using a `tracing`-backed parser.
pub fn database_name(connect_string: &str) -> Option<String> {
    ConnectStringParser::new().database_name(connect_string)
}

/// Host name using a `tracing`-backed parser.
pub fn host_name(connect_string: &str) -> Option<String> {
    ConnectStringParser::new().host(connect_string)
}

/// Port using a `tracing`-backed parser; [`UNKNOWN_PORT`] when unknown.
pub fn port(connect_string: &str) -> i32 {
    ConnectStringParser::new().port(connect_string)
}

/// Connect string without its query using a `tracing`-backed parser.
pub fn connection_url(connect_string: &str) -> &str {
    ConnectStringParser::new().connection_url(connect_string)
}

/// Connection properties using a `tracing`-backed parser.
pub fn connection_properties(
    connect_string: &str,
    username: Option<&str>,
    password: Option<&str>,
) -> ConnectionProperties {
    ConnectStringParser::new().connection_properties(connect_string, username, password)
}
