//! Parsed view of a connect string.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::env::{DATABASE_URL, EnvSource, StdEnvSource};
use crate::error::{JdbcUrlError, JdbcUrlResult};
use crate::normalize::{self, JDBC_PREFIX, PLACEHOLDER_SCHEME, SCHEME_SEPARATOR};
use crate::properties::ConnectionProperties;

/// JDBC subprotocol, the driver name between `jdbc:` and `://`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subprotocol {
    /// MySQL
    MySql,
    /// MariaDB
    MariaDb,
    /// PostgreSQL
    PostgreSql,
    /// Microsoft SQL Server
    SqlServer,
    /// Oracle, any driver flavour (`oracle:thin`, `oracle:oci`)
    Oracle,
    /// IBM DB2
    Db2,
    /// HyperSQL
    HsqlDb,
    /// Anything else, kept verbatim.
    Other(String),
}

impl Subprotocol {
    /// Classify a subprotocol name. Only the first `:`-separated segment is
    /// significant, so `oracle:thin` is [`Subprotocol::Oracle`].
    pub fn from_name(name: &str) -> Self {
        let vendor = name.split(':').next().unwrap_or(name);
        match vendor.to_lowercase().as_str() {
            "mysql" => Self::MySql,
            "mariadb" => Self::MariaDb,
            "postgresql" | "postgres" => Self::PostgreSql,
            "sqlserver" => Self::SqlServer,
            "oracle" => Self::Oracle,
            "db2" => Self::Db2,
            "hsqldb" => Self::HsqlDb,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Get the subprotocol name.
    pub fn name(&self) -> &str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::PostgreSql => "postgresql",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
            Self::Db2 => "db2",
            Self::HsqlDb => "hsqldb",
            Self::Other(name) => name,
        }
    }

    /// Get the default port for this subprotocol.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql | Self::MariaDb => Some(3306),
            Self::PostgreSql => Some(5432),
            Self::SqlServer => Some(1433),
            Self::Oracle => Some(1521),
            Self::Db2 => Some(50000),
            Self::HsqlDb => Some(9001),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for Subprotocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A connect string decomposed once into its parts.
///
/// Unlike [`ConnectStringParser`](crate::ConnectStringParser), parsing is
/// strict: a malformed connect string is an error.
///
/// ```rust
/// use jdbc_url_core::{ConnectString, Subprotocol};
///
/// let conn = ConnectString::parse("jdbc:mysql://db.local:3307/shop?useSSL=true").unwrap();
/// assert_eq!(conn.subprotocol(), Some(&Subprotocol::MySql));
/// assert_eq!(conn.host(), Some("db.local"));
/// assert_eq!(conn.port(), Some(3307));
/// assert_eq!(conn.database(), Some("shop"));
/// assert_eq!(conn.param("useSSL"), Some("true"));
/// assert_eq!(conn.base_url(), "jdbc:mysql://db.local:3307/shop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectString {
    original: String,
    subprotocol: Option<Subprotocol>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    has_query: bool,
    params: ConnectionProperties,
}

impl ConnectString {
    /// Parse a connect string.
    pub fn parse(connect_string: &str) -> JdbcUrlResult<Self> {
        debug!(len = connect_string.len(), "ConnectString::parse()");

        let normalized = normalize::replace_scheme(connect_string)
            .unwrap_or_else(|| format!("{}{}", PLACEHOLDER_SCHEME, connect_string));
        let url = normalize::parse_normalized(&normalized, connect_string)?;

        let database = Some(normalize::raw_database_path(&normalized))
            .filter(|db| !db.is_empty())
            .map(str::to_string);
        let params = url
            .query()
            .map(ConnectionProperties::from_query)
            .unwrap_or_default();

        let parsed = Self {
            original: connect_string.to_string(),
            subprotocol: subprotocol_name(connect_string).map(Subprotocol::from_name),
            host: url.host_str().map(str::to_string),
            port: normalize::explicit_port(&url, &normalized),
            database,
            has_query: url.query().is_some(),
            params,
        };
        debug!(
            subprotocol = ?parsed.subprotocol,
            host = ?parsed.host,
            database = ?parsed.database,
            "Connect string parsed"
        );
        Ok(parsed)
    }

    /// Parse from environment variable.
    pub fn from_env(var: &str) -> JdbcUrlResult<Self> {
        Self::from_env_source(&StdEnvSource, var)
    }

    /// Parse from a variable of a custom environment source.
    ///
    /// Surrounding whitespace is trimmed; a blank variable is
    /// [`JdbcUrlError::EnvNotFound`].
    pub fn from_env_source<S: EnvSource + ?Sized>(source: &S, var: &str) -> JdbcUrlResult<Self> {
        Self::parse(&source.connect_string(var)?)
    }

    /// Parse from DATABASE_URL environment variable.
    pub fn from_database_url() -> JdbcUrlResult<Self> {
        Self::from_env(DATABASE_URL)
    }

    /// Get the original connect string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Get the subprotocol, if the connect string has a `jdbc:<name>://` form.
    pub fn subprotocol(&self) -> Option<&Subprotocol> {
        self.subprotocol.as_ref()
    }

    /// Get the host.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Get the explicitly written port.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Get the port or the default for the subprotocol.
    pub fn port_or_default(&self) -> Option<u16> {
        self.port
            .or_else(|| self.subprotocol.as_ref().and_then(Subprotocol::default_port))
    }

    /// Get the database name as written. Empty paths read as `None`.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Get a decoded query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Get all decoded query parameters.
    pub fn params(&self) -> &ConnectionProperties {
        &self.params
    }

    /// The original connect string without its query.
    ///
    /// A `?` inside the fragment is not a query; the string is then returned
    /// unchanged, as [`ConnectStringParser::connection_url`](crate::ConnectStringParser::connection_url) does.
    pub fn base_url(&self) -> &str {
        if self.has_query {
            normalize::strip_query(&self.original)
        } else {
            &self.original
        }
    }

    /// Query parameters merged with optional credentials.
    pub fn properties(&self, username: Option<&str>, password: Option<&str>) -> ConnectionProperties {
        let mut props = self.params.clone();
        if let Some(username) = username {
            props.set_credentials(username, password);
        }
        props
    }
}

impl fmt::Display for ConnectString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for ConnectString {
    type Err = JdbcUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn subprotocol_name(connect_string: &str) -> Option<&str> {
    let rest = connect_string.strip_prefix(JDBC_PREFIX)?;
    let (name, _) = rest.split_once(SCHEME_SEPARATOR)?;
    Some(name).filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_parse_mysql_full() {
        let conn = ConnectString::parse(
            "jdbc:mysql://dbhost.example.com:3306/myschema?useSSL=true&serverTimezone=UTC",
        )
        .unwrap();
        assert_eq!(conn.subprotocol(), Some(&Subprotocol::MySql));
        assert_eq!(conn.host(), Some("dbhost.example.com"));
        assert_eq!(conn.port(), Some(3306));
        assert_eq!(conn.database(), Some("myschema"));
        assert_eq!(conn.param("useSSL"), Some("true"));
        assert_eq!(conn.param("serverTimezone"), Some("UTC"));
        assert_eq!(conn.params().len(), 2);
    }

    #[test]
    fn test_parse_oracle_multi_part_scheme() {
        let conn = ConnectString::parse("jdbc:oracle:thin://ora.local:1521/orcl").unwrap();
        assert_eq!(conn.subprotocol(), Some(&Subprotocol::Oracle));
        assert_eq!(conn.host(), Some("ora.local"));
        assert_eq!(conn.database(), Some("orcl"));
    }

    #[test]
    fn test_parse_without_scheme() {
        let conn = ConnectString::parse("localhost:5432/app").unwrap();
        assert_eq!(conn.subprotocol(), None);
        assert_eq!(conn.host(), Some("localhost"));
        assert_eq!(conn.port(), Some(5432));
        assert_eq!(conn.database(), Some("app"));
    }

    #[test]
    fn test_parse_no_database() {
        let conn = ConnectString::parse("jdbc:postgresql://h").unwrap();
        assert_eq!(conn.database(), None);
        assert_eq!(conn.port(), None);
        assert_eq!(conn.port_or_default(), Some(5432));
    }

    #[test]
    fn test_parse_unknown_subprotocol() {
        let conn = ConnectString::parse("jdbc:h2:tcp://h/mem").unwrap();
        assert_eq!(conn.subprotocol(), Some(&Subprotocol::Other("h2:tcp".to_string())));
        assert_eq!(conn.port_or_default(), None);
    }

    #[test]
    fn test_parse_malformed() {
        let err = ConnectString::parse("jdbc:mysql://h:notaport/db").unwrap_err();
        assert!(err.is_malformed());
        assert!("jdbc:mysql://h:notaport/db".parse::<ConnectString>().is_err());
    }

    #[test]
    fn test_base_url_and_display() {
        let conn: ConnectString = "jdbc:mysql://host/db?useSSL=true".parse().unwrap();
        assert_eq!(conn.base_url(), "jdbc:mysql://host/db");
        assert_eq!(conn.to_string(), "jdbc:mysql://host/db?useSSL=true");
        assert_eq!(conn.as_str(), "jdbc:mysql://host/db?useSSL=true");
    }

    #[test]
    fn test_base_url_ignores_question_mark_in_fragment() {
        let input = "jdbc:mysql://h/db#f?x";
        let conn = ConnectString::parse(input).unwrap();
        assert_eq!(conn.base_url(), input);
        assert_eq!(conn.base_url(), crate::connection_url(input));
        assert!(conn.params().is_empty());
    }

    #[test]
    fn test_database_kept_as_written() {
        let conn = ConnectString::parse("jdbc:mysql://h/my db?x=1").unwrap();
        assert_eq!(conn.database(), Some("my db"));

        let conn = ConnectString::parse("jdbc:postgresql://h/données").unwrap();
        assert_eq!(conn.database(), Some("données"));

        let conn = ConnectString::parse("jdbc:mysql://h/a/../db#frag").unwrap();
        assert_eq!(conn.database(), Some("a/../db"));
    }

    #[test]
    fn test_properties() {
        let conn = ConnectString::parse("jdbc:mysql://h/db?k1=v1&k2=v2").unwrap();

        let props = conn.properties(Some("scott"), None);
        assert_eq!(props.len(), 4);
        assert_eq!(props.get("user"), Some("scott"));
        assert_eq!(props.get_raw("password"), Some(None));

        assert_eq!(conn.properties(None, Some("x")).len(), 2);
    }

    #[test]
    fn test_from_env_source() {
        let source = HashMap::from([
            (DATABASE_URL.to_string(), " jdbc:sqlserver://mssql:1433/reports\n".to_string()),
            ("BLANK_URL".to_string(), String::new()),
        ]);
        let conn = ConnectString::from_env_source(&source, DATABASE_URL).unwrap();
        assert_eq!(conn.subprotocol(), Some(&Subprotocol::SqlServer));
        assert_eq!(conn.database(), Some("reports"));
        assert_eq!(conn.as_str(), "jdbc:sqlserver://mssql:1433/reports");

        let err = ConnectString::from_env_source(&source, "MISSING_URL").unwrap_err();
        assert!(matches!(err, JdbcUrlError::EnvNotFound(_)));
        let err = ConnectString::from_env_source(&source, "BLANK_URL").unwrap_err();
        assert!(matches!(err, JdbcUrlError::EnvNotFound(_)));
    }

    #[test]
    fn test_subprotocol() {
        assert_eq!(Subprotocol::from_name("postgres"), Subprotocol::PostgreSql);
        assert_eq!(Subprotocol::from_name("MySQL"), Subprotocol::MySql);
        assert_eq!(Subprotocol::from_name("oracle:oci"), Subprotocol::Oracle);
        assert_eq!(Subprotocol::Db2.default_port(), Some(50000));
        assert_eq!(Subprotocol::MariaDb.default_port(), Some(3306));
        assert_eq!(Subprotocol::Other("derby".into()).to_string(), "derby");
        assert_eq!(Subprotocol::HsqlDb.to_string(), "hsqldb");
    }

    #[test]
    fn test_subprotocol_name() {
        assert_eq!(subprotocol_name("jdbc:mysql://h/db"), Some("mysql"));
        assert_eq!(subprotocol_name("jdbc://h/db"), None);
        assert_eq!(subprotocol_name("mysql://h/db"), None);
        assert_eq!(subprotocol_name("jdbc:oracle:thin:@h:1521:orcl"), None);
    }
}
