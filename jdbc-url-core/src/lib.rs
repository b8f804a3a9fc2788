//! Connect-string parsing for JDBC-style database URLs.
//!
//! JDBC connect strings such as `jdbc:mysql://host:3306/db?useSSL=true` use
//! multi-segment schemes that generic URL parsers reject. This crate rewrites
//! the scheme into an `http://` placeholder, delegates to [`url::Url`], and
//! reads back the host, port, database name and query parameters.
//!
//! # Lookups
//!
//! ```rust
//! use jdbc_url_core::ConnectStringParser;
//!
//! let parser = ConnectStringParser::new();
//!
//! assert_eq!(parser.port("jdbc:mysql://dbhost.example.com:3306/myschema"), 3306);
//! assert_eq!(parser.port("jdbc:mysql://dbhost.example.com/myschema"), -1);
//! assert_eq!(parser.port("jdbc://host:notaport/db"), -1);
//!
//! let props = parser.connection_properties(
//!     "jdbc:mysql://host/db?a=b%20c",
//!     Some("scott"),
//!     Some("tiger"),
//! );
//! assert_eq!(props.get("a"), Some("b c"));
//! assert_eq!(props.get("user"), Some("scott"));
//! ```
//!
//! # Parsed View
//!
//! ```rust
//! use jdbc_url_core::ConnectString;
//!
//! let conn = ConnectString::parse("jdbc:postgresql://pg.local/orders").unwrap();
//! assert_eq!(conn.port(), None);
//! assert_eq!(conn.port_or_default(), Some(5432));
//! ```

pub mod connect_string;
pub mod env;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod properties;
pub mod sink;

pub use connect_string::{ConnectString, Subprotocol};
pub use env::{DATABASE_URL, EnvSource, StdEnvSource};
pub use error::{JdbcUrlError, JdbcUrlResult};
pub use normalize::to_generic_url;
pub use parser::{
    ConnectStringParser, UNKNOWN_PORT, connection_properties, connection_url, database_name,
    host_name, port,
};
pub use properties::ConnectionProperties;
pub use sink::{LogEntry, LogLevel, NoopLog, ParseLog, RecordingLog, TracingLog};
