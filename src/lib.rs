//! # jdbc-url
//!
//! Best-effort extraction of host, port, database name and connection
//! properties from JDBC connect strings.
//!
//! jdbc-url provides:
//! - Lookups that never fail outward and return documented sentinels
//! - Fallible `try_` variants for callers that want the error
//! - A parsed [`ConnectString`] view with subprotocol detection
//! - Injectable log sinks so diagnostics can be captured in tests
//!
//! ## Quick Start
//!
//! ```rust
//! use jdbc_url::prelude::*;
//!
//! let parser = ConnectStringParser::new();
//! let s = "jdbc:mysql://dbhost.example.com:3306/myschema?useSSL=true";
//!
//! assert_eq!(parser.database_name(s).as_deref(), Some("myschema"));
//! assert_eq!(parser.host(s).as_deref(), Some("dbhost.example.com"));
//! assert_eq!(parser.port(s), 3306);
//! assert_eq!(parser.connection_url(s), "jdbc:mysql://dbhost.example.com:3306/myschema");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use jdbc_url_core::{
    ConnectString, ConnectStringParser, ConnectionProperties, DATABASE_URL, EnvSource,
    JdbcUrlError, JdbcUrlResult, LogEntry, LogLevel, NoopLog, ParseLog, RecordingLog,
    StdEnvSource, Subprotocol, TracingLog, UNKNOWN_PORT, connection_properties, connection_url,
    database_name, host_name, port, to_generic_url,
};

/// Scheme rewriting primitives.
pub mod normalize {
    pub use jdbc_url_core::normalize::*;
}

/// Logging setup.
pub mod logging {
    pub use jdbc_url_core::logging::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnectString, ConnectStringParser, ConnectionProperties, JdbcUrlError, JdbcUrlResult,
        ParseLog, Subprotocol,
    };
}
