//! Structured fuzz target for JDBC-shaped connect strings.
//!
//! Builds connect strings from arbitrary parts so most inputs get past the
//! URL parser and exercise the extraction logic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_connect_string_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use jdbc_url_core::{ConnectStringParser, NoopLog};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzConnectString {
    subprotocol: String,
    host: String,
    port: Option<u16>,
    database: String,
    params: Vec<(String, String)>,
}

impl FuzzConnectString {
    fn to_connect_string(&self) -> String {
        let mut s = format!("jdbc:{}://{}", self.subprotocol, self.host);
        if let Some(port) = self.port {
            s.push_str(&format!(":{}", port));
        }
        s.push('/');
        s.push_str(&self.database);
        if !self.params.is_empty() {
            let query: Vec<_> = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push('?');
            s.push_str(&query.join("&"));
        }
        s
    }
}

fuzz_target!(|input: FuzzConnectString| {
    let parser = ConnectStringParser::with_log(NoopLog);
    let connect_string = input.to_connect_string();

    let base = parser.connection_url(&connect_string);
    assert!(connect_string.starts_with(base));
    assert_eq!(parser.connection_url(base), base);

    if let Some(name) = parser.database_name(&connect_string) {
        assert!(!name.starts_with('/'));
    }
    let _ = parser.host(&connect_string);
    let _ = parser.port(&connect_string);
    let _ = parser.connection_properties(&connect_string, None, None);
});
