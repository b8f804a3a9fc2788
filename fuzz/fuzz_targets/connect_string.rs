//! Fuzz target for the connect-string lookups.
//!
//! Feeds arbitrary strings to every lookup. None of them may panic, and the
//! documented properties must hold for whatever comes back.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_connect_string
//! ```

#![no_main]

use jdbc_url_core::{ConnectString, ConnectStringParser, NoopLog, to_generic_url};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let parser = ConnectStringParser::with_log(NoopLog);

    if let Some(name) = parser.database_name(input) {
        assert!(!name.starts_with('/'));
    }
    let _ = parser.host(input);
    assert!(parser.port(input) >= -1);

    let base = parser.connection_url(input);
    assert_eq!(parser.connection_url(base), base);

    let _ = parser.connection_properties(input, Some("user"), None);
    let _ = to_generic_url(input);
    let _ = ConnectString::parse(input);
});
