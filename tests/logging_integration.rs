//! Integration tests for the default `tracing` log sink.

use std::io;
use std::sync::{Arc, Mutex};

use jdbc_url::ConnectStringParser;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

/// Test that parse failures reach tracing at error level
#[test]
fn test_malformed_is_logged_as_error() {
    let output = capture(|| {
        assert_eq!(ConnectStringParser::new().port("jdbc://host:notaport/db"), -1);
    });

    assert!(output.contains("ERROR"));
    assert!(output.contains("Malformed connect string URL"));
    assert!(output.contains("jdbc://host:notaport/db"));
}

/// Test that a missing scheme reaches tracing at warn level
#[test]
fn test_missing_scheme_is_logged_as_warning() {
    let output = capture(|| {
        let _ = ConnectStringParser::new().database_name("dbhost/inventory");
    });

    assert!(output.contains("WARN"));
    assert!(output.contains("Could not find database access scheme"));
}

/// Test that well-formed lookups stay quiet
#[test]
fn test_success_is_silent() {
    let output = capture(|| {
        let _ = ConnectStringParser::new().host("jdbc:mysql://h:3306/db");
    });

    assert!(output.is_empty());
}
