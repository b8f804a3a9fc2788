//! Subscriber installation through the `tracing-subscriber` feature.
#![cfg(feature = "tracing-subscriber")]

use jdbc_url_core::ConnectStringParser;
use jdbc_url_core::logging::{self, LogConfig, LogFormat};
use tracing::Level;

/// Test that the first install wins and later ones defer to it
#[test]
fn test_install_once() {
    let config = LogConfig {
        enabled: true,
        level: Level::DEBUG,
        format: LogFormat::Compact,
    };

    assert!(config.install());
    assert!(!config.install());

    // A subscriber is already global, so this reads the environment and
    // either skips or defers without panicking.
    logging::init();
    logging::init();

    assert_eq!(ConnectStringParser::new().port("jdbc:mysql://h:3306/db"), 3306);
}
