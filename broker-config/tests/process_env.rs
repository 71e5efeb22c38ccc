//! Reads the real process environment, so everything lives in a single test.
#![cfg(unix)]

use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

use booking_broker_config::{
    configuration::{get_configuration, LogLevel},
    resolve_from_process_env, ConfigurationError,
};

#[derive(serde::Deserialize)]
struct Settings {
    log_level: LogLevel,
}

#[test]
fn process_environment_with_non_utf8_values() {
    std::env::remove_var("APP_CONFIG_FILE");
    std::env::set_var("BOOKING_TEST_GARBAGE", OsStr::from_bytes(b"\xff\xfe"));
    std::env::set_var("BOOKING_LOG_LEVEL", "debug");
    std::env::set_var("RABBITMQ_HOST", "broker.internal");
    std::env::remove_var("RABBITMQ_PORT");

    // unrelated garbage is ignored by both loaders
    let resolved = resolve_from_process_env().unwrap();
    assert_eq!(resolved.host(), "broker.internal");
    assert_eq!(resolved.port(), 5672);
    let settings: Settings = get_configuration().unwrap();
    assert_eq!(settings.log_level, LogLevel::Debug);

    // garbage in a broker variable is an error naming it
    std::env::set_var("RABBITMQ_PORT", OsStr::from_bytes(b"56\xff72"));
    let err = resolve_from_process_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::NotUnicode {
            variable: "RABBITMQ_PORT"
        }
    ));

    std::env::remove_var("RABBITMQ_PORT");
    std::env::remove_var("RABBITMQ_HOST");
    std::env::remove_var("BOOKING_LOG_LEVEL");
    std::env::remove_var("BOOKING_TEST_GARBAGE");
}
