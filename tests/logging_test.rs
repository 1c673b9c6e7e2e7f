// ABOUTME: Integration tests for logging configuration
// ABOUTME: Validates environment variable handling and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitbit_api_client::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(!config.include_spans);

    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_LOCATION");
}

#[test]
#[serial]
fn test_default_logging_config() {
    env::remove_var("RUST_LOG");
    env::remove_var("LOG_FORMAT");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.service_name, "fitbit_api_client");
    assert!(!config.include_location);
}

#[test]
fn test_with_level_overrides_env() {
    let config = LoggingConfig::default().with_level("fitbit_api_client=trace");
    assert_eq!(config.level, "fitbit_api_client=trace");
    assert!(config
        .env_filter()
        .to_string()
        .contains("fitbit_api_client=trace"));
}

#[test]
#[serial]
fn test_pretty_subscriber_installs_once() {
    let config = LoggingConfig {
        format: LogFormat::Pretty,
        include_location: true,
        include_spans: true,
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    assert!(config.init().is_err());
}
