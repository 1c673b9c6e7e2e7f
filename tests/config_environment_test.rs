// ABOUTME: Integration tests for environment-based configuration
// ABOUTME: Validates FITBIT_* variable parsing, defaults, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitbit_api_client::config::FitbitConfig;
use fitbit_api_client::constants::{env_config, fitbit, http};
use fitbit_api_client::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ALL_VARS: &[&str] = &[
    env_config::CLIENT_ID,
    env_config::CLIENT_SECRET,
    env_config::REDIRECT_URL,
    env_config::AUTH_URL,
    env_config::TOKEN_URL,
    env_config::SCOPE,
    env_config::USE_PKCE,
    env_config::API_BASE_URL,
    env_config::TOKEN_FILE,
    env_config::ACCEPT_LANGUAGE,
    env_config::HTTP_TIMEOUT_SECS,
    env_config::HTTP_CONNECT_TIMEOUT_SECS,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

fn set_credentials() {
    env::set_var(env_config::CLIENT_ID, "client-id");
    env::set_var(env_config::CLIENT_SECRET, "client-secret");
}

#[test]
#[serial]
fn test_missing_client_id() {
    clear_env();
    env::set_var(env_config::CLIENT_SECRET, "client-secret");

    let error = FitbitConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains(env_config::CLIENT_ID));
    clear_env();
}

#[test]
#[serial]
fn test_blank_client_secret_is_missing() {
    clear_env();
    env::set_var(env_config::CLIENT_ID, "client-id");
    env::set_var(env_config::CLIENT_SECRET, "   ");

    let error = FitbitConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains(env_config::CLIENT_SECRET));
    clear_env();
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    set_credentials();

    let config = FitbitConfig::from_env().unwrap();

    assert_eq!(config.oauth.client_id, "client-id");
    assert_eq!(config.oauth.client_secret, "client-secret");
    assert_eq!(config.oauth.auth_url, fitbit::AUTH_URL);
    assert_eq!(config.oauth.token_url, fitbit::TOKEN_URL);
    assert_eq!(config.oauth.redirect_uri, fitbit::DEFAULT_REDIRECT_URL);
    assert_eq!(config.oauth.scopes, vec!["activity", "profile"]);
    assert!(!config.oauth.use_pkce);
    assert_eq!(config.api_base_url, fitbit::API_BASE_URL);
    assert_eq!(config.token_file, PathBuf::from("token.json"));
    assert_eq!(config.accept_language, None);
    assert_eq!(config.http.timeout_secs, http::API_TIMEOUT_SECS);
    clear_env();
}

#[test]
#[serial]
fn test_overrides() {
    clear_env();
    set_credentials();
    env::set_var(env_config::REDIRECT_URL, "https://example.com/cb");
    env::set_var(env_config::AUTH_URL, "https://auth.example.com/authorize");
    env::set_var(env_config::TOKEN_URL, "https://auth.example.com/token");
    env::set_var(env_config::SCOPE, " activity , heartrate,, sleep ");
    env::set_var(env_config::USE_PKCE, "true");
    env::set_var(env_config::TOKEN_FILE, "/tmp/fitbit/token.json");
    env::set_var(env_config::ACCEPT_LANGUAGE, "en_US");
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "5");
    env::set_var(env_config::HTTP_CONNECT_TIMEOUT_SECS, "2");

    let config = FitbitConfig::from_env().unwrap();

    assert_eq!(config.oauth.redirect_uri, "https://example.com/cb");
    assert_eq!(config.oauth.auth_url, "https://auth.example.com/authorize");
    assert_eq!(config.oauth.token_url, "https://auth.example.com/token");
    assert_eq!(config.oauth.scopes, vec!["activity", "heartrate", "sleep"]);
    assert!(config.oauth.use_pkce);
    assert_eq!(config.token_file, PathBuf::from("/tmp/fitbit/token.json"));
    assert_eq!(config.accept_language.as_deref(), Some("en_US"));
    assert_eq!(config.http.timeout_secs, 5);
    assert_eq!(config.http.connect_timeout_secs, 2);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_timeout() {
    clear_env();
    set_credentials();
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "soon");

    let error = FitbitConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains(env_config::HTTP_TIMEOUT_SECS));
    clear_env();
}

#[test]
#[serial]
fn test_zero_timeout_rejected() {
    clear_env();
    set_credentials();
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "0");

    assert_eq!(
        FitbitConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
    clear_env();
}

#[test]
#[serial]
fn test_invalid_token_url() {
    clear_env();
    set_credentials();
    env::set_var(env_config::TOKEN_URL, "not a url");

    let error = FitbitConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains(env_config::TOKEN_URL));
    clear_env();
}

#[test]
#[serial]
fn test_scope_without_entries_rejected() {
    clear_env();
    set_credentials();
    env::set_var(env_config::SCOPE, " , ,");

    assert_eq!(
        FitbitConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
    clear_env();
}

#[test]
#[serial]
fn test_zero_connect_timeout_rejected() {
    clear_env();
    set_credentials();
    env::set_var(env_config::HTTP_CONNECT_TIMEOUT_SECS, "0");

    let error = FitbitConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains(env_config::HTTP_CONNECT_TIMEOUT_SECS));
    clear_env();
}
