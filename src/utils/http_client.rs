// ABOUTME: Shared HTTP client builders with timeout and user agent configuration
// ABOUTME: Separate profiles for Fitbit API calls and OAuth token endpoint calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// # Arguments
/// * `timeout_secs` - Request timeout in seconds
/// * `connect_timeout_secs` - Connection timeout in seconds
/// * `user_agent` - Value of the `User-Agent` header
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(
    timeout_secs: u64,
    connect_timeout_secs: u64,
    user_agent: &str,
) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client for OAuth token endpoint calls
///
/// Token exchanges should be fast, so this client uses the shorter OAuth timeouts.
#[must_use]
pub fn oauth_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(
        config.oauth_timeout_secs,
        config.oauth_connect_timeout_secs,
        &config.user_agent,
    )
}

/// Create a new HTTP client for Fitbit Web API calls
#[must_use]
pub fn api_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(
        config.timeout_secs,
        config.connect_timeout_secs,
        &config.user_agent,
    )
}
