// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, test tokens, OAuth config, and mock-backed clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitbit_api_client`

use chrono::{Duration, Utc};
use fitbit_api_client::oauth2_client::{OAuth2Client, OAuth2Config, OAuth2Token};
use fitbit_api_client::FitbitClient;
use serde_json::{json, Value};
use std::sync::Once;
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

pub const TEST_ACCESS_TOKEN: &str = "test_access_token";
pub const TEST_REFRESH_TOKEN: &str = "test_refresh_token";
pub const TEST_CLIENT_ID: &str = "test_client_id";
pub const TEST_CLIENT_SECRET: &str = "test_client_secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Valid token that expires in an hour
pub fn test_token() -> OAuth2Token {
    OAuth2Token {
        access_token: TEST_ACCESS_TOKEN.to_owned(),
        token_type: "Bearer".to_owned(),
        refresh_token: Some(TEST_REFRESH_TOKEN.to_owned()),
        expires_at: Some(Utc::now() + Duration::hours(1)),
        scope: Some("activity profile".to_owned()),
        user_id: Some("ABC123".to_owned()),
    }
}

/// Token that expires inside the refresh window
pub fn expiring_token() -> OAuth2Token {
    OAuth2Token {
        expires_at: Some(Utc::now() + Duration::minutes(1)),
        ..test_token()
    }
}

/// OAuth config whose endpoints point at `server`
pub fn test_oauth_config(server: &MockServer) -> OAuth2Config {
    OAuth2Config {
        client_id: TEST_CLIENT_ID.to_owned(),
        client_secret: TEST_CLIENT_SECRET.to_owned(),
        auth_url: format!("{}/oauth2/authorize", server.uri()),
        token_url: format!("{}/oauth2/token", server.uri()),
        redirect_uri: "http://localhost:8080/callback".to_owned(),
        scopes: vec!["activity".to_owned(), "profile".to_owned()],
        use_pkce: false,
    }
}

/// API client sending requests to `server` with `token`
pub fn test_client(server: &MockServer, token: OAuth2Token) -> FitbitClient {
    init_test_logging();
    FitbitClient::new(token).with_api_base_url(server.uri())
}

/// API client that can refresh through `server`'s token endpoint
pub fn refreshing_client(server: &MockServer, token: OAuth2Token) -> FitbitClient {
    test_client(server, token).with_oauth_client(OAuth2Client::new(test_oauth_config(server)))
}

/// Body of a successful token endpoint response
pub fn token_response(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "expires_in": 28800,
        "refresh_token": "rotated_refresh_token",
        "scope": "activity profile",
        "token_type": "Bearer",
        "user_id": "ABC123"
    })
}

/// Fitbit error envelope
pub fn fitbit_error(error_type: &str, message: &str) -> Value {
    json!({
        "errors": [{ "errorType": error_type, "message": message }],
        "success": false
    })
}

/// Daily activity summary body
pub fn daily_summary_body() -> Value {
    json!({
        "activities": [{
            "activityId": 90009,
            "activityParentId": 90009,
            "calories": 230,
            "description": "Running - 5 mph (12 min/mile)",
            "distance": 3.1,
            "duration": 1_800_000,
            "hasStartTime": true,
            "isFavorite": false,
            "logId": 12345,
            "name": "Run",
            "startTime": "08:00",
            "steps": 4000
        }],
        "goals": { "caloriesOut": 2826, "distance": 8.05, "floors": 10, "steps": 10000 },
        "summary": {
            "activityCalories": 1200,
            "caloriesBMR": 1700,
            "caloriesOut": 2900,
            "distances": [
                { "activity": "total", "distance": 5.5 },
                { "activity": "tracker", "distance": 5.4 }
            ],
            "elevation": 30.5,
            "fairlyActiveMinutes": 20,
            "floors": 10,
            "lightlyActiveMinutes": 150,
            "marginalCalories": 700,
            "sedentaryMinutes": 900,
            "steps": 12000,
            "veryActiveMinutes": 30
        }
    })
}
