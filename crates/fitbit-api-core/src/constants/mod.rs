// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Fitbit endpoints, environment variable names, HTTP and OAuth defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than collected in one flat list.

/// Fitbit Web API endpoints and identifiers
pub mod fitbit {
    /// Provider name used in log fields and error messages
    pub const PROVIDER_NAME: &str = "Fitbit";
    /// Fitbit Web API base URL
    pub const API_BASE_URL: &str = "https://api.fitbit.com";
    /// Fitbit Web API version path segment
    pub const API_VERSION: &str = "1";
    /// OAuth2 authorization endpoint
    pub const AUTH_URL: &str = "https://www.fitbit.com/oauth2/authorize";
    /// OAuth2 token endpoint
    pub const TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";
    /// User id that addresses the owner of the access token
    pub const CURRENT_USER: &str = "-";
    /// Scopes requested when none are configured
    pub const DEFAULT_SCOPES: &[&str] = &["activity", "profile"];
    /// Redirect URI used when none is configured
    pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:8080/callback";
    /// Error type Fitbit reports for an expired access token
    pub const EXPIRED_TOKEN_ERROR: &str = "expired_token";
    /// Error type Fitbit reports for a revoked or malformed token
    pub const INVALID_TOKEN_ERROR: &str = "invalid_token";
    /// Error type Fitbit reports when the token lacks a scope
    pub const INSUFFICIENT_SCOPE_ERROR: &str = "insufficient_scope";
}

/// Environment variable names
pub mod env_config {
    /// OAuth client id
    pub const CLIENT_ID: &str = "FITBIT_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "FITBIT_CLIENT_SECRET";
    /// OAuth redirect URI
    pub const REDIRECT_URL: &str = "FITBIT_REDIRECT_URL";
    /// OAuth authorization endpoint override
    pub const AUTH_URL: &str = "FITBIT_AUTH_URL";
    /// OAuth token endpoint override
    pub const TOKEN_URL: &str = "FITBIT_TOKEN_URL";
    /// Comma-separated OAuth scopes
    pub const SCOPE: &str = "FITBIT_SCOPE";
    /// Enable PKCE for the authorization code flow
    pub const USE_PKCE: &str = "FITBIT_USE_PKCE";
    /// API base URL override
    pub const API_BASE_URL: &str = "FITBIT_API_BASE_URL";
    /// Token file path
    pub const TOKEN_FILE: &str = "FITBIT_TOKEN_FILE";
    /// `Accept-Language` header selecting the unit system
    pub const ACCEPT_LANGUAGE: &str = "FITBIT_ACCEPT_LANGUAGE";
    /// API request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "FITBIT_HTTP_TIMEOUT_SECS";
    /// API connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "FITBIT_HTTP_CONNECT_TIMEOUT_SECS";
}

/// Defaults for local files
pub mod defaults {
    /// Token file used when `FITBIT_TOKEN_FILE` is not set
    pub const TOKEN_FILE: &str = "token.json";
}

/// HTTP client defaults
pub mod http {
    /// API request timeout in seconds
    pub const API_TIMEOUT_SECS: u64 = 60;
    /// API connect timeout in seconds
    pub const API_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Token endpoint request timeout in seconds
    pub const OAUTH_TIMEOUT_SECS: u64 = 15;
    /// Token endpoint connect timeout in seconds
    pub const OAUTH_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("fitbit-api-client/", env!("CARGO_PKG_VERSION"));
}

/// OAuth flow constants
pub mod oauth {
    /// Length of the generated PKCE code verifier (RFC 7636 allows 43-128)
    pub const CODE_VERIFIER_LENGTH: usize = 128;
    /// PKCE challenge method
    pub const CODE_CHALLENGE_METHOD: &str = "S256";
    /// Refresh tokens this many seconds before they expire
    pub const REFRESH_SKEW_SECS: i64 = 300;
    /// Token lifetime assumed when `expires_in` is too large to represent
    pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 28_800;
    /// Token type used when the endpoint omits it
    pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
}
