// ABOUTME: Environment-based configuration for the Fitbit client
// ABOUTME: Parses FITBIT_* variables into OAuth, API, token file, and HTTP settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{defaults, env_config, fitbit, http};
use crate::errors::{AppError, AppResult};
use crate::oauth2_client::OAuth2Config;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// HTTP client timeout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// API client request timeout in seconds
    pub timeout_secs: u64,
    /// API client connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// OAuth client request timeout in seconds
    pub oauth_timeout_secs: u64,
    /// OAuth client connect timeout in seconds
    pub oauth_connect_timeout_secs: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::API_TIMEOUT_SECS,
            connect_timeout_secs: http::API_CONNECT_TIMEOUT_SECS,
            oauth_timeout_secs: http::OAUTH_TIMEOUT_SECS,
            oauth_connect_timeout_secs: http::OAUTH_CONNECT_TIMEOUT_SECS,
            user_agent: http::USER_AGENT.to_owned(),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitbitConfig {
    /// OAuth application settings
    pub oauth: OAuth2Config,
    /// Fitbit Web API base URL
    pub api_base_url: String,
    /// Where the OAuth token is persisted
    pub token_file: PathBuf,
    /// `Accept-Language` header selecting the unit system (`en_US`, `en_GB`, ...)
    pub accept_language: Option<String>,
    /// HTTP client settings
    pub http: HttpClientConfig,
}

impl FitbitConfig {
    /// Configuration with Fitbit defaults for everything except the credentials
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            oauth: OAuth2Config::fitbit(client_id, client_secret, fitbit::DEFAULT_REDIRECT_URL),
            api_base_url: fitbit::API_BASE_URL.to_owned(),
            token_file: PathBuf::from(defaults::TOKEN_FILE),
            accept_language: None,
            http: HttpClientConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the client credentials are unset and
    /// `ConfigInvalid` when a URL or number does not parse
    pub fn from_env() -> AppResult<Self> {
        info!("Loading Fitbit configuration from environment variables");

        let mut config = Self::new(
            required_var(env_config::CLIENT_ID)?,
            required_var(env_config::CLIENT_SECRET)?,
        );

        if let Some(redirect_uri) = optional_var(env_config::REDIRECT_URL) {
            config.oauth.redirect_uri = redirect_uri;
        }
        if let Some(auth_url) = optional_var(env_config::AUTH_URL) {
            config.oauth.auth_url = auth_url;
        }
        if let Some(token_url) = optional_var(env_config::TOKEN_URL) {
            config.oauth.token_url = token_url;
        }
        if let Some(scope) = optional_var(env_config::SCOPE) {
            config.oauth.scopes = parse_scopes(&scope);
        }
        config.oauth.use_pkce = parse_var(env_config::USE_PKCE, false)?;

        if let Some(api_base_url) = optional_var(env_config::API_BASE_URL) {
            config.api_base_url = api_base_url;
        }
        if let Some(token_file) = optional_var(env_config::TOKEN_FILE) {
            config.token_file = PathBuf::from(token_file);
        }
        config.accept_language = optional_var(env_config::ACCEPT_LANGUAGE);

        config.http.timeout_secs =
            parse_var(env_config::HTTP_TIMEOUT_SECS, http::API_TIMEOUT_SECS)?;
        config.http.connect_timeout_secs = parse_var(
            env_config::HTTP_CONNECT_TIMEOUT_SECS,
            http::API_CONNECT_TIMEOUT_SECS,
        )?;

        config.validate()?;
        debug!(
            api_base_url = %config.api_base_url,
            token_file = %config.token_file.display(),
            scopes = ?config.oauth.scopes,
            use_pkce = config.oauth.use_pkce,
            "Fitbit configuration loaded"
        );
        Ok(config)
    }

    /// Check that endpoints are absolute URLs and the scope list is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            (env_config::AUTH_URL, &self.oauth.auth_url),
            (env_config::TOKEN_URL, &self.oauth.token_url),
            (env_config::REDIRECT_URL, &self.oauth.redirect_uri),
            (env_config::API_BASE_URL, &self.api_base_url),
        ] {
            Url::parse(value).map_err(|e| {
                AppError::config_invalid(format!("{name} is not a valid URL ({value}): {e}"))
                    .with_source(e)
            })?;
        }

        if self.oauth.scopes.is_empty() {
            return Err(AppError::config_invalid(format!(
                "{} must name at least one scope",
                env_config::SCOPE
            )));
        }

        for (name, secs) in [
            (env_config::HTTP_TIMEOUT_SECS, self.http.timeout_secs),
            (
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                self.http.connect_timeout_secs,
            ),
        ] {
            if secs == 0 {
                return Err(AppError::config_invalid(format!("{name} must be greater than zero")));
            }
        }

        Ok(())
    }
}

/// Parse comma-separated scopes
#[must_use]
pub fn parse_scopes(scopes_str: &str) -> Vec<String> {
    scopes_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Required environment variable; unset and blank are both missing
fn required_var(key: &str) -> AppResult<String> {
    optional_var(key).ok_or_else(|| AppError::config_missing(key))
}

/// Environment variable with surrounding whitespace removed, `None` when blank
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    optional_var(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
    })
}
