// ABOUTME: OAuth2 client implementation for Fitbit authorization code and refresh flows
// ABOUTME: Token types with Go-compatible persistence, PKCE generation, and token endpoint calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use crate::constants::{fitbit, oauth};
use crate::errors::{AppError, AppResult};
use crate::models::FitbitErrorResponse;
use crate::utils::http_client::oauth_client;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};
use url::Url;

/// OAuth 2.0 client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// OAuth client ID from the Fitbit developer console
    pub client_id: String,
    /// OAuth client secret from the Fitbit developer console
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Redirect URI for OAuth callbacks
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
    /// Whether to use PKCE for enhanced security
    pub use_pkce: bool,
}

impl OAuth2Config {
    /// Configuration pointing at the Fitbit endpoints with the default scopes
    pub fn fitbit(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: fitbit::AUTH_URL.to_owned(),
            token_url: fitbit::TOKEN_URL.to_owned(),
            redirect_uri: redirect_uri.into(),
            scopes: fitbit::DEFAULT_SCOPES
                .iter()
                .map(|&scope| scope.to_owned())
                .collect(),
            use_pkce: false,
        }
    }
}

/// `PKCE` (Proof Key for Code Exchange) parameters for enhanced `OAuth2` security
#[derive(Debug, Clone)]
pub struct PkceParams {
    /// Randomly generated code verifier (43-128 characters)
    pub code_verifier: String,
    /// SHA256 hash of code verifier, base64url encoded
    pub code_challenge: String,
    /// Challenge method (always "S256" for SHA256)
    pub code_challenge_method: String,
}

impl PkceParams {
    /// Generate `PKCE` parameters with `S256` challenge method
    #[must_use]
    pub fn generate() -> Self {
        const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        let mut rng = rand::thread_rng();
        let code_verifier: String = (0..oauth::CODE_VERIFIER_LENGTH)
            .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
            .collect();

        Self::from_verifier(code_verifier)
    }

    /// Derive the `S256` challenge for an existing verifier
    #[must_use]
    pub fn from_verifier(code_verifier: String) -> Self {
        let hash = Sha256::digest(code_verifier.as_bytes());
        Self {
            code_challenge: URL_SAFE_NO_PAD.encode(hash),
            code_verifier,
            code_challenge_method: oauth::CODE_CHALLENGE_METHOD.to_owned(),
        }
    }
}

/// OAuth 2.0 access token with expiration and refresh capabilities
///
/// Serialized with the field names used by Go's `golang.org/x/oauth2` token
/// files: the expiry lives under `expiry` and the zero time means the token
/// never expires.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// The access token string
    pub access_token: String,
    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Optional refresh token for getting new access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiration timestamp (UTC)
    #[serde(
        rename = "expiry",
        alias = "expires_at",
        default,
        deserialize_with = "deserialize_expiry",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted OAuth scopes, space separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Fitbit user the token belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl OAuth2Token {
    /// Bearer token without expiry or refresh token
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: None,
            expires_at: None,
            scope: None,
            user_id: None,
        }
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }

    /// Check if the token will expire within 5 minutes
    #[must_use]
    pub fn will_expire_soon(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at <= Utc::now() + Duration::seconds(oauth::REFRESH_SKEW_SECS)
        })
    }

    /// Whether a non-empty refresh token is present
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

impl std::fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .field("user_id", &self.user_id)
            .finish()
    }
}

fn default_token_type() -> String {
    oauth::DEFAULT_TOKEN_TYPE.to_owned()
}

/// Accept RFC 3339 timestamps, treating Go's zero time (year 1) as "no expiry"
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let expiry = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(expiry.filter(|expires_at| expires_at.year() > 1))
}

/// OAuth 2.0 client for the Fitbit token endpoint
pub struct OAuth2Client {
    config: OAuth2Config,
    client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a new `OAuth2` client with the given configuration
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_http_client(config, oauth_client(&HttpClientConfig::default()))
    }

    /// Create a client that sends token requests through `client`
    #[must_use]
    pub const fn with_http_client(config: OAuth2Config, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Get authorization URL
    ///
    /// The `state` parameter is omitted when `state` is empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the authorization URL is malformed
    pub fn authorization_url(&self, state: &str) -> AppResult<String> {
        self.build_authorization_url(state, None)
    }

    /// Get authorization `URL` with `PKCE` support
    ///
    /// The challenge is only added when the configuration enables PKCE.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the authorization URL is malformed
    pub fn authorization_url_with_pkce(&self, state: &str, pkce: &PkceParams) -> AppResult<String> {
        self.build_authorization_url(state, Some(pkce))
    }

    fn build_authorization_url(&self, state: &str, pkce: Option<&PkceParams>) -> AppResult<String> {
        let mut url = Url::parse(&self.config.auth_url).map_err(|e| {
            AppError::config_invalid(format!("Invalid auth URL {}: {e}", self.config.auth_url))
        })?;

        {
            let mut query_pairs = url.query_pairs_mut();
            query_pairs
                .append_pair("client_id", &self.config.client_id)
                .append_pair("redirect_uri", &self.config.redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", &self.config.scopes.join(" "));

            if !state.is_empty() {
                query_pairs.append_pair("state", state);
            }

            if let Some(pkce) = pkce.filter(|_| self.config.use_pkce) {
                query_pairs
                    .append_pair("code_challenge", &pkce.code_challenge)
                    .append_pair("code_challenge_method", &pkce.code_challenge_method);
            }
        }

        Ok(url.to_string())
    }

    /// Exchange authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the token endpoint rejects the code,
    /// or a transport error if the request fails
    pub async fn exchange_code(&self, code: &str) -> AppResult<OAuth2Token> {
        self.exchange(code, None).await
    }

    /// Exchange authorization code with `PKCE` support
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the token endpoint rejects the code,
    /// or a transport error if the request fails
    pub async fn exchange_code_with_pkce(
        &self,
        code: &str,
        pkce: &PkceParams,
    ) -> AppResult<OAuth2Token> {
        self.exchange(code, Some(pkce)).await
    }

    async fn exchange(&self, code: &str, pkce: Option<&PkceParams>) -> AppResult<OAuth2Token> {
        if code.is_empty() {
            return Err(AppError::invalid_input("Authorization code is empty"));
        }

        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        if let Some(pkce) = pkce.filter(|_| self.config.use_pkce) {
            params.push(("code_verifier", pkce.code_verifier.as_str()));
        }

        let token = self.request_token(&params).await?;
        info!(user_id = ?token.user_id, "Exchanged authorization code for Fitbit token");
        Ok(token)
    }

    /// Refresh an expired access token
    ///
    /// Keeps `refresh_token` on the returned token when the endpoint does
    /// not rotate it.
    ///
    /// # Errors
    ///
    /// Returns `ExternalAuthFailed` if the token endpoint rejects the refresh
    /// token, or a transport error if the request fails
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<OAuth2Token> {
        if refresh_token.is_empty() {
            return Err(AppError::invalid_input("Refresh token is empty"));
        }

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let mut token = self.request_token(&params).await?;
        if !token.can_refresh() {
            token.refresh_token = Some(refresh_token.to_owned());
        }
        info!(user_id = ?token.user_id, "Refreshed Fitbit access token");
        Ok(token)
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> AppResult<OAuth2Token> {
        debug!(token_url = %self.config.token_url, "Requesting OAuth2 token");

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = token_error_message(&body)
                .unwrap_or_else(|| format!("Token endpoint returned {status}"));
            error!(status = status.as_u16(), "OAuth2 token request failed: {message}");
            return Err(AppError::external_auth(message).with_status_code(status.as_u16()));
        }

        let response: TokenResponse = response.json().await?;
        Ok(Self::token_from_response(response))
    }

    #[must_use]
    fn token_from_response(response: TokenResponse) -> OAuth2Token {
        let expires_at = response.expires_in.map(|seconds| {
            let now = Utc::now();
            i64::try_from(seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .unwrap_or_else(|| now + Duration::seconds(oauth::DEFAULT_TOKEN_EXPIRY_SECS))
        });

        OAuth2Token {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(default_token_type),
            refresh_token: response.refresh_token.filter(|token| !token.is_empty()),
            expires_at,
            scope: response.scope,
            user_id: response.user_id,
        }
    }
}

/// Extract a readable message from a token endpoint error body
///
/// Fitbit answers with its own `errors` envelope; other servers use the
/// RFC 6749 `error` / `error_description` pair.
fn token_error_message(body: &str) -> Option<String> {
    let fitbit_error = FitbitErrorResponse::parse(body);
    if let Some(detail) = fitbit_error.as_ref().and_then(FitbitErrorResponse::first) {
        return Some(format!("{}: {}", detail.error_type, detail.message));
    }

    let oauth_error: OAuthErrorBody = serde_json::from_str(body).ok()?;
    Some(match oauth_error.error_description {
        Some(description) => format!("{}: {description}", oauth_error.error),
        None => oauth_error.error,
    })
}

/// OAuth 2.0 token response from Fitbit
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    scope: Option<String>,
    user_id: Option<String>,
}

/// RFC 6749 error response
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(use_pkce: bool) -> OAuth2Client {
        let mut config = OAuth2Config::fitbit("client123", "secret", "http://localhost/cb");
        config.use_pkce = use_pkce;
        OAuth2Client::new(config)
    }

    #[test]
    fn test_pkce_challenge_matches_rfc7636_vector() {
        let pkce =
            PkceParams::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_owned());
        assert_eq!(
            pkce.code_challenge,
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
        assert_eq!(pkce.code_challenge_method, "S256");
    }

    #[test]
    fn test_pkce_generate_length() {
        let pkce = PkceParams::generate();
        assert_eq!(pkce.code_verifier.len(), oauth::CODE_VERIFIER_LENGTH);
        assert!(!pkce.code_challenge.contains('='));
    }

    #[test]
    fn test_authorization_url_without_state() {
        let url = test_client(false).authorization_url("").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();

        assert!(url.starts_with(fitbit::AUTH_URL));
        assert!(pairs.contains(&("client_id".into(), "client123".into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("scope".into(), "activity profile".into())));
        assert!(!pairs.iter().any(|(key, _)| key == "state"));
    }

    #[test]
    fn test_authorization_url_pkce_only_when_enabled() {
        let pkce = PkceParams::generate();
        let disabled = test_client(false)
            .authorization_url_with_pkce("xyz", &pkce)
            .unwrap();
        assert!(!disabled.contains("code_challenge"));
        assert!(disabled.contains("state=xyz"));

        let enabled = test_client(true)
            .authorization_url_with_pkce("xyz", &pkce)
            .unwrap();
        assert!(enabled.contains(&format!("code_challenge={}", pkce.code_challenge)));
        assert!(enabled.contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_invalid_auth_url() {
        let mut config = OAuth2Config::fitbit("id", "secret", "http://localhost/cb");
        config.auth_url = "not a url".to_owned();
        let error = OAuth2Client::new(config).authorization_url("").unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_token_expiry_checks() {
        let mut token = OAuth2Token::bearer("abc");
        assert!(!token.is_expired());
        assert!(!token.will_expire_soon());

        token.expires_at = Some(Utc::now() + Duration::minutes(2));
        assert!(!token.is_expired());
        assert!(token.will_expire_soon());

        token.expires_at = Some(Utc::now() - Duration::seconds(1));
        assert!(token.is_expired());
    }

    #[test]
    fn test_zero_expiry_means_no_expiry() {
        let token: OAuth2Token = serde_json::from_str(
            r#"{"access_token":"abc","token_type":"Bearer","expiry":"0001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(token.expires_at, None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_serializes_expiry_field() {
        let mut token = OAuth2Token::bearer("abc");
        token.expires_at = Some("2030-01-02T03:04:05Z".parse().unwrap());
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["expiry"], "2030-01-02T03:04:05Z");
        assert!(value.get("expires_at").is_none());
        assert!(value.get("refresh_token").is_none());
    }

    #[test]
    fn test_can_refresh_ignores_empty_token() {
        let mut token = OAuth2Token::bearer("abc");
        token.refresh_token = Some(String::new());
        assert!(!token.can_refresh());
        token.refresh_token = Some("refresh".to_owned());
        assert!(token.can_refresh());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut token = OAuth2Token::bearer("very-secret");
        token.refresh_token = Some("also-secret".to_owned());
        let debug = format!("{token:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
    }

    #[test]
    fn test_token_error_message_formats() {
        let fitbit_body = r#"{"errors":[{"errorType":"invalid_grant","message":"Authorization code invalid"}],"success":false}"#;
        assert_eq!(
            token_error_message(fitbit_body).as_deref(),
            Some("invalid_grant: Authorization code invalid")
        );

        let oauth_body = r#"{"error":"invalid_client","error_description":"bad secret"}"#;
        assert_eq!(
            token_error_message(oauth_body).as_deref(),
            Some("invalid_client: bad secret")
        );

        assert_eq!(token_error_message("<html>"), None);
    }
}
