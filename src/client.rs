// ABOUTME: Authenticated HTTP transport for the Fitbit Web API
// ABOUTME: Bearer token injection, expiry-driven refresh, and status-to-error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::activity::ActivityApi;
use crate::config::HttpClientConfig;
use crate::constants::fitbit;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::FitbitErrorResponse;
use crate::oauth2_client::{OAuth2Client, OAuth2Token, TokenStore};
use crate::utils::http_client::api_client;
use bytes::Bytes;
use reqwest::header::{HeaderMap, ACCEPT_LANGUAGE, RETRY_AFTER};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Header Fitbit uses to report seconds until the rate limit window resets
const RATE_LIMIT_RESET_HEADER: &str = "fitbit-rate-limit-reset";

/// HTTP client for the Fitbit Web API
///
/// Every request carries the current access token as a bearer credential.
/// When the token is about to expire and both a refresh token and an
/// [`OAuth2Client`] are available, the token is refreshed before the request
/// and written to the configured [`TokenStore`].
pub struct FitbitClient {
    http: Client,
    api_base_url: String,
    token: Arc<RwLock<OAuth2Token>>,
    oauth: Option<OAuth2Client>,
    token_store: Option<Arc<dyn TokenStore>>,
    accept_language: Option<String>,
}

impl FitbitClient {
    /// Client for the public Fitbit API using `token`
    #[must_use]
    pub fn new(token: OAuth2Token) -> Self {
        Self::with_shared_token(Arc::new(RwLock::new(token)))
    }

    /// Client reading and refreshing a token shared with its owner
    #[must_use]
    pub fn with_shared_token(token: Arc<RwLock<OAuth2Token>>) -> Self {
        Self {
            http: api_client(&HttpClientConfig::default()),
            api_base_url: fitbit::API_BASE_URL.to_owned(),
            token,
            oauth: None,
            token_store: None,
            accept_language: None,
        }
    }

    /// Send requests to `api_base_url` instead of the public API
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Enable token refresh through `oauth`
    #[must_use]
    pub fn with_oauth_client(mut self, oauth: OAuth2Client) -> Self {
        self.oauth = Some(oauth);
        self
    }

    /// Persist refreshed tokens to `store`
    #[must_use]
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Send `Accept-Language` with every request (selects the unit system)
    #[must_use]
    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = Some(accept_language.into());
        self
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Activity endpoints
    #[must_use]
    pub const fn activity(&self) -> ActivityApi<'_> {
        ActivityApi::new(self)
    }

    /// Snapshot of the current token
    pub async fn token(&self) -> OAuth2Token {
        self.token.read().await.clone()
    }

    /// Absolute URL for an API path such as `1/activities.json`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// GET `url` and return the raw response body
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be refreshed, the request fails,
    /// or Fitbit answers with a non-success status
    pub async fn get(&self, url: &str) -> AppResult<Bytes> {
        let response = self.send(Method::GET, url).await?;
        Ok(response.bytes().await?)
    }

    /// GET `url` and decode the JSON body into `T`
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`], plus `SerializationError` if the body does not
    /// match `T`
    pub async fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.get(url).await?;
        serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to parse JSON response from {url}: {e}");
            AppError::serialization(format!("Failed to parse Fitbit response: {e}")).with_source(e)
        })
    }

    /// POST to `url` without a body
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`]
    pub async fn post(&self, url: &str) -> AppResult<()> {
        self.send(Method::POST, url).await.map(drop)
    }

    /// DELETE `url`
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`]
    pub async fn delete(&self, url: &str) -> AppResult<()> {
        self.send(Method::DELETE, url).await.map(drop)
    }

    /// Refresh the token if it expires within the refresh window
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired` if the token has expired and cannot be
    /// refreshed, or the refresh/persist error otherwise
    pub async fn refresh_if_needed(&self) -> AppResult<()> {
        self.current_token().await.map(drop)
    }

    async fn current_token(&self) -> AppResult<OAuth2Token> {
        {
            let token = self.token.read().await;
            if !token.will_expire_soon() {
                return Ok(token.clone());
            }
        }

        let mut token = self.token.write().await;
        // Another request may have refreshed while we waited for the lock
        if !token.will_expire_soon() {
            return Ok(token.clone());
        }

        let (oauth, refresh_token) = match (&self.oauth, token.refresh_token.as_deref()) {
            (Some(oauth), Some(refresh_token)) if !refresh_token.is_empty() => {
                (oauth, refresh_token.to_owned())
            }
            _ if token.is_expired() => {
                return Err(AppError::auth_expired(
                    "Access token expired and no refresh token or OAuth2 config is available",
                ));
            }
            _ => {
                warn!("Fitbit access token expires soon and cannot be refreshed");
                return Ok(token.clone());
            }
        };

        info!("Refreshing Fitbit access token");
        let refreshed = oauth.refresh_token(&refresh_token).await?;
        *token = refreshed.clone();

        if let Some(store) = &self.token_store {
            store.save(&refreshed).await?;
        }

        Ok(refreshed)
    }

    async fn send(&self, method: Method, url: &str) -> AppResult<Response> {
        let token = self.current_token().await?;

        debug!("Making HTTP {method} request to: {url}");
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&token.access_token);
        if let Some(accept_language) = &self.accept_language {
            request = request.header(ACCEPT_LANGUAGE, accept_language);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Received HTTP response with status: {status}");

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = retry_after_secs(response.headers());
        let text = response.text().await.unwrap_or_default();
        Err(Self::handle_api_error(status, retry_after, &text, url))
    }

    /// Map a non-success response to an error carrying the received status
    fn handle_api_error(
        status: StatusCode,
        retry_after: Option<u64>,
        text: &str,
        url: &str,
    ) -> AppError {
        error!(
            "Fitbit API request failed - status: {status}, url: {url}, body_length: {} bytes",
            text.len()
        );

        let error_response = FitbitErrorResponse::parse(text);
        let detail = error_response
            .as_ref()
            .and_then(FitbitErrorResponse::first);
        let message = detail.map_or_else(
            || format!("Fitbit API request failed with status {status}"),
            |detail| match detail.error_type.as_str() {
                fitbit::INSUFFICIENT_SCOPE_ERROR => {
                    format!("Insufficient permissions: {}", detail.message)
                }
                _ => detail.message.clone(),
            },
        );
        let expired = error_response
            .as_ref()
            .is_some_and(|e| e.has_error_type(fitbit::EXPIRED_TOKEN_ERROR));

        let error = match status {
            StatusCode::UNAUTHORIZED if expired => AppError::auth_expired(message),
            StatusCode::UNAUTHORIZED => AppError::auth_invalid(message),
            StatusCode::FORBIDDEN => AppError::permission_denied(message),
            StatusCode::NOT_FOUND => AppError::new(ErrorCode::ResourceNotFound, message),
            StatusCode::TOO_MANY_REQUESTS => AppError::rate_limited(retry_after),
            _ if status.is_server_error() => {
                AppError::external_unavailable(fitbit::PROVIDER_NAME, message)
            }
            _ => AppError::external_service(fitbit::PROVIDER_NAME, message),
        };

        error.with_status_code(status.as_u16())
    }
}

/// Seconds to wait before retrying, from `Retry-After` or Fitbit's reset header
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    [RETRY_AFTER.as_str(), RATE_LIMIT_RESET_HEADER]
        .into_iter()
        .find_map(|name| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok())
        })
}
