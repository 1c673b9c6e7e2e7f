// ABOUTME: Fitbit authorizer holding the OAuth2 configuration and the current token
// ABOUTME: Builds authorization URLs, exchanges codes, loads/saves tokens, and creates API clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::client::FitbitClient;
use crate::config::{FitbitConfig, HttpClientConfig};
use crate::constants::fitbit;
use crate::errors::{AppError, AppResult};
use crate::oauth2_client::{
    FileTokenStore, OAuth2Client, OAuth2Config, OAuth2Token, PkceParams, TokenStore,
};
use crate::utils::http_client::{api_client, oauth_client};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Entry point of the library: OAuth2 configuration plus the current token
///
/// ```rust,no_run
/// # use fitbit_api_client::{config::FitbitConfig, Fitbit, models::ApiDate};
/// # async fn example() -> fitbit_api_client::errors::AppResult<()> {
/// let config = FitbitConfig::from_env()?;
/// let mut fitbit = Fitbit::from_config(&config);
/// fitbit.set_token_from_file(&config.token_file).await?;
///
/// let client = fitbit.client()?;
/// let summary = client.activity().daily_activity_summary(ApiDate::Today).await?;
/// println!("{} steps", summary.summary.steps);
/// # Ok(())
/// # }
/// ```
pub struct Fitbit {
    config: Option<OAuth2Config>,
    token: Option<Arc<RwLock<OAuth2Token>>>,
    token_store: Option<Arc<dyn TokenStore>>,
    api_base_url: String,
    accept_language: Option<String>,
    http: HttpClientConfig,
}

impl Default for Fitbit {
    fn default() -> Self {
        Self::new()
    }
}

impl Fitbit {
    /// Authorizer without configuration or token
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            token: None,
            token_store: None,
            api_base_url: fitbit::API_BASE_URL.to_owned(),
            accept_language: None,
            http: HttpClientConfig::default(),
        }
    }

    /// Authorizer configured from `config`, persisting tokens to its token file
    #[must_use]
    pub fn from_config(config: &FitbitConfig) -> Self {
        Self {
            config: Some(config.oauth.clone()),
            token: None,
            token_store: Some(Arc::new(FileTokenStore::new(&config.token_file))),
            api_base_url: config.api_base_url.clone(),
            accept_language: config.accept_language.clone(),
            http: config.http.clone(),
        }
    }

    /// Replace the OAuth2 configuration
    pub fn set_config(&mut self, config: OAuth2Config) {
        self.config = Some(config);
    }

    /// Current OAuth2 configuration
    #[must_use]
    pub const fn config(&self) -> Option<&OAuth2Config> {
        self.config.as_ref()
    }

    /// Send API requests to `api_base_url` instead of the public API
    pub fn set_api_base_url(&mut self, api_base_url: impl Into<String>) {
        self.api_base_url = api_base_url.into();
    }

    /// Persist exchanged and refreshed tokens to `store`
    pub fn set_token_store(&mut self, store: Arc<dyn TokenStore>) {
        self.token_store = Some(store);
    }

    /// Authorization URL the user opens to grant access
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no OAuth2 configuration is set
    pub fn auth_url(&self) -> AppResult<String> {
        self.auth_url_with_state("")
    }

    /// Authorization URL carrying an anti-forgery `state`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no OAuth2 configuration is set
    pub fn auth_url_with_state(&self, state: &str) -> AppResult<String> {
        self.oauth_client()?.authorization_url(state)
    }

    /// Authorization URL with a PKCE challenge (when the configuration enables PKCE)
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no OAuth2 configuration is set
    pub fn auth_url_with_pkce(&self, state: &str, pkce: &PkceParams) -> AppResult<String> {
        self.oauth_client()?.authorization_url_with_pkce(state, pkce)
    }

    /// Load the token from a JSON file and keep writing refreshed tokens there
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read and
    /// `SerializationError` if it does not hold a token
    pub async fn set_token_from_file(&mut self, path: impl AsRef<Path>) -> AppResult<()> {
        let store = Arc::new(FileTokenStore::new(path.as_ref()));
        let token = store.load().await?;
        self.token_store = Some(store);
        self.set_token(token).await;
        info!(path = %path.as_ref().display(), "Loaded Fitbit token from file");
        Ok(())
    }

    /// Load the token from the configured token store
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no store is set, or the store's error
    pub async fn load_token(&mut self) -> AppResult<()> {
        let store = self
            .token_store
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Token store"))?;
        let token = store.load().await?;
        self.set_token(token).await;
        Ok(())
    }

    /// Use `token` for this authorizer and every client it has created
    pub async fn set_token(&mut self, token: OAuth2Token) {
        if let Some(shared) = &self.token {
            *shared.write().await = token;
        } else {
            self.token = Some(Arc::new(RwLock::new(token)));
        }
    }

    /// Snapshot of the current token, including refreshes made by clients
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no token has been set, loaded, or exchanged
    pub async fn token(&self) -> AppResult<OAuth2Token> {
        let shared = self.token.as_ref().ok_or_else(AppError::auth_required)?;
        Ok(shared.read().await.clone())
    }

    /// Write the current token to the token store
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a token, `ConfigMissing` without a
    /// store, or the store's error
    pub async fn save_token(&self) -> AppResult<()> {
        let token = self.token().await?;
        let store = self
            .token_store
            .as_ref()
            .ok_or_else(|| AppError::config_missing("Token store"))?;
        store.save(&token).await
    }

    /// Exchange an authorization code for a token
    ///
    /// The token becomes the current token and is persisted when a token
    /// store is set. It stays current even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no OAuth2 configuration is set, or the
    /// token endpoint / store error
    pub async fn exchange_token(&mut self, code: &str) -> AppResult<OAuth2Token> {
        let token = self.oauth_client()?.exchange_code(code).await?;
        self.store_exchanged(token).await
    }

    /// Exchange an authorization code obtained with a PKCE challenge
    ///
    /// # Errors
    ///
    /// Same as [`Self::exchange_token`]
    pub async fn exchange_token_with_pkce(
        &mut self,
        code: &str,
        pkce: &PkceParams,
    ) -> AppResult<OAuth2Token> {
        let token = self
            .oauth_client()?
            .exchange_code_with_pkce(code, pkce)
            .await?;
        self.store_exchanged(token).await
    }

    async fn store_exchanged(&mut self, token: OAuth2Token) -> AppResult<OAuth2Token> {
        self.set_token(token.clone()).await;
        if let Some(store) = &self.token_store {
            store.save(&token).await?;
        }
        Ok(token)
    }

    /// API client authenticated with the current token
    ///
    /// The client shares the token with this authorizer, so refreshes it
    /// performs are visible to [`Self::token`] and later clients.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no OAuth2 configuration is set and
    /// `AuthRequired` when there is no token
    pub fn client(&self) -> AppResult<FitbitClient> {
        let oauth = self.oauth_client()?;
        let token = self.token.as_ref().ok_or_else(AppError::auth_required)?;
        debug!(api_base_url = %self.api_base_url, "Creating Fitbit API client");

        let mut client = FitbitClient::with_shared_token(Arc::clone(token))
            .with_http_client(api_client(&self.http))
            .with_api_base_url(self.api_base_url.as_str())
            .with_oauth_client(oauth);
        if let Some(store) = &self.token_store {
            client = client.with_token_store(Arc::clone(store));
        }
        if let Some(accept_language) = &self.accept_language {
            client = client.with_accept_language(accept_language.as_str());
        }
        Ok(client)
    }

    fn oauth_client(&self) -> AppResult<OAuth2Client> {
        let config = self
            .config
            .clone()
            .ok_or_else(|| AppError::config_missing("OAuth2 config"))?;
        Ok(OAuth2Client::with_http_client(
            config,
            oauth_client(&self.http),
        ))
    }
}
