// ABOUTME: Token persistence for OAuth2 tokens
// ABOUTME: TokenStore trait with JSON file and in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OAuth2Token;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistent storage for the current OAuth2 token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if no token is stored or it cannot be decoded
    async fn load(&self) -> AppResult<OAuth2Token>;

    /// Replace the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded or written
    async fn save(&self, token: &OAuth2Token) -> AppResult<()>;
}

/// Token stored as a JSON file
///
/// The file layout matches Go `oauth2.Token` JSON, so token files written by
/// other tools load unchanged.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> AppResult<OAuth2Token> {
        let contents = fs::read(&self.path).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to read token file {}: {e}",
                self.path.display()
            ))
            .with_source(e)
        })?;

        let token = serde_json::from_slice(&contents).map_err(|e| {
            AppError::serialization(format!(
                "Invalid token file {}: {e}",
                self.path.display()
            ))
            .with_source(e)
        })?;

        debug!(path = %self.path.display(), "Loaded OAuth2 token");
        Ok(token)
    }

    async fn save(&self, token: &OAuth2Token) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!(
                    "Failed to create token directory {}: {e}",
                    parent.display()
                ))
                .with_source(e)
            })?;
        }

        let contents = serde_json::to_vec_pretty(token)?;
        fs::write(&self.path, contents).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to write token file {}: {e}",
                self.path.display()
            ))
            .with_source(e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        debug!(path = %self.path.display(), "Saved OAuth2 token");
        Ok(())
    }
}

/// Token held in memory, for tests and short-lived processes
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<OAuth2Token>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `token`
    #[must_use]
    pub fn with_token(token: OAuth2Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AppResult<OAuth2Token> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(AppError::auth_required)
    }

    async fn save(&self, token: &OAuth2Token) -> AppResult<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }
}
