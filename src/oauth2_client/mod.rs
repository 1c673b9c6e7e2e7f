// ABOUTME: OAuth 2.0 client implementation for connecting to the Fitbit Web API
// ABOUTME: Authorization URLs, code exchange, token refresh, and token persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The client acts as an OAuth 2.0 client of Fitbit on behalf of one user:
//! - authorization code flow, optionally with PKCE
//! - token refresh through the token endpoint
//! - token persistence through a [`TokenStore`]

/// Core OAuth 2.0 client implementation
pub mod client;
/// Token persistence
pub mod token_store;

pub use client::{OAuth2Client, OAuth2Config, OAuth2Token, PkceParams};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
