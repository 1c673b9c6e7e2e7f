// ABOUTME: Main library entry point for the Fitbit Web API client
// ABOUTME: OAuth2 authorization, token persistence, and typed activity endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitbit API Client
//!
//! A typed client for the Fitbit Web API (v1) activity endpoints.
//!
//! ## Features
//!
//! - **`OAuth2` authorization code flow**: authorization URLs, code exchange, optional PKCE
//! - **Token persistence**: JSON token files compatible with Go `oauth2.Token`
//! - **Automatic refresh**: tokens are refreshed before they expire and written back
//! - **Typed endpoints**: daily summaries, time series, activity catalog, favorites
//!
//! ## Architecture
//!
//! - **`Fitbit`**: holds the OAuth2 configuration and the current token
//! - **`FitbitClient`**: authenticated HTTP transport with error mapping
//! - **`ActivityApi`**: one method per activity endpoint, returning typed models
//! - **Models, errors, constants**: re-exported from `fitbit-api-core`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitbit_api_client::config::FitbitConfig;
//! use fitbit_api_client::errors::AppResult;
//! use fitbit_api_client::models::{ApiDate, Period, TimeSeriesResource};
//! use fitbit_api_client::Fitbit;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = FitbitConfig::from_env()?;
//!     let mut fitbit = Fitbit::from_config(&config);
//!     fitbit.set_token_from_file(&config.token_file).await?;
//!
//!     let client = fitbit.client()?;
//!     let steps = client
//!         .activity()
//!         .activity_time_series(ApiDate::Today, Period::SevenDays, TimeSeriesResource::Steps)
//!         .await?;
//!     println!("{} steps this week", steps.total());
//!     Ok(())
//! }
//! ```

/// Activity endpoints
pub mod activity;
/// Authenticated HTTP transport
pub mod client;
/// Environment-driven configuration
pub mod config;
/// OAuth2 authorizer
pub mod fitbit;
/// Structured logging setup
pub mod logging;
/// OAuth2 client and token persistence
pub mod oauth2_client;
/// Shared utilities
pub mod utils;

pub use fitbit_api_core::{constants, errors, models};

pub use activity::ActivityApi;
pub use client::FitbitClient;
pub use fitbit::Fitbit;
