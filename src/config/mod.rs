// ABOUTME: Configuration management for the Fitbit client and CLI
// ABOUTME: Loads OAuth credentials, endpoints, token file, and HTTP settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: `FitbitConfig` assembled from `FITBIT_*` variables
//! - **HTTP**: timeouts and user agent for the shared HTTP clients

/// Environment-driven client configuration
pub mod environment;

pub use environment::{parse_scopes, FitbitConfig, HttpClientConfig};
