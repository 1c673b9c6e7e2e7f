// ABOUTME: Core types and constants for the Fitbit activity API client
// ABOUTME: Foundation crate with error handling, constants, and typed wire models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitbit API Core
//!
//! Shared types for the Fitbit activity client. This crate performs no I/O:
//! it only describes errors, endpoint constants, and the JSON shapes returned
//! by the Fitbit Web API, so it changes rarely and compiles once.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Endpoint, environment, HTTP, and OAuth constants
//! - **models**: Typed request parameters and response bodies

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Fitbit activity wire models
pub mod models;
