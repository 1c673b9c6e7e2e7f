// ABOUTME: Utility modules shared by the client, authorizer, and CLI
// ABOUTME: Currently holds the HTTP client builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client configuration and helpers
pub mod http_client;
