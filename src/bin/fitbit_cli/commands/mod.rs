// ABOUTME: Command modules for fitbit-cli
// ABOUTME: Authorization/token commands, activity commands, and JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod activity;
pub mod auth;

use fitbit_api_client::errors::AppResult;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
