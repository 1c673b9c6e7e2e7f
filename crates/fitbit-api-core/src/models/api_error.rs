// ABOUTME: Fitbit error response body returned with non-success statuses
// ABOUTME: Used by the API client and the token endpoint to surface vendor messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Error body Fitbit returns alongside 4xx/5xx statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitbitErrorResponse {
    /// Reported errors, most relevant first
    pub errors: Vec<FitbitErrorDetail>,
    /// Always `false` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// One entry of [`FitbitErrorResponse::errors`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitbitErrorDetail {
    /// Machine-readable error type, e.g. `expired_token`
    pub error_type: String,
    /// Request field the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl FitbitErrorResponse {
    /// Parse an error body, returning `None` when it is not Fitbit's format
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|response| !response.errors.is_empty())
    }

    /// The first reported error
    #[must_use]
    pub fn first(&self) -> Option<&FitbitErrorDetail> {
        self.errors.first()
    }

    /// Whether any reported error has the given type
    #[must_use]
    pub fn has_error_type(&self, error_type: &str) -> bool {
        self.errors.iter().any(|e| e.error_type == error_type)
    }
}
