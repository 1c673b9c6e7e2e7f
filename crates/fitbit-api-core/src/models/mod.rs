// ABOUTME: Fitbit activity wire models organized by endpoint family
// ABOUTME: Daily summaries, time series, activity catalog, user lists, and error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitbit Wire Models
//!
//! Typed shapes of the JSON bodies exchanged with the Fitbit Web API. Field names
//! follow Rust conventions and are renamed to Fitbit's camelCase on the wire.
//! Fitbit omits fields freely, so most structs fall back to defaults for
//! anything missing rather than failing the whole response.

/// Daily activity summary models
pub mod activity;
/// Activity catalog and per-user activity lists
pub mod activity_type;
/// Fitbit error response body
pub mod api_error;
/// Time series request parameters and responses
pub mod time_series;

pub use activity::{ActivityData, ActivityResponse, Distance, Goals, Summary};
pub use activity_type::{
    ActivityLevel, ActivityType, BrowseActivityTypesResponse, Category, FavoriteActivity,
    GetActivityTypeResponse, UserActivity,
};
pub use api_error::{FitbitErrorDetail, FitbitErrorResponse};
pub use time_series::{
    ActivitiesLog, ActivitiesLogIntraday, ActivityTimeSeriesResponse, ApiDate, DetailLevel,
    IntradayDataPoint, Period, TimeSeriesResource,
};
