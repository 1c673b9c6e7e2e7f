// ABOUTME: Daily activity summary response models for the Fitbit activities endpoint
// ABOUTME: Logged activities, daily goals, per-source distances, and the day summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A single activity logged on the requested day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityData {
    /// Activity type id from the catalog
    pub activity_id: u64,
    /// Parent activity type id
    pub activity_parent_id: u64,
    /// Calories burned
    pub calories: u64,
    /// Free-form description
    pub description: String,
    /// Distance in the unit system selected by `Accept-Language`
    pub distance: f64,
    /// Duration in milliseconds
    pub duration: u64,
    /// Whether `start_time` is meaningful
    pub has_start_time: bool,
    /// Whether the activity type is one of the user's favorites
    pub is_favorite: bool,
    /// Id of this log entry
    pub log_id: u64,
    /// Activity name
    pub name: String,
    /// Local start time (`HH:mm`)
    pub start_time: String,
    /// Steps counted
    pub steps: u64,
}

/// Daily goals configured for the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Goals {
    /// Calories burned goal
    pub calories_out: u64,
    /// Distance goal
    pub distance: f64,
    /// Floors climbed goal
    pub floors: u64,
    /// Steps goal
    pub steps: u64,
}

/// Distance attributed to one activity source (`total`, `tracker`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distance {
    /// Source of the distance
    pub activity: String,
    /// Distance value
    pub distance: f64,
}

/// Totals for the requested day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    /// Calories burned through activity
    pub activity_calories: u64,
    /// Basal metabolic rate calories
    #[serde(rename = "caloriesBMR")]
    pub calories_bmr: u64,
    /// Total calories burned
    pub calories_out: u64,
    /// Distances by source
    pub distances: Vec<Distance>,
    /// Elevation climbed
    pub elevation: f64,
    /// Minutes of fairly active time
    pub fairly_active_minutes: u64,
    /// Floors climbed
    pub floors: u64,
    /// Minutes of lightly active time
    pub lightly_active_minutes: u64,
    /// Marginal calories
    pub marginal_calories: u64,
    /// Minutes of sedentary time
    pub sedentary_minutes: u64,
    /// Steps taken
    pub steps: u64,
    /// Minutes of very active time
    pub very_active_minutes: u64,
}

impl Summary {
    /// Distance reported for the given source, e.g. `total` or `tracker`
    #[must_use]
    pub fn distance_for(&self, activity: &str) -> Option<f64> {
        self.distances
            .iter()
            .find(|d| d.activity == activity)
            .map(|d| d.distance)
    }

    /// Minutes spent lightly, fairly, or very active
    #[must_use]
    pub const fn active_minutes(&self) -> u64 {
        self.lightly_active_minutes + self.fairly_active_minutes + self.very_active_minutes
    }
}

/// Response of the daily activity summary endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityResponse {
    /// Activities logged on the day
    pub activities: Vec<ActivityData>,
    /// The user's daily goals
    pub goals: Goals,
    /// Totals for the day
    pub summary: Summary,
}
