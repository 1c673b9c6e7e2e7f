// ABOUTME: Activity catalog models and per-user activity list models
// ABOUTME: Activity types, levels, categories, frequent/recent entries, and favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Intensity level of an activity type, usually bounded by speed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLevel {
    /// Level id, usable as an activity id when logging
    pub id: u64,
    /// Upper speed bound in miles per hour
    #[serde(rename = "maxSpeedMPH")]
    pub max_speed_mph: f64,
    /// Lower speed bound in miles per hour
    #[serde(rename = "minSpeedMPH")]
    pub min_speed_mph: f64,
    /// Metabolic equivalent of the level
    pub mets: f64,
    /// Level name
    pub name: String,
}

/// Activity type from the public catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityType {
    /// `PUBLIC` for catalog entries, `PRIVATE` for user-defined ones
    pub access_level: String,
    /// Intensity levels, empty when the type has none
    pub activity_levels: Vec<ActivityLevel>,
    /// Whether logging this type accepts a distance
    pub has_speed: bool,
    /// Activity type id
    pub id: u64,
    /// Activity name
    pub name: String,
    /// Metabolic equivalent, absent for types that only have levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mets: Option<f64>,
}

/// Catalog category, possibly nested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    /// Category id
    pub id: u64,
    /// Category name
    pub name: String,
    /// Activity types directly in this category
    pub activities: Vec<ActivityType>,
    /// Nested categories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_categories: Vec<Category>,
}

impl Category {
    fn collect_activities<'a>(&'a self, out: &mut Vec<&'a ActivityType>) {
        out.extend(self.activities.iter());
        for sub in &self.sub_categories {
            sub.collect_activities(out);
        }
    }
}

/// Response of the browse activity types endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseActivityTypesResponse {
    /// Top-level categories
    pub categories: Vec<Category>,
}

impl BrowseActivityTypesResponse {
    /// Every activity type in the catalog, depth first through sub-categories
    #[must_use]
    pub fn activity_types(&self) -> Vec<&ActivityType> {
        let mut out = Vec::new();
        for category in &self.categories {
            category.collect_activities(&mut out);
        }
        out
    }

    /// First activity type whose name matches, ignoring ASCII case
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ActivityType> {
        self.activity_types()
            .into_iter()
            .find(|activity| activity.name.eq_ignore_ascii_case(name))
    }
}

/// Response of the get activity type endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetActivityTypeResponse {
    /// The requested activity type
    pub activity: ActivityType,
}

/// Entry of the frequent or recent activities list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserActivity {
    /// Activity type id
    pub activity_id: u64,
    /// Calories burned
    pub calories: u64,
    /// Free-form description
    pub description: String,
    /// Distance
    pub distance: f64,
    /// Duration in milliseconds
    pub duration: u64,
    /// Activity name
    pub name: String,
    /// Last day the activity was logged (recent list only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
}

/// Entry of the favorite activities list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FavoriteActivity {
    /// Activity type id
    pub activity_id: u64,
    /// Free-form description
    pub description: String,
    /// Metabolic equivalent
    pub mets: f64,
    /// Activity name
    pub name: String,
}
