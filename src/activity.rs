// ABOUTME: Typed Fitbit activity endpoints built on the authenticated client
// ABOUTME: Daily summaries, time series, activity catalog, frequent/recent lists, and favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity API
//!
//! Methods without a user id address the owner of the access token (`-`).
//! User and activity ids are percent-encoded into the path; empty ids are
//! rejected before a request is sent.

use crate::client::FitbitClient;
use crate::constants::fitbit::{API_VERSION, CURRENT_USER};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityResponse, ActivityTimeSeriesResponse, ApiDate, BrowseActivityTypesResponse,
    DetailLevel, FavoriteActivity, GetActivityTypeResponse, Period, TimeSeriesResource,
    UserActivity,
};
use tracing::{debug, instrument};

/// Activity resource of the Fitbit Web API
#[derive(Clone, Copy)]
pub struct ActivityApi<'a> {
    client: &'a FitbitClient,
}

impl<'a> ActivityApi<'a> {
    /// Activity endpoints sent through `client`
    #[must_use]
    pub const fn new(client: &'a FitbitClient) -> Self {
        Self { client }
    }

    /// Daily activity summary of the current user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn daily_activity_summary(&self, date: ApiDate) -> AppResult<ActivityResponse> {
        self.daily_activity_summary_by_id(CURRENT_USER, date).await
    }

    /// Daily activity summary of `user_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty user id, otherwise an error if the
    /// request fails or the body does not decode
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "daily_activity_summary"))]
    pub async fn daily_activity_summary_by_id(
        &self,
        user_id: &str,
        date: ApiDate,
    ) -> AppResult<ActivityResponse> {
        let path = daily_summary_path(user_id, date)?;
        self.client.get_json(&self.client.url(&path)).await
    }

    /// Time series of `resource` for the current user over `period` ending at `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body lacks the series
    pub async fn activity_time_series(
        &self,
        date: ApiDate,
        period: Period,
        resource: TimeSeriesResource,
    ) -> AppResult<ActivityTimeSeriesResponse> {
        self.activity_time_series_by_id(CURRENT_USER, date, period, resource)
            .await
    }

    /// Time series of `resource` for `user_id` over `period` ending at `date`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty user id, otherwise an error if the
    /// request fails or the body lacks the series
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "activity_time_series"))]
    pub async fn activity_time_series_by_id(
        &self,
        user_id: &str,
        date: ApiDate,
        period: Period,
        resource: TimeSeriesResource,
    ) -> AppResult<ActivityTimeSeriesResponse> {
        let path = time_series_path(user_id, resource, &date.to_string(), period.as_str())?;
        self.time_series(&path, resource).await
    }

    /// Time series of `resource` for the current user between two dates, inclusive
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `end` precedes `start`, otherwise an error
    /// if the request fails or the body lacks the series
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "activity_time_series_range"))]
    pub async fn activity_time_series_range(
        &self,
        start: ApiDate,
        end: ApiDate,
        resource: TimeSeriesResource,
    ) -> AppResult<ActivityTimeSeriesResponse> {
        if let (ApiDate::Date(start), ApiDate::Date(end)) = (start, end) {
            if end < start {
                return Err(AppError::invalid_input(format!(
                    "End date {end} is before start date {start}"
                )));
            }
        }

        let path = time_series_path(CURRENT_USER, resource, &start.to_string(), &end.to_string())?;
        self.time_series(&path, resource).await
    }

    /// Intraday series of `resource` for one day of the current user
    ///
    /// Fitbit only serves intraday data to personal apps or approved clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body lacks the series
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "intraday_time_series"))]
    pub async fn intraday_time_series(
        &self,
        date: ApiDate,
        resource: TimeSeriesResource,
        detail: DetailLevel,
    ) -> AppResult<ActivityTimeSeriesResponse> {
        let path = time_series_path(
            CURRENT_USER,
            resource,
            &date.to_string(),
            &format!("{}/{}", Period::OneDay, detail),
        )?;
        self.time_series(&path, resource).await
    }

    /// The full activity catalog as a category tree
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "browse_activity_types"))]
    pub async fn browse_activity_types(&self) -> AppResult<BrowseActivityTypesResponse> {
        let url = self.client.url(&format!("{API_VERSION}/activities.json"));
        self.client.get_json(&url).await
    }

    /// Details of one catalog activity
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, `ResourceNotFound` for an
    /// unknown one, or an error if the request fails
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "get_activity_type"))]
    pub async fn get_activity_type(&self, activity_id: &str) -> AppResult<GetActivityTypeResponse> {
        let activity_id = path_segment("activity id", activity_id)?;
        let url = self
            .client
            .url(&format!("{API_VERSION}/activities/{activity_id}.json"));
        self.client.get_json(&url).await
    }

    /// Activities the current user logs most often
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "get_frequent_activities"))]
    pub async fn get_frequent_activities(&self) -> AppResult<Vec<UserActivity>> {
        let path = user_path(CURRENT_USER, "activities/frequent.json")?;
        self.client.get_json(&self.client.url(&path)).await
    }

    /// Activities the current user logged recently
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "get_recent_activities"))]
    pub async fn get_recent_activities(&self) -> AppResult<Vec<UserActivity>> {
        let path = user_path(CURRENT_USER, "activities/recent.json")?;
        self.client.get_json(&self.client.url(&path)).await
    }

    /// Favorite activities of the current user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn get_favorite_activities(&self) -> AppResult<Vec<FavoriteActivity>> {
        self.get_favorite_activities_by_id(CURRENT_USER).await
    }

    /// Favorite activities of `user_id`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty user id, otherwise an error if the
    /// request fails or the body does not decode
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "get_favorite_activities"))]
    pub async fn get_favorite_activities_by_id(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<FavoriteActivity>> {
        let path = user_path(user_id, "activities/favorite.json")?;
        self.client.get_json(&self.client.url(&path)).await
    }

    /// Mark a catalog activity as a favorite of the current user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, or an error if Fitbit rejects
    /// the request
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "add_favorite_activity"))]
    pub async fn add_favorite_activity(&self, activity_id: &str) -> AppResult<()> {
        let url = self.client.url(&favorite_path(activity_id)?);
        self.client.post(&url).await?;
        debug!("Added favorite activity {activity_id}");
        Ok(())
    }

    /// Remove a catalog activity from the current user's favorites
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, or an error if Fitbit rejects
    /// the request
    #[instrument(skip(self), fields(provider = "fitbit", api_call = "delete_favorite_activity"))]
    pub async fn delete_favorite_activity(&self, activity_id: &str) -> AppResult<()> {
        let url = self.client.url(&favorite_path(activity_id)?);
        self.client.delete(&url).await?;
        debug!("Removed favorite activity {activity_id}");
        Ok(())
    }

    async fn time_series(
        &self,
        path: &str,
        resource: TimeSeriesResource,
    ) -> AppResult<ActivityTimeSeriesResponse> {
        let body = self.client.get(&self.client.url(path)).await?;
        ActivityTimeSeriesResponse::from_json(resource, &body)
    }
}

/// Percent-encode a caller-supplied path segment
///
/// Empty values and dot segments (`.`, `..`) are rejected; URL parsing would
/// otherwise collapse them and address a different endpoint.
fn path_segment(what: &str, value: &str) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{what} must not be empty")));
    }
    if value.chars().all(|c| c == '.') {
        return Err(AppError::invalid_input(format!(
            "{what} must not be a dot segment: {value}"
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// `1/user/{user_id}/{rest}`
fn user_path(user_id: &str, rest: &str) -> AppResult<String> {
    let user_id = path_segment("user id", user_id)?;
    Ok(format!("{API_VERSION}/user/{user_id}/{rest}"))
}

fn daily_summary_path(user_id: &str, date: ApiDate) -> AppResult<String> {
    user_path(user_id, &format!("activities/date/{date}.json"))
}

/// `1/user/{user_id}/activities/{resource}/date/{base}/{range}.json`
fn time_series_path(
    user_id: &str,
    resource: TimeSeriesResource,
    base: &str,
    range: &str,
) -> AppResult<String> {
    user_path(
        user_id,
        &format!("{}/date/{base}/{range}.json", resource.path()),
    )
}

fn favorite_path(activity_id: &str) -> AppResult<String> {
    let activity_id = path_segment("activity id", activity_id)?;
    user_path(
        CURRENT_USER,
        &format!("activities/favorite/{activity_id}.json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> ApiDate {
        ApiDate::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_daily_summary_path() {
        assert_eq!(
            daily_summary_path("-", date(2024, 3, 9)).unwrap(),
            "1/user/-/activities/date/2024-03-09.json"
        );
        assert_eq!(
            daily_summary_path("ABC123", ApiDate::Today).unwrap(),
            "1/user/ABC123/activities/date/today.json"
        );
    }

    #[test]
    fn test_time_series_path_uses_resource_name() {
        assert_eq!(
            time_series_path("-", TimeSeriesResource::MinutesLightlyActive, "today", "7d").unwrap(),
            "1/user/-/activities/minutesLightlyActive/date/today/7d.json"
        );
        assert_eq!(
            time_series_path("-", TimeSeriesResource::Steps, "today", "1d/15min").unwrap(),
            "1/user/-/activities/steps/date/today/1d/15min.json"
        );
    }

    #[test]
    fn test_user_id_is_percent_encoded() {
        assert_eq!(
            user_path("a/b c", "activities/favorite.json").unwrap(),
            "1/user/a%2Fb%20c/activities/favorite.json"
        );
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert_eq!(
            user_path("", "activities/recent.json").unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            favorite_path("  ").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn test_dot_segment_ids_rejected() {
        for id in [".", "..", "..."] {
            assert_eq!(
                user_path(id, "activities/favorite.json").unwrap_err().code,
                ErrorCode::InvalidInput
            );
            assert_eq!(favorite_path(id).unwrap_err().code, ErrorCode::InvalidInput);
        }
        assert_eq!(
            user_path("a.b", "activities/recent.json").unwrap(),
            "1/user/a.b/activities/recent.json"
        );
    }

    #[test]
    fn test_favorite_path() {
        assert_eq!(
            favorite_path("90009").unwrap(),
            "1/user/-/activities/favorite/90009.json"
        );
    }
}
