// ABOUTME: Activity commands for fitbit-cli
// ABOUTME: Summaries, time series, catalog, frequent/recent lists, and favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use fitbit_api_client::{
    constants::fitbit::CURRENT_USER,
    errors::AppResult,
    models::{ApiDate, DetailLevel, Period, TimeSeriesResource},
    ActivityApi,
};
use serde_json::json;

pub async fn summary(
    activity: ActivityApi<'_>,
    date: ApiDate,
    user: Option<&str>,
) -> AppResult<()> {
    let response = activity
        .daily_activity_summary_by_id(user.unwrap_or(CURRENT_USER), date)
        .await?;
    print_json(&response)
}

pub async fn time_series(
    activity: ActivityApi<'_>,
    resource: TimeSeriesResource,
    period: Period,
    date: ApiDate,
    user: Option<&str>,
) -> AppResult<()> {
    let response = activity
        .activity_time_series_by_id(user.unwrap_or(CURRENT_USER), date, period, resource)
        .await?;
    print_json(&json!({
        "resource": resource,
        "period": period,
        "total": response.total(),
        "logs": response.logs,
    }))
}

pub async fn intraday(
    activity: ActivityApi<'_>,
    resource: TimeSeriesResource,
    detail: DetailLevel,
    date: ApiDate,
) -> AppResult<()> {
    let response = activity
        .intraday_time_series(date, resource, detail)
        .await?;
    print_json(&response)
}

pub async fn activity_types(activity: ActivityApi<'_>) -> AppResult<()> {
    print_json(&activity.browse_activity_types().await?)
}

pub async fn activity_type(activity: ActivityApi<'_>, id: &str) -> AppResult<()> {
    print_json(&activity.get_activity_type(id).await?)
}

pub async fn frequent(activity: ActivityApi<'_>) -> AppResult<()> {
    print_json(&activity.get_frequent_activities().await?)
}

pub async fn recent(activity: ActivityApi<'_>) -> AppResult<()> {
    print_json(&activity.get_recent_activities().await?)
}

pub async fn favorites(activity: ActivityApi<'_>, user: Option<&str>) -> AppResult<()> {
    let response = activity
        .get_favorite_activities_by_id(user.unwrap_or(CURRENT_USER))
        .await?;
    print_json(&response)
}

pub async fn add_favorite(activity: ActivityApi<'_>, id: &str) -> AppResult<()> {
    activity.add_favorite_activity(id).await?;
    print_json(&json!({ "activityId": id, "favorite": true }))
}

pub async fn remove_favorite(activity: ActivityApi<'_>, id: &str) -> AppResult<()> {
    activity.delete_favorite_activity(id).await?;
    print_json(&json!({ "activityId": id, "favorite": false }))
}
