// ABOUTME: Activity time series parameters and response models
// ABOUTME: Periods, resources, detail levels, dates, and resource-keyed response decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Time Series
//!
//! Fitbit names the top-level keys of a time series response after the
//! requested resource (`activities-steps`, `activities-steps-intraday`, ...),
//! so the body cannot be decoded into one fixed struct. [`TimeSeriesResource`]
//! knows its path and keys, and [`ActivityTimeSeriesResponse::from_json`] pulls
//! the matching entries out of the body.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Range of a time series ending at the requested date
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// One day
    #[serde(rename = "1d")]
    OneDay,
    /// Seven days
    #[serde(rename = "7d")]
    SevenDays,
    /// Thirty days
    #[serde(rename = "30d")]
    ThirtyDays,
    /// One week
    #[serde(rename = "1w")]
    OneWeek,
    /// One month
    #[serde(rename = "1m")]
    OneMonth,
    /// Three months
    #[serde(rename = "3m")]
    ThreeMonths,
    /// Six months
    #[serde(rename = "6m")]
    SixMonths,
    /// One year
    #[serde(rename = "1y")]
    OneYear,
    /// Everything since the account was created
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// Every supported period
    pub const ALL: [Self; 9] = [
        Self::OneDay,
        Self::SevenDays,
        Self::ThirtyDays,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::Max,
    ];

    /// Path segment used by Fitbit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::OneYear => "1y",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown period '{s}'")))
    }
}

/// Activity resource available as a time series
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeSeriesResource {
    /// Steps taken
    Steps,
    /// Total calories burned
    Calories,
    /// Basal metabolic rate calories
    #[serde(rename = "caloriesBMR")]
    CaloriesBmr,
    /// Distance travelled
    Distance,
    /// Floors climbed
    Floors,
    /// Elevation climbed
    Elevation,
    /// Sedentary minutes
    MinutesSedentary,
    /// Lightly active minutes
    MinutesLightlyActive,
    /// Fairly active minutes
    MinutesFairlyActive,
    /// Very active minutes
    MinutesVeryActive,
    /// Calories burned through activity
    ActivityCalories,
}

impl TimeSeriesResource {
    /// Every supported resource
    pub const ALL: [Self; 11] = [
        Self::Steps,
        Self::Calories,
        Self::CaloriesBmr,
        Self::Distance,
        Self::Floors,
        Self::Elevation,
        Self::MinutesSedentary,
        Self::MinutesLightlyActive,
        Self::MinutesFairlyActive,
        Self::MinutesVeryActive,
        Self::ActivityCalories,
    ];

    /// Resource name as Fitbit spells it
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Calories => "calories",
            Self::CaloriesBmr => "caloriesBMR",
            Self::Distance => "distance",
            Self::Floors => "floors",
            Self::Elevation => "elevation",
            Self::MinutesSedentary => "minutesSedentary",
            Self::MinutesLightlyActive => "minutesLightlyActive",
            Self::MinutesFairlyActive => "minutesFairlyActive",
            Self::MinutesVeryActive => "minutesVeryActive",
            Self::ActivityCalories => "activityCalories",
        }
    }

    /// Resource path used in request URLs, e.g. `activities/steps`
    #[must_use]
    pub fn path(self) -> String {
        format!("activities/{}", self.name())
    }

    /// Top-level response key holding the series, e.g. `activities-steps`
    #[must_use]
    pub fn response_key(self) -> String {
        format!("activities-{}", self.name())
    }

    /// Top-level response key holding intraday data, e.g. `activities-steps-intraday`
    #[must_use]
    pub fn intraday_key(self) -> String {
        format!("activities-{}-intraday", self.name())
    }
}

impl fmt::Display for TimeSeriesResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeSeriesResource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("activities/").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|resource| resource.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::invalid_input(format!("Unknown time series resource '{s}'")))
    }
}

/// Granularity of intraday data points
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailLevel {
    /// One data point per minute
    #[serde(rename = "1min")]
    OneMinute,
    /// One data point per five minutes
    #[serde(rename = "5min")]
    FiveMinutes,
    /// One data point per fifteen minutes
    #[serde(rename = "15min")]
    FifteenMinutes,
}

impl DetailLevel {
    /// Every supported detail level
    pub const ALL: [Self; 3] = [Self::OneMinute, Self::FiveMinutes, Self::FifteenMinutes];

    /// Path segment used by Fitbit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::FifteenMinutes => "15min",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown detail level '{s}'")))
    }
}

/// Date path segment: `today` or a calendar date formatted `yyyy-MM-dd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiDate {
    /// The current day in the user's time zone, resolved by Fitbit
    #[default]
    Today,
    /// A specific calendar date
    Date(NaiveDate),
}

impl From<NaiveDate> for ApiDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for ApiDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("today") {
            return Ok(Self::Today);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|e| {
                AppError::invalid_input(format!("Invalid date '{s}', expected yyyy-MM-dd: {e}"))
            })
    }
}

/// One day of a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesLog {
    /// Day the value applies to
    pub date_time: NaiveDate,
    /// Value for the day (Fitbit sends it as a string)
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

/// One intraday sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayDataPoint {
    /// Local time of the sample
    pub time: NaiveTime,
    /// Sample value
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

/// Intraday data attached to a one-day series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivitiesLogIntraday {
    /// Interval between samples
    pub dataset_interval: u64,
    /// Unit of `dataset_interval` (`minute`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<String>,
    /// Samples in time order
    pub dataset: Vec<IntradayDataPoint>,
}

/// Decoded time series for one resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTimeSeriesResponse {
    /// Daily values
    pub logs: Vec<ActivitiesLog>,
    /// Intraday samples, present only when Fitbit included them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intraday: Option<ActivitiesLogIntraday>,
}

impl ActivityTimeSeriesResponse {
    /// Decode a time series body whose keys are named after `resource`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the body is not a JSON object, lacks the
    /// series key for `resource`, or holds values of the wrong shape
    pub fn from_json(resource: TimeSeriesResource, body: &[u8]) -> AppResult<Self> {
        let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)?;

        let key = resource.response_key();
        let logs = object.remove(&key).ok_or_else(|| {
            AppError::serialization(format!("Time series response is missing '{key}'"))
        })?;
        let logs = serde_json::from_value(logs)?;

        let intraday = object
            .remove(&resource.intraday_key())
            .map(serde_json::from_value)
            .transpose()?;

        Ok(Self { logs, intraday })
    }

    /// Sum of the daily values
    #[must_use]
    pub fn total(&self) -> f64 {
        self.logs.iter().map(|log| log.value).sum()
    }
}

/// Accept a JSON number or a numeric string
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid numeric value '{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_keys_follow_fitbit_naming() {
        let resource = TimeSeriesResource::MinutesLightlyActive;
        assert_eq!(resource.path(), "activities/minutesLightlyActive");
        assert_eq!(resource.response_key(), "activities-minutesLightlyActive");
        assert_eq!(
            resource.intraday_key(),
            "activities-minutesLightlyActive-intraday"
        );
        assert_eq!(
            TimeSeriesResource::CaloriesBmr.response_key(),
            "activities-caloriesBMR"
        );
    }

    #[test]
    fn test_resource_parses_with_or_without_prefix() {
        assert_eq!(
            "activities/steps".parse::<TimeSeriesResource>().unwrap(),
            TimeSeriesResource::Steps
        );
        assert_eq!(
            "caloriesbmr".parse::<TimeSeriesResource>().unwrap(),
            TimeSeriesResource::CaloriesBmr
        );
        assert!("heart".parse::<TimeSeriesResource>().is_err());
    }

    #[test]
    fn test_period_round_trips_through_str() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert!("2w".parse::<Period>().is_err());
    }

    #[test]
    fn test_api_date_formatting_and_parsing() {
        let date = NaiveDate::from_ymd_opt(2015, 11, 23).unwrap();
        assert_eq!(ApiDate::from(date).to_string(), "2015-11-23");
        assert_eq!(ApiDate::Today.to_string(), "today");
        assert_eq!("Today".parse::<ApiDate>().unwrap(), ApiDate::Today);
        assert_eq!(
            "2015-11-23".parse::<ApiDate>().unwrap(),
            ApiDate::Date(date)
        );
        assert!("23/11/2015".parse::<ApiDate>().is_err());
    }

    #[test]
    fn test_from_json_reads_series_and_intraday() {
        let body = br#"{
            "activities-steps": [
                {"dateTime": "2015-11-20", "value": "8213"},
                {"dateTime": "2015-11-21", "value": "10001"}
            ],
            "activities-steps-intraday": {
                "dataset": [
                    {"time": "00:00:00", "value": 0},
                    {"time": "00:01:00", "value": 12}
                ],
                "datasetInterval": 1,
                "datasetType": "minute"
            }
        }"#;

        let response =
            ActivityTimeSeriesResponse::from_json(TimeSeriesResource::Steps, body).unwrap();

        assert_eq!(response.logs.len(), 2);
        assert!((response.logs[1].value - 10_001.0).abs() < f64::EPSILON);
        assert!((response.total() - 18_214.0).abs() < f64::EPSILON);
        let intraday = response.intraday.unwrap();
        assert_eq!(intraday.dataset_interval, 1);
        assert_eq!(intraday.dataset_type.as_deref(), Some("minute"));
        assert_eq!(intraday.dataset.len(), 2);
        assert!((intraday.dataset[1].value - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_without_intraday() {
        let body = br#"{"activities-distance": [{"dateTime": "2015-11-20", "value": "5.37"}]}"#;

        let response =
            ActivityTimeSeriesResponse::from_json(TimeSeriesResource::Distance, body).unwrap();

        assert_eq!(response.logs.len(), 1);
        assert!((response.logs[0].value - 5.37).abs() < f64::EPSILON);
        assert!(response.intraday.is_none());
    }

    #[test]
    fn test_from_json_rejects_body_for_other_resource() {
        let body = br#"{"activities-steps": []}"#;

        let error = ActivityTimeSeriesResponse::from_json(TimeSeriesResource::Floors, body)
            .unwrap_err();

        assert_eq!(error.code, crate::errors::ErrorCode::SerializationError);
        assert!(error.message.contains("activities-floors"));
    }

    #[test]
    fn test_from_json_rejects_non_numeric_value() {
        let body = br#"{"activities-floors": [{"dateTime": "2015-11-20", "value": "many"}]}"#;
        assert!(ActivityTimeSeriesResponse::from_json(TimeSeriesResource::Floors, body).is_err());
    }
}
