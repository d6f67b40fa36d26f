//! Analytics payloads as served by the blog backend
//!
//! Payloads arrive wrapped in `{ "success": bool, "data": ..., "message": ... }`.
//! They can be read from disk or fetched with [`http::AnalyticsClient`].

pub mod http;

pub use http::AnalyticsClient;

use crate::dashboard::{BlogPost, Employee};
use crate::error::{Result, SourceError};
use crate::DailySample;
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope, treating `success: false` or a missing body as a rejection
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(SourceError::Rejected(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| SourceError::Rejected("response carried no data".to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    #[serde(default)]
    pub daily_views: Vec<DailyViewRecord>,
    #[serde(default)]
    pub total_views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyViewRecord {
    pub date: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
}

impl DailyViewRecord {
    pub fn to_sample(&self) -> Result<DailySample> {
        let date = parse_sample_date(&self.date)
            .ok_or_else(|| SourceError::InvalidDate(self.date.clone()))?;
        Ok(DailySample {
            date,
            views: self.views,
            display_date: self.display_date.clone(),
        })
    }
}

impl AnalyticsStats {
    pub fn samples(&self) -> Result<Vec<DailySample>> {
        self.daily_views.iter().map(DailyViewRecord::to_sample).collect()
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part kept as written)
pub fn parse_sample_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn parse_envelope<T: DeserializeOwned>(json: &str) -> Result<T> {
    let envelope: ApiResponse<T> = serde_json::from_str(json)?;
    envelope.into_data()
}

pub fn parse_analytics(json: &str) -> Result<AnalyticsStats> {
    parse_envelope(json)
}

pub fn load_analytics(path: &Path) -> Result<AnalyticsStats> {
    let content = std::fs::read_to_string(path)?;
    parse_analytics(&content)
}

pub fn load_blogs(path: &Path) -> Result<Vec<BlogPost>> {
    let content = std::fs::read_to_string(path)?;
    parse_envelope(&content)
}

pub fn load_employees(path: &Path) -> Result<Vec<Employee>> {
    let content = std::fs::read_to_string(path)?;
    parse_envelope(&content)
}
