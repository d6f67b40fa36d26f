#![deny(clippy::all)]

mod aggregator;
pub mod dashboard;
pub mod error;
pub mod locale;
pub mod source;

pub use aggregator::*;
pub use dashboard::{BlogPost, DashboardStats, Employee, ViewSlice};
pub use error::{AggregateError, ParseLocaleError, ParsePeriodError, SourceError};
pub use locale::{DateFormatter, EnglishFormatter, Locale, UzbekFormatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day's view count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySample {
    pub date: NaiveDate,
    pub views: u64,
    /// Precomputed display string supplied by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
}

impl DailySample {
    pub fn new(date: NaiveDate, views: u64) -> Self {
        Self {
            date,
            views,
            display_date: None,
        }
    }

    pub fn with_display_date(mut self, display_date: impl Into<String>) -> Self {
        self.display_date = Some(display_date.into());
        self
    }
}

/// Bucketing granularity for a view series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn all() -> &'static [Period] {
        &[Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// One labeled point of a chart series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_label: Option<String>,
    pub total_views: u64,
    pub sample_count: usize,
}

impl Bucket {
    /// Tooltip text, falling back to the short label
    pub fn detail(&self) -> &str {
        self.detail_label.as_deref().unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub period: Period,
    pub buckets: Vec<Bucket>,
    pub grand_total: u64,
}

impl AggregationResult {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            buckets: Vec::new(),
            grand_total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
