//! Error types for aggregation and analytics loading

use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected by the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("Invalid input: date {0} appears more than once")]
    DuplicateDate(NaiveDate),
}

/// Failures while loading or fetching analytics payloads
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid date in payload: '{0}'")]
    InvalidDate(String),

    #[error("Backend rejected request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}' (expected daily, weekly, monthly or yearly)")]
pub struct ParsePeriodError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale '{0}' (expected en or uz)")]
pub struct ParseLocaleError(pub String);

pub type Result<T> = std::result::Result<T, SourceError>;
