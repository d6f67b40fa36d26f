use super::{AnalyticsStats, ApiResponse};
use crate::dashboard::{BlogPost, Employee};
use crate::error::{Result, SourceError};
use crate::Period;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 200;

/// Read-only client for the blog backend's analytics endpoints
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl AnalyticsClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analytics_url(&self, period: Period) -> String {
        format!(
            "{}/blog/analytics/stats?period={}",
            self.base_url,
            period.as_str()
        )
    }

    /// Unpaged, so dashboard totals cover every post
    pub fn blogs_url(&self) -> String {
        format!("{}/blog", self.base_url)
    }

    pub fn employees_url(&self) -> String {
        format!("{}/employee", self.base_url)
    }

    pub async fn fetch_analytics(&self, period: Period) -> Result<AnalyticsStats> {
        self.get_envelope(&self.analytics_url(period)).await
    }

    pub async fn fetch_blogs(&self) -> Result<Vec<BlogPost>> {
        self.get_envelope(&self.blogs_url()).await
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.get_envelope(&self.employees_url()).await
    }

    async fn get_envelope<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut last_error: Option<SourceError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let backoff = INITIAL_BACKOFF_MS * (1 << (attempt - 1));
                debug!(url, attempt, backoff_ms = backoff, "retrying request");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            let mut request = self
                .client
                .get(url)
                .header("Content-Type", "application/json");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!(url, attempt, error = %e, "network error");
                    last_error = Some(SourceError::Request(e));
                    continue;
                }
            };

            let status = response.status();
            if is_transient(status) {
                warn!(url, attempt, status = status.as_u16(), "transient HTTP status");
                let _ = response.bytes().await;
                last_error = Some(SourceError::Http {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(rejection(&body).unwrap_or_else(|| SourceError::Http {
                    status: status.as_u16(),
                    url: url.to_string(),
                }));
            }

            let envelope: ApiResponse<T> = response.json().await?;
            return envelope.into_data();
        }

        Err(last_error
            .unwrap_or_else(|| SourceError::Rejected(format!("no response from {}", url))))
    }
}

/// Error bodies from the backend still use the envelope; keep its message when there is one
fn rejection(body: &str) -> Option<SourceError> {
    let envelope: ApiResponse<IgnoredAny> = serde_json::from_str(body).ok()?;
    match (envelope.success, envelope.message) {
        (false, Some(message)) => Some(SourceError::Rejected(message)),
        _ => None,
    }
}

fn is_transient(status: reqwest::StatusCode) -> bool {
    status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
}
