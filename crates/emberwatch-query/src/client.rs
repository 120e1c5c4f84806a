//! The HTTP client for bootstrap, range, and chat requests.
//!
//! Every method is a one-shot request/response: errors propagate as
//! [`QueryError`] and are never retried here (the caller may retry
//! manually). Every record batch passes through the normalizer before it
//! is returned — the server is never assumed to deduplicate.

use chrono::Utc;
use emberwatch_core::normalize::{normalize, normalize_notifications};
use emberwatch_types::{DroneRecord, FireRecord, Notification};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::chat::ChatReply;
use crate::error::QueryError;
use crate::range::{RangePage, RangeQuery};

/// Last-24h bootstrap telemetry, normalized on receipt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentHistory {
    /// Fire records, deduplicated and ascending by timestamp.
    #[serde(default)]
    pub fires: Vec<FireRecord>,
    /// Drone records, deduplicated and ascending by timestamp.
    #[serde(default)]
    pub drones: Vec<DroneRecord>,
}

/// Wire shape of the recent-notifications endpoint.
#[derive(Debug, Deserialize)]
struct RecentNotifications {
    #[serde(default)]
    notifications: Vec<Notification>,
}

/// Client for the mission control HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given API base URL
    /// (e.g. `http://127.0.0.1:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Fetch the last 24 h of telemetry for cache bootstrap.
    pub async fn fetch_recent_history(&self) -> Result<RecentHistory, QueryError> {
        let history: RecentHistory = self.get_json("fire-drone/recent/").await?;
        debug!(
            fires = history.fires.len(),
            drones = history.drones.len(),
            "recent history fetched"
        );
        Ok(normalize_history(history))
    }

    /// Fetch the last 24 h of notifications for cache bootstrap.
    pub async fn fetch_recent_notifications(&self) -> Result<Vec<Notification>, QueryError> {
        let payload: RecentNotifications = self.get_json("notifications/recent/").await?;
        debug!(
            notifications = payload.notifications.len(),
            "recent notifications fetched"
        );
        Ok(normalize_notifications(payload.notifications))
    }

    /// Request one page of a bounded historical range.
    ///
    /// Omitted bounds default to the trailing 24 h. The page is
    /// re-normalized client-side before it is returned.
    pub async fn query_range(&self, query: &RangeQuery) -> Result<RangePage, QueryError> {
        let (start, end) = query.resolve_bounds(Utc::now().timestamp_millis());

        let mut request = self.http.get(self.endpoint("fire-drone/range/")).query(&[
            ("start", start.to_string()),
            ("end", end.to_string()),
            ("page", query.page.to_string()),
            ("page_size", query.page_size.to_string()),
        ]);
        if let Some(entity) = query.entity {
            request = request.query(&[("entity", entity.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|error| QueryError::Http(error.to_string()))?;
        let page: RangePage = decode(response).await?;
        Ok(normalize_page(page))
    }

    /// Send a free-text message to the warden chat endpoint.
    ///
    /// An empty message is rejected client-side before any request is made.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, QueryError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(QueryError::InvalidRequest("message is required".to_owned()));
        }

        let response = self
            .http
            .post(self.endpoint("fire-warden/chat/"))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .map_err(|error| QueryError::Http(error.to_string()))?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, QueryError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|error| QueryError::Http(error.to_string()))?;
        decode(response).await
    }
}

/// Check the status and decode the body, capturing the error body on a
/// non-success status.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, QueryError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(QueryError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|error| QueryError::Decode(error.to_string()))
}

/// Normalize both collections of a bootstrap fetch.
fn normalize_history(history: RecentHistory) -> RecentHistory {
    RecentHistory {
        fires: normalize(history.fires),
        drones: normalize(history.drones),
    }
}

/// Normalize both collections of a range page, keeping the totals.
fn normalize_page(page: RangePage) -> RangePage {
    RangePage {
        fires: normalize(page.fires),
        drones: normalize(page.drones),
        totals: page.totals,
    }
}
