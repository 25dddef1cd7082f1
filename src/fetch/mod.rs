//! Typed HTTP client for the upstream FPL API.
//!
//! All upstream JSON is validated into the typed entities of `models` right
//! here at the fetch boundary; nothing downstream touches loose payloads.
//! Any failure (network, non-success status, malformed body) aborts the
//! lookup before aggregation runs.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::UpstreamConfig;
use crate::models::{
    Bootstrap, GameweekPicks, ManagerHistory, ManagerPick, ManagerSummary, Transfer,
};

/// Errors that can occur while fetching season data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything the aggregator needs for one manager lookup.
#[derive(Debug, Clone)]
pub struct SeasonData {
    pub bootstrap: Bootstrap,
    pub summary: ManagerSummary,
    pub history: ManagerHistory,
    pub picks: Vec<GameweekPicks>,
    pub transfers: Vec<Transfer>,
}

/// Source of season data, behind a trait so handlers and tests can
/// substitute a fake.
#[async_trait::async_trait]
pub trait SeasonDataSource: Send + Sync {
    async fn season(&self, manager_id: u64) -> Result<SeasonData, FetchError>;
}

/// Wire shape of the per-gameweek picks endpoint.
#[derive(Debug, Deserialize)]
struct PicksPayload {
    #[serde(default)]
    picks: Vec<ManagerPick>,
}

/// HTTP client for the upstream API.
pub struct FplClient {
    client: Client,
    base_url: String,
}

impl FplClient {
    /// Create a new client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("fpl-moments/0.1.0")),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(&UpstreamConfig::default())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch one endpoint and validate the body into `T`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Global bootstrap data: players, teams, gameweek events.
    pub async fn bootstrap(&self) -> Result<Bootstrap, FetchError> {
        self.get_json("bootstrap-static/").await
    }

    /// Manager summary totals and rank.
    pub async fn manager_summary(&self, manager_id: u64) -> Result<ManagerSummary, FetchError> {
        self.get_json(&format!("entry/{manager_id}/")).await
    }

    /// Per-gameweek history rows and chip usage.
    pub async fn manager_history(&self, manager_id: u64) -> Result<ManagerHistory, FetchError> {
        self.get_json(&format!("entry/{manager_id}/history/")).await
    }

    /// Picks for one gameweek.
    pub async fn manager_picks(
        &self,
        manager_id: u64,
        gameweek: u32,
    ) -> Result<GameweekPicks, FetchError> {
        let payload: PicksPayload = self
            .get_json(&format!("entry/{manager_id}/event/{gameweek}/picks/"))
            .await?;
        Ok(GameweekPicks {
            gameweek,
            picks: payload.picks,
        })
    }

    /// Full transfer history.
    pub async fn transfers(&self, manager_id: u64) -> Result<Vec<Transfer>, FetchError> {
        self.get_json(&format!("entry/{manager_id}/transfers/"))
            .await
    }
}

#[async_trait::async_trait]
impl SeasonDataSource for FplClient {
    /// Fetch everything for one manager. Bootstrap and manager reads are
    /// independent and run concurrently; picks follow, one request per
    /// gameweek the manager has played.
    async fn season(&self, manager_id: u64) -> Result<SeasonData, FetchError> {
        info!(manager_id, "Fetching season data");

        let (bootstrap, summary, history, transfers) = tokio::try_join!(
            self.bootstrap(),
            self.manager_summary(manager_id),
            self.manager_history(manager_id),
            self.transfers(manager_id),
        )?;

        let mut picks = Vec::with_capacity(history.gameweeks.len());
        for row in &history.gameweeks {
            picks.push(self.manager_picks(manager_id, row.event).await?);
        }

        info!(
            manager_id,
            gameweeks = picks.len(),
            transfers = transfers.len(),
            "Season data fetched"
        );

        Ok(SeasonData {
            bootstrap,
            summary,
            history,
            picks,
            transfers,
        })
    }
}
