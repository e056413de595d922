use std::{fmt::Debug, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

/// User-agent sent with every request.
pub const USER_AGENT: &str = "weather-app/1.0";

/// Compact one-line output: location, condition, temperature, humidity,
/// wind, precipitation, moon phase.
pub const COMPACT_FORMAT: &str = "%l:+%c+%t+%h+%w+%p+%m\n";

/// Language requested from the endpoint. The structured payload keys its
/// localized description as `lang_zh`, so this is not configurable.
pub const LANG: &str = "zh";

/// Output format requested from the wttr.in endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable one-liner, used as a degraded fallback.
    Compact,
    /// Structured JSON (`j1`).
    Json,
}

impl ReportFormat {
    pub const fn as_param(&self) -> &'static str {
        match self {
            ReportFormat::Compact => COMPACT_FORMAT,
            ReportFormat::Json => "j1",
        }
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Outbound seam used by the forecast and alert operations.
///
/// Implementations are fail-soft: every failure is reported as `None`, never
/// as an error the caller has to handle.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Fetch one report for `location` (a `{lat},{lon}` pair). `metric`
    /// adds the endpoint's metric-units flag to the query.
    async fn fetch(&self, location: &str, format: ReportFormat, metric: bool) -> Option<String>;
}

/// HTTP client for the wttr.in endpoint.
#[derive(Debug, Clone)]
pub struct WttrClient {
    http: Client,
    base_url: String,
}

impl WttrClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: config.base_url.clone() })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&Config::default())
    }

    async fn try_fetch(
        &self,
        location: &str,
        format: ReportFormat,
        metric: bool,
    ) -> Result<String, FetchError> {
        let url = format!("{}/{location}", self.base_url);

        let mut query: Vec<(&str, &str)> = vec![("format", format.as_param()), ("lang", LANG)];
        if metric {
            query.push(("m", ""));
        }

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(res.text().await?)
    }
}

#[async_trait]
impl WeatherApi for WttrClient {
    async fn fetch(&self, location: &str, format: ReportFormat, metric: bool) -> Option<String> {
        match self.try_fetch(location, format, metric).await {
            Ok(body) => Some(body),
            Err(err) => {
                warn!(%location, error = %err, "weather request failed");
                None
            }
        }
    }
}
