//! Where widget data comes from.
//!
//! The backend is an opaque JSON source. A failed request of any kind is
//! treated as "no data": it is logged and surfaces as `None`, leaving the
//! caller's previous render in place.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    Config,
    model::{
        AgendaPayload, AirQualityPayload, EmailItem, HolidaysPayload, LatestAlertPayload,
        NewsItem, NextMeetingPayload, RedAlertPayload, ShabbatPayload, TimePayload,
        WeatherPayload, ZmanimPayload,
    },
};

#[async_trait]
pub trait DashboardSource: Send + Sync + Debug {
    async fn fetch_weather(&self) -> Option<WeatherPayload>;
    async fn fetch_air_quality(&self) -> Option<AirQualityPayload>;
    async fn fetch_time(&self) -> Option<TimePayload>;
    async fn fetch_next_meeting(&self) -> Option<NextMeetingPayload>;
    /// `query` narrows the feed, e.g. `Some("Jerusalem")`.
    async fn fetch_news(&self, query: Option<&str>) -> Option<Vec<NewsItem>>;
    async fn fetch_red_alert(&self) -> Option<RedAlertPayload>;
    async fn fetch_calendar(&self) -> Option<AgendaPayload>;
    /// `account` limits the inbox to one mailbox; `None` is the combined inbox.
    async fn fetch_emails(&self, account: Option<&str>) -> Option<Vec<EmailItem>>;
    async fn fetch_latest_alert(&self) -> Option<LatestAlertPayload>;
    async fn fetch_holidays(&self) -> Option<HolidaysPayload>;
    async fn fetch_shabbat(&self) -> Option<ShabbatPayload>;
    async fn fetch_zmanim(&self) -> Option<ZmanimPayload>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    http: Client,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url: config.base_url().to_string(), http })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Request to {} failed with status {}: {}",
                url,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse JSON from {url}"))
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Option<T> {
        match self.try_fetch(path, query).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                log::warn!("{path}: no data ({err:#})");
                None
            }
        }
    }
}

#[async_trait]
impl DashboardSource for HttpSource {
    async fn fetch_weather(&self) -> Option<WeatherPayload> {
        self.fetch("/api/weather", &[]).await
    }

    async fn fetch_air_quality(&self) -> Option<AirQualityPayload> {
        self.fetch("/api/aqi", &[]).await
    }

    async fn fetch_time(&self) -> Option<TimePayload> {
        self.fetch("/api/time", &[]).await
    }

    async fn fetch_next_meeting(&self) -> Option<NextMeetingPayload> {
        self.fetch("/api/next-meeting", &[]).await
    }

    async fn fetch_news(&self, query: Option<&str>) -> Option<Vec<NewsItem>> {
        match query {
            Some(q) => self.fetch("/api/news", &[("q", q)]).await,
            None => self.fetch("/api/news", &[]).await,
        }
    }

    async fn fetch_red_alert(&self) -> Option<RedAlertPayload> {
        self.fetch("/api/red-alert", &[]).await
    }

    async fn fetch_calendar(&self) -> Option<AgendaPayload> {
        self.fetch("/api/calendar", &[]).await
    }

    async fn fetch_emails(&self, account: Option<&str>) -> Option<Vec<EmailItem>> {
        match account {
            Some(account) => self.fetch("/api/emails", &[("account", account)]).await,
            None => self.fetch("/api/emails", &[]).await,
        }
    }

    async fn fetch_latest_alert(&self) -> Option<LatestAlertPayload> {
        let value: serde_json::Value = self.fetch("/api/alerts", &[]).await?;
        latest_alert_from_value(value)
    }

    async fn fetch_holidays(&self) -> Option<HolidaysPayload> {
        self.fetch("/api/holidays/israel", &[]).await
    }

    async fn fetch_shabbat(&self) -> Option<ShabbatPayload> {
        self.fetch("/api/shabbat", &[]).await
    }

    async fn fetch_zmanim(&self) -> Option<ZmanimPayload> {
        self.fetch("/api/zmanim", &[]).await
    }
}

/// `/api/alerts` answers `[]` when the history feed is unavailable and `{}`
/// when there is nothing recent; both mean "no alert".
fn latest_alert_from_value(value: serde_json::Value) -> Option<LatestAlertPayload> {
    match value {
        serde_json::Value::Object(_) => match serde_json::from_value(value) {
            Ok(alert) => Some(alert),
            Err(err) => {
                log::warn!("/api/alerts: no data ({err})");
                None
            }
        },
        serde_json::Value::Array(_) | serde_json::Value::Null => {
            Some(LatestAlertPayload::default())
        }
        other => {
            log::warn!("/api/alerts: unexpected payload {other}");
            None
        }
    }
}

/// Construct the HTTP source described by `config`.
pub fn source_from_config(config: &Config) -> Result<Box<dyn DashboardSource>> {
    let source = HttpSource::new(config).with_context(|| {
        format!(
            "Invalid dashboard backend '{}'.\n\
             Hint: run `dashboard configure` and enter the backend URL.",
            config.api_base_url
        )
    })?;

    Ok(Box::new(source))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
