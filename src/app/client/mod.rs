//! HTTP client for the broadcast schedule API
//!
//! Two endpoints, both plain GET + JSON decode: the full schedule, and one
//! day's channel detail. The client is exposed behind the [`ScheduleSource`]
//! trait so resolution logic can run against an in-memory source in tests.
//!
//! The module is organized into:
//! - `config`: HTTP client configuration and building
//! - `download`: streaming file download with atomic writes

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::models::{ChannelDetail, DailySchedule};
use crate::errors::{FetchError, FetchResult};

pub mod config;
pub mod download;

pub use config::ClientConfig;
pub use download::Downloader;

/// Read access to the schedule API
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the full broadcast schedule
    async fn fetch_schedule(&self) -> FetchResult<Vec<DailySchedule>>;

    /// Fetch the channel detail for one day (`day` is a `YYYYMMDD` segment)
    async fn fetch_channel_detail(
        &self,
        day: &str,
        channel_name: &str,
    ) -> FetchResult<ChannelDetail>;
}

/// HTTP implementation of [`ScheduleSource`]
#[derive(Debug)]
pub struct ScheduleClient {
    client: Client,
    base_url: String,
}

impl ScheduleClient {
    /// Creates a client with default HTTP settings
    pub fn new(base_url: impl Into<String>) -> FetchResult<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a client with custom HTTP settings
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> FetchResult<Self> {
        Ok(Self {
            client: config.build_http_client()?,
            base_url: base_url.into(),
        })
    }

    /// The underlying HTTP client, shared with the downloader
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// The schedule API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn detail_url(&self, day: &str, channel_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, day, channel_name)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        tracing::debug!("fetched {} ({} bytes)", url, body.len());
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ScheduleSource for ScheduleClient {
    async fn fetch_schedule(&self) -> FetchResult<Vec<DailySchedule>> {
        self.get_json(&self.base_url).await
    }

    async fn fetch_channel_detail(
        &self,
        day: &str,
        channel_name: &str,
    ) -> FetchResult<ChannelDetail> {
        self.get_json(&self.detail_url(day, channel_name)).await
    }
}
