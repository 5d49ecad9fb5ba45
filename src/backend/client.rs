use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::backend::models::{Device, StatusResponse, TemperatureResponse};
use crate::backend::TemperatureSource;
use crate::chart::model::{DeviceSelection, Series, TimeWindow};
use crate::config::Config;
use crate::error::{AppError, AppResult};

pub struct TemperatureClient {
    http_client: Client,
    base_url: String,
}

impl TemperatureClient {
    /// Build a client for the backend configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.backend_base_url.clone(),
        })
    }

    /// Get temperature series for a device selection and window.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` if the request fails or returns an error status.
    pub async fn get_temperature(
        &self,
        selection: &DeviceSelection,
        window: &TimeWindow,
    ) -> AppResult<TemperatureResponse> {
        let url = format!("{}/api/v1/temperature", self.base_url);
        self.get_json(&url, &temperature_query(selection, window))
            .await
    }

    /// Get the backend status document (device list).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Backend` if the request fails or returns an error status.
    pub async fn get_status(&self) -> AppResult<StatusResponse> {
        let url = format!("{}/api/v1/status", self.base_url);
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!("HTTP {status}: {body}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse temperature API response"
            );
            AppError::Backend(format!("Failed to parse response: {e}"))
        })
    }
}

/// Query parameters for `/api/v1/temperature`.
///
/// `device_ids` is sent only for an explicit, non-empty selection; absent
/// window bounds are omitted so the backend applies its defaults.
#[must_use]
pub fn temperature_query(
    selection: &DeviceSelection,
    window: &TimeWindow,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    let ids = selection.device_ids();
    if !ids.is_empty() {
        query.push((
            "device_ids",
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ));
    }
    if let Some(start) = window.start {
        query.push(("start", start.to_string()));
    }
    if let Some(end) = window.end {
        query.push(("end", end.to_string()));
    }
    query
}

#[async_trait]
impl TemperatureSource for TemperatureClient {
    async fn fetch_series(
        &self,
        selection: &DeviceSelection,
        window: &TimeWindow,
    ) -> AppResult<Vec<Series>> {
        Ok(self.get_temperature(selection, window).await?.series)
    }

    async fn list_devices(&self) -> AppResult<Vec<Device>> {
        Ok(self.get_status().await?.devices)
    }
}
