//! Cached device directory for the "add device" picker.
//!
//! The backend's device list changes rarely, so it is held in a moka cache
//! under a single key and refreshed after the TTL. Concurrent misses share one
//! backend request. A failed fetch is not cached and yields an empty list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use utoipa::ToSchema;

use crate::backend::{Device, TemperatureSource};

const DEVICES_KEY: &str = "devices";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeviceOption {
    pub device_id: i64,
    /// `<name> (<id>)`
    pub label: String,
}

pub struct DeviceDirectory {
    source: Arc<dyn TemperatureSource>,
    cache: Cache<&'static str, Arc<Vec<Device>>>,
}

impl DeviceDirectory {
    #[must_use]
    pub fn new(source: Arc<dyn TemperatureSource>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { source, cache }
    }

    /// All backend devices, or an empty list if the backend is unreachable.
    pub async fn devices(&self) -> Arc<Vec<Device>> {
        let source = self.source.clone();
        let result = self
            .cache
            .try_get_with(DEVICES_KEY, async move {
                let devices = source.list_devices().await?;
                tracing::debug!(count = devices.len(), "device_directory_refreshed");
                Ok::<_, crate::error::AppError>(Arc::new(devices))
            })
            .await;

        match result {
            Ok(devices) => devices,
            Err(e) => {
                tracing::error!(error = %e, "Error loading devices");
                Arc::new(Vec::new())
            }
        }
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(DEVICES_KEY).await;
        tracing::debug!("device_directory_invalidated");
    }

    /// Picker entries for devices not yet on the chart.
    pub async fn options(&self, displayed: &[i64]) -> Vec<DeviceOption> {
        picker_options(&self.devices().await, displayed)
    }
}

/// Devices not in `displayed`, sorted by name (case-insensitive), labelled `name (id)`.
#[must_use]
pub fn picker_options(devices: &[Device], displayed: &[i64]) -> Vec<DeviceOption> {
    let mut available: Vec<&Device> = devices
        .iter()
        .filter(|d| !displayed.contains(&d.device_id))
        .collect();

    available.sort_by(|a, b| {
        a.device_name
            .to_lowercase()
            .cmp(&b.device_name.to_lowercase())
            .then_with(|| a.device_name.cmp(&b.device_name))
    });

    available
        .into_iter()
        .map(|d| DeviceOption {
            device_id: d.device_id,
            label: format!("{} ({})", d.device_name, d.device_id),
        })
        .collect()
}
