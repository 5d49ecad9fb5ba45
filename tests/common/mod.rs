//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use temperature_chart::backend::{Device, TemperatureSource};
use temperature_chart::chart::{DeviceSelection, DisplayZone, Series, TimeWindow};
use temperature_chart::config::{Config, Deployment};
use temperature_chart::error::{AppError, AppResult};

/// Answers every fetch with the same data and records what was asked.
#[derive(Default)]
pub struct StubSource {
    pub series: Vec<Series>,
    pub devices: Vec<Device>,
    pub fail: bool,
    pub requests: Mutex<Vec<(DeviceSelection, TimeWindow)>>,
}

impl StubSource {
    pub fn with_series(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(DeviceSelection, TimeWindow)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TemperatureSource for StubSource {
    async fn fetch_series(
        &self,
        selection: &DeviceSelection,
        window: &TimeWindow,
    ) -> AppResult<Vec<Series>> {
        self.requests
            .lock()
            .unwrap()
            .push((selection.clone(), *window));
        if self.fail {
            return Err(AppError::Backend("HTTP 503 Service Unavailable: down".to_string()));
        }
        Ok(self.series.clone())
    }

    async fn list_devices(&self) -> AppResult<Vec<Device>> {
        if self.fail {
            return Err(AppError::Backend("Request failed: connection refused".to_string()));
        }
        Ok(self.devices.clone())
    }
}

/// Fetches block until the test releases their gate. Gates are handed to
/// requests in arrival order, so response order can be chosen independently
/// of request order.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<AppResult<Vec<Series>>>>>,
    requests: Mutex<Vec<(DeviceSelection, TimeWindow)>>,
}

impl GatedSource {
    /// Gate for the next request that has not been given one yet.
    pub fn gate(&self) -> oneshot::Sender<AppResult<Vec<Series>>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn requests(&self) -> Vec<(DeviceSelection, TimeWindow)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TemperatureSource for GatedSource {
    async fn fetch_series(
        &self,
        selection: &DeviceSelection,
        window: &TimeWindow,
    ) -> AppResult<Vec<Series>> {
        self.requests
            .lock()
            .unwrap()
            .push((selection.clone(), *window));
        let rx = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("no gate left for request");
        rx.await
            .map_err(|_| AppError::Internal("gate dropped".to_string()))?
    }

    async fn list_devices(&self) -> AppResult<Vec<Device>> {
        Ok(Vec::new())
    }
}

pub fn test_config() -> Config {
    Config {
        backend_base_url: "http://backend.test".to_string(),
        backend_timeout_seconds: 5,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        display_zone: DisplayZone::Utc,
        initial_device_ids: None,
        device_cache_ttl_seconds: 60,
        deployment: Deployment::Local,
    }
}

pub fn device(device_id: i64, device_name: &str) -> Device {
    Device {
        device_id,
        device_name: device_name.to_string(),
    }
}
