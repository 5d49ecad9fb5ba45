pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::chart::model::{DeviceSelection, Series, TimeWindow};
use crate::error::AppResult;

pub use client::TemperatureClient;
pub use models::Device;

/// Read access to the temperature backend.
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Series for the selected devices within `window`, in backend order.
    async fn fetch_series(
        &self,
        selection: &DeviceSelection,
        window: &TimeWindow,
    ) -> AppResult<Vec<Series>>;

    /// Every device known to the backend.
    async fn list_devices(&self) -> AppResult<Vec<Device>>;
}
