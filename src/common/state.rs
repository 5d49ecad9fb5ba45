use std::sync::Arc;
use std::time::Duration;

use crate::backend::TemperatureSource;
use crate::chart::{ChartBuilder, ChartState, DeviceSelection, SeriesStore, TimeFormatter, TimeWindow};
use crate::config::Config;
use crate::services::devices::DeviceDirectory;

/// The chart session shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<SeriesStore>,
    pub devices: Arc<DeviceDirectory>,
    pub builder: ChartBuilder,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn TemperatureSource>) -> Self {
        let selection = match &config.initial_device_ids {
            Some(ids) if !ids.is_empty() => DeviceSelection::ExplicitSet(ids.clone()),
            _ => DeviceSelection::AllWithToggle,
        };
        let initial = ChartState::new(selection, TimeWindow::default());

        let devices = DeviceDirectory::new(
            source.clone(),
            Duration::from_secs(config.device_cache_ttl_seconds),
        );

        Self {
            builder: ChartBuilder::new(TimeFormatter::new(config.display_zone)),
            store: Arc::new(SeriesStore::new(source, initial)),
            devices: Arc::new(devices),
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn formatter(&self) -> &TimeFormatter {
        self.builder.formatter()
    }
}
