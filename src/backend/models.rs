use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::chart::model::Series;

/// Response from `/api/v1/temperature`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureResponse {
    #[serde(default)]
    pub series: Vec<Series>,
}

/// Response from `/api/v1/status`. Only the device list is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Device {
    pub device_id: i64,
    #[serde(default)]
    pub device_name: String,
}
