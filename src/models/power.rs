// Power device payloads

use serde::{Deserialize, Serialize};

/// One power device as reported by the provider (e.g. BAT0, AC).
/// `device` is the identifier the battery preference list matches against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PowerDeviceStat {
    pub device: String,
    pub charging: Option<bool>,
    pub level: Option<f64>,
    pub remaining_time: Option<f64>,
}
