// Disk volume payloads

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskStat {
    pub mount: String,
    pub filesystem: Option<String>,
    pub used: Option<f64>,
    pub free: Option<f64>,
}
