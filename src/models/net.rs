// Network adapter payloads and the aggregated throughput view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetAdapterStat {
    pub name: String,
    pub down_speed: Option<f64>,
    pub up_speed: Option<f64>,
}

/// Sum of down/up speeds across all adapters of the current snapshot.
/// Adapters with an absent or non-finite speed contribute 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetTotal {
    pub down_speed: f64,
    pub up_speed: f64,
}
