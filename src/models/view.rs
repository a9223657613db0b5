// Display view-model: latest value per module plus derived fields

use serde::{Deserialize, Serialize};

use super::{
    CpuStats, IoStats, MemoryStats, NetAdapterStat, NetTotal, PowerDeviceStat, ProcessStat,
    SystemStats,
};

/// Memory counters plus the derived percent. `percent_used` is
/// `round(used*100/total)`, unclamped above 100; it stays at its previous
/// value when an update carries invalid numerics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryView {
    pub total: Option<f64>,
    pub free: Option<f64>,
    pub used: Option<f64>,
    pub buffers: Option<f64>,
    pub cache: Option<f64>,
    pub percent_used: Option<i64>,
}

impl MemoryView {
    /// Carries raw counters into the view; the derived percent is set by the
    /// reconciler.
    pub fn from_raw(raw: &MemoryStats, percent_used: Option<i64>) -> Self {
        Self {
            total: raw.total,
            free: raw.free,
            used: raw.used,
            buffers: raw.buffers,
            cache: raw.cache,
            percent_used,
        }
    }
}

/// One disk volume plus its derived percent. `percent_used` is `null` when
/// `used + free == 0` or either counter is missing or non-finite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskView {
    pub mount: String,
    pub filesystem: Option<String>,
    pub used: Option<f64>,
    pub free: Option<f64>,
    pub percent_used: Option<i64>,
}

/// The accumulated, display-ready state: most recent payload per module plus
/// every derived field. Starts empty; modules absent from a snapshot keep
/// their previous values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewModel {
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryView>,
    pub net: Vec<NetAdapterStat>,
    pub net_total: NetTotal,
    pub power: Vec<PowerDeviceStat>,
    pub battery: Option<PowerDeviceStat>,
    pub io: Option<IoStats>,
    pub disks: Vec<DiskView>,
    pub system: Option<SystemStats>,
    #[serde(rename = "topCPU")]
    pub top_cpu: Vec<ProcessStat>,
    pub top_memory: Vec<ProcessStat>,
    pub dropbox: Option<String>,
}
