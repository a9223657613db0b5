// CPU, memory, I/O, process and system identity payloads

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuStats {
    pub usage: Option<f64>,
    pub load: Vec<f64>,
}

/// Raw memory counters as delivered by the provider. Byte counts are f64 so
/// that non-finite values survive to the validity gate instead of failing
/// decode when the snapshot is built in-process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryStats {
    pub total: Option<f64>,
    pub free: Option<f64>,
    pub used: Option<f64>,
    pub buffers: Option<f64>,
    pub cache: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IoStats {
    pub total_read: Option<f64>,
    pub total_write: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStats {
    pub platform: Option<String>,
    pub arch: Option<String>,
    pub hostname: Option<String>,
    pub uptime: Option<f64>,
}

/// One entry of a topCPU / topMemory process ranking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessStat {
    pub pid: Option<u32>,
    pub name: String,
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
}
