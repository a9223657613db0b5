// Incoming snapshot: per-module payloads + per-module update timestamps

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    CpuStats, DiskStat, IoStats, MemoryStats, NetAdapterStat, PowerDeviceStat, ProcessStat,
    SystemStats,
};
use crate::error::SnapshotError;

/// Telemetry module names as they appear on the wire and as keys of the
/// `lastUpdate` timestamp map. Unknown names decode to `Unknown` so a
/// provider that reports extra modules does not fail the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Module {
    Cpu,
    Memory,
    Net,
    Power,
    Io,
    Disks,
    System,
    #[serde(rename = "topCPU")]
    TopCpu,
    TopMemory,
    Dropbox,
    #[serde(other)]
    Unknown,
}

/// One delivered batch of telemetry. Every module is optional: providers
/// poll modules at different frequencies and only include what they have.
/// `last_update` carries the source-assigned update identifier per module;
/// it is opaque (equality-compared only, not ordered) and may be missing
/// for a module that is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSnapshot {
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryStats>,
    pub net: Option<Vec<NetAdapterStat>>,
    pub power: Option<Vec<PowerDeviceStat>>,
    pub io: Option<IoStats>,
    pub disks: Option<Vec<DiskStat>>,
    pub system: Option<SystemStats>,
    #[serde(rename = "topCPU")]
    pub top_cpu: Option<Vec<ProcessStat>>,
    pub top_memory: Option<Vec<ProcessStat>>,
    pub dropbox: Option<String>,
    pub last_update: HashMap<Module, u64>,
}

impl RawSnapshot {
    /// Decode one snapshot from provider JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The source-assigned update identifier for `module`, if any.
    pub fn timestamp(&self, module: Module) -> Option<u64> {
        self.last_update.get(&module).copied()
    }
}
