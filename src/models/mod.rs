// Domain models: raw provider payloads and the display view-model

mod net;
mod power;
mod snapshot;
mod storage;
mod system;
mod view;

pub use net::{NetAdapterStat, NetTotal};
pub use power::PowerDeviceStat;
pub use snapshot::{Module, RawSnapshot};
pub use storage::DiskStat;
pub use system::{CpuStats, IoStats, MemoryStats, ProcessStat, SystemStats};
pub use view::{DiskView, MemoryView, ViewModel};
