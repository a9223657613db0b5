// Derivation rules: one pure function per derived metric.
// Every rule returns Option; None means "no valid value", which the
// reconciler maps to either retain-previous or field-absent per metric.

use crate::models::{DiskStat, DiskView, MemoryStats, NetAdapterStat, NetTotal, PowerDeviceStat};

/// The single numeric-validity gate used by all rules: a value is usable iff
/// present and finite. Explicit on purpose — a legitimate 0 is valid here.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Selects the display battery: scans `devices` in their given order and
/// returns the first whose identifier is a member of `preferred`. Returns
/// None when nothing matches, which clears the battery field.
pub fn select_battery(
    devices: &[PowerDeviceStat],
    preferred: &[String],
) -> Option<PowerDeviceStat> {
    devices
        .iter()
        .find(|dev| preferred.iter().any(|p| p == &dev.device))
        .cloned()
}

/// `round(used*100/total)`, unclamped above 100. None unless both counters
/// are finite and `total` is non-zero.
pub fn memory_percent(memory: &MemoryStats) -> Option<i64> {
    let used = finite(memory.used)?;
    let total = finite(memory.total)?;
    if total == 0.0 {
        return None;
    }
    Some((used * 100.0 / total).round() as i64)
}

/// Builds the display view of one disks payload, computing `percent_used`
/// per volume. A volume with `used + free == 0` or invalid counters gets an
/// absent percent rather than a division artifact.
pub fn disk_views(disks: &[DiskStat]) -> Vec<DiskView> {
    disks
        .iter()
        .map(|d| DiskView {
            mount: d.mount.clone(),
            filesystem: d.filesystem.clone(),
            used: d.used,
            free: d.free,
            percent_used: disk_percent(d),
        })
        .collect()
}

fn disk_percent(disk: &DiskStat) -> Option<i64> {
    let used = finite(disk.used)?;
    let free = finite(disk.free)?;
    let total = used + free;
    if total == 0.0 {
        return None;
    }
    Some((used * 100.0 / total).round() as i64)
}

/// Sums down/up speeds across `adapters`. Absent or non-finite subfields
/// contribute 0; an empty adapter list yields zero totals.
pub fn net_total(adapters: &[NetAdapterStat]) -> NetTotal {
    let mut total = NetTotal::default();
    for adapter in adapters {
        if let Some(down) = finite(adapter.down_speed) {
            total.down_speed += down;
        }
        if let Some(up) = finite(adapter.up_speed) {
            total.up_speed += up;
        }
    }
    total
}
