// Per-module freshness tracking

use std::collections::HashMap;

use crate::models::Module;

/// Remembers the last-applied update identifier per module. Providers poll
/// modules at different rates while delivering merged snapshots at their own
/// cadence, so the same module data can arrive many times; the tracker is
/// what keeps derivations from re-running on repeats.
///
/// Timestamps are opaque identifiers: equality, not ordering, decides
/// staleness. A module delivered without a timestamp is treated as fresh on
/// every snapshot.
#[derive(Debug, Default)]
pub struct FreshnessTracker {
    applied: HashMap<Module, u64>,
}

impl FreshnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff nothing has been applied for `module` yet, or the incoming
    /// identifier differs from the applied one.
    pub fn is_fresh(&self, module: Module, incoming: Option<u64>) -> bool {
        match (incoming, self.applied.get(&module)) {
            (Some(ts), Some(applied)) => *applied != ts,
            _ => true,
        }
    }

    /// Records `incoming` as applied. Must be called once a module's update
    /// is accepted; skipping it only degrades to re-running the derivation
    /// on the next snapshot.
    pub fn commit(&mut self, module: Module, incoming: Option<u64>) {
        if let Some(ts) = incoming {
            self.applied.insert(module, ts);
        }
    }
}
