// Telemetry reconciliation engine: folds irregular, partial snapshots into
// one coherent view-model without letting stale or invalid data through.

mod freshness;
pub mod rules;

pub use freshness::FreshnessTracker;

use crate::models::{MemoryView, Module, RawSnapshot, ViewModel};

/// Owns the accumulated view-model and the per-module freshness map.
/// Constructed once at startup; `reconcile` is the sole mutating entry
/// point. Synchronous and single-pass — the caller provides the
/// serialization boundary (one lock around a full `reconcile` call in a
/// threaded host).
pub struct Reconciler {
    view: ViewModel,
    freshness: FreshnessTracker,
    main_battery: Vec<String>,
}

impl Reconciler {
    /// `main_battery` is the ordered battery-device preference list; the
    /// first listed device found in a power payload becomes the display
    /// battery.
    pub fn new(main_battery: Vec<String>) -> Self {
        Self {
            view: ViewModel::default(),
            freshness: FreshnessTracker::new(),
            main_battery,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Folds one snapshot into the view-model:
    ///
    /// 1. Modules without a derivation rule pass through verbatim when
    ///    present; absent modules leave previous values untouched.
    /// 2. Modules with a derivation rule (power, memory, disks) apply only
    ///    when fresh; freshness is committed on acceptance. An unchanged
    ///    timestamp means an identical payload, so stale module data is
    ///    skipped wholesale and derived fields stay byte-identical.
    /// 3. The network aggregate is recomputed unconditionally from the
    ///    current adapter list — it is a re-aggregation, not a time series.
    ///
    /// Invalid numerics never propagate: a derivation that cannot produce a
    /// valid value retains the previous one (memory) or marks the field
    /// absent (disk volumes with a zero total).
    pub fn reconcile(&mut self, snapshot: RawSnapshot) -> &ViewModel {
        if let Some(cpu) = snapshot.cpu {
            self.view.cpu = Some(cpu);
        }
        if let Some(io) = snapshot.io {
            self.view.io = Some(io);
        }
        if let Some(system) = snapshot.system {
            self.view.system = Some(system);
        }
        if let Some(top_cpu) = snapshot.top_cpu {
            self.view.top_cpu = top_cpu;
        }
        if let Some(top_memory) = snapshot.top_memory {
            self.view.top_memory = top_memory;
        }
        if let Some(dropbox) = snapshot.dropbox {
            self.view.dropbox = Some(dropbox);
        }
        if let Some(net) = snapshot.net {
            self.view.net = net;
        }

        if let Some(power) = snapshot.power {
            let ts = snapshot.last_update.get(&Module::Power).copied();
            if self.freshness.is_fresh(Module::Power, ts) {
                // Fresh power with no preference match clears the battery
                // explicitly; a stale battery reading is worse than none.
                self.view.battery = rules::select_battery(&power, &self.main_battery);
                self.view.power = power;
                self.freshness.commit(Module::Power, ts);
            }
        }

        if let Some(memory) = snapshot.memory {
            let ts = snapshot.last_update.get(&Module::Memory).copied();
            if self.freshness.is_fresh(Module::Memory, ts) {
                let previous = self.view.memory.as_ref().and_then(|m| m.percent_used);
                let percent = rules::memory_percent(&memory);
                self.view.memory = Some(MemoryView::from_raw(&memory, percent.or(previous)));
                // Commit only on a computed percent: an invalid payload is
                // retried against the next snapshot carrying this timestamp.
                if percent.is_some() {
                    self.freshness.commit(Module::Memory, ts);
                }
            }
        }

        if let Some(disks) = snapshot.disks {
            let ts = snapshot.last_update.get(&Module::Disks).copied();
            if self.freshness.is_fresh(Module::Disks, ts) {
                // The whole array is replaced atomically; there is no
                // per-volume freshness.
                self.view.disks = rules::disk_views(&disks);
                self.freshness.commit(Module::Disks, ts);
            }
        }

        self.view.net_total = rules::net_total(&self.view.net);

        &self.view
    }
}
