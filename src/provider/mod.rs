//! Capability-provider interface for hardware resource monitoring.
//!
//! The engine never touches hardware itself. Topology discovery, monitoring-id
//! allocation, and counter reads are delegated to an [`RdtProvider`]
//! implementation supplied by the embedding host, and the engine consumes it
//! as a `Box<dyn RdtProvider>`. Tests substitute a mock.

use std::fmt;

use bitflags::bitflags;

#[cfg(test)]
use mockall::automock;

use crate::Result;

bitflags! {
    /// Monitoring event kinds a platform can report.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct EventMask: u32 {
        /// Last-level-cache occupancy, in bytes.
        const LLC_OCCUPANCY = 0x01;
        /// Local-socket memory bandwidth.
        const LMEM_BW = 0x02;
        /// Total memory bandwidth.
        const TMEM_BW = 0x04;
        /// Remote-socket memory bandwidth.
        const RMEM_BW = 0x08;
        /// LLC miss sampling; not readable in polled mode, so it is never
        /// assigned to a group even when the platform advertises it.
        const LLC_MISS = 0x10;
        /// Retired instructions per cycle.
        const IPC = 0x20;

        /// The bandwidth kinds feeding the six-value `mbm` record.
        const MBM = Self::LMEM_BW.bits() | Self::TMEM_BW.bits() | Self::RMEM_BW.bits();
    }
}

/// Opaque identifier of a live hardware monitoring binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(pub u32);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One logical core as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreInfo {
    pub lcore: u32,
    pub socket: u32,
}

/// Platform core layout, ascending by logical core id.
#[derive(Debug, Clone, Default)]
pub struct CoreTopology {
    pub cores: Vec<CoreInfo>,
}

impl CoreTopology {
    pub fn new(cores: Vec<CoreInfo>) -> Self {
        Self { cores }
    }

    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }
}

/// Latest sample for one monitored group, in provider-native units.
///
/// Occupancy and bandwidth counters are byte counts; `ipc` is a ratio.
/// Bandwidth comes as a cumulative counter plus the delta over the last
/// polling interval, for each of the local, remote, and total directions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventValues {
    pub llc: u64,
    pub ipc: f64,
    pub mbm_local: u64,
    pub mbm_remote: u64,
    pub mbm_total: u64,
    pub mbm_local_delta: u64,
    pub mbm_remote_delta: u64,
    pub mbm_total_delta: u64,
}

/// Runtime binding of one core group to the provider's monitoring id.
///
/// Created when monitoring starts and mutated in place by every poll.
#[derive(Debug, Clone)]
pub struct MonitoringContext {
    id: MonitorId,
    values: EventValues,
}

impl MonitoringContext {
    pub fn new(id: MonitorId) -> Self {
        Self {
            id,
            values: EventValues::default(),
        }
    }

    pub fn id(&self) -> MonitorId {
        self.id
    }

    pub fn values(&self) -> &EventValues {
        &self.values
    }

    /// Providers write refreshed samples here during a bulk poll.
    pub fn values_mut(&mut self) -> &mut EventValues {
        &mut self.values
    }
}

/// Low-level monitoring capability provider.
///
/// Implementations wrap the platform's resource-monitoring infrastructure.
/// All calls are made from a single thread; none are reentrant.
#[cfg_attr(test, automock)]
pub trait RdtProvider: fmt::Debug {
    /// Process-wide provider setup.
    ///
    /// The engine calls this at most once per lifecycle; implementations are
    /// expected to clear any leftover state from a predecessor instance that
    /// was not shut down cleanly.
    fn init(&mut self) -> Result<()>;

    /// Process-wide provider teardown.
    fn shutdown(&mut self) -> Result<()>;

    /// Ordered list of the platform's logical cores.
    fn topology(&self) -> Result<CoreTopology>;

    /// Event kinds supported on this platform.
    ///
    /// An empty mask means the platform has no monitoring capability at all.
    fn monitoring_events(&self) -> Result<EventMask>;

    /// Binds a core set and event mask to a fresh hardware monitoring id.
    fn start_group(&mut self, cores: &[u32], events: EventMask) -> Result<MonitorId>;

    /// Releases the hardware binding behind `id`.
    fn stop_group(&mut self, id: MonitorId) -> Result<()>;

    /// Refreshes every context's sample in one call.
    ///
    /// All-or-nothing: on error no sample may have been updated.
    fn poll(&mut self, contexts: &mut [MonitoringContext]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbm_covers_all_bandwidth_kinds() {
        assert!(EventMask::MBM.contains(EventMask::LMEM_BW));
        assert!(EventMask::MBM.contains(EventMask::TMEM_BW));
        assert!(EventMask::MBM.contains(EventMask::RMEM_BW));
        assert!(!EventMask::MBM.intersects(EventMask::LLC_OCCUPANCY | EventMask::IPC));
    }

    #[test]
    fn context_starts_with_zeroed_sample() {
        let context = MonitoringContext::new(MonitorId(7));
        assert_eq!(context.id(), MonitorId(7));
        assert_eq!(*context.values(), EventValues::default());
    }
}
