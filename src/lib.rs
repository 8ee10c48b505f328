//! rdt-metrics - core-group telemetry for hardware resource monitoring
//!
//! This crate turns a human-supplied list of CPU core ranges into a validated
//! set of disjoint monitoring groups, binds each group to a hardware
//! monitoring context obtained from a capability provider, and on each
//! scheduled cycle reads per-group counters and converts them into discrete
//! metric records.
//!
//! # Features
//!
//! - **Core-list parsing**: comma-separated singles and ranges, decimal or
//!   hex, with first-seen deduplication
//! - **Group validation**: pairwise disjointness checking; overlapping groups
//!   reject the whole configuration
//! - **Default groups**: one singleton group per core when nothing is
//!   configured
//! - **Gated emission**: LLC occupancy, instructions-per-cycle, and six-value
//!   memory-bandwidth records, selected per group by an event mask
//! - **Explicit lifecycle**: configure, start, poll, shutdown as a state
//!   machine with idempotent provider setup and teardown
//!
//! The hardware itself stays behind the [`provider::RdtProvider`] trait; the
//! scheduling host and the metric sink are equally external. See the module
//! docs for the individual contracts.
//!
//! # Examples
//!
//! ```rust
//! use rdt_metrics::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct NullProvider {
//!     next_id: u32,
//! }
//!
//! impl RdtProvider for NullProvider {
//!     fn init(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn shutdown(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn topology(&self) -> Result<CoreTopology> {
//!         let cores = (0..4).map(|lcore| CoreInfo { lcore, socket: 0 }).collect();
//!         Ok(CoreTopology::new(cores))
//!     }
//!     fn monitoring_events(&self) -> Result<EventMask> {
//!         Ok(EventMask::LLC_OCCUPANCY | EventMask::IPC)
//!     }
//!     fn start_group(&mut self, _cores: &[u32], _events: EventMask) -> Result<MonitorId> {
//!         self.next_id += 1;
//!         Ok(MonitorId(self.next_id))
//!     }
//!     fn stop_group(&mut self, _id: MonitorId) -> Result<()> {
//!         Ok(())
//!     }
//!     fn poll(&mut self, _contexts: &mut [MonitoringContext]) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut monitor = RdtMonitor::new(Box::new(NullProvider::default()));
//!
//!     let config = ConfigItem::block("rdt", vec![ConfigItem::strings("Cores", ["0-1", "2-3"])]);
//!     monitor.apply_config(&config)?;
//!     monitor.start()?;
//!
//!     let mut sink = MemorySink::new();
//!     monitor.poll(&mut sink)?;
//!     assert_eq!(sink.records().len(), 4); // llc + ipc for each group
//!
//!     monitor.shutdown()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! The crate uses a single [`Error`] type covering configuration rejection,
//! missing platform capability, provider failures, and lifecycle misuse.
//! Configuration and start errors are fatal: the subsystem never reaches a
//! running state with a partial group set. Poll errors surface as missed
//! cycles and the host's next scheduled cycle retries naturally.
//!
//! # Thread Safety
//!
//! The engine is single-threaded by contract: the host guarantees that
//! configure, start, poll, and shutdown never run concurrently and that poll
//! cycles are strictly sequential, so no internal locking exists.

// Public modules
pub mod config;
pub mod cores;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod provider;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::config::{ConfigItem, ConfigValue};
    pub use crate::cores::{parse_core_list, CoreGroup, GroupOverlap};
    pub use crate::error::{Error, Result};
    pub use crate::metrics::{MemorySink, MetricKind, MetricRecord, MetricSink, PLUGIN_NAME};
    pub use crate::monitor::{MonitorState, RdtMonitor, MAX_CORES};
    pub use crate::provider::{
        CoreInfo, CoreTopology, EventMask, EventValues, MonitorId, MonitoringContext, RdtProvider,
    };
}
