//! Monitoring lifecycle: configuration, start, poll dispatch, teardown.
//!
//! [`RdtMonitor`] is the context object the embedding host threads through its
//! entry points. It owns the capability provider, the group table, and an
//! explicit lifecycle state; operations invalid for the current state are
//! rejected instead of dereferencing half-built state.
//!
//! The host may deliver configuration before or after its init callback runs;
//! both paths funnel through the same idempotent provider setup and converge
//! on the same validated group set.

mod poll;
mod table;


use std::fmt;

use scopeguard::ScopeGuard;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigItem, ConfigValue};
use crate::cores::{parse_core_list, CoreGroup, GroupOverlap};
use crate::provider::{CoreTopology, EventMask, MonitoringContext, RdtProvider};
use crate::{Error, Result};
use table::GroupTable;

pub const MAX_SOCKETS: usize = 8;
pub const MAX_SOCKET_CORES: usize = 64;
/// Upper bound on monitored groups; one group per core in the worst case.
pub const MAX_CORES: usize = MAX_SOCKET_CORES * MAX_SOCKETS;

const CORES_OPTION: &str = "Cores";

/// Lifecycle phase of an [`RdtMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Uninitialized,
    Configured,
    Running,
    Stopped,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorState::Uninitialized => "uninitialized",
            MonitorState::Configured => "configured",
            MonitorState::Running => "running",
            MonitorState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Core-group monitoring engine.
///
/// Construction is cheap and infallible; the provider is brought up lazily by
/// the first entry point that needs it. The expected call sequence is
/// [`apply_config`](Self::apply_config) (or [`configure`](Self::configure)),
/// then [`start`](Self::start), then [`poll`](Self::poll) once per scheduled
/// cycle, then [`shutdown`](Self::shutdown). Shutdown is safe to call from any
/// state, including after a failed start.
#[derive(Debug)]
pub struct RdtMonitor {
    provider: Box<dyn RdtProvider>,
    state: MonitorState,
    initialized: bool,
    table: GroupTable,
    topology: CoreTopology,
    supported: EventMask,
}

impl RdtMonitor {
    pub fn new(provider: Box<dyn RdtProvider>) -> Self {
        Self {
            provider,
            state: MonitorState::Uninitialized,
            initialized: false,
            table: GroupTable::new(),
            topology: CoreTopology::default(),
            supported: EventMask::empty(),
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn num_groups(&self) -> usize {
        self.table.num_groups()
    }

    /// The accepted core groups, in configuration order.
    pub fn groups(&self) -> &[CoreGroup] {
        self.table.groups()
    }

    /// Host init entry point; idempotent.
    ///
    /// Brings the provider up and caches topology and capabilities. A no-op
    /// when a configuration callback already did so.
    pub fn init(&mut self) -> Result<()> {
        self.ensure_initialized()
    }

    fn ensure_initialized(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        self.provider.init()?;

        // Undo the provider setup if the capability queries below fail.
        let provider = scopeguard::guard(&mut self.provider, |provider| {
            if let Err(err) = provider.shutdown() {
                error!("provider shutdown after failed setup: {err}");
            }
        });

        let topology = provider.topology()?;
        let supported = provider.monitoring_events()?;
        if supported.is_empty() {
            error!("monitoring capability not detected, nothing to do");
            return Err(Error::CapabilityMissing);
        }

        ScopeGuard::into_inner(provider);
        self.topology = topology;
        self.supported = supported;
        self.initialized = true;
        debug!(
            "monitoring provider initialized: {} cores, events {:#x}",
            self.topology.num_cores(),
            self.supported.bits()
        );
        Ok(())
    }

    /// Configuration-apply entry point.
    ///
    /// Walks the option block's children, interpreting the `Cores` option
    /// (case-insensitive). Unknown options are logged and skipped. A block
    /// with no `Cores` option configures the default per-core groups.
    pub fn apply_config(&mut self, config: &ConfigItem) -> Result<()> {
        let mut cores_option = None;
        for child in &config.children {
            if child.key.eq_ignore_ascii_case(CORES_OPTION) {
                cores_option = Some(child);
            } else {
                error!("unknown configuration parameter \"{}\"", child.key);
            }
        }
        self.configure(cores_option)
    }

    /// Builds and validates the core-group set from a `Cores` option.
    ///
    /// With no option, or with an option whose expressions yield no cores,
    /// one singleton group per physical core is synthesized. The whole
    /// configuration is rejected on any syntax error, non-string value, or
    /// pair of non-disjoint groups; in that case no group stays behind.
    pub fn configure(&mut self, cores_option: Option<&ConfigItem>) -> Result<()> {
        match self.state {
            MonitorState::Uninitialized | MonitorState::Configured => {}
            state => return Err(Error::invalid_state("configure", state)),
        }
        self.ensure_initialized()?;

        self.table.clear();
        if let Err(err) = self.build_groups(cores_option) {
            self.table.clear();
            error!("core group configuration rejected: {err}");
            return Err(err);
        }

        self.state = MonitorState::Configured;
        self.dump_groups();
        Ok(())
    }

    fn build_groups(&mut self, cores_option: Option<&ConfigItem>) -> Result<()> {
        if let Some(item) = cores_option {
            self.groups_from_option(item)?;
        }

        if self.table.num_groups() == 0 {
            self.default_groups()?;
            info!("no core groups configured, monitoring each core separately");
        }

        // Everything the platform advertises, except LLC miss sampling which
        // cannot be read in polled mode.
        let events = self.supported & !EventMask::LLC_MISS;
        debug!("events available to monitor: {:#x}", events.bits());
        self.table.set_events(events);

        self.validate_disjoint()
    }

    fn groups_from_option(&mut self, item: &ConfigItem) -> Result<()> {
        for (index, value) in item.values.iter().enumerate() {
            let expr = match value {
                ConfigValue::String(s) => s,
                _ => {
                    return Err(Error::invalid_config(format!(
                        "core group value is not a string [idx={index}]"
                    )))
                }
            };
            if expr.is_empty() {
                continue;
            }

            let cores = match parse_core_list(expr, MAX_CORES) {
                Ok(cores) => cores,
                Err(err) => {
                    error!("error parsing core group ({expr})");
                    return Err(err);
                }
            };
            // whitespace-only expression: nothing to monitor from this entry
            if cores.is_empty() {
                continue;
            }

            self.table.push_group(CoreGroup::new(expr.clone(), cores)?);
            if self.table.is_full() {
                warn!("too many core groups configured, keeping the first {MAX_CORES}");
                return Ok(());
            }
        }
        Ok(())
    }

    /// One singleton group per physical core, in topology order, with the
    /// core's decimal id as the description.
    fn default_groups(&mut self) -> Result<()> {
        for core in &self.topology.cores {
            if self.table.is_full() {
                warn!("platform reports more cores than the table holds, keeping the first {MAX_CORES}");
                break;
            }
            self.table
                .push_group(CoreGroup::new(core.lcore.to_string(), vec![core.lcore])?);
        }
        Ok(())
    }

    fn validate_disjoint(&self) -> Result<()> {
        let groups = self.table.groups();
        for (index, group) in groups.iter().enumerate() {
            for accepted in &groups[..index] {
                if accepted.overlap(group) != GroupOverlap::Disjoint {
                    return Err(Error::invalid_config(format!(
                        "cannot monitor the same cores in groups '{}' and '{}'",
                        accepted.desc(),
                        group.desc()
                    )));
                }
            }
        }
        Ok(())
    }

    fn dump_groups(&self) {
        debug!("core groups: {}", self.table.num_groups());
        for (index, group) in self.table.groups().iter().enumerate() {
            debug!(
                "  group[{index}]: desc={} cores={:?} events={:#x}",
                group.desc(),
                group.cores(),
                group.events().bits()
            );
        }
    }

    /// Binds every configured group to a live hardware monitoring id.
    ///
    /// Groups start in table order. The first failure aborts the sequence
    /// with the provider's error; contexts already bound stay live and are
    /// released by [`shutdown`](Self::shutdown), which the host must still
    /// call on this path.
    pub fn start(&mut self) -> Result<()> {
        if self.state != MonitorState::Configured {
            return Err(Error::invalid_state("start", self.state));
        }

        for index in 0..self.table.num_groups() {
            let group = &self.table.groups()[index];
            let id = self
                .provider
                .start_group(group.cores(), group.events())
                .map_err(|err| {
                    error!("error starting monitoring group '{}': {err}", group.desc());
                    err
                })?;
            self.table.bind(MonitoringContext::new(id));
        }

        self.state = MonitorState::Running;
        info!("monitoring started with {} groups", self.table.num_groups());
        Ok(())
    }

    /// Releases every resource; safe to call in any state and more than once.
    ///
    /// Stop failures for individual contexts are logged and do not block
    /// releasing the rest.
    pub fn shutdown(&mut self) -> Result<()> {
        debug!("shutting down");

        for context in self.table.contexts() {
            if let Err(err) = self.provider.stop_group(context.id()) {
                warn!("failed to stop monitoring id {}: {err}", context.id());
            }
        }

        if self.initialized {
            if let Err(err) = self.provider.shutdown() {
                error!("error shutting down the monitoring provider: {err}");
            }
        }

        self.table.clear();
        self.initialized = false;
        self.state = MonitorState::Stopped;
        Ok(())
    }
}
