//! Per-cycle bulk poll and metric emission.

use tracing::{error, trace};

use super::{MonitorState, RdtMonitor};
use crate::metrics::{MetricKind, MetricRecord, MetricSink};
use crate::provider::EventMask;
use crate::{Error, Result};

/// Display conversion for diagnostic traces; emitted values stay in bytes.
fn bytes_to_kb(bytes: f64) -> f64 {
    bytes / 1024.0
}

fn bytes_to_mb(bytes: f64) -> f64 {
    bytes / (1024.0 * 1024.0)
}

impl RdtMonitor {
    /// Runs one poll-and-emit cycle.
    ///
    /// A single bulk provider call refreshes every live context. If it fails,
    /// nothing is emitted this cycle and the error is reported to the host;
    /// the next scheduled cycle simply polls again. On success each group
    /// emits the metrics selected by its event mask, tagged with the group's
    /// bracketed description.
    pub fn poll(&mut self, sink: &mut dyn MetricSink) -> Result<()> {
        if self.state != MonitorState::Running {
            return Err(Error::invalid_state("poll", self.state));
        }

        if let Err(err) = self.provider.poll(self.table.contexts_mut()) {
            error!("failed to poll monitoring data: {err}");
            return Err(err);
        }

        self.dump_samples();

        for (group, context) in self.table.bound() {
            let values = context.values();

            if group.events().contains(EventMask::LLC_OCCUPANCY) {
                sink.dispatch(MetricRecord::gauge(
                    group.desc(),
                    MetricKind::Llc,
                    values.llc as f64,
                ));
            }

            if group.events().contains(EventMask::IPC) {
                sink.dispatch(MetricRecord::gauge(group.desc(), MetricKind::Ipc, values.ipc));
            }

            if group.events().intersects(EventMask::MBM) {
                sink.dispatch(MetricRecord::bandwidth(
                    group.desc(),
                    [
                        values.mbm_local as f64,
                        values.mbm_remote as f64,
                        values.mbm_total as f64,
                        values.mbm_local_delta as f64,
                        values.mbm_remote_delta as f64,
                        values.mbm_total_delta as f64,
                    ],
                ));
            }
        }

        Ok(())
    }

    fn dump_samples(&self) {
        trace!("  CORE     RMID    LLC[KB]   MBL[MB]    MBR[MB]");
        for (group, context) in self.table.bound() {
            let values = context.values();
            trace!(
                " [{}] {:8} {:10.1} {:10.1} {:10.1}",
                group.desc(),
                context.id(),
                bytes_to_kb(values.llc as f64),
                bytes_to_mb(values.mbm_local_delta as f64),
                bytes_to_mb(values.mbm_remote_delta as f64),
            );
        }
    }
}
