//! Discrete metric records handed to the host's sink.
//!
//! Every record carries the crate's source identifier, the owning group's
//! description wrapped in brackets as the instance label, a type tag, and one
//! or six numeric values depending on the kind.

use serde::Serialize;

/// Source identifier stamped on every record this crate emits.
pub const PLUGIN_NAME: &str = "rdt";

/// Metric type tags understood by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Last-level-cache occupancy, one value, bytes.
    Llc,
    /// Instructions per cycle, one value.
    Ipc,
    /// Memory bandwidth, six values.
    Mbm,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Llc => "llc",
            MetricKind::Ipc => "ipc",
            MetricKind::Mbm => "mbm",
        }
    }
}

/// One emitted measurement for one core group.
///
/// Values are forwarded in the provider's native units; any human-readable
/// unit conversion happens only in diagnostic traces, never here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub plugin: &'static str,
    /// Bracket-wrapped group description, e.g. `"[0-3]"`.
    pub instance: String,
    pub kind: MetricKind,
    pub values: Vec<f64>,
}

impl MetricRecord {
    pub(crate) fn gauge(desc: &str, kind: MetricKind, value: f64) -> Self {
        Self {
            plugin: PLUGIN_NAME,
            instance: format!("[{desc}]"),
            kind,
            values: vec![value],
        }
    }

    /// The six-value bandwidth record: local, remote, and total cumulative
    /// counters followed by their interval deltas.
    pub(crate) fn bandwidth(desc: &str, values: [f64; 6]) -> Self {
        Self {
            plugin: PLUGIN_NAME,
            instance: format!("[{desc}]"),
            kind: MetricKind::Mbm,
            values: values.to_vec(),
        }
    }
}

/// Receives the records produced by each poll cycle.
pub trait MetricSink {
    fn dispatch(&mut self, record: MetricRecord);
}

/// Sink that buffers records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<MetricRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Drains the buffered records.
    pub fn take(&mut self) -> Vec<MetricRecord> {
        std::mem::take(&mut self.records)
    }
}

impl MetricSink for MemorySink {
    fn dispatch(&mut self, record: MetricRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_wraps_instance_in_brackets() {
        let record = MetricRecord::gauge("0-3", MetricKind::Llc, 2_097_152.0);
        assert_eq!(record.plugin, "rdt");
        assert_eq!(record.instance, "[0-3]");
        assert_eq!(record.kind, MetricKind::Llc);
        assert_eq!(record.values, vec![2_097_152.0]);
    }

    #[test]
    fn bandwidth_keeps_value_order() {
        let record = MetricRecord::bandwidth("7", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(record.kind, MetricKind::Mbm);
        assert_eq!(record.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(MetricKind::Llc.as_str(), "llc");
        assert_eq!(MetricKind::Ipc.as_str(), "ipc");
        assert_eq!(MetricKind::Mbm.as_str(), "mbm");
    }

    #[test]
    fn memory_sink_collects_and_drains() {
        let mut sink = MemorySink::new();
        sink.dispatch(MetricRecord::gauge("0", MetricKind::Ipc, 1.5));
        assert_eq!(sink.records().len(), 1);
        let drained = sink.take();
        assert_eq!(drained.len(), 1);
        assert!(sink.records().is_empty());
    }
}
