use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{CacheCountersSnapshot, RingCountersSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for counter snapshots.
///
/// Writes in the Prometheus text exposition format so snapshots can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<CacheCountersSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheCountersSnapshot) {
        self.write_counter(&self.metric_name("set_total"), snapshot.sets);
        self.write_counter(&self.metric_name("get_total"), snapshot.gets);
        self.write_counter(&self.metric_name("hit_total"), snapshot.hits);
        self.write_counter(&self.metric_name("delete_total"), snapshot.deletes);
        self.write_counter(&self.metric_name("exists_total"), snapshot.exists);
        self.write_counter(&self.metric_name("evict_total"), snapshot.evicts);
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}

impl<W: Write + Send + Sync> MetricsExporter<RingCountersSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &RingCountersSnapshot) {
        self.write_counter(&self.metric_name("add_total"), snapshot.adds);
        self.write_counter(&self.metric_name("remove_total"), snapshot.removes);
        self.write_counter(&self.metric_name("get_total"), snapshot.gets);
        self.write_gauge(&self.metric_name("points"), snapshot.points as u64);
    }
}
