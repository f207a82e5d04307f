use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated over the dashboard's lifetime.
#[derive(Debug, Default, Clone)]
pub struct DashboardMetrics {
    resolves: u64,
    spanning_groups: u64,
    missing_modules: u64,
    renders: u64,
    dirty_zones: u64,
}

impl DashboardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_resolve(&mut self, spanning_groups: usize) {
        self.resolves = self.resolves.saturating_add(1);
        self.spanning_groups = self.spanning_groups.saturating_add(spanning_groups as u64);
    }

    pub fn record_missing_module(&mut self) {
        self.missing_modules = self.missing_modules.saturating_add(1);
    }

    pub fn record_render(&mut self, dirty_count: usize) {
        self.renders = self.renders.saturating_add(1);
        self.dirty_zones = self.dirty_zones.saturating_add(dirty_count as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            resolves: self.resolves,
            spanning_groups: self.spanning_groups,
            missing_modules: self.missing_modules,
            renders: self.renders,
            dirty_zones: self.dirty_zones,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub resolves: u64,
    pub spanning_groups: u64,
    pub missing_modules: u64,
    pub renders: u64,
    pub dirty_zones: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("resolves".to_string(), json!(self.resolves));
        fields.insert("spanning_groups".to_string(), json!(self.spanning_groups));
        fields.insert("missing_modules".to_string(), json!(self.missing_modules));
        fields.insert("renders".to_string(), json!(self.renders));
        fields.insert("dirty_zones".to_string(), json!(self.dirty_zones));
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "dashboard_metrics".to_string(),
            fields,
        )
    }
}
