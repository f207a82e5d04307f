use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::config::LayoutConfig;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::DashboardMetrics;
use crate::module::{ModuleId, ModuleRegistry, RenderableUnit};

/// Name of a slot in a layout (`zone1`, `sidebar`, ...).
pub type ZoneId = String;

/// A zone that should render content: the module that won the slot, its
/// display title, and a live instance of its renderable unit.
pub struct ResolvedZone {
    pub module_id: ModuleId,
    pub title: String,
    unit: Box<dyn RenderableUnit>,
}

impl ResolvedZone {
    pub fn unit(&self) -> &dyn RenderableUnit {
        self.unit.as_ref()
    }
}

impl fmt::Debug for ResolvedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedZone")
            .field("module_id", &self.module_id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Output of a resolution pass. Transient: recomputed whenever configuration
/// or registry change (in practice, once per process).
///
/// `spans` carries entries only for spanning anchors; consumers treat absent
/// zones as span 1. A zone never appears in both `zones` and `hidden`.
#[derive(Debug, Default)]
pub struct ResolvedLayout {
    zones: HashMap<ZoneId, ResolvedZone>,
    spans: HashMap<ZoneId, u16>,
    hidden: HashSet<ZoneId>,
}

impl ResolvedLayout {
    pub fn zone(&self, name: &str) -> Option<&ResolvedZone> {
        self.zones.get(name)
    }

    pub fn zones(&self) -> &HashMap<ZoneId, ResolvedZone> {
        &self.zones
    }

    pub fn spans(&self) -> &HashMap<ZoneId, u16> {
        &self.spans
    }

    pub fn hidden(&self) -> &HashSet<ZoneId> {
        &self.hidden
    }

    pub fn span_of(&self, name: &str) -> u16 {
        self.spans.get(name).copied().unwrap_or(1)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }
}

/// Maps a configuration and registry onto per-zone render instructions for
/// one renderer's zone vocabulary.
///
/// Span detection is implicit: assigning the same module id to several zones
/// makes the lexicographically-first of them the visible anchor spanning the
/// whole group, and hides the rest. The configuration format stays a flat
/// zone-to-module mapping.
#[derive(Default)]
pub struct ZoneResolver {
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<DashboardMetrics>>>,
}

impl ZoneResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Mutex<DashboardMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Resolve `config.assignments` against `registry`, considering only the
    /// zone names in `vocabulary`.
    ///
    /// Pure with respect to its inputs: the same configuration, registry,
    /// and vocabulary always produce a structurally identical layout.
    pub fn resolve(
        &self,
        config: &LayoutConfig,
        registry: &ModuleRegistry,
        vocabulary: &[&str],
    ) -> ResolvedLayout {
        // Assignments for other layout kinds are expected in shared
        // configurations; drop them without a diagnostic.
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (zone, module_id) in &config.assignments {
            if !vocabulary.contains(&zone.as_str()) {
                continue;
            }
            groups.entry(module_id.as_str()).or_default().push(zone);
        }

        let mut layout = ResolvedLayout::default();
        let mut spanning_groups = 0usize;

        for (module_id, mut zones) in groups {
            zones.sort_unstable();

            let Some(descriptor) = registry.lookup(module_id) else {
                self.warn_module_not_found(module_id, &zones);
                self.record_missing_module();
                continue;
            };

            let anchor = zones[0];
            let span = zones.len() as u16;
            if span > 1 {
                spanning_groups += 1;
                layout.spans.insert(anchor.to_string(), span);
                for covered in &zones[1..] {
                    layout.hidden.insert((*covered).to_string());
                }
            }

            // One instance per group, mounted at the anchor.
            layout.zones.insert(
                anchor.to_string(),
                ResolvedZone {
                    module_id: descriptor.id().to_string(),
                    title: descriptor.title().to_string(),
                    unit: descriptor.instantiate(),
                },
            );
        }

        self.record_resolve(spanning_groups);
        layout
    }

    fn warn_module_not_found(&self, module_id: &str, zones: &[&str]) {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(
                LogLevel::Warn,
                "scoreboard::resolve",
                "module_not_found",
                [
                    json_kv("module", json!(module_id)),
                    json_kv("zones", json!(zones)),
                ],
            );
            let _ = logger.log_event(event);
        }
    }

    fn record_resolve(&self, spanning_groups: usize) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_resolve(spanning_groups);
            }
        }
    }

    fn record_missing_module(&self) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_missing_module();
            }
        }
    }
}
