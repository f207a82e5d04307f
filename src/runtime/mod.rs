use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::DashboardMetrics;
use crate::module::ModuleRegistry;
use crate::render::{LayoutRenderer, ZonePainter, ZoneSlot, renderer_for};
use crate::resolve::{ResolvedLayout, ZoneResolver};
use crate::surface::SurfaceRegistry;

/// Configuration knobs for the dashboard loop.
#[derive(Clone)]
pub struct RuntimeOptions {
    /// Interval between synthetic tick events (module content refresh).
    pub tick_interval: Duration,
    /// Optional structured logger used by the runtime and resolver.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<DashboardMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "scoreboard::runtime.metrics".to_string(),
        }
    }
}

impl RuntimeOptions {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(DashboardMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<DashboardMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// High-level events driving the dashboard.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    Tick { elapsed: Duration },
    Key(KeyEvent),
    Resize(Size),
}

/// Single-threaded dashboard loop: resolve once, arrange, paint, then
/// repaint on resize and refresh module content on ticks.
pub struct Dashboard {
    config: LayoutConfig,
    renderer: Box<dyn LayoutRenderer>,
    resolved: ResolvedLayout,
    slots: Vec<ZoneSlot>,
    surfaces: SurfaceRegistry,
    painter: ZonePainter,
    options: RuntimeOptions,
    size: Size,
    should_exit: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl Dashboard {
    pub fn new(config: LayoutConfig, registry: ModuleRegistry, initial_size: Size) -> Result<Self> {
        Self::with_options(config, registry, initial_size, RuntimeOptions::default())
    }

    pub fn with_options(
        config: LayoutConfig,
        registry: ModuleRegistry,
        initial_size: Size,
        options: RuntimeOptions,
    ) -> Result<Self> {
        config.validate()?;

        let renderer = renderer_for(&config);

        let mut resolver = ZoneResolver::new();
        if let Some(logger) = options.logger.clone() {
            resolver = resolver.with_logger(logger);
        }
        if let Some(metrics) = options.metrics_handle() {
            resolver = resolver.with_metrics(metrics);
        }

        // Configuration is static process-wide; resolving once at startup
        // is enough and keeps every later frame a pure repaint.
        let resolved = resolver.resolve(&config, &registry, renderer.vocabulary());
        let slots = renderer.arrange(&resolved, initial_size);

        let mut surfaces = SurfaceRegistry::new();
        surfaces.sync_slots(&slots);

        Ok(Self {
            config,
            renderer,
            resolved,
            slots,
            surfaces,
            painter: ZonePainter::with_default(),
            options,
            size: initial_size,
            should_exit: false,
            start_instant: None,
            last_metrics_emit: None,
        })
    }

    pub fn options_mut(&mut self) -> &mut RuntimeOptions {
        &mut self.options
    }

    pub fn resolved(&self) -> &ResolvedLayout {
        &self.resolved
    }

    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.bootstrap(stdout)?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            let timeout = self
                .options
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Some(dashboard_event) = map_event(event::read()?) {
                    self.handle_event(dashboard_event)?;
                    self.paint_if_dirty(stdout)?;
                }
                if self.should_exit {
                    break;
                }
            }

            if last_tick.elapsed() >= self.options.tick_interval {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                self.handle_event(DashboardEvent::Tick { elapsed })?;
                self.paint_if_dirty(stdout)?;
            }

            self.maybe_emit_metrics();
        }

        self.finalize();
        Ok(())
    }

    /// Drive the loop from a prepared event list. Used by tests and
    /// benchmarks; behaves exactly like `run` minus the terminal polling.
    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = DashboardEvent>,
    {
        self.bootstrap(stdout)?;
        for dashboard_event in events {
            self.handle_event(dashboard_event)?;
            self.paint_if_dirty(stdout)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    fn bootstrap(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.should_exit = false;
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);

        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("config", json!(self.config.id)),
                json_kv("renderer", json!(self.renderer.name())),
                json_kv("zones", json!(self.slots.len())),
            ],
        );

        self.refresh_zones()?;
        self.paint_if_dirty(stdout)
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms as u64))],
        );
    }

    fn handle_event(&mut self, dashboard_event: DashboardEvent) -> Result<()> {
        match dashboard_event {
            DashboardEvent::Tick { .. } => self.refresh_zones()?,
            DashboardEvent::Key(key) => {
                if is_exit_key(&key) {
                    self.should_exit = true;
                    self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
                }
            }
            DashboardEvent::Resize(size) => self.handle_resize(size)?,
        }
        Ok(())
    }

    fn handle_resize(&mut self, size: Size) -> Result<()> {
        self.size = size;
        self.slots = self.renderer.arrange(&self.resolved, size);
        self.surfaces.sync_slots(&self.slots);
        self.refresh_zones()?;
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
        Ok(())
    }

    /// Re-query every slot's content. Surfaces hash contents, so unchanged
    /// modules cost nothing beyond the query itself.
    fn refresh_zones(&mut self) -> Result<()> {
        for slot in &self.slots {
            let content = match self.resolved.zone(&slot.zone) {
                Some(resolved) => {
                    let body_area =
                        Size::new(slot.rect.width, slot.rect.height.saturating_sub(1));
                    format!("{}\n{}", resolved.title, resolved.unit().content(body_area))
                }
                None => self.renderer.placeholder(&slot.zone),
            };
            self.surfaces.apply_content(&slot.zone, content)?;
        }
        Ok(())
    }

    fn paint_if_dirty(&mut self, stdout: &mut impl Write) -> Result<()> {
        let dirty = self.surfaces.take_dirty();
        if dirty.is_empty() {
            return Ok(());
        }

        self.painter.paint(stdout, &dirty)?;
        self.record_render_metric(dirty.len());
        self.log_runtime_event(
            LogLevel::Debug,
            "render_completed",
            [json_kv("dirty_zones", json!(dirty.len()))],
        );
        Ok(())
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.options.logger.as_ref() {
            let log_event = event_with_fields(level, "scoreboard::runtime", message, fields);
            let _ = logger.log_event(log_event);
        }
    }

    fn record_render_metric(&mut self, dirty_count: usize) {
        if let Some(metrics) = self.options.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_render(dirty_count);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.options.metrics_interval == Duration::ZERO {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.options.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.options.logger.as_ref(), self.options.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.options.metrics_target.as_str();
                let snapshot_event = guard.snapshot(uptime).to_log_event(target);
                let _ = logger.log_event(snapshot_event);
            }
        }
    }
}

fn is_exit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn map_event(raw: CrosstermEvent) -> Option<DashboardEvent> {
    match raw {
        CrosstermEvent::Key(key) => Some(DashboardEvent::Key(key)),
        CrosstermEvent::Resize(width, height) => {
            Some(DashboardEvent::Resize(Size::new(width, height)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutKind;
    use crate::logging::MemorySink;
    use crate::module::ModuleDescriptor;

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(ModuleDescriptor::text("sales", "Live Sales", "$1,250"));
        registry.register(ModuleDescriptor::text("weather", "Local Weather", "72F"));
        registry
    }

    fn grid_config() -> LayoutConfig {
        LayoutConfig::new("main-dashboard", LayoutKind::Grid)
            .assign("zone1", "weather")
            .assign("zone2", "sales")
            .assign("zone3", "sales")
    }

    #[test]
    fn scripted_run_paints_modules_and_placeholders() {
        let mut dashboard =
            Dashboard::new(grid_config(), registry(), Size::new(94, 40)).unwrap();

        let mut output = Vec::new();
        dashboard.run_scripted(&mut output, Vec::new()).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Local Weather"));
        assert!(rendered.contains("Live Sales"));
        assert!(rendered.contains("$1,250"));
        assert!(rendered.contains("Empty Slot (zone5)"));
        // zone3 is hidden by the sales span and must paint nothing.
        assert!(!rendered.contains("Empty Slot (zone3)"));
    }

    #[test]
    fn exit_key_stops_the_script() {
        let mut dashboard =
            Dashboard::new(grid_config(), registry(), Size::new(94, 40)).unwrap();

        let mut output = Vec::new();
        dashboard
            .run_scripted(
                &mut output,
                vec![
                    DashboardEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
                    DashboardEvent::Resize(Size::new(50, 20)),
                ],
            )
            .unwrap();

        assert!(dashboard.should_exit);
        assert_eq!(dashboard.size, Size::new(94, 40));
    }

    #[test]
    fn resize_rearranges_and_repaints() {
        let sink = MemorySink::shared();
        let mut options = RuntimeOptions::default();
        options.logger = Some(Logger::new(sink.clone()));

        let mut dashboard = Dashboard::with_options(
            grid_config(),
            registry(),
            Size::new(94, 40),
            options,
        )
        .unwrap();

        let mut output = Vec::new();
        dashboard
            .run_scripted(
                &mut output,
                vec![DashboardEvent::Resize(Size::new(120, 50))],
            )
            .unwrap();

        assert_eq!(dashboard.size, Size::new(120, 50));
        let messages: Vec<_> = sink.events().into_iter().map(|e| e.message).collect();
        assert!(messages.contains(&"runtime_started".to_string()));
        assert!(messages.contains(&"resized".to_string()));
        assert!(messages.contains(&"runtime_stopped".to_string()));
    }

    #[test]
    fn ticks_do_not_repaint_unchanged_content() {
        let metrics = Arc::new(Mutex::new(DashboardMetrics::new()));
        let mut options = RuntimeOptions::default();
        options.metrics = Some(metrics.clone());
        options.metrics_interval = Duration::ZERO;

        let mut dashboard = Dashboard::with_options(
            grid_config(),
            registry(),
            Size::new(94, 40),
            options,
        )
        .unwrap();

        let mut output = Vec::new();
        dashboard
            .run_scripted(
                &mut output,
                vec![
                    DashboardEvent::Tick {
                        elapsed: Duration::from_secs(1),
                    },
                    DashboardEvent::Tick {
                        elapsed: Duration::from_secs(1),
                    },
                ],
            )
            .unwrap();

        // Static text modules never change, so only the bootstrap paint
        // counts as a render.
        let snapshot = metrics.lock().unwrap().snapshot(Duration::ZERO);
        assert_eq!(snapshot.renders, 1);
    }

    #[test]
    fn split_dashboard_uses_pane_placeholders() {
        let config = LayoutConfig::new("side", LayoutKind::Split).assign("sidebar", "weather");
        let mut dashboard = Dashboard::new(config, registry(), Size::new(103, 30)).unwrap();

        let mut output = Vec::new();
        dashboard.run_scripted(&mut output, Vec::new()).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Local Weather"));
        assert!(rendered.contains("Main Content"));
    }
}
