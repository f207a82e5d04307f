//! Restaurant scoreboard demo.
//!
//! A 3x2 grid with a spanning sales zone, a live service clock, and one
//! deliberately empty slot. The configuration also carries `sidebar`/`main`
//! assignments; switch `"type"` to `"split"` to see the same file drive the
//! other renderer.
//!
//! ```bash
//! cargo run --example scoreboard_demo
//! ```
//!
//! Press `q` to quit.

use std::io;
use std::time::Instant;

use crossterm::{cursor, execute, terminal};
use scoreboard::{
    Dashboard, LayoutConfig, ModuleDescriptor, ModuleRegistry, RenderableUnit, Size,
};

const CONFIG_JSON: &str = r#"{
    "id": "main-dashboard",
    "type": "grid",
    "assignments": {
        "zone1": "weather",
        "zone2": "sales",
        "zone3": "sales",
        "zone4": "clock",
        "zone6": "reservations",
        "sidebar": "weather",
        "main": "sales"
    },
    "rowHeights": [1, 1]
}"#;

struct ClockUnit {
    started: Instant,
}

impl RenderableUnit for ClockUnit {
    fn content(&self, _area: Size) -> String {
        let elapsed = self.started.elapsed().as_secs();
        format!("service running\n{:02}:{:02}", elapsed / 60, elapsed % 60)
    }
}

fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register(ModuleDescriptor::text(
        "weather",
        "Local Weather",
        "Brea, CA\n72F · clear skies",
    ));
    registry.register(ModuleDescriptor::text(
        "sales",
        "Live Sales",
        "$1,250 today\n45 covers",
    ));
    registry.register(ModuleDescriptor::text(
        "reservations",
        "Reservations",
        "19:00 Patel x4\n19:30 Gomez x2\n20:15 Chen x6",
    ));
    registry.register(ModuleDescriptor::new("clock", "Service Clock", || {
        Box::new(ClockUnit {
            started: Instant::now(),
        })
    }));
    registry
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = LayoutConfig::from_json_str(CONFIG_JSON)?;
    let (width, height) = terminal::size().unwrap_or((80, 24));
    let mut dashboard = Dashboard::new(config, build_registry(), Size::new(width, height))?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let outcome = dashboard.run(&mut stdout);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    outcome?;
    Ok(())
}
