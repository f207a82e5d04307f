use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::geometry::Size;

/// Stable string identifier for a display module.
pub type ModuleId = String;

/// Opaque mountable content produced by a module.
///
/// Renderers only ever ask a unit for its textual content at a given area;
/// how the unit assembles that content (timers, interior state, canned text)
/// is its own business.
pub trait RenderableUnit: Send {
    fn content(&self, area: Size) -> String;
}

/// Static text unit used by placeholders, demos, and test doubles.
#[derive(Debug, Clone)]
pub struct TextUnit {
    text: String,
}

impl TextUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RenderableUnit for TextUnit {
    fn content(&self, _area: Size) -> String {
        self.text.clone()
    }
}

/// Immutable description of a registered module: identity, display title,
/// and a factory producing fresh renderable instances.
#[derive(Clone)]
pub struct ModuleDescriptor {
    id: ModuleId,
    title: String,
    factory: Arc<dyn Fn() -> Box<dyn RenderableUnit> + Send + Sync>,
}

impl ModuleDescriptor {
    pub fn new<F>(id: impl Into<ModuleId>, title: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn RenderableUnit> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            factory: Arc::new(factory),
        }
    }

    /// Convenience constructor for modules backed by fixed text.
    pub fn text(id: impl Into<ModuleId>, title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(id, title, move || Box::new(TextUnit::new(text.clone())))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instantiate(&self) -> Box<dyn RenderableUnit> {
        (self.factory)()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Registry mapping module ids to their descriptors.
///
/// Registration overwrites silently (last write wins) so tests can shadow a
/// production module with a double. Lookup of an unknown id is an expected
/// outcome, not an error; callers decide how to degrade.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    entries: HashMap<ModuleId, ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor) {
        self.entries.insert(descriptor.id.clone(), descriptor);
    }

    pub fn lookup(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_descriptor() {
        let mut registry = ModuleRegistry::new();
        registry.register(ModuleDescriptor::text("sales", "Live Sales", "covers: 45"));

        let descriptor = registry.lookup("sales").unwrap();
        assert_eq!(descriptor.id(), "sales");
        assert_eq!(descriptor.title(), "Live Sales");

        let unit = descriptor.instantiate();
        assert_eq!(unit.content(Size::new(20, 5)), "covers: 45");
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        let registry = ModuleRegistry::new();
        assert!(registry.lookup("video").is_none());
    }

    #[test]
    fn register_overwrites_by_id() {
        let mut registry = ModuleRegistry::new();
        registry.register(ModuleDescriptor::text("weather", "Local Weather", "72F"));
        registry.register(ModuleDescriptor::text("weather", "Weather (stub)", "n/a"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("weather").unwrap().title(), "Weather (stub)");
    }
}
