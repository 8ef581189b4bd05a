//! Slug -> widget lookup
//!
//! The registry is closed: it only knows the widgets compiled into the
//! client. Catalog entries without a registry entry are expected and get the
//! fallback view.

use std::collections::HashMap;

use super::builtin::BUILTIN_WIDGETS;
use super::spec::WidgetSpec;

#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    by_slug: HashMap<&'static str, &'static WidgetSpec>,
    order: Vec<&'static WidgetSpec>,
}

impl WidgetRegistry {
    /// Registry of every widget shipped with the client
    pub fn builtin() -> Self {
        Self::from_specs(BUILTIN_WIDGETS)
    }

    /// Registry over `specs`; a repeated slug keeps its first spec
    pub fn from_specs(specs: &'static [WidgetSpec]) -> Self {
        let mut by_slug = HashMap::with_capacity(specs.len());
        let mut order = Vec::with_capacity(specs.len());
        for spec in specs {
            if by_slug.contains_key(spec.slug) {
                log::warn!("Duplicate widget registration for '{}'", spec.slug);
                continue;
            }
            by_slug.insert(spec.slug, spec);
            order.push(spec);
        }
        Self { by_slug, order }
    }

    pub fn get(&self, slug: &str) -> Option<&'static WidgetSpec> {
        self.by_slug.get(slug).copied()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Widgets in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'static WidgetSpec> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
