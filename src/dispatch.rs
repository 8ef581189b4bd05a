//! Resolving the current selection to a view
//!
//! Pure registry lookup; never performs I/O and never fails.

use crate::descriptor::ToolDescriptor;
use crate::widgets::{WidgetRegistry, WidgetSpec};

/// Text shown before the endpoint of a tool without a local widget
pub const FALLBACK_PREFIX: &str = "This tool opens externally:";

/// What the main panel shows
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Nothing selected: the filtered catalog
    Catalog,
    /// Selected tool has a local widget
    Widget {
        descriptor: &'a ToolDescriptor,
        spec: &'static WidgetSpec,
    },
    /// Selected tool is known to the catalog but not implemented locally
    Fallback { descriptor: &'a ToolDescriptor },
}

impl<'a> Resolution<'a> {
    pub fn descriptor(&self) -> Option<&'a ToolDescriptor> {
        match *self {
            Resolution::Catalog => None,
            Resolution::Widget { descriptor, .. } | Resolution::Fallback { descriptor } => Some(descriptor),
        }
    }

    /// External link for the fallback view
    pub fn fallback_link(&self) -> Option<&'a str> {
        match *self {
            Resolution::Fallback { descriptor } => Some(descriptor.endpoint.as_str()),
            _ => None,
        }
    }
}

/// Resolve `current` against `registry`
pub fn resolve<'a>(registry: &WidgetRegistry, current: Option<&'a ToolDescriptor>) -> Resolution<'a> {
    match current {
        None => Resolution::Catalog,
        Some(descriptor) => match registry.get(&descriptor.slug) {
            Some(spec) => Resolution::Widget { descriptor, spec },
            None => Resolution::Fallback { descriptor },
        },
    }
}
