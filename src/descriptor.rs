//! Tool descriptors as declared by the backend catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Server-declared metadata for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Stable identifier, used as registry key and list key
    pub slug: String,
    /// Display title
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-text grouping
    #[serde(default)]
    pub category: String,
    /// URL or path, shown when no local widget exists
    #[serde(default)]
    pub endpoint: String,
}

impl ToolDescriptor {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            endpoint: endpoint.into(),
        }
    }

    /// First character of the name, used as the card badge.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Ordered descriptors in server response order.
///
/// Built once from a catalog response and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    tools: Vec<ToolDescriptor>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot, keeping the first descriptor for each slug.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(tools.len());
        for tool in tools {
            if seen.insert(tool.slug.clone()) {
                kept.push(tool);
            } else {
                log::warn!("Dropping duplicate catalog entry for slug '{}'", tool.slug);
            }
        }
        Self { tools: kept }
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, slug: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
