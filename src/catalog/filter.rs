//! Free-text catalog filter
//!
//! Case-insensitive substring match against name, description and category.
//! The query is used literally: whitespace is not trimmed.

use crate::descriptor::ToolDescriptor;

/// Filter `tools` by `query`, preserving order.
///
/// An empty query returns every tool.
pub fn filter<'a>(tools: &'a [ToolDescriptor], query: &str) -> Vec<&'a ToolDescriptor> {
    if query.is_empty() {
        return tools.iter().collect();
    }
    let needle = query.to_lowercase();
    tools.iter().filter(|t| matches(t, &needle)).collect()
}

/// Whether `tool` matches an already-lowercased needle.
fn matches(tool: &ToolDescriptor, needle: &str) -> bool {
    tool.name.to_lowercase().contains(needle)
        || tool.description.to_lowercase().contains(needle)
        || tool.category.to_lowercase().contains(needle)
}
