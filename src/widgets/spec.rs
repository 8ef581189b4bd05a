//! Declarative widget definitions
//!
//! A `WidgetSpec` is everything one tool's widget needs: its endpoint, its
//! input fields, when it fires, and how a response is shown.

use chrono::Datelike;
use serde_json::Value;

use super::instance::FieldValues;
use super::render::Block;

/// Turns a successful response body into display blocks.
pub type RenderFn = fn(&Value, &FieldValues) -> Vec<Block>;

/// What kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Decimal number
    Number,
    /// Calendar date, YYYY-MM-DD
    Date,
}

impl FieldKind {
    /// Whether `c` may be typed into a field of this kind
    pub fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Text => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Date => c.is_ascii_digit() || c == '-',
        }
    }
}

/// Initial value of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Text(&'static str),
    /// The current calendar year in local time
    CurrentYear,
}

impl FieldDefault {
    pub fn resolve(self) -> String {
        match self {
            FieldDefault::Empty => String::new(),
            FieldDefault::Text(s) => s.to_string(),
            FieldDefault::CurrentYear => chrono::Local::now().year().to_string(),
        }
    }
}

/// How a field's value reaches the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always sent, even when empty
    Always,
    /// Empty value blocks the request
    Required,
    /// Left out of the query when empty
    OmitEmpty,
}

/// One user-editable input
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Query parameter name
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            default: FieldDefault::Text(default),
            presence: Presence::Always,
        }
    }

    pub const fn number(name: &'static str, label: &'static str, default: FieldDefault) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            default,
            presence: Presence::Always,
        }
    }
}

/// When a widget issues its first request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Only on explicit trigger
    Manual,
    /// Once on activation, then on trigger
    AutoLoad,
}

/// How an image widget refreshes its picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRefresh {
    /// URL follows the field values as they are edited
    Live,
    /// Trigger appends a fresh `ts` parameter
    CacheBust,
    /// Nothing shown until the first trigger; trigger snapshots the fields
    OnSubmit,
}

/// Fetch-and-render or point-an-image-at-a-URL
#[derive(Debug, Clone, Copy)]
pub enum WidgetKind {
    Fetch { render: RenderFn },
    Image { refresh: ImageRefresh, alt: &'static str },
}

/// Static definition of one tool's widget
#[derive(Debug)]
pub struct WidgetSpec {
    /// Catalog slug this widget implements
    pub slug: &'static str,
    /// Endpoint path on the backend
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    /// Parameters sent with every request after the fields
    pub fixed_params: &'static [(&'static str, &'static str)],
    pub activation: Activation,
    /// Label of the trigger action; `None` means no manual trigger
    pub trigger: Option<&'static str>,
    pub kind: WidgetKind,
}

impl WidgetSpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, WidgetKind::Image { .. })
    }
}
