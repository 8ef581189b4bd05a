//! Widgets - the interactive unit behind each catalog entry
//!
//! Every widget is a `WidgetSpec` (endpoint, fields, render function) run
//! through one shared request lifecycle by `WidgetInstance`.

mod builtin;
pub mod instance;
pub mod lifecycle;
pub mod registry;
pub mod render;
pub mod spec;

pub use builtin::BUILTIN_WIDGETS;
pub use instance::{FieldValues, WidgetInstance, WidgetOutput, WidgetRequest};
pub use lifecycle::{RequestLifecycle, RequestState, error_marker};
pub use registry::WidgetRegistry;
pub use render::Block;
pub use spec::{Activation, FieldKind, FieldSpec, ImageRefresh, Presence, WidgetKind, WidgetSpec};
