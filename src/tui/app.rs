//! TUI Application
//!
//! Key handling and view state on top of a `Hub`. The app never performs
//! I/O itself: requests it wants issued are queued for the runner.

use crate::descriptor::{CatalogSnapshot, ToolDescriptor};
use crate::error::Result;
use crate::hub::{Completion, Hub};
use crate::widgets::{FieldSpec, WidgetRequest};

use super::input::KeyEvent;

/// Where keyboard input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving through the catalog list
    #[default]
    Browse,
    /// Typing into the search box
    Search,
    /// A tool is open in the main panel
    Tool,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Browse => "Browse",
            Self::Search => "Search",
            Self::Tool => "Tool",
        }
    }
}

/// Main TUI application
pub struct App {
    hub: Hub,
    mode: Mode,
    /// Index into the filtered catalog
    selected: Option<usize>,
    /// Index into the open widget's fields
    focused_field: usize,
    /// Requests waiting to be issued by the runner
    pending: Vec<WidgetRequest>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(hub: Hub) -> Self {
        let mut app = Self {
            hub,
            mode: Mode::default(),
            selected: None,
            focused_field: 0,
            pending: Vec::new(),
            status: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Catalog entry under the cursor
    pub fn selected_tool(&self) -> Option<&ToolDescriptor> {
        self.selected.and_then(|i| self.hub.filtered().get(i).copied())
    }

    /// Field of the open widget that receives typed characters
    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        self.hub
            .active()
            .and_then(|instance| instance.spec().fields.get(self.focused_field))
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Drain the requests queued since the last call
    pub fn take_requests(&mut self) -> Vec<WidgetRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Apply the catalog load outcome
    pub fn finish_catalog(&mut self, outcome: Result<CatalogSnapshot>) {
        if self.hub.finish_catalog(outcome) {
            self.clamp_selection();
        }
    }

    /// Apply a widget completion
    pub fn apply(&mut self, completion: Completion) -> bool {
        self.hub.apply(completion)
    }

    /// Handle one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: impl Into<KeyEvent>) -> bool {
        let key = key.into();
        self.status = None;

        if key.is_interrupt() {
            self.quit();
            return true;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Tool => self.handle_tool_key(key),
        }
        self.should_quit
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if key.is_up() {
            self.select_prev();
        } else if key.is_down() {
            self.select_next();
        } else if key.is_enter() {
            self.open_selected();
        } else if key.is_escape() {
            if !self.hub.query().is_empty() {
                self.hub.set_query("");
                self.clamp_selection();
            }
        } else {
            match key.char() {
                Some('/') => self.mode = Mode::Search,
                Some('q') => self.quit(),
                Some('j') => self.select_next(),
                Some('k') => self.select_prev(),
                _ => {}
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.is_escape() || key.is_down() || key.is_tab() {
            self.mode = Mode::Browse;
        } else if key.is_enter() {
            self.mode = Mode::Browse;
            self.open_selected();
        } else if key.is_backspace() {
            self.hub.pop_query_char();
            self.clamp_selection();
        } else if let Some(c) = key.char() {
            self.hub.push_query_char(c);
            self.clamp_selection();
        }
    }

    fn handle_tool_key(&mut self, key: KeyEvent) {
        if key.is_escape() {
            self.close_tool();
            return;
        }

        let Some(field_count) = self.hub.active().map(|i| i.spec().fields.len()) else {
            // Fallback panel: nothing to edit
            if key.char() == Some('q') {
                self.quit();
            }
            return;
        };

        if key.is_enter() {
            self.trigger_active();
        } else if key.is_tab() && field_count > 0 {
            self.focused_field = (self.focused_field + 1) % field_count;
        } else if key.is_back_tab() && field_count > 0 {
            self.focused_field = (self.focused_field + field_count - 1) % field_count;
        } else if let Some(field) = self.focused_field() {
            let Some(instance) = self.hub.active_mut() else { return };
            if key.is_backspace() {
                instance.pop_char(field.name);
            } else if let Some(c) = key.char() {
                instance.push_char(field.name, c);
            }
        } else if key.char() == Some('q') {
            self.quit();
        }
    }

    fn trigger_active(&mut self) {
        let Some(instance) = self.hub.active() else { return };
        let spec = instance.spec();
        if spec.trigger.is_none() {
            return;
        }
        if let Some(missing) = instance.fields().missing_required(spec) {
            let label = spec.field(missing).map(|f| f.label).unwrap_or(missing);
            self.status = Some(format!("{} is required", label));
            return;
        }
        if let Err(e) = instance.check_fields() {
            self.status = Some(e.to_string());
            return;
        }
        if let Some(request) = self.hub.trigger() {
            self.pending.push(request);
        }
    }

    /// Open the tool under the cursor
    pub fn open_selected(&mut self) {
        let Some(descriptor) = self.selected_tool().cloned() else { return };
        if let Some(request) = self.hub.select(descriptor) {
            self.pending.push(request);
        }
        self.focused_field = 0;
        self.mode = Mode::Tool;
    }

    /// Close the open tool, dropping its widget
    pub fn close_tool(&mut self) {
        self.hub.back();
        self.focused_field = 0;
        self.mode = Mode::Browse;
    }

    /// Select next entry, wrapping around
    pub fn select_next(&mut self) {
        let len = self.hub.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
        });
    }

    /// Select previous entry, wrapping around
    pub fn select_prev(&mut self) {
        let len = self.hub.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Keep the cursor inside the filtered list
    fn clamp_selection(&mut self) {
        let len = self.hub.filtered().len();
        self.selected = if len == 0 {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(len - 1))
        };
    }
}
