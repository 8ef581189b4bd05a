//! TUI Views
//!
//! Layout: search box on top, main panel (catalog, widget or fallback) in
//! the middle, key hints and the status page URL in the footer.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::descriptor::ToolDescriptor;
use crate::dispatch::{FALLBACK_PREFIX, Resolution};
use crate::widgets::{Block, WidgetInstance, WidgetOutput};

use super::app::{App, Mode};
use super::{colors, parse_hex_color};

pub const LOADING_TEXT: &str = "Loading tools...";
pub const EMPTY_TEXT: &str = "No tools found";

/// Trait for renderable views
pub trait View {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App);

    fn title(&self) -> &'static str;
}

/// Draw the whole screen
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    SearchView.render(frame, chunks[0], app);
    match app.hub().resolution() {
        Resolution::Catalog => CatalogView.render(frame, chunks[1], app),
        Resolution::Widget { .. } => WidgetView.render(frame, chunks[1], app),
        Resolution::Fallback { .. } => FallbackView.render(frame, chunks[1], app),
    }
    render_footer(frame, chunks[2], app);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.mode() {
        Mode::Browse => &[("/", "search"), ("↑↓", "select"), ("enter", "open"), ("q", "quit")],
        Mode::Search => &[("type", "filter"), ("enter", "open"), ("esc", "done")],
        Mode::Tool => &[("tab", "next field"), ("enter", "run"), ("esc", "back")],
    };

    let mut spans = vec![Span::styled(
        format!("[{}]  ", app.mode().name()),
        Style::default().fg(colors::HEADER),
    )];
    if let Some(status) = app.status() {
        spans.push(Span::styled(format!("{}  ", status), Style::default().fg(colors::FAILED)));
    }
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!(" {}  ", action), Style::default().fg(colors::DIM)));
    }
    spans.push(Span::styled(
        format!("status: {}/test", app.hub().base_url().trim_end_matches('/')),
        Style::default().fg(colors::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Search box
pub struct SearchView;

impl View for SearchView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let focused = app.mode() == Mode::Search;
        let border = if focused {
            Style::default().fg(colors::HEADER)
        } else {
            Style::default().fg(colors::DIM)
        };
        let text = if app.hub().query().is_empty() && !focused {
            Span::styled("Search tools...", Style::default().fg(colors::DIM))
        } else {
            Span::raw(app.hub().query())
        };

        let input = Paragraph::new(Line::from(text)).block(
            Panel::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", self.title())),
        );
        frame.render_widget(input, area);
    }

    fn title(&self) -> &'static str {
        "Search"
    }
}

/// Filtered catalog list
pub struct CatalogView;

impl CatalogView {
    fn format_tool(tool: &ToolDescriptor, has_widget: bool) -> ListItem<'static> {
        let marker = if has_widget { "●" } else { "↗" };
        let line = Line::from(vec![
            Span::styled(format!("{} ", marker), Style::default().fg(colors::DIM)),
            Span::styled(
                format!("{} ", tool.initial()),
                Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
            ),
            Span::styled(tool.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" [{}] ", tool.category), Style::default().fg(colors::CATEGORY)),
            Span::styled(tool.description.clone(), Style::default().fg(colors::DIM)),
        ]);
        ListItem::new(line)
    }
}

impl View for CatalogView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let hub = app.hub();
        let tools = hub.filtered();
        let panel = Panel::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", self.title(), tools.len()));

        if hub.catalog().is_loading() || tools.is_empty() {
            let text = if hub.catalog().is_loading() { LOADING_TEXT } else { EMPTY_TEXT };
            let message = Paragraph::new(text).style(Style::default().fg(colors::DIM)).block(panel);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = tools
            .iter()
            .map(|tool| Self::format_tool(tool, hub.registry().contains(&tool.slug)))
            .collect();
        let list = List::new(items)
            .block(panel)
            .highlight_style(Style::default().bg(colors::DIM).add_modifier(Modifier::BOLD));

        let mut state = ListState::default().with_selected(app.selected());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn title(&self) -> &'static str {
        "Tools"
    }
}

/// The open widget: fields, trigger and output
pub struct WidgetView;

impl WidgetView {
    fn field_lines(app: &App, instance: &WidgetInstance) -> Vec<Line<'static>> {
        let focused = app.focused_field().map(|f| f.name);
        instance
            .spec()
            .fields
            .iter()
            .map(|field| {
                let is_focused = focused == Some(field.name);
                let value_style = if is_focused {
                    Style::default().add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(if is_focused { "> " } else { "  " }, Style::default().fg(colors::KEYBIND)),
                    Span::styled(format!("{}: ", field.label), Style::default().fg(colors::DIM)),
                    Span::styled(instance.fields().get(field.name).to_string(), value_style),
                ])
            })
            .collect()
    }

    fn output_lines(output: WidgetOutput) -> Vec<Line<'static>> {
        match output {
            WidgetOutput::Idle => Vec::new(),
            WidgetOutput::Loading => vec![Line::styled("Loading...", Style::default().fg(colors::LOADING))],
            WidgetOutput::Failed(message) => vec![Line::styled(message, Style::default().fg(colors::FAILED))],
            WidgetOutput::Ready(blocks) => blocks.iter().flat_map(block_lines).collect(),
        }
    }
}

/// Terminal lines for one output block
pub fn block_lines(block: &Block) -> Vec<Line<'static>> {
    match block {
        Block::Heading(text) => vec![Line::styled(
            text.clone(),
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )],
        Block::Text(text) => text.lines().map(|l| Line::raw(l.to_string())).collect(),
        Block::Code(text) => vec![Line::styled(text.clone(), Style::default().fg(colors::READY))],
        Block::Json(text) => text
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::default().fg(colors::DIM)))
            .collect(),
        Block::Link { label, url } => vec![Line::from(vec![
            Span::raw(format!("{}: ", label)),
            Span::styled(url.clone(), Style::default().fg(colors::LINK).add_modifier(Modifier::UNDERLINED)),
        ])],
        Block::Image { alt, url } => vec![Line::from(vec![
            Span::styled(format!("[{}] ", alt), Style::default().fg(colors::DIM)),
            Span::styled(url.clone(), Style::default().fg(colors::LINK)),
        ])],
        Block::Swatch(color) => {
            let sample = match parse_hex_color(color) {
                Some(c) => Span::styled("      ", Style::default().bg(c)),
                None => Span::raw("      "),
            };
            vec![Line::from(vec![sample, Span::raw(format!(" {}", color))])]
        }
    }
}

impl View for WidgetView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let hub = app.hub();
        let Some(instance) = hub.active() else { return };
        let name = hub.current().map(|d| d.name.as_str()).unwrap_or(instance.spec().slug);

        let mut lines = Self::field_lines(app, instance);
        if let Some(trigger) = instance.spec().trigger {
            let style = if instance.is_loading() {
                Style::default().fg(colors::DIM)
            } else {
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(format!("[ {} ]", trigger), style)));
        }
        lines.push(Line::raw(""));
        lines.extend(Self::output_lines(instance.output(hub.base_url())));

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Panel::default().borders(Borders::ALL).title(format!(" {} ", name)));
        frame.render_widget(panel, area);
    }

    fn title(&self) -> &'static str {
        "Widget"
    }
}

/// Tool known to the catalog but without a local widget
pub struct FallbackView;

impl View for FallbackView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let resolution = app.hub().resolution();
        let name = resolution.descriptor().map(|d| d.name.clone()).unwrap_or_default();
        let link = resolution.fallback_link().unwrap_or_default().to_string();

        let text = vec![
            Line::raw(FALLBACK_PREFIX),
            Line::styled(link, Style::default().fg(colors::LINK).add_modifier(Modifier::UNDERLINED)),
        ];
        let panel = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Panel::default().borders(Borders::ALL).title(format!(" {} ", name)));
        frame.render_widget(panel, area);
    }

    fn title(&self) -> &'static str {
        "External"
    }
}
