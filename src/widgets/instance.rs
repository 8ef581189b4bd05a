//! A live widget: field values, request lifecycle, image URL state

use serde_json::Value;

use crate::backend::{Params, endpoint_url};
use crate::error::{Result, ToolhubError};
use crate::id::{InstanceId, now_ms};

use super::lifecycle::{RequestLifecycle, RequestState};
use super::render::Block;
use super::spec::{Activation, FieldKind, ImageRefresh, Presence, WidgetKind, WidgetSpec};

/// Current values of a widget's input fields, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: Vec<(&'static str, String)>,
}

impl FieldValues {
    /// Defaults for every field of `spec`
    pub fn for_spec(spec: &WidgetSpec) -> Self {
        Self {
            values: spec.fields.iter().map(|f| (f.name, f.default.resolve())).collect(),
        }
    }

    /// Value of `name`, empty when unknown
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.values.iter_mut().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Query parameters for `spec`: fields by presence rule, then fixed params
    pub fn params(&self, spec: &WidgetSpec) -> Params {
        let mut params: Params = spec
            .fields
            .iter()
            .filter(|f| !(f.presence == Presence::OmitEmpty && self.get(f.name).is_empty()))
            .map(|f| (f.name.to_string(), self.get(f.name).to_string()))
            .collect();
        params.extend(spec.fixed_params.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        params
    }

    /// First required field left empty
    pub fn missing_required(&self, spec: &WidgetSpec) -> Option<&'static str> {
        spec.fields
            .iter()
            .find(|f| f.presence == Presence::Required && self.get(f.name).is_empty())
            .map(|f| f.name)
    }
}

/// A request a widget wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRequest {
    pub instance: InstanceId,
    pub path: &'static str,
    pub params: Params,
}

/// What the widget panel should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutput {
    /// Nothing requested yet
    Idle,
    Loading,
    Ready(Vec<Block>),
    Failed(String),
}

/// One activation of a widget. Dropped on deselection.
#[derive(Debug)]
pub struct WidgetInstance {
    id: InstanceId,
    spec: &'static WidgetSpec,
    fields: FieldValues,
    lifecycle: RequestLifecycle,
    /// Parameters fixed by the last trigger of an image widget
    image_params: Option<Params>,
}

impl WidgetInstance {
    pub fn new(id: InstanceId, spec: &'static WidgetSpec) -> Self {
        Self {
            id,
            spec,
            fields: FieldValues::for_spec(spec),
            lifecycle: RequestLifecycle::new(),
            image_params: None,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn spec(&self) -> &'static WidgetSpec {
        self.spec
    }

    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }

    pub fn state(&self) -> &RequestState {
        self.lifecycle.state()
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// Replace a field value, checking it against the field kind
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let field = self
            .spec
            .field(name)
            .ok_or_else(|| ToolhubError::InvalidField(format!("{} has no field '{}'", self.spec.slug, name)))?;
        validate(field.kind, name, value)?;
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value.to_string();
        }
        Ok(())
    }

    /// Check every non-empty field against its kind.
    ///
    /// Typing only filters single characters, so a value like `1..-` can
    /// still reach here; empty values are left to the presence rules.
    pub fn check_fields(&self) -> Result<()> {
        for field in self.spec.fields {
            let value = self.fields.get(field.name);
            if !value.is_empty() {
                validate(field.kind, field.name, value)?;
            }
        }
        Ok(())
    }

    /// Type one character into a field; rejected characters are ignored
    pub fn push_char(&mut self, name: &str, c: char) {
        let Some(field) = self.spec.field(name) else { return };
        if !field.kind.accepts(c) {
            return;
        }
        if let Some(slot) = self.fields.get_mut(name) {
            slot.push(c);
        }
    }

    pub fn pop_char(&mut self, name: &str) {
        if let Some(slot) = self.fields.get_mut(name) {
            slot.pop();
        }
    }

    /// Called once when the widget becomes active
    pub fn activate(&mut self) -> Option<WidgetRequest> {
        match (self.spec.kind, self.spec.activation) {
            (WidgetKind::Fetch { .. }, Activation::AutoLoad) => self.trigger(),
            _ => None,
        }
    }

    /// User asked for a (re)load.
    ///
    /// Fetch widgets enter Loading and return the request to issue. Image
    /// widgets only change their URL and never return a request.
    pub fn trigger(&mut self) -> Option<WidgetRequest> {
        if let Some(missing) = self.fields.missing_required(self.spec) {
            log::debug!("{}: not triggering, '{}' is empty", self.spec.slug, missing);
            return None;
        }
        match self.spec.kind {
            WidgetKind::Fetch { .. } => {
                self.lifecycle.begin();
                Some(WidgetRequest {
                    instance: self.id,
                    path: self.spec.path,
                    params: self.fields.params(self.spec),
                })
            }
            WidgetKind::Image { refresh, .. } => {
                match refresh {
                    ImageRefresh::Live => {}
                    ImageRefresh::CacheBust => {
                        let mut params = self.fields.params(self.spec);
                        params.push(("ts".to_string(), now_ms().to_string()));
                        self.image_params = Some(params);
                    }
                    ImageRefresh::OnSubmit => {
                        self.image_params = Some(self.fields.params(self.spec));
                    }
                }
                None
            }
        }
    }

    /// Apply the outcome of a request this instance issued
    pub fn complete(&mut self, outcome: Result<Value>) {
        self.lifecycle.resolve(outcome);
    }

    /// Parameters of the picture currently shown by an image widget
    pub fn image_params(&self) -> Option<Params> {
        match self.spec.kind {
            WidgetKind::Image { refresh, .. } => match refresh {
                ImageRefresh::Live => Some(self.fields.params(self.spec)),
                ImageRefresh::CacheBust => Some(
                    self.image_params
                        .clone()
                        .unwrap_or_else(|| self.fields.params(self.spec)),
                ),
                ImageRefresh::OnSubmit => self.image_params.clone(),
            },
            WidgetKind::Fetch { .. } => None,
        }
    }

    /// Render the widget's current output against `base_url`
    pub fn output(&self, base_url: &str) -> WidgetOutput {
        match self.spec.kind {
            WidgetKind::Image { alt, .. } => match self.image_params() {
                None => WidgetOutput::Idle,
                Some(params) => match endpoint_url(base_url, self.spec.path, &params) {
                    Ok(url) => WidgetOutput::Ready(vec![Block::Image {
                        alt: alt.to_string(),
                        url,
                    }]),
                    Err(e) => WidgetOutput::Failed(e.to_string()),
                },
            },
            WidgetKind::Fetch { render } => match self.lifecycle.state() {
                RequestState::Idle => WidgetOutput::Idle,
                RequestState::Loading => WidgetOutput::Loading,
                RequestState::Success(body) => WidgetOutput::Ready(render(body, &self.fields)),
                RequestState::Error(msg) => WidgetOutput::Failed(msg.clone()),
            },
        }
    }
}

fn validate(kind: FieldKind, name: &str, value: &str) -> Result<()> {
    match kind {
        FieldKind::Text => Ok(()),
        FieldKind::Number => value
            .parse::<f64>()
            .map(|_| ())
            .map_err(|_| ToolhubError::InvalidField(format!("{} must be a number, got '{}'", name, value))),
        FieldKind::Date if value.is_empty() => Ok(()),
        FieldKind::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| ToolhubError::InvalidField(format!("{} must be YYYY-MM-DD, got '{}'", name, value))),
    }
}
