//! Hub session - the UI-independent state of the tool directory
//!
//! Owns the catalog, the search query, the current selection and the one
//! active widget instance. Front-ends (TUI, CLI) drive it and issue the
//! requests it hands back.

use serde_json::Value;

use crate::backend::Backend;
use crate::catalog::Catalog;
use crate::descriptor::{CatalogSnapshot, ToolDescriptor};
use crate::dispatch::{Resolution, resolve};
use crate::error::{Result, ToolhubError};
use crate::id::{InstanceId, InstanceIds};
use crate::widgets::{WidgetInstance, WidgetRegistry, WidgetRequest};

/// Result of a widget request, addressed to the instance that issued it
#[derive(Debug)]
pub struct Completion {
    pub instance: InstanceId,
    pub outcome: Result<Value>,
}

/// Issue `request` against `backend`
pub async fn execute(backend: &dyn Backend, request: WidgetRequest) -> Completion {
    let outcome = backend.get_json(request.path, &request.params).await;
    if let Err(e) = &outcome {
        log::warn!("{} {} failed: {}", request.instance, request.path, e);
    }
    Completion {
        instance: request.instance,
        outcome,
    }
}

pub struct Hub {
    registry: WidgetRegistry,
    catalog: Catalog,
    base_url: String,
    query: String,
    current: Option<ToolDescriptor>,
    active: Option<WidgetInstance>,
    ids: InstanceIds,
}

impl Hub {
    /// A hub whose catalog is still loading
    pub fn new(registry: WidgetRegistry, base_url: impl Into<String>) -> Self {
        Self {
            registry,
            catalog: Catalog::loading(),
            base_url: base_url.into(),
            query: String::new(),
            current: None,
            active: None,
            ids: InstanceIds::new(),
        }
    }

    /// A hub over an already loaded catalog
    pub fn with_snapshot(registry: WidgetRegistry, base_url: impl Into<String>, snapshot: CatalogSnapshot) -> Self {
        let mut hub = Self::new(registry, base_url);
        hub.catalog = Catalog::ready(snapshot);
        hub
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply the catalog load outcome; see `Catalog::finish`
    pub fn finish_catalog(&mut self, outcome: Result<CatalogSnapshot>) -> bool {
        self.catalog.finish(outcome)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Catalog entries matching the current query
    pub fn filtered(&self) -> Vec<&ToolDescriptor> {
        self.catalog.filtered(&self.query)
    }

    pub fn current(&self) -> Option<&ToolDescriptor> {
        self.current.as_ref()
    }

    pub fn resolution(&self) -> Resolution<'_> {
        resolve(&self.registry, self.current.as_ref())
    }

    pub fn active(&self) -> Option<&WidgetInstance> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut WidgetInstance> {
        self.active.as_mut()
    }

    /// Make `descriptor` current.
    ///
    /// Any previous widget instance is dropped. A registered tool gets a
    /// fresh instance; the returned request is its auto-load, if any.
    pub fn select(&mut self, descriptor: ToolDescriptor) -> Option<WidgetRequest> {
        self.active = None;
        let spec = self.registry.get(&descriptor.slug);
        log::info!(
            "Selected '{}' ({})",
            descriptor.slug,
            if spec.is_some() { "widget" } else { "fallback" }
        );
        self.current = Some(descriptor);

        let spec = spec?;
        let mut instance = WidgetInstance::new(self.ids.allocate(), spec);
        let request = instance.activate();
        self.active = Some(instance);
        request
    }

    /// Descriptor for `slug`: the catalog entry, else a stand-in for a
    /// built-in widget the catalog does not list.
    pub fn descriptor_for(&self, slug: &str) -> Option<ToolDescriptor> {
        if let Some(descriptor) = self.catalog.snapshot().get(slug) {
            return Some(descriptor.clone());
        }
        self.registry
            .get(slug)
            .map(|spec| ToolDescriptor::new(spec.slug, spec.slug, "", "", spec.path))
    }

    /// Select the tool with `slug`
    pub fn select_slug(&mut self, slug: &str) -> Result<Option<WidgetRequest>> {
        let descriptor = self
            .descriptor_for(slug)
            .ok_or_else(|| ToolhubError::UnknownTool(slug.to_string()))?;
        Ok(self.select(descriptor))
    }

    /// Return to the catalog, destroying the active widget
    pub fn back(&mut self) {
        self.current = None;
        self.active = None;
    }

    /// Trigger the active widget
    pub fn trigger(&mut self) -> Option<WidgetRequest> {
        self.active.as_mut().and_then(WidgetInstance::trigger)
    }

    /// Deliver a completion. Returns `false` when its instance is gone.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match self.active.as_mut() {
            Some(instance) if instance.id() == completion.instance => {
                instance.complete(completion.outcome);
                true
            }
            _ => {
                log::debug!("Dropping completion for inactive widget {}", completion.instance);
                false
            }
        }
    }
}
