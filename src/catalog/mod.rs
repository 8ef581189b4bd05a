//! Catalog - loading the tool list and filtering it for display
//!
//! The catalog is fetched once. Any failure degrades to an empty list rather
//! than an error state, and the loading flag clears exactly once either way.

mod filter;
mod loader;

pub use filter::filter;
pub use loader::CatalogLoader;

use crate::descriptor::{CatalogSnapshot, ToolDescriptor};
use crate::error::Result;

/// Load progress of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
}

/// The loaded (or loading) catalog
#[derive(Debug, Default)]
pub struct Catalog {
    state: LoadState,
    snapshot: CatalogSnapshot,
}

impl Catalog {
    /// A catalog whose load has not finished yet
    pub fn loading() -> Self {
        Self::default()
    }

    /// A catalog that is already loaded, for tests and offline use
    pub fn ready(snapshot: CatalogSnapshot) -> Self {
        Self {
            state: LoadState::Ready,
            snapshot,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// Apply the load outcome.
    ///
    /// Failure yields an empty snapshot. Returns `false` and changes nothing
    /// if the catalog already finished loading.
    pub fn finish(&mut self, outcome: Result<CatalogSnapshot>) -> bool {
        if self.state == LoadState::Ready {
            log::warn!("Ignoring second catalog load result");
            return false;
        }
        self.snapshot = match outcome {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Catalog load failed, showing no tools: {}", e);
                CatalogSnapshot::empty()
            }
        };
        self.state = LoadState::Ready;
        true
    }

    /// Tools matching `query`, in catalog order
    pub fn filtered(&self, query: &str) -> Vec<&ToolDescriptor> {
        filter(self.snapshot.tools(), query)
    }
}
