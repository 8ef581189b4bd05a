//! Catalog loading from the backend listing endpoint

use serde::Deserialize;

use crate::backend::{Backend, CATALOG_PATH};
use crate::descriptor::{CatalogSnapshot, ToolDescriptor};
use crate::error::Result;

/// Wire shape of `GET /api/tools`
#[derive(Debug, Deserialize)]
struct ToolsResponse {
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
}

/// Fetches the tool list once at startup.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Fetch and parse the catalog. Errors are returned to the caller;
    /// `Catalog::finish` turns them into an empty snapshot.
    pub async fn fetch(backend: &dyn Backend) -> Result<CatalogSnapshot> {
        let body = backend.get_json(CATALOG_PATH, &[]).await?;
        let response: ToolsResponse = serde_json::from_value(body)?;
        log::info!("Catalog returned {} tools", response.tools.len());
        Ok(CatalogSnapshot::new(response.tools))
    }
}
