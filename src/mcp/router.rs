//! Tool Router
//!
//! Resolves a flattened tool name back to its owning server and forwards the
//! invocation. Every invocation refreshes the catalog first, so the
//! resolution table always reflects the live server set.

use crate::error::BackendError;
use crate::mcp::catalog::CatalogAggregator;
use crate::mcp::naming;
use crate::mcp::registry::BackendRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Routes flattened tool invocations to the owning server
pub struct ToolRouter {
    registry: Arc<BackendRegistry>,
    catalog: Arc<CatalogAggregator>,
}

impl ToolRouter {
    /// Create a router over a registry and its catalog aggregator
    pub fn new(registry: Arc<BackendRegistry>, catalog: Arc<CatalogAggregator>) -> Self {
        Self { registry, catalog }
    }

    /// Invoke a tool by its flattened name and return the server's result
    /// payload verbatim.
    ///
    /// A name no registered server id prefixes fails with `MalformedName`;
    /// a well-prefixed name that matches no tool in the fresh catalog fails
    /// with `UnknownTool`. Failures are surfaced, never retried.
    pub async fn invoke(
        &self,
        flattened: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Value, BackendError> {
        let normalized = naming::normalize(flattened);

        // Re-enumerate the live servers so tools that appeared since the
        // last catalog read are still routable.
        self.catalog.collect().await;

        let Some(entry) = self.catalog.resolve(&normalized).await else {
            let ids = self.registry.ids();
            return Err(
                match naming::decode(&normalized, ids.iter().map(String::as_str)) {
                    Ok(_) => BackendError::UnknownTool {
                        name: flattened.to_string(),
                    },
                    Err(_) => BackendError::MalformedName {
                        name: flattened.to_string(),
                    },
                },
            );
        };

        debug!(server = %entry.server, tool = %entry.tool, "forwarding tool call");

        let backend = self.registry.get(&entry.server)?;
        backend.call_tool(&entry.tool, arguments).await
    }
}
