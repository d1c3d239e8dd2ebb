//! Catalog Aggregator
//!
//! Merges the tool lists of every registered server into one collision-free
//! namespace. Every collection pass re-queries the live servers (no caching)
//! and rebuilds the router's resolution table as a by-product; the table is
//! swapped in whole so concurrent readers never observe a partial rebuild.

use crate::mcp::naming;
use crate::mcp::registry::BackendRegistry;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// A tool projected into the merged external namespace
#[derive(Debug, Clone, Serialize)]
pub struct FlattenedTool {
    /// Globally unique flattened name (`{server}_{tool}`)
    pub name: String,
    /// Description reported by the owning server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema, passed through verbatim
    pub parameters: Value,
}

/// Resolution record mapping a flattened name back to its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    /// Registered server id
    pub server: String,
    /// Native tool name on that server
    pub tool: String,
}

type ResolutionTable = HashMap<String, ResolutionEntry>;

/// External schema shape for the merged catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolProjection {
    /// Full per-tool metadata with the original parameter schema
    Native,
    /// Name, description, and an object-shaped parameter skeleton only
    Simplified,
}

/// Function-calling view of a tool, the shape both projections share
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSpec,
}

/// The `function` object inside a [`FunctionTool`]
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

impl FunctionTool {
    fn native(tool: FlattenedTool) -> Self {
        Self {
            kind: "function",
            function: FunctionSpec {
                name: tool.name,
                description: tool.description,
                parameters: tool.parameters,
            },
        }
    }

    /// Reduce the schema to `{type: "object", properties: ...}`; a missing
    /// or null `properties` renders as an empty object, never an error.
    fn simplified(tool: FlattenedTool) -> Self {
        let properties = match tool.parameters.get("properties") {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(value) => value.clone(),
        };
        Self {
            kind: "function",
            function: FunctionSpec {
                name: tool.name,
                description: tool.description,
                parameters: json!({
                    "type": "object",
                    "properties": properties,
                }),
            },
        }
    }
}

/// Aggregates tool catalogs across all registered servers
pub struct CatalogAggregator {
    registry: Arc<BackendRegistry>,
    resolution: RwLock<Arc<ResolutionTable>>,
}

impl CatalogAggregator {
    /// Create an aggregator over a registry
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            registry,
            resolution: RwLock::new(Arc::new(ResolutionTable::new())),
        }
    }

    /// Query every registered server and rebuild the merged catalog.
    ///
    /// Servers are visited in registration order. A server that fails its
    /// tool listing is logged and excluded from this snapshot; it never
    /// aborts the collection. The resolution table is rebuilt from scratch
    /// and swapped in atomically before this returns.
    pub async fn collect(&self) -> Vec<FlattenedTool> {
        let mut tools = Vec::new();
        let mut table = ResolutionTable::new();

        for (server, backend) in self.registry.iter() {
            let descriptors = match backend.list_tools().await {
                Ok(descriptors) => descriptors,
                Err(err) => {
                    warn!(server, error = %err, "excluding server from catalog");
                    continue;
                }
            };

            for descriptor in descriptors {
                let flattened = naming::encode(server, &descriptor.name);
                let candidate = ResolutionEntry {
                    server: server.to_string(),
                    tool: descriptor.name,
                };
                // Two servers can claim the same flattened name when one id
                // is a prefix of the other; the longest id owns the name.
                let shadowed = table.get(&flattened).is_some_and(|existing| {
                    naming::normalize(&existing.server).len() >= naming::normalize(server).len()
                });
                if shadowed {
                    warn!(
                        name = %flattened,
                        server,
                        "flattened tool name collision, entry shadowed"
                    );
                } else if let Some(previous) = table.insert(flattened.clone(), candidate) {
                    warn!(
                        name = %flattened,
                        server = %previous.server,
                        "flattened tool name collision, entry shadowed"
                    );
                }
                tools.push(FlattenedTool {
                    name: flattened,
                    description: descriptor.description,
                    parameters: descriptor.input_schema,
                });
            }
        }

        *self.resolution.write().await = Arc::new(table);
        tools
    }

    /// Collect the catalog and reshape it into the requested projection.
    pub async fn collect_as(&self, projection: ToolProjection) -> Vec<FunctionTool> {
        let tools = self.collect().await;
        tools
            .into_iter()
            .map(|tool| match projection {
                ToolProjection::Native => FunctionTool::native(tool),
                ToolProjection::Simplified => FunctionTool::simplified(tool),
            })
            .collect()
    }

    /// Look up a normalized flattened name in the current resolution table.
    pub async fn resolve(&self, flattened: &str) -> Option<ResolutionEntry> {
        let table = Arc::clone(&*self.resolution.read().await);
        table.get(flattened).cloned()
    }
}
