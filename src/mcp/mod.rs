//! MCP (Model Context Protocol) Aggregation Core
//!
//! Maintains live connections to multiple MCP servers and merges their tool
//! catalogs into one collision-free namespace.
//!
//! # Architecture
//!
//! - `backend`: the connection seam every registered server sits behind
//! - `client`: rmcp-based stdio client for child-process servers
//! - `registry`: id -> connection map, populated at startup
//! - `naming`: flattened-name codec between external and native tool names
//! - `catalog`: merges per-server tool lists, owns the resolution table
//! - `router`: resolves flattened invocations and forwards them
//!
//! # Example
//!
//! ```ignore
//! use mcphub::mcp::{BackendRegistry, CatalogAggregator, McpStdioClient, ToolRouter};
//!
//! let mut registry = BackendRegistry::new();
//! let client = McpStdioClient::connect("git", &spec).await?;
//! registry.register("git", Arc::new(client))?;
//!
//! let registry = Arc::new(registry);
//! let catalog = Arc::new(CatalogAggregator::new(registry.clone()));
//! let router = ToolRouter::new(registry, catalog);
//!
//! let result = router.invoke("git_git_status", None).await?;
//! ```

pub mod backend;
pub mod catalog;
pub mod client;
pub mod naming;
pub mod registry;
pub mod router;

// Re-export main types
pub use backend::{ToolBackend, ToolDescriptor};
pub use catalog::{
    CatalogAggregator, FlattenedTool, FunctionSpec, FunctionTool, ResolutionEntry, ToolProjection,
};
pub use client::McpStdioClient;
pub use registry::BackendRegistry;
pub use router::ToolRouter;
