//! Tool Backend Abstraction
//!
//! The registry stores backends behind this trait so the aggregation and
//! routing core never touches the wire protocol directly.

use crate::error::BackendError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A tool offered by a backend, as reported by its tool listing.
///
/// Descriptors are recomputed on every catalog pass and never cached; the
/// schema value is passed through verbatim.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Tool name, unique within its server
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
    /// JSON Schema of the tool's parameters
    pub input_schema: Value,
}

/// An open session to a tool-providing MCP server.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// List the tools the server currently offers.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BackendError>;

    /// Invoke a tool by its native name and return the raw result payload.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Value, BackendError>;
}
