//! Backend Registry
//!
//! Holds the live connection handle for every MCP server the gateway talks
//! to. Populated once during startup and read-only afterwards; catalog
//! collection iterates entries in registration order.

use crate::error::BackendError;
use crate::mcp::backend::ToolBackend;
use std::sync::Arc;

struct RegistryEntry {
    id: String,
    backend: Arc<dyn ToolBackend>,
}

/// Registry of connected MCP servers
#[derive(Default)]
pub struct BackendRegistry {
    entries: Vec<RegistryEntry>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a connected backend under a unique server id.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        backend: Arc<dyn ToolBackend>,
    ) -> Result<(), BackendError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(BackendError::Duplicate { server: id });
        }
        self.entries.push(RegistryEntry { id, backend });
        Ok(())
    }

    /// Get the backend handle for a server id.
    pub fn get(&self, id: &str) -> Result<Arc<dyn ToolBackend>, BackendError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| Arc::clone(&entry.backend))
            .ok_or_else(|| BackendError::UnknownServer {
                server: id.to_string(),
            })
    }

    /// Check if a server id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// All registered server ids, in registration order
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Iterate over `(id, backend)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ToolBackend>)> {
        self.entries
            .iter()
            .map(|entry| (entry.id.as_str(), &entry.backend))
    }

    /// Number of registered servers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no servers are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
