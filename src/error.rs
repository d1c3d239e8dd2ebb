//! Gateway Error Types
//!
//! Centralized error handling using thiserror for type-safe errors.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration discovery and parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No MCP server configurations found")]
    NotFound,

    #[error("Failed to read config file '{path}': {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Failed to parse config file '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// MCP backend errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to connect to MCP server '{server}': {reason}")]
    ConnectFailed { server: String, reason: String },

    #[error("Failed to connect to any MCP servers")]
    NoServers,

    #[error("Server '{server}' is already registered")]
    Duplicate { server: String },

    #[error("Server '{server}' not found")]
    UnknownServer { server: String },

    #[error("Failed to list tools for server '{server}': {reason}")]
    ListToolsFailed { server: String, reason: String },

    #[error("No server matches the tool name '{name}'")]
    MalformedName { name: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Tool call '{tool}' on server '{server}' failed: {reason}")]
    Invocation {
        server: String,
        tool: String,
        reason: String,
    },

    #[error("Server '{server}' did not respond within {timeout_ms}ms")]
    Timeout { server: String, timeout_ms: u64 },
}
