//! MCP Client
//!
//! Stdio MCP client backed by rmcp: spawns the configured command as a child
//! process and drives it over its standard input/output.

use crate::config::ServerSpec;
use crate::error::BackendError;
use crate::mcp::backend::{ToolBackend, ToolDescriptor};
use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo, Tool},
    service::RunningService,
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::process::Command;

/// A connected stdio MCP server
pub struct McpStdioClient {
    /// Server id this client was registered under
    server: String,
    /// Bound on every round trip to the child process
    timeout: Duration,
    /// Running rmcp client service
    service: RunningService<RoleClient, ClientInfo>,
}

impl McpStdioClient {
    /// Spawn the configured command and complete the MCP handshake.
    ///
    /// The child inherits the gateway's environment with the spec's `env`
    /// entries merged over it.
    pub async fn connect(server: impl Into<String>, spec: &ServerSpec) -> Result<Self, BackendError> {
        let server = server.into();

        let mut cmd = Command::new(&spec.command);
        cmd.args(&spec.args);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        let transport = TokioChildProcess::new(cmd).map_err(|e| BackendError::ConnectFailed {
            server: server.clone(),
            reason: e.to_string(),
        })?;

        let timeout = Duration::from_millis(spec.timeout_ms);
        let client_info = ClientInfo::default();

        let service = tokio::time::timeout(timeout, client_info.serve(transport))
            .await
            .map_err(|_| BackendError::Timeout {
                server: server.clone(),
                timeout_ms: spec.timeout_ms,
            })?
            .map_err(|e| BackendError::ConnectFailed {
                server: server.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            server,
            timeout,
            service,
        })
    }

    /// Server id this client was registered under
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Shut down the client and its child process.
    pub async fn shutdown(self) -> Result<(), BackendError> {
        self.service
            .cancel()
            .await
            .map_err(|e| BackendError::ConnectFailed {
                server: self.server,
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl ToolBackend for McpStdioClient {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BackendError> {
        let tools = tokio::time::timeout(self.timeout, self.service.peer().list_all_tools())
            .await
            .map_err(|_| BackendError::Timeout {
                server: self.server.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| BackendError::ListToolsFailed {
                server: self.server.clone(),
                reason: e.to_string(),
            })?;

        Ok(tools.iter().map(descriptor_from_tool).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Value, BackendError> {
        let params = CallToolRequestParam {
            name: name.to_string().into(),
            arguments,
            task: None,
        };

        let result = tokio::time::timeout(self.timeout, self.service.peer().call_tool(params))
            .await
            .map_err(|_| BackendError::Timeout {
                server: self.server.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| BackendError::Invocation {
                server: self.server.clone(),
                tool: name.to_string(),
                reason: e.to_string(),
            })?;

        serde_json::to_value(&result).map_err(|e| BackendError::Invocation {
            server: self.server.clone(),
            tool: name.to_string(),
            reason: e.to_string(),
        })
    }
}

fn descriptor_from_tool(tool: &Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool
            .description
            .as_ref()
            .map(std::string::ToString::to_string),
        input_schema: serde_json::to_value(&tool.input_schema).unwrap_or(Value::Null),
    }
}
