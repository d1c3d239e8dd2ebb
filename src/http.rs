//! HTTP Surface
//!
//! Exposes the merged tool catalog and tool invocation over axum:
//! - `GET /tools/{toolType}` with `toolType` one of `mcp` or `openai`
//! - `POST /callTool` with body `{"toolName": ..., "arguments": ...}`
//!
//! All failure responses are JSON objects with an `error` string field.

use crate::mcp::naming;
use crate::mcp::{BackendRegistry, CatalogAggregator, ToolProjection, ToolRouter};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::error;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BackendRegistry>,
    pub catalog: Arc<CatalogAggregator>,
    pub router: Arc<ToolRouter>,
}

impl AppState {
    /// Build the catalog and router over a populated registry.
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        let catalog = Arc::new(CatalogAggregator::new(Arc::clone(&registry)));
        let router = Arc::new(ToolRouter::new(
            Arc::clone(&registry),
            Arc::clone(&catalog),
        ));
        Self {
            registry,
            catalog,
            router,
        }
    }
}

/// JSON error body shared by every failure response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Build the axum application.
pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/tools/{tool_type}", get(get_tools))
        .route("/callTool", post(call_tool))
        .with_state(state)
}

/// `GET /tools/{toolType}`
pub async fn get_tools(State(state): State<AppState>, Path(tool_type): Path<String>) -> Response {
    let projection = match tool_type.as_str() {
        "mcp" => ToolProjection::Native,
        "openai" => ToolProjection::Simplified,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid tool type. Must be \"mcp\" or \"openai\"",
            )
        }
    };

    let tools = state.catalog.collect_as(projection).await;
    Json(tools).into_response()
}

/// Request body for `POST /callTool`
#[derive(Debug, Deserialize)]
pub struct CallToolRequest {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// `POST /callTool`
///
/// The prefix check runs on the whitespace-normalized name; the router then
/// receives the original name and performs its own normalization.
pub async fn call_tool(
    State(state): State<AppState>,
    Json(request): Json<CallToolRequest>,
) -> Response {
    let normalized = naming::normalize(&request.tool_name);
    let known_prefix = state.registry.ids().iter().any(|id| {
        let prefix = format!("{}{}", naming::normalize(id), naming::SEPARATOR);
        normalized.starts_with(&prefix)
    });
    if !known_prefix {
        return error_response(
            StatusCode::NOT_FOUND,
            "Server not found for the given tool name",
        );
    }

    match state
        .router
        .invoke(&request.tool_name, request.arguments)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            error!(tool = %request.tool_name, error = %err, "tool call failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
