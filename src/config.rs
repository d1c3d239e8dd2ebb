//! Gateway Configuration
//!
//! Loads MCP server launch configurations from JSON files with a top-level
//! `mcpServers` key, checking in order:
//! 1. `~/.config/claude/claude_desktop_config.json` (Claude desktop config)
//! 2. the path named by the `MCP_CONFIG_PATH` environment variable
//! 3. `./mcp_config.json` in the working directory
//!
//! The first candidate that parses and carries a non-empty `mcpServers`
//! object wins; unreadable or unrecognized candidates are skipped.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default port for the HTTP server
pub const DEFAULT_PORT: u16 = 3005;

/// Launch configuration for one stdio MCP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSpec {
    /// Command to execute
    pub command: String,

    /// Command arguments
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variables merged over the gateway's own environment
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_timeout() -> u64 {
    30_000 // 30 seconds
}

/// Parsed gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Configured servers, keyed by server id
    #[serde(rename = "mcpServers")]
    pub servers: BTreeMap<String, ServerSpec>,
}

impl GatewayConfig {
    /// Parse a single config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Walk the candidate paths and return the first usable configuration
    /// together with the path it came from.
    pub fn discover() -> Result<(Self, PathBuf), ConfigError> {
        Self::discover_from(&candidate_paths())
    }

    /// Discovery over an explicit path list; exposed for tests.
    pub fn discover_from(paths: &[PathBuf]) -> Result<(Self, PathBuf), ConfigError> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) if !config.servers.is_empty() => {
                    return Ok((config, path.clone()));
                }
                Ok(_) => {
                    debug!(path = %path.display(), "config has no mcpServers entries, skipping");
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable config");
                }
            }
        }
        Err(ConfigError::NotFound)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = dirs::home_dir() {
        paths.push(
            home.join(".config")
                .join("claude")
                .join("claude_desktop_config.json"),
        );
    }

    if let Ok(custom) = std::env::var("MCP_CONFIG_PATH") {
        if !custom.is_empty() {
            paths.push(PathBuf::from(shellexpand::tilde(&custom).into_owned()));
        }
    }

    paths.push(PathBuf::from("mcp_config.json"));

    paths
}

/// HTTP listen port, from the `PORT` environment variable when set.
pub fn listen_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_server_spec() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "mcp_config.json",
            r#"{
                "mcpServers": {
                    "git": {
                        "command": "uvx",
                        "args": ["mcp-server-git"],
                        "env": {"GIT_DIR": "/tmp/repo"}
                    }
                }
            }"#,
        );

        let config = GatewayConfig::load_from_file(&path).unwrap();
        let spec = config.servers.get("git").unwrap();

        assert_eq!(spec.command, "uvx");
        assert_eq!(spec.args, vec!["mcp-server-git".to_string()]);
        assert_eq!(spec.env.get("GIT_DIR").unwrap(), "/tmp/repo");
        assert_eq!(spec.timeout_ms, 30_000);
    }

    #[test]
    fn test_discovery_takes_first_usable() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_config(&dir, "first.json", r#"{"mcpServers": {}}"#);
        let second = write_config(
            &dir,
            "second.json",
            r#"{"mcpServers": {"echo": {"command": "echo"}}}"#,
        );

        let (config, path) = GatewayConfig::discover_from(&[first, second.clone()]).unwrap();

        assert_eq!(path, second);
        assert!(config.servers.contains_key("echo"));
    }

    #[test]
    fn test_discovery_skips_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist.json");
        let invalid = write_config(&dir, "invalid.json", "not json at all");
        let unrelated = write_config(&dir, "unrelated.json", r#"{"other": true}"#);
        let valid = write_config(
            &dir,
            "valid.json",
            r#"{"mcpServers": {"echo": {"command": "echo"}}}"#,
        );

        let (config, path) =
            GatewayConfig::discover_from(&[missing, invalid, unrelated, valid.clone()]).unwrap();

        assert_eq!(path, valid);
        assert_eq!(config.servers.len(), 1);
    }

    #[test]
    fn test_discovery_fails_when_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist.json");

        let err = GatewayConfig::discover_from(&[missing]).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "mcp_config.json",
            r#"{
                "mcpServers": {
                    "fs": {"command": "npx", "args": ["-y", "@modelcontextprotocol/server-filesystem"], "type": "stdio"}
                },
                "globalShortcut": "Ctrl+Space"
            }"#,
        );

        let config = GatewayConfig::load_from_file(&path).unwrap();
        assert!(config.servers.contains_key("fs"));
    }
}
