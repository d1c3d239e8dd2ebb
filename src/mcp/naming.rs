//! Tool Name Codec
//!
//! Deterministic, reversible mapping between `(server id, native tool name)`
//! and the single flattened name exposed to HTTP callers. Flattened names are
//! formed as `{server}_{tool}` with every whitespace run in either component
//! collapsed to the separator, so identifiers containing spaces stay routable.

use crate::error::BackendError;

/// Separator between the server id and the native tool name
pub const SEPARATOR: char = '_';

/// Collapse every whitespace run (including leading/trailing) to a single
/// separator character.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(SEPARATOR);
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Build the flattened external name for a tool.
pub fn encode(server: &str, tool: &str) -> String {
    format!("{}{}{}", normalize(server), SEPARATOR, normalize(tool))
}

/// Resolve a flattened name back to `(server id, native tool name)`.
///
/// The input is normalized, then matched against every registered server id.
/// When several ids are a textual prefix of the name (e.g. `a` and `a_b`),
/// the longest one wins. The returned server id is the registered id as-is;
/// the tool name is the normalized remainder.
pub fn decode<'a, I>(flattened: &str, server_ids: I) -> Result<(String, String), BackendError>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized = normalize(flattened);

    let mut candidates: Vec<(String, &str)> = server_ids
        .into_iter()
        .map(|id| (normalize(id), id))
        .collect();
    // Longest id first, so ids sharing a prefix resolve deterministically.
    candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    for (normalized_id, id) in candidates {
        let prefix = format!("{}{}", normalized_id, SEPARATOR);
        if let Some(tool) = normalized.strip_prefix(&prefix) {
            return Ok((id.to_string(), tool.to_string()));
        }
    }

    Err(BackendError::MalformedName {
        name: flattened.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_runs() {
        assert_eq!(normalize("my server"), "my_server");
        assert_eq!(normalize("a  \t b"), "a_b");
        assert_eq!(normalize(" leading"), "_leading");
        assert_eq!(normalize("plain_name"), "plain_name");
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("alpha", "ping"), "alpha_ping");
        assert_eq!(encode("my server", "do thing"), "my_server_do_thing");
    }

    #[test]
    fn test_round_trip() {
        let ids = ["alpha", "beta"];
        let flattened = encode("alpha", "ping");
        let (server, tool) = decode(&flattened, ids).unwrap();
        assert_eq!(server, "alpha");
        assert_eq!(tool, "ping");
    }

    #[test]
    fn test_round_trip_with_spaces_in_id() {
        let ids = ["my server"];
        let flattened = encode("my server", "launch app");
        let (server, tool) = decode(&flattened, ids).unwrap();
        assert_eq!(server, "my server");
        assert_eq!(tool, "launch_app");
    }

    #[test]
    fn test_longest_id_wins() {
        let ids = ["a", "a_b"];
        let (server, tool) = decode("a_b_tool", ids).unwrap();
        assert_eq!(server, "a_b");
        assert_eq!(tool, "tool");

        // Order of registration must not matter.
        let ids = ["a_b", "a"];
        let (server, tool) = decode("a_b_tool", ids).unwrap();
        assert_eq!(server, "a_b");
        assert_eq!(tool, "tool");
    }

    #[test]
    fn test_shorter_id_still_matches_its_own_tools() {
        let ids = ["a", "a_b"];
        let (server, tool) = decode("a_ping", ids).unwrap();
        assert_eq!(server, "a");
        assert_eq!(tool, "ping");
    }

    #[test]
    fn test_no_matching_prefix() {
        let ids = ["alpha"];
        let err = decode("unknown_thing", ids).unwrap_err();
        assert!(matches!(err, BackendError::MalformedName { .. }));
    }

    #[test]
    fn test_decode_normalizes_input() {
        let ids = ["alpha"];
        let (server, tool) = decode("alpha ping", ids).unwrap();
        assert_eq!(server, "alpha");
        assert_eq!(tool, "ping");
    }
}
