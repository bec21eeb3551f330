use std::io::Read;

use serde::Deserialize;

use crate::error::InputError;

/// Session state piped on stdin by the host tool on every prompt refresh.
///
/// `cwd`, `transcript_path` and `model.display_name` are required; anything
/// else may be missing. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SessionInput {
    pub cwd: String,
    pub transcript_path: String,
    pub model: Model,
    #[serde(default)]
    pub context_window: Option<ContextWindow>,
}

#[derive(Debug, Deserialize)]
pub struct Model {
    pub display_name: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContextWindow {
    #[serde(default)]
    pub current_usage: Option<CurrentUsage>,
    /// Capacity in tokens. Absent or zero means unknown.
    #[serde(default)]
    pub context_window_size: Option<u64>,
}

/// Token counts for the request currently occupying the context window.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct CurrentUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
}

impl CurrentUsage {
    /// Sum of all input-side tokens. Missing counts are treated as zero.
    pub fn total(&self) -> u64 {
        self.input_tokens
            .unwrap_or(0)
            .saturating_add(self.cache_creation_input_tokens.unwrap_or(0))
            .saturating_add(self.cache_read_input_tokens.unwrap_or(0))
    }
}

/// Read all of `reader` and parse it as a [`SessionInput`].
pub fn read_from(mut reader: impl Read) -> Result<SessionInput, InputError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    if buf.iter().all(u8::is_ascii_whitespace) {
        return Err(InputError::Empty);
    }

    Ok(serde_json::from_slice(&buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "session_id": "abc",
        "cwd": "/work/repo",
        "transcript_path": "/tmp/t.jsonl",
        "model": {"id": "claude-opus-4-1", "display_name": "Opus"},
        "context_window": {
            "current_usage": {
                "input_tokens": 1200,
                "cache_creation_input_tokens": 800,
                "cache_read_input_tokens": 3000
            },
            "context_window_size": 200000
        }
    }"#;

    #[test]
    fn test_parse_full_input() {
        let input = read_from(FULL.as_bytes()).unwrap();
        assert_eq!(input.cwd, "/work/repo");
        assert_eq!(input.transcript_path, "/tmp/t.jsonl");
        assert_eq!(input.model.display_name, "Opus");

        let ctx = input.context_window.unwrap();
        assert_eq!(ctx.context_window_size, Some(200000));
        assert_eq!(ctx.current_usage.unwrap().total(), 5000);
    }

    #[test]
    fn test_context_window_is_optional() {
        let json = r#"{"cwd": "/", "transcript_path": "/t", "model": {"display_name": "Sonnet"}}"#;
        let input = read_from(json.as_bytes()).unwrap();
        assert!(input.context_window.is_none());
    }

    #[test]
    fn test_null_usage_fields_count_as_zero() {
        let json = r#"{
            "cwd": "/", "transcript_path": "/t", "model": {"display_name": "M"},
            "context_window": {
                "current_usage": {"input_tokens": 10, "cache_read_input_tokens": null},
                "context_window_size": null
            }
        }"#;
        let ctx = read_from(json.as_bytes()).unwrap().context_window.unwrap();
        assert_eq!(ctx.current_usage.unwrap().total(), 10);
        assert!(ctx.context_window_size.is_none());
    }

    #[test]
    fn test_usage_total_saturates() {
        let usage = CurrentUsage {
            input_tokens: Some(u64::MAX),
            cache_creation_input_tokens: Some(5),
            cache_read_input_tokens: None,
        };
        assert_eq!(usage.total(), u64::MAX);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(read_from("".as_bytes()), Err(InputError::Empty)));
        assert!(matches!(read_from(" \n\t".as_bytes()), Err(InputError::Empty)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = read_from("not json {{{".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn test_missing_required_fields_are_errors() {
        for json in [
            r#"{"transcript_path": "/t", "model": {"display_name": "M"}}"#,
            r#"{"cwd": "/", "model": {"display_name": "M"}}"#,
            r#"{"cwd": "/", "transcript_path": "/t", "model": {"id": "x"}}"#,
            r#"{"cwd": "/", "transcript_path": "/t"}"#,
        ] {
            assert!(
                matches!(read_from(json.as_bytes()), Err(InputError::Json(_))),
                "expected failure for {json}"
            );
        }
    }

    #[test]
    fn test_wrong_typed_required_field_is_error() {
        let json = r#"{"cwd": 42, "transcript_path": "/t", "model": {"display_name": "M"}}"#;
        assert!(read_from(json.as_bytes()).is_err());
    }
}
