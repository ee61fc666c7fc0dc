//! Command DTOs for the cache driver
//!
//! One JSON object per input line, tagged by `op`.

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// A single driver command.
///
/// `key` and `value` may be null or omitted; that is the absent sentinel
/// and is passed through to the cache unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    /// `{"op":"put","key":"A","value":"Hello"}`
    Put {
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
    /// `{"op":"get","key":"A"}`
    Get {
        #[serde(default)]
        key: Option<String>,
    },
    /// `{"op":"remove","key":"A"}`
    Remove { key: String },
    /// `{"op":"print"}`
    Print,
    /// `{"op":"stats"}`
    Stats,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(line)
            .map(Some)
            .map_err(|e| CacheError::InvalidCommand(format!("{} ({})", line, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_deserialize() {
        let cmd = Command::parse_line(r#"{"op": "put", "key": "A", "value": "Hello"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Put {
                key: Some("A".to_string()),
                value: Some("Hello".to_string()),
            }
        );
    }

    #[test]
    fn test_put_absent_fields() {
        let cmd = Command::parse_line(r#"{"op": "put", "key": null}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Put {
                key: None,
                value: None
            }
        );
    }

    #[test]
    fn test_unit_commands() {
        assert_eq!(
            Command::parse_line(r#"{"op":"print"}"#).unwrap(),
            Some(Command::Print)
        );
        assert_eq!(
            Command::parse_line(r#"{"op":"stats"}"#).unwrap(),
            Some(Command::Stats)
        );
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
        assert_eq!(Command::parse_line("# fill the cache").unwrap(), None);
    }

    #[test]
    fn test_invalid_lines() {
        for line in [r#"{"op":"flush"}"#, "put A B", r#"{"op":"remove"}"#] {
            assert!(matches!(
                Command::parse_line(line),
                Err(CacheError::InvalidCommand(_))
            ));
        }
    }
}
