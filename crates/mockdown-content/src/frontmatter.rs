//! Front matter rendering and extraction.
//!
//! Rendering writes one `key: value` line per field between `---` fences.
//! Strings are JSON-quoted, which is also valid YAML, and sequences are
//! written inline. Extraction is the inverse used by the link tooling.

use chrono::{DateTime, FixedOffset};
use mockdown_core::{Error, Result};

/// Timestamp format used in every front matter block.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const FENCE: &str = "---";

/// Format a timestamp the way front matter stores it.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a front matter timestamp.
pub fn parse_date(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| Error::parse(format!("invalid date '{text}': {e}")))
}

// ============================================================================
// Writer
// ============================================================================

/// Line-oriented builder for a front matter block.
#[derive(Debug)]
pub struct FrontMatterWriter {
    out: String,
}

impl Default for FrontMatterWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontMatterWriter {
    /// Start a block with the opening fence.
    pub fn new() -> Self {
        let mut out = String::with_capacity(256);
        out.push_str(FENCE);
        out.push('\n');
        Self { out }
    }

    /// A quoted string field.
    pub fn string(mut self, key: &str, value: &str) -> Result<Self> {
        let quoted = quote(value)?;
        self.line(key, &quoted);
        Ok(self)
    }

    /// An inline sequence of quoted strings.
    pub fn list<S: AsRef<str>>(mut self, key: &str, values: &[S]) -> Result<Self> {
        let items = values
            .iter()
            .map(|v| quote(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.line(key, &format!("[{}]", items.join(", ")));
        Ok(self)
    }

    /// An unquoted timestamp field.
    pub fn date(mut self, key: &str, value: &DateTime<FixedOffset>) -> Self {
        self.line(key, &format_date(value));
        self
    }

    /// A boolean field.
    pub fn flag(mut self, key: &str, value: bool) -> Self {
        self.line(key, if value { "true" } else { "false" });
        self
    }

    /// Close the block. The result ends with the fence and a newline.
    pub fn finish(mut self) -> String {
        self.out.push_str(FENCE);
        self.out.push('\n');
        self.out
    }

    fn line(&mut self, key: &str, value: &str) {
        self.out.push_str(key);
        self.out.push_str(": ");
        self.out.push_str(value);
        self.out.push('\n');
    }
}

fn quote(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::serialization(e.to_string()))
}

// ============================================================================
// Extraction
// ============================================================================

/// Split `content` into its raw front matter block and the body.
///
/// Returns `(None, content)` when the text does not open with a fence or the
/// block is never closed. The blank line separating the block from the body
/// is not part of the body.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let text = content.trim_start_matches('\u{feff}');
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let body = body
                .strip_prefix("\r\n")
                .or_else(|| body.strip_prefix('\n'))
                .unwrap_or(body);
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse the front matter block of `content`, if any.
///
/// # Errors
///
/// `Error::Parse` if a block is present but is not valid YAML.
pub fn parse_front_matter(content: &str) -> Result<(Option<serde_yaml::Value>, &str)> {
    match split_front_matter(content) {
        (Some(yaml), body) => {
            let value = serde_yaml::from_str(yaml)
                .map_err(|e| Error::parse(format!("front matter: {e}")))?;
            Ok((Some(value), body))
        }
        (None, body) => Ok((None, body)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&sample_date()), "2024-03-01T10:00:00+0700");
    }

    #[test]
    fn test_parse_date_round_trip() {
        let parsed = parse_date("2024-03-01T10:00:00+0700").unwrap();
        assert_eq!(parsed, sample_date());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_writer_output() {
        let block = FrontMatterWriter::new()
            .string("title", "Alpha \"Beta\"")
            .unwrap()
            .date("date", &sample_date())
            .list("tags", &["rust", "yaml"])
            .unwrap()
            .flag("draft", false)
            .finish();

        assert_eq!(
            block,
            "---\ntitle: \"Alpha \\\"Beta\\\"\"\ndate: 2024-03-01T10:00:00+0700\n\
             tags: [\"rust\", \"yaml\"]\ndraft: false\n---\n"
        );
    }

    #[test]
    fn test_writer_empty_list() {
        let block = FrontMatterWriter::new()
            .list::<&str>("tags", &[])
            .unwrap()
            .finish();
        assert!(block.contains("tags: []\n"));
    }

    #[test]
    fn test_written_block_is_valid_yaml() {
        let content = format!(
            "{}\nBody text\n",
            FrontMatterWriter::new()
                .string("title", "Colon: and # hash")
                .unwrap()
                .list("tags", &["a: b", "c"])
                .unwrap()
                .finish()
        );

        let (value, body) = parse_front_matter(&content).unwrap();
        let value = value.unwrap();
        assert_eq!(value["title"].as_str(), Some("Colon: and # hash"));
        assert_eq!(value["tags"][0].as_str(), Some("a: b"));
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let (fm, body) = split_front_matter("# Title\nBody");
        assert!(fm.is_none());
        assert_eq!(body, "# Title\nBody");
    }

    #[test]
    fn test_split_unclosed_block() {
        let content = "---\ntitle: x\nbody";
        let (fm, body) = split_front_matter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_crlf() {
        let (fm, body) = split_front_matter("---\r\ntitle: x\r\n---\r\n\r\nBody");
        assert_eq!(fm, Some("title: x\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
