//! Front-matter parsing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::ContentError;

/// Front-matter data from a content document
///
/// Fields are kept optional at the parsing layer; mandatory fields are
/// enforced by [`FrontMatter::validate`] so that the error can name the
/// offending file instead of being a bare deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub thumb: Option<String>,
    pub thumb_alt: Option<String>,
    pub link_to_demo: Option<String>,

    /// Additional custom fields, tolerated but unused
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a document string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str, file: &Path) -> Result<(Self, String), ContentError> {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            // No front-matter block at all; validation will report the
            // missing mandatory fields.
            return Ok((FrontMatter::default(), content.to_string()));
        };

        let rest = rest.trim_start_matches(['\n', '\r']);
        let Some(end_pos) = rest.find("\n---") else {
            return Ok((FrontMatter::default(), content.to_string()));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining.to_string()));
        }

        let fm: FrontMatter =
            serde_yaml::from_str(yaml_content).map_err(|source| ContentError::InvalidFrontMatter {
                file: file.to_path_buf(),
                source,
            })?;

        Ok((fm, remaining.to_string()))
    }

    /// Enforce mandatory fields, failing closed with the offending file
    ///
    /// Returns the validated (title, date) pair. A missing `title` or
    /// `date` is a build-stopping error rather than a silent default.
    pub fn validate(&self, file: &Path) -> Result<(String, NaiveDate), ContentError> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                return Err(ContentError::MissingField {
                    file: file.to_path_buf(),
                    field: "title",
                })
            }
        };

        let raw_date = match self.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => {
                return Err(ContentError::MissingField {
                    file: file.to_path_buf(),
                    field: "date",
                })
            }
        };

        let date = parse_date(raw_date).ok_or_else(|| ContentError::InvalidDate {
            file: file.to_path_buf(),
            value: raw_date.to_string(),
        })?;

        Ok((title, date))
    }

    /// Summary with empty-string normalized to None
    pub fn summary(&self) -> Option<String> {
        normalize_optional(self.summary.as_deref())
    }

    /// Demo link with empty-string normalized to None
    pub fn demo_link(&self) -> Option<String> {
        normalize_optional(self.link_to_demo.as_deref())
    }
}

/// Treat `""` and absent as equivalent: both suppress the field
fn normalize_optional(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

/// Parse a calendar date in the formats authors actually write
fn parse_date(s: &str) -> Option<NaiveDate> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"];
    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Datetime strings: keep the calendar part
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}
