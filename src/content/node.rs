//! The content node model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which content directory a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Blog,
    Projects,
}

impl Section {
    /// Directory name under the content root
    pub fn dir(&self) -> &'static str {
        match self {
            Section::Blog => "blog",
            Section::Projects => "projects",
        }
    }

    pub fn from_dir(dir: &str) -> Option<Self> {
        match dir {
            "blog" => Some(Section::Blog),
            "projects" => Some(Section::Projects),
            _ => None,
        }
    }
}

/// One parsed content document plus derived fields
///
/// Built once per source file during generation and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    /// URL slug, derived from the file stem; unique site-wide
    pub slug: String,

    /// Source directory category
    pub section: Section,

    /// Document title (mandatory)
    pub title: String,

    /// Publication date (mandatory)
    pub date: NaiveDate,

    /// Optional one-paragraph summary; None suppresses the paragraph
    pub summary: Option<String>,

    /// Optional thumbnail image reference, relative to the document
    pub thumb: Option<String>,

    /// Alt text for the thumbnail
    pub thumb_alt: Option<String>,

    /// Optional external demo URL
    pub demo_link: Option<String>,

    /// Estimated reading time in whole minutes (>= 1)
    pub reading_time: u32,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Source file path relative to the content dir
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path of the detail page ("/{slug}/")
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl ContentNode {
    /// Date formatted the way index and detail pages display it
    /// (e.g. "January 1st, 2024")
    pub fn formatted_date(&self) -> String {
        crate::helpers::long_date(&self.date)
    }

    /// Reading time with the correct singular/plural unit
    pub fn reading_time_label(&self) -> String {
        if self.reading_time == 1 {
            "1 minute".to_string()
        } else {
            format!("{} minutes", self.reading_time)
        }
    }
}

/// Estimate reading time in minutes from a markdown body
///
/// Monotonically increasing in word count, never below one minute.
pub fn reading_time(markdown: &str) -> u32 {
    const WORDS_PER_MINUTE: usize = 200;
    let words = count_words(markdown);
    (words.div_ceil(WORDS_PER_MINUTE)).max(1) as u32
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(reading: u32) -> ContentNode {
        ContentNode {
            slug: "hi".to_string(),
            section: Section::Blog,
            title: "Hi".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            summary: None,
            thumb: None,
            thumb_alt: None,
            demo_link: None,
            reading_time: reading,
            raw: String::new(),
            content: String::new(),
            source: "blog/hi.md".to_string(),
            full_source: PathBuf::from("content/blog/hi.md"),
            path: "/hi/".to_string(),
            permalink: "https://www.davidglymph.com/hi/".to_string(),
        }
    }

    #[test]
    fn test_reading_time_minimum_is_one_minute() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("a few words"), 1);
    }

    #[test]
    fn test_reading_time_is_monotone() {
        let short = "word ".repeat(150);
        let medium = "word ".repeat(350);
        let long = "word ".repeat(900);
        let times = [
            reading_time(&short),
            reading_time(&medium),
            reading_time(&long),
        ];
        assert_eq!(times, [1, 2, 5]);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_reading_time_pluralization() {
        assert_eq!(node(1).reading_time_label(), "1 minute");
        assert_eq!(node(2).reading_time_label(), "2 minutes");
        assert_eq!(node(12).reading_time_label(), "12 minutes");
    }

    #[test]
    fn test_formatted_date_uses_ordinal_day() {
        assert_eq!(node(1).formatted_date(), "January 1st, 2024");
    }

    #[test]
    fn test_section_round_trip() {
        assert_eq!(Section::from_dir("blog"), Some(Section::Blog));
        assert_eq!(Section::from_dir("projects"), Some(Section::Projects));
        assert_eq!(Section::from_dir("drafts"), None);
        assert_eq!(Section::Projects.dir(), "projects");
    }
}
