//! Content validation errors
//!
//! All of these are fatal at build time: generation is all-or-nothing, and
//! every variant names the offending source file so the author can fix it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{}: missing required front-matter field `{field}`", file.display())]
    MissingField { file: PathBuf, field: &'static str },

    #[error("{}: unparseable date `{value}` (expected a calendar date like 2024-01-01)", file.display())]
    InvalidDate { file: PathBuf, value: String },

    #[error("slug `{slug}` collides: {} and {} map to the same route", first.display(), second.display())]
    SlugCollision {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{}: front-matter is not valid YAML: {source}", file.display())]
    InvalidFrontMatter {
        file: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: markdown rendering failed: {message}", file.display())]
    Render { file: PathBuf, message: String },

    #[error("failed to read {}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
