//! Content pipeline: front-matter parsing, node model, markdown rendering

mod error;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod node;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use node::{ContentNode, Section};
