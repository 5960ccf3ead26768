//! Asset pipeline: responsive image renditions for thumbnails
//!
//! Given a source image referenced from a content document, produces
//! aspect-ratio-preserving renditions at the configured widths and exposes
//! the original's dimensions for meta-tag use. Re-running on unchanged
//! input leaves byte-identical output in place.

mod pipeline;

pub use pipeline::{AssetError, ImagePipeline, ImageSet, Rendition};
