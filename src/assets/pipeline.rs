//! Responsive image processing

use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ImagesConfig;

/// Asset resolution and processing errors
///
/// A missing or undecodable referenced image is fatal for the page that
/// depends on it; the error names that page.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{}: referenced image `{image}` not found", page.display())]
    NotFound { page: PathBuf, image: String },

    #[error("{}: failed to decode `{image}`: {source}", page.display())]
    Decode {
        page: PathBuf,
        image: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write rendition {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("io error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One generated rendition
#[derive(Debug, Clone)]
pub struct Rendition {
    /// Site-relative URL of the rendition
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// A processed source image with its renditions
#[derive(Debug, Clone)]
pub struct ImageSet {
    /// Site-relative URL of the full-size copy (srcset fallback and
    /// social-preview image)
    pub src: String,
    /// Original dimensions
    pub width: u32,
    pub height: u32,
    pub renditions: Vec<Rendition>,
}

impl ImageSet {
    /// srcset attribute value: "a-320w.png 320w, a-640w.png 640w, ..."
    pub fn srcset(&self) -> String {
        self.renditions
            .iter()
            .map(|r| format!("{} {}w", r.path, r.width))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Image pipeline configured from the `images` capability
pub struct ImagePipeline {
    enabled: bool,
    widths: Vec<u32>,
}

impl ImagePipeline {
    pub fn new(config: &ImagesConfig) -> Self {
        Self {
            enabled: config.enable,
            widths: config.widths.clone(),
        }
    }

    /// Resolve a thumbnail reference against the document's directory,
    /// falling back to the content root
    pub fn resolve(
        &self,
        reference: &str,
        document: &Path,
        content_dir: &Path,
    ) -> Result<PathBuf, AssetError> {
        let trimmed = reference.trim_start_matches("./");
        if let Some(parent) = document.parent() {
            let candidate = parent.join(trimmed);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
        let candidate = content_dir.join(trimmed.trim_start_matches('/'));
        if candidate.is_file() {
            return Ok(candidate);
        }
        Err(AssetError::NotFound {
            page: document.to_path_buf(),
            image: reference.to_string(),
        })
    }

    /// Process one source image into `out_dir`, returning the image set
    ///
    /// `url_prefix` is the site-relative URL of `out_dir`. Renditions wider
    /// than the original are skipped; the full-size copy is always emitted.
    /// Existing up-to-date outputs are left untouched, so a rerun on
    /// unchanged input produces byte-identical results.
    pub fn process(
        &self,
        source: &Path,
        page: &Path,
        out_dir: &Path,
        url_prefix: &str,
    ) -> Result<ImageSet, AssetError> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let ext = source
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png");

        let (orig_w, orig_h) =
            image::image_dimensions(source).map_err(|source_err| AssetError::Decode {
                page: page.to_path_buf(),
                image: source.display().to_string(),
                source: source_err,
            })?;

        fs::create_dir_all(out_dir).map_err(|e| AssetError::Io {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

        // Full-size copy, used as the src fallback
        let full_name = format!("{}.{}", stem, ext);
        let full_path = out_dir.join(&full_name);
        if needs_update(source, &full_path) {
            fs::copy(source, &full_path).map_err(|e| AssetError::Io {
                path: full_path.clone(),
                source: e,
            })?;
        }

        let mut renditions = Vec::new();
        let mut stale: Vec<(u32, u32, PathBuf)> = Vec::new();
        if self.enabled {
            for &target in &self.widths {
                if target >= orig_w {
                    continue;
                }
                let height = scaled_height((orig_w, orig_h), target);
                let name = format!("{}-{}w.{}", stem, target, ext);
                let out_path = out_dir.join(&name);

                if needs_update(source, &out_path) {
                    stale.push((target, height, out_path));
                }
                renditions.push(Rendition {
                    path: format!("{}/{}", url_prefix.trim_end_matches('/'), name),
                    width: target,
                    height,
                });
            }
        }

        // Decode the source once, and only when something needs writing
        if !stale.is_empty() {
            let img = image::open(source).map_err(|e| AssetError::Decode {
                page: page.to_path_buf(),
                image: source.display().to_string(),
                source: e,
            })?;
            for (target, height, out_path) in stale {
                let resized = img.resize_exact(target, height, FilterType::Lanczos3);
                resized.save(&out_path).map_err(|e| AssetError::Encode {
                    path: out_path.clone(),
                    source: e,
                })?;
            }
        }

        Ok(ImageSet {
            src: format!("{}/{}", url_prefix.trim_end_matches('/'), full_name),
            width: orig_w,
            height: orig_h,
            renditions,
        })
    }
}

/// Height preserving the source aspect ratio at a target width
fn scaled_height(original: (u32, u32), width: u32) -> u32 {
    let (w, h) = original;
    ((width as f64 * h as f64 / w as f64).round() as u32).max(1)
}

/// An output is stale when it is absent or older than its source
fn needs_update(source: &Path, output: &Path) -> bool {
    let (Ok(src_meta), Ok(out_meta)) = (fs::metadata(source), fs::metadata(output)) else {
        return true;
    };
    match (src_meta.modified(), out_meta.modified()) {
        (Ok(src_time), Ok(out_time)) => src_time > out_time,
        _ => true,
    }
}
