//! Content loader - builds content nodes from the source directory

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{node, ContentError, ContentNode, FrontMatter, MarkdownRenderer, Section};
use crate::Site;

/// Loads and validates content from the content directory
///
/// Unlike a lenient loader, every malformed document here fails the whole
/// build: static generation is all-or-nothing per build.
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_options(site.config.features.markdown.math);
        Self { site, renderer }
    }

    /// Load every content node, sorted by date descending
    ///
    /// Exactly one node per valid document; any invalid document or slug
    /// collision aborts the load.
    pub fn load_all(&self) -> Result<Vec<ContentNode>, ContentError> {
        let mut nodes = Vec::new();

        for section in [Section::Blog, Section::Projects] {
            nodes.extend(self.load_section(section)?);
        }

        // One detail route per slug, site-wide
        let mut seen: HashMap<String, &Path> = HashMap::new();
        for n in &nodes {
            if let Some(first) = seen.insert(n.slug.clone(), &n.full_source) {
                return Err(ContentError::SlugCollision {
                    slug: n.slug.clone(),
                    first: first.to_path_buf(),
                    second: n.full_source.clone(),
                });
            }
        }

        nodes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(nodes)
    }

    /// Load all documents in one section
    pub fn load_section(&self, section: Section) -> Result<Vec<ContentNode>, ContentError> {
        let dir = self.site.content_dir.join(section.dir());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut nodes = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                nodes.push(self.load_document(path, section)?);
            }
        }

        nodes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(nodes)
    }

    /// Load a single document into a content node
    fn load_document(&self, path: &Path, section: Section) -> Result<ContentNode, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            file: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&content, path)?;
        let (title, date) = fm.validate(path)?;

        // Deterministic slug from the file's location, not its title
        let slug = slug::slugify(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled"),
        );

        let source = path
            .strip_prefix(&self.site.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let route_path = format!("/{}/", slug);
        let permalink = format!(
            "{}{}",
            self.site.config.url.trim_end_matches('/'),
            route_path
        );

        let content_html = self
            .renderer
            .render(&body)
            .map_err(|e| ContentError::Render {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(ContentNode {
            slug,
            section,
            title,
            date,
            summary: fm.summary(),
            thumb: fm.thumb.clone(),
            thumb_alt: fm.thumb_alt.clone(),
            demo_link: fm.demo_link(),
            reading_time: node::reading_time(&body),
            raw: body,
            content: content_html,
            source,
            full_source: path.to_path_buf(),
            path: route_path,
            permalink,
        })
    }
}

/// Check if a file is a markdown document
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, name: &str, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    fn site_in(tmp: &TempDir) -> Site {
        Site::new(tmp.path()).unwrap()
    }

    #[test]
    fn test_valid_documents_yield_one_node_each() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        write_doc(&blog, "first.md", "---\ntitle: First\ndate: 2024-01-01\n---\nhello world");
        write_doc(&blog, "second.md", "---\ntitle: Second\ndate: 2024-02-01\n---\nhello again");

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let nodes = loader.load_all().unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| !n.slug.is_empty()));
        assert_eq!(nodes[0].slug, "second");
        assert_eq!(nodes[1].slug, "first");
    }

    #[test]
    fn test_sections_sorted_date_descending() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        write_doc(&blog, "a.md", "---\ntitle: A\ndate: 2023-05-01\n---\nbody");
        write_doc(&blog, "b.md", "---\ntitle: B\ndate: 2024-05-01\n---\nbody");
        write_doc(&blog, "c.md", "---\ntitle: C\ndate: 2022-05-01\n---\nbody");

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let nodes = loader.load_section(Section::Blog).unwrap();

        let dates: Vec<_> = nodes.iter().map(|n| n.date).collect();
        assert!(dates.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_missing_title_fails_the_build() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        write_doc(&blog, "bad.md", "---\ndate: 2024-01-01\n---\nbody");

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let err = loader.load_all().unwrap_err();
        assert!(err.to_string().contains("bad.md"));
        assert!(err.to_string().contains("`title`"));
    }

    #[test]
    fn test_missing_date_fails_the_build() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        write_doc(&blog, "bad.md", "---\ntitle: No Date\n---\nbody");

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let err = loader.load_all().unwrap_err();
        assert!(err.to_string().contains("bad.md"));
        assert!(err.to_string().contains("`date`"));
    }

    #[test]
    fn test_slug_collision_across_sections_fails() {
        let tmp = TempDir::new().unwrap();
        write_doc(
            &tmp.path().join("content/blog"),
            "thing.md",
            "---\ntitle: Blog Thing\ndate: 2024-01-01\n---\nbody",
        );
        write_doc(
            &tmp.path().join("content/projects"),
            "thing.md",
            "---\ntitle: Project Thing\ndate: 2024-02-01\n---\nbody",
        );

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let err = loader.load_all().unwrap_err();
        assert!(matches!(err, ContentError::SlugCollision { .. }));
        assert!(err.to_string().contains("thing"));
    }

    #[test]
    fn test_node_fields_from_frontmatter() {
        let tmp = TempDir::new().unwrap();
        write_doc(
            &tmp.path().join("content/projects"),
            "gallery.mdx",
            "---\ntitle: Gallery\ndate: 2024-03-01\nsummary: A photo thing\nlink_to_demo: ''\nthumb: ./shot.png\nthumb_alt: screenshot\n---\nbody text",
        );

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        let nodes = loader.load_section(Section::Projects).unwrap();
        let n = &nodes[0];

        assert_eq!(n.title, "Gallery");
        assert_eq!(n.summary.as_deref(), Some("A photo thing"));
        assert_eq!(n.demo_link, None);
        assert_eq!(n.thumb.as_deref(), Some("./shot.png"));
        assert_eq!(n.path, "/gallery/");
        assert_eq!(n.permalink, "https://www.davidglymph.com/gallery/");
        assert_eq!(n.reading_time, 1);
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        write_doc(&blog, "post.md", "---\ntitle: P\ndate: 2024-01-01\n---\nbody");
        write_doc(&blog, "image.png", "not markdown");

        let site = site_in(&tmp);
        let loader = ContentLoader::new(&site);
        assert_eq!(loader.load_all().unwrap().len(), 1);
    }
}
