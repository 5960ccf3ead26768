//! Create a new content document

use anyhow::Result;
use std::fs;

use crate::content::Section;
use crate::Site;

/// Create a new blog post or project entry
pub fn create_document(site: &Site, title: &str, section: &str) -> Result<()> {
    let Some(section) = Section::from_dir(section) else {
        anyhow::bail!("Unknown section: {}. Available: blog, projects", section);
    };

    let target_dir = site.content_dir.join(section.dir());
    fs::create_dir_all(&target_dir)?;

    let slug = slug::slugify(title);
    let file_path = target_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = match section {
        Section::Blog => format!(
            "---\ntitle: {}\ndate: {}\nsummary:\n---\n",
            title,
            now.format("%Y-%m-%d")
        ),
        Section::Projects => format!(
            "---\ntitle: {}\ndate: {}\nsummary:\nthumb:\nthumb_alt:\nlink_to_demo: ''\n---\n",
            title,
            now.format("%Y-%m-%d")
        ),
    };

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(site: &Site, title: &str, section: Option<&str>) -> Result<()> {
    create_document(site, title, section.unwrap_or("blog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_blog_document() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        create_document(&site, "My First Post", "blog").unwrap();
        let path = tmp.path().join("content/blog/my-first-post.md");
        assert!(path.is_file());
        let body = fs::read_to_string(path).unwrap();
        assert!(body.contains("title: My First Post"));
    }

    #[test]
    fn test_duplicate_document_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        create_document(&site, "Post", "blog").unwrap();
        assert!(create_document(&site, "Post", "blog").is_err());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert!(create_document(&site, "Post", "drafts").is_err());
    }
}
