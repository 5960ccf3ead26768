//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Site;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    // Create default _config.yml
    let config_content = r#"# Site
title: David Glymph
author: David Glymph
description: Personal portfolio and blog
url: https://www.davidglymph.com
image: /assets/preview.png

social:
  github:
  twitter:
  linkedin:

# Directory
content_dir: content
static_dir: static
public_dir: public

# Build capabilities
features:
  markdown:
    math: true
  images:
    enable: true
    widths: [320, 640, 1280]
  manifest:
    enable: true
    name: David Glymph
    short_name: dg
    background_color: '#1b1b1b'
    theme_color: '#1b1b1b'
    icon: /assets/icon.png
  sitemap: true
  dark_mode:
    enable: true
    default: dark
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: The first post on this site.
---

Welcome! This is your very first post. Edit or delete it, then run
`glymph generate` to rebuild the site, or `glymph server` to preview it
locally with live reload.

```bash
$ glymph new --section blog "My Next Post"
```
"#,
        now.format("%Y-%m-%d")
    );

    fs::write(
        target_dir.join("content/blog/hello-world.md"),
        sample_post,
    )?;

    Ok(())
}

/// Run the init command with an existing Site instance
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_a_buildable_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join("_config.yml").is_file());
        assert!(tmp.path().join("content/blog/hello-world.md").is_file());
        assert!(tmp.path().join("content/projects").is_dir());

        // The scaffold must survive a full generate
        let site = Site::new(tmp.path()).unwrap();
        site.generate().unwrap();
        assert!(site.public_dir.join("hello-world/index.html").is_file());
    }
}
