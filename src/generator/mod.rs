//! Generator module - emits the static site from loaded content nodes
//!
//! One-directional build: content nodes in, pages out. Any validation or
//! asset error aborts the whole run; there is no partial-failure mode.

use anyhow::{Context as _, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::assets::{ImagePipeline, ImageSet};
use crate::content::{ContentNode, Section};
use crate::helpers::{self, escape_xml, full_url, iso_date, meta_description};
use crate::templates::{
    EntryData, FeaturesData, PageData, SiteData, SocialLinkData, TemplateRenderer, ThumbData,
    SITE_CSS, THEME_JS,
};
use crate::Site;

/// How many recent posts the home page shows
const HOME_RECENT_POSTS: usize = 3;

/// Meta description character budget
const DESCRIPTION_CHARS: usize = 160;

/// Static site generator using the embedded theme
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    images: ImagePipeline,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let images = ImagePipeline::new(&site.config.features.images);

        Ok(Self {
            site: site.clone(),
            renderer,
            images,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, nodes: &[ContentNode]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write_theme_assets()?;
        self.copy_static_assets()?;

        // Resolve and optimize every referenced thumbnail up front so a
        // broken reference halts the build before any page depends on it
        let thumbs = self.process_thumbnails(nodes)?;

        let site_data = self.build_site_data();
        let features = self.build_features_data();

        self.generate_home(nodes, &site_data, &features)?;
        self.generate_index(Section::Blog, nodes, &thumbs, &site_data, &features)?;
        self.generate_index(Section::Projects, nodes, &thumbs, &site_data, &features)?;
        self.generate_detail_pages(nodes, &thumbs, &site_data, &features)?;
        self.generate_not_found(&site_data, &features)?;

        if self.site.config.features.sitemap {
            self.generate_sitemap(nodes)?;
        }
        if self.site.config.features.manifest.enable {
            self.generate_manifest()?;
        }

        Ok(())
    }

    /// Build site data for templates
    fn build_site_data(&self) -> SiteData {
        let config = &self.site.config;
        SiteData {
            title: config.title.clone(),
            author: config.author.clone(),
            description: config.description.clone(),
            url: config.url.trim_end_matches('/').to_string(),
            image: full_url(&config.url, &config.image),
            social: config
                .social
                .links()
                .into_iter()
                .map(|(label, url)| SocialLinkData { label, url })
                .collect(),
        }
    }

    fn build_features_data(&self) -> FeaturesData {
        let features = &self.site.config.features;
        FeaturesData {
            math: features.markdown.math,
            dark_mode: features.dark_mode.enable,
            default_theme: features.dark_mode.default.as_str().to_string(),
            manifest: features.manifest.enable,
        }
    }

    /// Merge page metadata over the site defaults; page values win
    fn build_page_data(
        &self,
        title: &str,
        path: &str,
        description: Option<&str>,
        image: Option<&str>,
        is_article: bool,
    ) -> PageData {
        let config = &self.site.config;
        let full_title = if title.is_empty() {
            config.title.clone()
        } else {
            format!("{} | {}", title, config.title)
        };

        PageData {
            title: title.to_string(),
            full_title,
            description: description.unwrap_or(&config.description).to_string(),
            image: image
                .map(|i| full_url(&config.url, i))
                .unwrap_or_else(|| full_url(&config.url, &config.image)),
            url: full_url(&config.url, path),
            is_article,
            is_root: path == "/",
        }
    }

    /// Create a base context with common variables
    fn base_context(&self, site_data: &SiteData, features: &FeaturesData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("features", features);
        context
    }

    fn entry_data(&self, node: &ContentNode, thumbs: &HashMap<String, ImageSet>) -> EntryData {
        EntryData {
            title: node.title.clone(),
            path: node.path.clone(),
            date: node.formatted_date(),
            reading_time_label: node.reading_time_label(),
            summary: node.summary.clone(),
            demo_link: node.demo_link.clone(),
            thumb: thumbs.get(&node.slug).map(|set| ThumbData {
                src: set.src.clone(),
                srcset: set.srcset(),
                alt: node.thumb_alt.clone().unwrap_or_default(),
                width: set.width,
                height: set.height,
            }),
        }
    }

    /// Generate the home page
    fn generate_home(
        &self,
        nodes: &[ContentNode],
        site_data: &SiteData,
        features: &FeaturesData,
    ) -> Result<()> {
        let recent: Vec<EntryData> = nodes
            .iter()
            .filter(|n| n.section == Section::Blog)
            .take(HOME_RECENT_POSTS)
            .map(|n| self.entry_data(n, &HashMap::new()))
            .collect();

        let mut context = self.base_context(site_data, features);
        context.insert("page", &self.build_page_data("Home", "/", None, None, false));
        context.insert("entries", &recent);

        let html = self.renderer.render("home.html", &context)?;
        self.write_page("/", &html)
    }

    /// Generate one index page (blog or projects), date descending
    fn generate_index(
        &self,
        section: Section,
        nodes: &[ContentNode],
        thumbs: &HashMap<String, ImageSet>,
        site_data: &SiteData,
        features: &FeaturesData,
    ) -> Result<()> {
        let entries: Vec<EntryData> = nodes
            .iter()
            .filter(|n| n.section == section)
            .map(|n| self.entry_data(n, thumbs))
            .collect();

        let (title, template) = match section {
            Section::Blog => ("Blog", "blog.html"),
            Section::Projects => ("Projects", "projects.html"),
        };
        let path = format!("/{}/", section.dir());

        let mut context = self.base_context(site_data, features);
        context.insert("page", &self.build_page_data(title, &path, None, None, false));
        context.insert("entries", &entries);

        let html = self.renderer.render(template, &context)?;
        self.write_page(&path, &html)?;
        tracing::info!("Generated {} index ({} entries)", section.dir(), entries.len());
        Ok(())
    }

    /// Generate one detail page per content node
    fn generate_detail_pages(
        &self,
        nodes: &[ContentNode],
        thumbs: &HashMap<String, ImageSet>,
        site_data: &SiteData,
        features: &FeaturesData,
    ) -> Result<()> {
        for node in nodes {
            let description = node
                .summary
                .clone()
                .unwrap_or_else(|| meta_description(&node.content, DESCRIPTION_CHARS));
            let image = thumbs.get(&node.slug).map(|set| set.src.clone());

            let mut context = self.base_context(site_data, features);
            context.insert(
                "page",
                &self.build_page_data(
                    &node.title,
                    &node.path,
                    Some(&description),
                    image.as_deref(),
                    true,
                ),
            );
            context.insert("date", &node.formatted_date());
            context.insert("reading_time_label", &node.reading_time_label());
            context.insert("content", &node.content);

            let html = self.renderer.render("post.html", &context)?;
            self.write_page(&node.path, &html)?;
            tracing::debug!("Generated detail page: {}", node.path);
        }

        tracing::info!("Generated {} detail pages", nodes.len());
        Ok(())
    }

    /// Generate the terminal not-found page
    fn generate_not_found(&self, site_data: &SiteData, features: &FeaturesData) -> Result<()> {
        let mut context = self.base_context(site_data, features);
        context.insert(
            "page",
            &self.build_page_data("404", "/404.html", None, None, false),
        );

        let html = self.renderer.render("not_found.html", &context)?;
        fs::write(self.site.public_dir.join("404.html"), html)?;
        Ok(())
    }

    /// Resolve and optimize all referenced thumbnails, keyed by slug
    fn process_thumbnails(&self, nodes: &[ContentNode]) -> Result<HashMap<String, ImageSet>> {
        let out_dir = self.site.public_dir.join("assets/images");
        let mut thumbs = HashMap::new();

        for node in nodes {
            let Some(ref reference) = node.thumb else {
                continue;
            };
            let source = self
                .images
                .resolve(reference, &node.full_source, &self.site.content_dir)?;
            let set = self
                .images
                .process(&source, &node.full_source, &out_dir, "/assets/images")?;
            thumbs.insert(node.slug.clone(), set);
        }

        Ok(thumbs)
    }

    /// Generate sitemap.xml over all routes
    fn generate_sitemap(&self, nodes: &[ContentNode]) -> Result<()> {
        let base = self.site.config.url.trim_end_matches('/');

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        let mut push_url = |loc: &str, lastmod: Option<String>| {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
            if let Some(lastmod) = lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            }
            xml.push_str("  </url>\n");
        };

        push_url(&format!("{}/", base), None);
        push_url(&format!("{}/blog/", base), None);
        push_url(&format!("{}/projects/", base), None);
        for node in nodes {
            push_url(
                &format!("{}{}", base, helpers::encode_path(&node.path)),
                Some(iso_date(&node.date)),
            );
        }

        xml.push_str("</urlset>\n");

        fs::write(self.site.public_dir.join("sitemap.xml"), xml)?;
        tracing::info!("Generated sitemap.xml");
        Ok(())
    }

    /// Generate the web app manifest
    fn generate_manifest(&self) -> Result<()> {
        let manifest = &self.site.config.features.manifest;
        let icon_type = match Path::new(&manifest.icon)
            .extension()
            .and_then(|e| e.to_str())
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "image/png",
        };

        let json = serde_json::json!({
            "name": manifest.name,
            "short_name": manifest.short_name,
            "start_url": "/",
            "display": "standalone",
            "background_color": manifest.background_color,
            "theme_color": manifest.theme_color,
            "icons": [
                {
                    "src": manifest.icon,
                    "sizes": "512x512",
                    "type": icon_type,
                }
            ],
        });

        fs::write(
            self.site.public_dir.join("manifest.webmanifest"),
            serde_json::to_string_pretty(&json)?,
        )?;
        tracing::info!("Generated manifest.webmanifest");
        Ok(())
    }

    /// Write the embedded theme assets
    fn write_theme_assets(&self) -> Result<()> {
        let assets_dir = self.site.public_dir.join("assets");
        fs::create_dir_all(&assets_dir)?;
        fs::write(assets_dir.join("site.css"), SITE_CSS)?;
        fs::write(assets_dir.join("theme.js"), THEME_JS)?;
        Ok(())
    }

    /// Copy static assets (images, fonts, etc.) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }

    /// Write a rendered page at its route ("/hi/" -> "hi/index.html")
    fn write_page(&self, route: &str, html: &str) -> Result<()> {
        let clean = route.trim_matches('/');
        let output_path = if clean.is_empty() {
            self.site.public_dir.join("index.html")
        } else {
            self.site.public_dir.join(clean).join("index.html")
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}
