//! Embedded site theme using the Tera template engine
//!
//! The layout shell, page templates and theme assets are compiled into the
//! binary; the published site needs no template directory.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Stylesheet written to `public/assets/site.css`
pub const SITE_CSS: &str = include_str!("theme/site.css");

/// Dark-mode toggle script written to `public/assets/theme.js`
pub const THEME_JS: &str = include_str!("theme/theme.js");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The generator emits HTML fragments (rendered markdown, srcsets);
        // escaping happens at render time where needed
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("home.html", include_str!("theme/home.html")),
            ("blog.html", include_str!("theme/blog.html")),
            ("projects.html", include_str!("theme/projects.html")),
            ("post.html", include_str!("theme/post.html")),
            ("not_found.html", include_str!("theme/not_found.html")),
            // Partials
            ("partials/head.html", include_str!("theme/partials/head.html")),
            ("partials/nav.html", include_str!("theme/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

/// Site-wide metadata, identical on every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub social: Vec<SocialLinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLinkData {
    pub label: String,
    pub url: String,
}

/// Per-page metadata, merged over the site defaults (page values win)
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    /// Page-specific title part ("Blog", a post title, ...)
    pub title: String,
    /// Browser/social title ("Hi | David Glymph")
    pub full_title: String,
    pub description: String,
    /// Absolute social-preview image URL
    pub image: String,
    /// Canonical URL of this page
    pub url: String,
    pub is_article: bool,
    /// Root-path pages suppress the footer
    pub is_root: bool,
}

/// One index-page entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryData {
    pub title: String,
    pub path: String,
    pub date: String,
    pub reading_time_label: String,
    pub summary: Option<String>,
    pub demo_link: Option<String>,
    pub thumb: Option<ThumbData>,
}

/// A processed thumbnail ready for a responsive `<img>`
#[derive(Debug, Clone, Serialize)]
pub struct ThumbData {
    pub src: String,
    pub srcset: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Capability flags the templates branch on
#[derive(Debug, Clone, Serialize)]
pub struct FeaturesData {
    pub math: bool,
    pub dark_mode: bool,
    pub default_theme: String,
    pub manifest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "David Glymph".to_string(),
                author: "David Glymph".to_string(),
                description: "Personal portfolio and blog".to_string(),
                url: "https://www.davidglymph.com".to_string(),
                image: "https://www.davidglymph.com/assets/preview.png".to_string(),
                social: vec![SocialLinkData {
                    label: "GitHub".to_string(),
                    url: "https://github.com/dglymph".to_string(),
                }],
            },
        );
        context.insert(
            "features",
            &FeaturesData {
                math: true,
                dark_mode: true,
                default_theme: "dark".to_string(),
                manifest: true,
            },
        );
        context
    }

    fn page(title: &str, is_root: bool) -> PageData {
        PageData {
            title: title.to_string(),
            full_title: if title.is_empty() {
                "David Glymph".to_string()
            } else {
                format!("{} | David Glymph", title)
            },
            description: "Personal portfolio and blog".to_string(),
            image: "https://www.davidglymph.com/assets/preview.png".to_string(),
            url: "https://www.davidglymph.com/".to_string(),
            is_article: false,
            is_root,
        }
    }

    #[test]
    fn test_templates_parse() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_footer_suppressed_on_root() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = base_context();
        context.insert("page", &page("Home", true));
        context.insert("entries", &Vec::<EntryData>::new());
        let html = renderer.render("home.html", &context).unwrap();
        assert!(!html.contains("<footer>"));

        let mut context = base_context();
        context.insert("page", &page("Blog", false));
        context.insert("entries", &Vec::<EntryData>::new());
        let html = renderer.render("blog.html", &context).unwrap();
        assert!(html.contains("<footer>"));
    }

    #[test]
    fn test_blog_entry_rendering() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("page", &page("Blog", false));
        context.insert(
            "entries",
            &vec![
                EntryData {
                    title: "Hi".to_string(),
                    path: "/hi/".to_string(),
                    date: "January 1st, 2024".to_string(),
                    reading_time_label: "1 minute".to_string(),
                    summary: None,
                    demo_link: None,
                    thumb: None,
                },
                EntryData {
                    title: "Second".to_string(),
                    path: "/second/".to_string(),
                    date: "March 22nd, 2024".to_string(),
                    reading_time_label: "4 minutes".to_string(),
                    summary: Some("What it covers".to_string()),
                    demo_link: None,
                    thumb: None,
                },
            ],
        );

        let html = renderer.render("blog.html", &context).unwrap();
        assert!(html.contains(r#"href="/hi/""#));
        assert!(html.contains("Hi →"));
        assert!(html.contains("1 minute • January 1st, 2024"));
        assert!(html.contains("4 minutes • March 22nd, 2024"));
        assert!(html.contains("What it covers"));
        // An absent summary emits no summary paragraph
        assert_eq!(html.matches(r#"class="summary""#).count(), 1);
    }

    #[test]
    fn test_project_demo_link_only_when_present() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("page", &page("Projects", false));
        context.insert(
            "entries",
            &vec![
                EntryData {
                    title: "With Demo".to_string(),
                    path: "/with-demo/".to_string(),
                    date: "June 11th, 2024".to_string(),
                    reading_time_label: "2 minutes".to_string(),
                    summary: Some("Has a demo".to_string()),
                    demo_link: Some("https://demo.example.com".to_string()),
                    thumb: Some(ThumbData {
                        src: "/assets/images/shot.png".to_string(),
                        srcset: "/assets/images/shot-320w.png 320w".to_string(),
                        alt: "screenshot".to_string(),
                        width: 800,
                        height: 400,
                    }),
                },
                EntryData {
                    title: "No Demo".to_string(),
                    path: "/no-demo/".to_string(),
                    date: "June 12th, 2024".to_string(),
                    reading_time_label: "1 minute".to_string(),
                    summary: None,
                    demo_link: None,
                    thumb: None,
                },
            ],
        );

        let html = renderer.render("projects.html", &context).unwrap();
        assert_eq!(html.matches("View demo").count(), 1);
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(r#"alt="screenshot""#));
        assert!(html.contains("srcset="));
    }

    #[test]
    fn test_detail_page_head_metadata() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        let mut p = page("Hi", false);
        p.url = "https://www.davidglymph.com/hi/".to_string();
        p.is_article = true;
        context.insert("page", &p);
        context.insert("date", "January 1st, 2024");
        context.insert("reading_time_label", "1 minute");
        context.insert("content", "<p>body</p>");

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<title>Hi | David Glymph</title>"));
        assert!(html.contains(r#"property="og:type" content="article""#));
        assert!(html.contains(r#"rel="canonical" href="https://www.davidglymph.com/hi/""#));
        assert!(html.contains("January 1st, 2024 • 1 minute"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_not_found_links_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("page", &page("404", false));

        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("404 - Page not found"));
        assert!(html.contains(r#"<a href="/">Go home.</a>"#));
    }
}
