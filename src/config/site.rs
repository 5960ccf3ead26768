//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Read once at startup and immutable afterwards; every generated page
/// consumes it for meta-tag defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,

    // URL
    pub url: String,

    /// Default social-preview image, relative to the site root
    pub image: String,

    /// Social handles used to build outbound profile links
    pub social: SocialConfig,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    /// Enabled build capabilities, resolved once at initialization
    pub features: FeaturesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "David Glymph".to_string(),
            author: "David Glymph".to_string(),
            description: "Personal portfolio and blog".to_string(),
            url: "https://www.davidglymph.com".to_string(),
            image: "/assets/preview.png".to_string(),
            social: SocialConfig::default(),
            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),
            features: FeaturesConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Social handles (each optional; absent handles produce no link)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl SocialConfig {
    /// Resolve handles into (label, url) pairs for the footer/nav
    pub fn links(&self) -> Vec<(String, String)> {
        let mut links = Vec::new();
        if let Some(ref handle) = self.github {
            links.push(("GitHub".to_string(), format!("https://github.com/{}", handle)));
        }
        if let Some(ref handle) = self.twitter {
            links.push(("Twitter".to_string(), format!("https://twitter.com/{}", handle)));
        }
        if let Some(ref handle) = self.linkedin {
            links.push((
                "LinkedIn".to_string(),
                format!("https://www.linkedin.com/in/{}", handle),
            ));
        }
        links
    }
}

/// Declarative list of build capabilities
///
/// Each capability is a plain enabled/disabled flag plus its parameters;
/// there is no conditional activation beyond presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub markdown: MarkdownConfig,
    pub images: ImagesConfig,
    pub manifest: ManifestConfig,
    pub sitemap: bool,
    pub dark_mode: DarkModeConfig,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            markdown: MarkdownConfig::default(),
            images: ImagesConfig::default(),
            manifest: ManifestConfig::default(),
            sitemap: true,
            dark_mode: DarkModeConfig::default(),
        }
    }
}

/// Markdown processing options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Render TeX math notation (KaTeX stylesheet injected into the head)
    pub math: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { math: true }
    }
}

/// Responsive image optimization options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub enable: bool,
    /// Rendition widths in pixels; widths above the original are skipped
    pub widths: Vec<u32>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enable: true,
            widths: vec![320, 640, 1280],
        }
    }
}

/// Web app manifest (PWA metadata) options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub enable: bool,
    pub name: String,
    pub short_name: String,
    pub background_color: String,
    pub theme_color: String,
    pub icon: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: "David Glymph".to_string(),
            short_name: "dg".to_string(),
            background_color: "#1b1b1b".to_string(),
            theme_color: "#1b1b1b".to_string(),
            icon: "/assets/icon.png".to_string(),
        }
    }
}

/// Dark mode options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkModeConfig {
    pub enable: bool,
    /// Theme applied when no preference has been persisted yet
    pub default: Theme,
}

impl Default for DarkModeConfig {
    fn default() -> Self {
        Self {
            enable: true,
            default: Theme::Dark,
        }
    }
}

/// The two-state theme machine
///
/// Initial state comes from the persisted preference (falling back to the
/// configured default); transitions happen only via the explicit toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The single transition: flip to the other state
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Persistence capability for the theme preference
///
/// The browser side is localStorage; this seam keeps the state machine
/// testable without a DOM.
pub trait ThemeStore {
    fn read_preference(&self) -> Option<Theme>;
    fn write_preference(&mut self, theme: Theme);
}

/// Theme toggle bound to a persistence backend
pub struct ThemeToggle<S: ThemeStore> {
    store: S,
    default: Theme,
}

impl<S: ThemeStore> ThemeToggle<S> {
    pub fn new(store: S, default: Theme) -> Self {
        Self { store, default }
    }

    /// Current state: the persisted preference, or the default
    pub fn current(&self) -> Theme {
        self.store.read_preference().unwrap_or(self.default)
    }

    /// Flip the state and persist the result
    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        self.store.write_preference(next);
        next
    }

    /// Release the backend (simulates a page unload)
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore(Option<Theme>);

    impl ThemeStore for MemoryStore {
        fn read_preference(&self) -> Option<Theme> {
            self.0
        }
        fn write_preference(&mut self, theme: Theme) {
            self.0 = Some(theme);
        }
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "David Glymph");
        assert_eq!(config.content_dir, "content");
        assert!(config.features.dark_mode.enable);
        assert_eq!(config.features.dark_mode.default, Theme::Dark);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
url: https://example.com
social:
  github: testuser
features:
  sitemap: true
  images:
    widths: [480, 960]
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert!(config.features.sitemap);
        assert_eq!(config.features.images.widths, vec![480, 960]);
        assert_eq!(config.social.github.as_deref(), Some("testuser"));
    }

    #[test]
    fn test_social_links() {
        let social = SocialConfig {
            github: Some("dglymph".to_string()),
            twitter: None,
            linkedin: None,
        };
        let links = social.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].1, "https://github.com/dglymph");
    }

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_defaults_to_dark_without_preference() {
        let toggle = ThemeToggle::new(MemoryStore::default(), Theme::Dark);
        assert_eq!(toggle.current(), Theme::Dark);
    }

    #[test]
    fn test_theme_preference_survives_reload() {
        let mut toggle = ThemeToggle::new(MemoryStore::default(), Theme::Dark);
        assert_eq!(toggle.toggle(), Theme::Light);

        // Simulated reload: new toggle over the same store
        let store = toggle.into_store();
        let mut toggle = ThemeToggle::new(store, Theme::Dark);
        assert_eq!(toggle.current(), Theme::Light);

        assert_eq!(toggle.toggle(), Theme::Dark);
        assert_eq!(toggle.current(), Theme::Dark);
    }
}
