//! Configuration module

mod site;

pub use site::{
    DarkModeConfig, FeaturesConfig, ImagesConfig, ManifestConfig, MarkdownConfig, SiteConfig,
    SocialConfig, Theme, ThemeStore, ThemeToggle,
};
