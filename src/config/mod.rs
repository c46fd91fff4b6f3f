//! Site configuration loaded from `permakey.toml`.

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Site configuration
///
/// ```toml
/// [site]
/// base_url = "https://example.com"
///
/// [content]
/// root = "content"
///
/// [languages]
/// default = "en"
/// codes = ["en", "de"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub languages: LanguagesSection,

    /// Project root (directory containing the config file). Not part of
    /// the file itself.
    #[serde(skip)]
    root: PathBuf,
}

/// `[site]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Public base URL used for permalink formatting.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// `[content]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    /// Content directory, relative to the project root.
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
}

/// `[languages]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguagesSection {
    /// Default content locale.
    #[serde(default = "default_locale")]
    pub default: String,
    /// All content locales. Empty means single-language content
    /// (records carry no locale suffix).
    #[serde(default)]
    pub codes: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

impl Default for LanguagesSection {
    fn default() -> Self {
        Self {
            default: default_locale(),
            codes: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load and validate configuration from a `permakey.toml` path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: SiteConfig = toml::from_str(&text)?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.validate()?;
        Ok(config)
    }

    /// Default configuration rooted at `root` (used when no config file
    /// exists, and by tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            site: SiteSection::default(),
            content: ContentSection::default(),
            languages: LanguagesSection::default(),
            root: root.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.site.base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "site.base_url `{}` is not a valid URL: {e}",
                self.site.base_url
            ))
        })?;

        if !self.languages.codes.is_empty()
            && !self.languages.codes.contains(&self.languages.default)
        {
            return Err(ConfigError::Validation(format!(
                "languages.default `{}` is not listed in languages.codes",
                self.languages.default
            )));
        }
        Ok(())
    }

    /// Public base URL, as configured (permalink formatting trims the
    /// trailing slash).
    pub fn base_url(&self) -> &str {
        &self.site.base_url
    }

    /// Whether the site carries more than one content locale.
    pub fn multilang(&self) -> bool {
        self.languages.codes.len() > 1
    }

    pub fn default_locale(&self) -> &str {
        &self.languages.default
    }

    pub fn locales(&self) -> &[String] {
        &self.languages.codes
    }

    /// Absolute content directory.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.content.root)
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }
}
