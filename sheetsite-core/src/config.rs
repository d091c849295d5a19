//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

const DEFAULT_FEED_ENDPOINT: &str = "https://docs.google.com/spreadsheets/d/1ZHWN37AiS31AmREDukFhikvWBNdG1pEXl6v4KGXeTvc/gviz/tq?tqx=out:json";

/// Main configuration struct matching the sheetsite.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Query endpoint returning the wrapped JSON table
    #[serde(default = "default_feed_endpoint")]
    pub feed_endpoint: String,

    /// Output directory, wiped and rebuilt on every run
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub layout: OutputLayout,

    #[serde(default)]
    pub fields: FieldsConfig,

    /// Character budget for index-page previews
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_feed_endpoint() -> String {
    DEFAULT_FEED_ENDPOINT.to_string()
}

fn default_output_root() -> PathBuf {
    PathBuf::from("dist")
}

fn default_preview_chars() -> usize {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute site URL used for canonical and short links
    pub url: String,
    pub title: String,
    pub tagline: String,
    /// Value of `<html lang>`
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://sheet-8jh.pages.dev".to_string(),
            title: "Spreadsheeting Test".to_string(),
            tagline: "Static Site Generated from Google Sheets".to_string(),
            language: "el".to_string(),
        }
    }
}

/// Column labels read by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published: String,
    pub tags: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            title: "Title".to_string(),
            body: "Content".to_string(),
            // sic: matches the header in the source sheet
            published: "Puplished".to_string(),
            tags: "Tags".to_string(),
        }
    }
}

/// Where item pages live and how they are linked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `post/<slug>`, served as a clean URL without extension
    #[default]
    Bare,
    /// `post/<slug>.html`
    Html,
    /// `post/<slug>/index.html`, linked as `/post/<slug>/`
    Directory,
}

impl OutputLayout {
    pub const ITEM_DIR: &'static str = "post";

    /// HTML file path relative to the output root
    pub fn item_file(&self, slug: &str) -> PathBuf {
        let dir = Path::new(Self::ITEM_DIR);
        match self {
            OutputLayout::Bare => dir.join(slug),
            OutputLayout::Html => dir.join(format!("{}.html", slug)),
            OutputLayout::Directory => dir.join(slug).join("index.html"),
        }
    }

    /// Site-absolute URL path of an item page
    pub fn item_path(&self, slug: &str) -> String {
        match self {
            OutputLayout::Bare => format!("/{}/{}", Self::ITEM_DIR, slug),
            OutputLayout::Html => format!("/{}/{}.html", Self::ITEM_DIR, slug),
            OutputLayout::Directory => format!("/{}/{}/", Self::ITEM_DIR, slug),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_endpoint: default_feed_endpoint(),
            output_root: default_output_root(),
            site: SiteConfig::default(),
            layout: OutputLayout::default(),
            fields: FieldsConfig::default(),
            preview_chars: default_preview_chars(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!("No config at {:?}; using built-in defaults", path);
            Ok(Self::default())
        }
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.output_root)
    }

    /// Site URL without a trailing slash
    pub fn site_url(&self) -> &str {
        self.site.url.trim().trim_end_matches('/')
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
