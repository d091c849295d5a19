//! Artifact generation - turns normalized rows into the in-memory output set.

use crate::{
    config::Config,
    models::{ArtifactSet, IndexEntry, ItemArtifacts, RedirectRule, Row},
    slug::slugify,
};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Short identifier for rows without a usable `id`
pub const NO_ID: &str = "no-id";

/// Crawler directives written to `robots.txt`
pub const ROBOTS_TXT: &str = "User-agent: *\nAllow: /";

const SHORT_PREFIX: &str = "/short/";
const API_DIR: &str = "api";
const ELLIPSIS: &str = "...";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to render {page}: {message}")]
    Template { page: String, message: String },

    #[error("failed to serialize row {short_id}: {source}")]
    Json {
        short_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Data handed to the template for one item page
#[derive(Debug, Clone)]
pub struct ItemPage<'a> {
    pub title: &'a str,
    /// Body cell, emitted as-is (the sheet stores HTML)
    pub body_html: &'a str,
    pub published: &'a str,
    pub tags: &'a str,
    pub canonical_url: String,
    pub short_url: String,
    pub site: &'a crate::config::SiteConfig,
}

/// Data handed to the template for the index page
#[derive(Debug, Clone)]
pub struct IndexPage<'a> {
    pub canonical_url: &'a str,
    pub entries: &'a [IndexEntry],
    pub site: &'a crate::config::SiteConfig,
}

/// Presentation seam: turns page data into HTML
pub trait PageRenderer {
    fn render_item(&self, page: &ItemPage<'_>) -> Result<String, RenderError>;
    fn render_index(&self, page: &IndexPage<'_>) -> Result<String, RenderError>;
}

/// Builds the [`ArtifactSet`] for a list of rows
pub struct SiteBuilder<'a, R: PageRenderer + ?Sized> {
    config: &'a Config,
    renderer: &'a R,
}

impl<'a, R: PageRenderer + ?Sized> SiteBuilder<'a, R> {
    pub fn new(config: &'a Config, renderer: &'a R) -> Self {
        Self { config, renderer }
    }

    /// Generate every artifact, preserving row order
    pub fn build(&self, rows: &[Row]) -> Result<ArtifactSet, RenderError> {
        let mut items = Vec::with_capacity(rows.len());
        let mut seen_slugs: HashMap<String, usize> = HashMap::new();
        let mut seen_ids: HashMap<String, usize> = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            let item = self.build_item(row)?;

            if let Some(first) = seen_slugs.insert(item.slug.clone(), idx) {
                tracing::warn!(
                    "Duplicate slug '{}' (rows {} and {}); later row overwrites",
                    item.slug,
                    first + 1,
                    idx + 1
                );
            }
            if let Some(first) = seen_ids.insert(item.short_id.clone(), idx) {
                tracing::warn!(
                    "Duplicate short id '{}' (rows {} and {}); later row overwrites",
                    item.short_id,
                    first + 1,
                    idx + 1
                );
            }

            tracing::debug!("Generated: {} ({})", item.slug, item.short_id);
            items.push(item);
        }

        let entries: Vec<IndexEntry> = items.iter().map(|i| i.entry.clone()).collect();
        let index_html = self.renderer.render_index(&IndexPage {
            canonical_url: self.config.site_url(),
            entries: &entries,
            site: &self.config.site,
        })?;

        Ok(ArtifactSet {
            items,
            index_html,
            robots_txt: ROBOTS_TXT.to_string(),
        })
    }

    fn build_item(&self, row: &Row) -> Result<ItemArtifacts, RenderError> {
        let fields = &self.config.fields;
        let layout = self.config.layout;
        let site_url = self.config.site_url();

        let title = row.text(&fields.title);
        let body = row.text(&fields.body);
        let slug = slugify(title);
        let id = short_id(row, &fields.id);
        let short_id = id.unwrap_or(NO_ID).to_string();

        let item_path = layout.item_path(&slug);
        let short_path = format!("{}{}", SHORT_PREFIX, short_id);

        let json = serde_json::to_string_pretty(row).map_err(|source| RenderError::Json {
            short_id: short_id.clone(),
            source,
        })?;

        let html = self.renderer.render_item(&ItemPage {
            title,
            body_html: body,
            published: row.text(&fields.published),
            tags: row.text(&fields.tags),
            canonical_url: format!("{}{}", site_url, item_path),
            short_url: format!("{}{}", site_url, short_path),
            site: &self.config.site,
        })?;

        let redirect = id.map(|_| RedirectRule {
            from: short_path,
            to: item_path.clone(),
        });

        Ok(ItemArtifacts {
            html_path: layout.item_file(&slug),
            json_path: PathBuf::from(API_DIR).join(format!("{}.json", short_id)),
            entry: IndexEntry {
                title: title.to_string(),
                preview: preview(body, self.config.preview_chars),
                href: item_path,
            },
            slug,
            short_id,
            html,
            json,
            redirect,
        })
    }
}

/// The row's trimmed `id` field, or `None` when it is missing or unusable.
///
/// The id becomes both a file name under `api/` and a whitespace-separated
/// column of `_redirects`, so path separators, `..` and inner whitespace are
/// rejected.
pub fn short_id<'r>(row: &'r Row, id_field: &str) -> Option<&'r str> {
    let id = row.get(id_field).map(str::trim).filter(|id| !id.is_empty())?;
    if !is_usable_id(id) {
        tracing::warn!("Ignoring unusable id '{}'; using '{}'", id, NO_ID);
        return None;
    }
    Some(id)
}

fn is_usable_id(id: &str) -> bool {
    !id.contains("..") && !id.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace())
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

/// Plain-text teaser: markup stripped, cut to `max_chars`, always ending in `...`
pub fn preview(body: &str, max_chars: usize) -> String {
    let text = tag_regex().replace_all(body, "");
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}
