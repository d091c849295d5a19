//! Askama template definitions.

use askama::Template;
use sheetsite_core::{IndexEntry, IndexPage, ItemPage, PageRenderer, RenderError};

/// Item page template
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate<'a> {
    // Page metadata
    pub language: &'a str,
    pub title: &'a str,
    pub site_title: &'a str,
    pub published: &'a str,
    pub tags: &'a str,

    // Links
    pub canonical_url: &'a str,
    pub short_url: &'a str,

    // Body HTML from the sheet, emitted unescaped
    pub content: &'a str,
}

/// Index page template
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    // Site metadata
    pub language: &'a str,
    pub site_title: &'a str,
    pub tagline: &'a str,
    pub canonical_url: &'a str,

    // One card per row, in feed order
    pub entries: &'a [IndexEntry],
}

impl<'a> PostTemplate<'a> {
    pub fn from_page(page: &'a ItemPage<'a>) -> Self {
        Self {
            language: &page.site.language,
            title: page.title,
            site_title: &page.site.title,
            published: page.published,
            tags: page.tags,
            canonical_url: &page.canonical_url,
            short_url: &page.short_url,
            content: page.body_html,
        }
    }
}

impl<'a> IndexTemplate<'a> {
    pub fn from_page(page: &'a IndexPage<'a>) -> Self {
        Self {
            language: &page.site.language,
            site_title: &page.site.title,
            tagline: &page.site.tagline,
            canonical_url: page.canonical_url,
            entries: page.entries,
        }
    }
}

/// [`PageRenderer`] backed by the built-in Askama templates
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

fn template_error(page: &str) -> impl FnOnce(askama::Error) -> RenderError + '_ {
    move |err| RenderError::Template {
        page: page.to_string(),
        message: err.to_string(),
    }
}

impl PageRenderer for AskamaRenderer {
    fn render_item(&self, page: &ItemPage<'_>) -> Result<String, RenderError> {
        PostTemplate::from_page(page)
            .render()
            .map_err(template_error(page.title))
    }

    fn render_index(&self, page: &IndexPage<'_>) -> Result<String, RenderError> {
        IndexTemplate::from_page(page)
            .render()
            .map_err(template_error("index"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsite_core::config::SiteConfig;

    fn item<'a>(site: &'a SiteConfig, title: &'a str, body: &'a str) -> ItemPage<'a> {
        ItemPage {
            title,
            body_html: body,
            published: "2024-01-01",
            tags: "greeting",
            canonical_url: "https://example.com/post/kalimera".to_string(),
            short_url: "https://example.com/short/1".to_string(),
            site,
        }
    }

    #[test]
    fn test_item_page() {
        let site = SiteConfig::default();
        let html = AskamaRenderer
            .render_item(&item(&site, "Καλημέρα", "<p>Hi</p>"))
            .unwrap();

        assert!(html.contains("<title>Καλημέρα | Spreadsheeting Test</title>"));
        assert!(html.contains("<h1>Καλημέρα</h1>"));
        assert!(html.contains(r#"<div class="content"><p>Hi</p></div>"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/post/kalimera" />"#));
        assert!(html.contains(r#"<link rel="shortlink" href="https://example.com/short/1">"#));
        assert!(html.contains(r#"<html lang="el">"#));
        assert!(html.contains("Δημοσιεύτηκε: 2024-01-01 | Tags: greeting"));
    }

    #[test]
    fn test_item_title_is_escaped() {
        let site = SiteConfig::default();
        let html = AskamaRenderer
            .render_item(&item(&site, "<script>x</script>", ""))
            .unwrap();

        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_index_page() {
        let site = SiteConfig::default();
        let entries = vec![
            IndexEntry {
                title: "Καλημέρα".into(),
                preview: "Hi...".into(),
                href: "/post/kalimera".into(),
            },
            IndexEntry {
                title: "Second".into(),
                preview: "...".into(),
                href: "/post/second".into(),
            },
        ];
        let html = AskamaRenderer
            .render_index(&IndexPage {
                canonical_url: "https://example.com",
                entries: &entries,
                site: &site,
            })
            .unwrap();

        assert!(html.contains("<p>Hi...</p>"));
        assert!(html.contains(r#"<a href="/post/kalimera">"#));
        assert!(html.contains("<p>Static Site Generated from Google Sheets</p>"));
        let first = html.find("Καλημέρα").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 2);
    }
}
