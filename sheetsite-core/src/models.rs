//! Content model structs for rows and the generated artifact set.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;

/// One spreadsheet row, projected to `label -> display string`.
///
/// Field order follows column order. Accessors never fail: a missing field
/// reads as `None` and callers pick the default that fits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A repeated label keeps its first position and takes the new value.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((label, value)),
        }
    }

    /// Get a field value by column label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Get a field value, defaulting to the empty string
    pub fn text(&self, label: &str) -> &str {
        self.get(label).unwrap_or("")
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// A redirect from a short link to an item page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

impl RedirectRule {
    /// Status code written for every rule (permanent redirect)
    pub const STATUS: u16 = 301;

    /// Render in `_redirects` syntax: `<from>  <to>  301`
    pub fn to_line(&self) -> String {
        format!("{}  {}  {}", self.from, self.to, Self::STATUS)
    }
}

/// Summary card for the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub preview: String,
    pub href: String,
}

/// Everything generated for a single row
#[derive(Debug, Clone)]
pub struct ItemArtifacts {
    pub slug: String,
    pub short_id: String,
    /// HTML document path, relative to the output root
    pub html_path: PathBuf,
    pub html: String,
    /// JSON document path, relative to the output root
    pub json_path: PathBuf,
    pub json: String,
    pub redirect: Option<RedirectRule>,
    pub entry: IndexEntry,
}

/// The complete output of one build, held in memory until written
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    /// Per-row artifacts in input row order
    pub items: Vec<ItemArtifacts>,
    pub index_html: String,
    pub robots_txt: String,
}

impl ArtifactSet {
    pub const INDEX_FILE: &'static str = "index.html";
    pub const ROBOTS_FILE: &'static str = "robots.txt";
    pub const REDIRECTS_FILE: &'static str = "_redirects";

    /// Redirect rules in row order
    pub fn redirects(&self) -> impl Iterator<Item = &RedirectRule> {
        self.items.iter().filter_map(|item| item.redirect.as_ref())
    }

    /// `_redirects` file body: one rule per line, no trailing newline
    pub fn redirects_file(&self) -> String {
        self.redirects()
            .map(RedirectRule::to_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every file to write as `(relative path, contents)`, in write order.
    ///
    /// Per-row documents come first in row order, so a later row whose slug
    /// or short identifier collides with an earlier one overwrites it.
    pub fn files(&self) -> Vec<(PathBuf, &str)> {
        let mut files = Vec::with_capacity(self.items.len() * 2 + 2);
        for item in &self.items {
            files.push((item.json_path.clone(), item.json.as_str()));
            files.push((item.html_path.clone(), item.html.as_str()));
        }
        files.push((PathBuf::from(Self::INDEX_FILE), self.index_html.as_str()));
        files.push((PathBuf::from(Self::ROBOTS_FILE), self.robots_txt.as_str()));
        files
    }
}
