//! # sheetsite-core
//!
//! Core library for the sheetsite static site generator.
//!
//! A build fetches a spreadsheet exposed as a wrapped JSON table, projects
//! each row into a [`Row`], and writes one HTML page and one JSON document per
//! row plus an index page, `robots.txt` and a `_redirects` short-link table.
//! HTML rendering is delegated to a [`PageRenderer`].

pub mod builder;
pub mod config;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod slug;
pub mod writer;

pub use builder::{IndexPage, ItemPage, PageRenderer, RenderError, SiteBuilder, NO_ID};
pub use config::{Config, OutputLayout};
pub use feed::{parse_feed, rows_from_payload, MalformedFeedError};
pub use fetch::{FeedSource, FileSource, HttpSource, RetrievalError, StaticSource};
pub use models::{ArtifactSet, IndexEntry, ItemArtifacts, RedirectRule, Row};
pub use pipeline::{build, BuildError, BuildReport};
pub use slug::slugify;
pub use writer::{write_artifacts, WriteError};
