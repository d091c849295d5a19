//! # sheetsite-render
//!
//! Template rendering library for sheetsite.
//!
//! This crate handles HTML template rendering using Askama.

pub mod templates;

pub use templates::{AskamaRenderer, IndexTemplate, PostTemplate};
