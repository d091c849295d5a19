//! CLI command implementations.

pub mod build;
pub mod slug;

pub use build::build_site;
pub use slug::print_slugs;
