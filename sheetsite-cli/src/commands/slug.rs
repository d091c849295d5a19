//! Slug command implementation.

use sheetsite_core::slugify;

/// Print `<slug>\t<title>` for each title
pub fn print_slugs(titles: &[String]) {
    for title in titles {
        println!("{}\t{}", slugify(title), title);
    }
}
