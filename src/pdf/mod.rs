//! PDF assembly for the tag sheet.

mod content;
mod document;
mod resources;

pub use document::{create_tag_sheet, save_tag_sheet};
