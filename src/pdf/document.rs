use anyhow::{Context, Result};
use image::DynamicImage;
use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

use super::content::{generate_qr_code, ContentBuilder, QR_SIZE};
use super::resources::page_resources;
use crate::config::Layout;
use crate::error::TagError;
use crate::layout::{tag_cells, TileCursor};
use crate::thumbnail::{crop_to_square, ThumbnailSource};
use crate::video::video_id;

/// Compose one tag per URL onto a single page and return the finished document.
///
/// Nothing is written to disk here, so any failing URL leaves no output behind.
pub fn create_tag_sheet(
    urls: &[String],
    layout: &Layout,
    source: &dyn ThumbnailSource,
    dump_dir: Option<&Path>,
) -> Result<Document> {
    layout.validate()?;

    let page_width = layout.page_width.as_points();
    let page_height = layout.page_height.as_points();

    let mut doc = Document::with_version("1.5");
    let mut builder = ContentBuilder::new(page_height);
    builder.set_line_width(layout.line_width.as_points());

    for (url, pos) in urls.iter().zip(TileCursor::new(layout)) {
        let vid = video_id(url).ok_or_else(|| TagError::UnrecognizedUrl(url.clone()))?;
        info!("Adding tag for {} at column {}, row {}", vid, pos.col, pos.row);

        let thumbnail = crop_to_square(&source.fetch(&vid)?);
        debug!("Cropped thumbnail to {}x{}", thumbnail.width(), thumbnail.height());
        if let Some(dir) = dump_dir {
            dump_thumbnail(&thumbnail, dir, &vid)?;
        }

        let code = generate_qr_code(url, QR_SIZE)?;

        let cells = tag_cells(pos, layout);
        if cells.code.y + cells.code.h > page_height {
            warn!("Tag for {} extends past the bottom of the page", vid);
        }
        builder.add_tag(&cells, &thumbnail, &code, &mut doc)?;
    }

    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(Dictionary::new(), builder.build_content_bytes()));
    let resources_id = doc.add_object(page_resources(&builder.xobjects));

    let mut page = Dictionary::new();
    page.set("Type", "Page");
    page.set("Parent", Object::Reference(pages_id));
    page.set("Contents", Object::Reference(content_id));
    page.set("Resources", Object::Reference(resources_id));
    page.set(
        "MediaBox",
        vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width as f32),
            Object::Real(page_height as f32),
        ],
    );
    let page_id = doc.add_object(page);

    let mut pages = Dictionary::new();
    pages.set("Type", "Pages");
    pages.set("Kids", vec![Object::Reference(page_id)]);
    pages.set("Count", 1_i64);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", "Catalog");
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    Ok(doc)
}

/// Save a cropped thumbnail as `<dir>/<video id>.png` for inspection
fn dump_thumbnail(thumbnail: &DynamicImage, dir: &Path, vid: &str) -> Result<()> {
    let file_name: String = vid
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let path = dir.join(format!("{}.png", file_name));
    thumbnail
        .save(&path)
        .with_context(|| format!("Failed to write thumbnail to {:?}", path))?;
    debug!("Wrote {:?}", path);
    Ok(())
}

/// Write the finished sheet to `path`
pub fn save_tag_sheet(doc: &mut Document, path: &Path) -> Result<()> {
    doc.save(path)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
