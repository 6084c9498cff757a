//! PDF content stream generation for tags.
//!
//! This module provides:
//! - QR code generation
//! - Image XObject embedding (grayscale and RGB)
//! - Outline rectangles and the tag compositor
//! - PDF content stream building

use crate::error::TagError;
use crate::layout::{Rect, TagCells};
use anyhow::Result;
use image::{DynamicImage, GrayImage, Luma};
use lopdf::{Dictionary, Document, Object, Stream};
use qrcode::QrCode;
use std::io::Write;

/// Pixel size QR codes are upscaled to before embedding
pub const QR_SIZE: u32 = 200;

/// Builder for generating PDF content streams and associated XObjects
pub struct ContentBuilder {
    pub content_parts: Vec<String>,
    pub xobjects: Dictionary,
    page_height: f64,
}

impl ContentBuilder {
    /// Create a builder for a page of the given height in points
    pub fn new(page_height: f64) -> Self {
        Self {
            content_parts: Vec::new(),
            xobjects: Dictionary::new(),
            page_height,
        }
    }

    /// Black strokes of the given width for all following outlines
    pub fn set_line_width(&mut self, width: f64) {
        self.content_parts.push(format!("0 G {} w ", width));
    }

    /// Stroke the outline of a rectangle
    pub fn add_outline(&mut self, rect: &Rect) {
        let y = self.page_height - rect.y - rect.h;
        self.content_parts
            .push(format!("{} {} {} {} re S ", rect.x, y, rect.w, rect.h));
    }

    /// Embed a grayscale image and paint it into `rect`
    pub fn add_gray_image(&mut self, image: &GrayImage, rect: &Rect, doc: &mut Document) -> Result<()> {
        let (width, height) = image.dimensions();
        self.add_image(image.as_raw(), width, height, "DeviceGray", rect, doc)
    }

    /// Embed an image as 8-bit RGB and paint it into `rect`
    pub fn add_rgb_image(&mut self, image: &DynamicImage, rect: &Rect, doc: &mut Document) -> Result<()> {
        // Alpha is dropped; the page background is white paper anyway
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        self.add_image(rgb.as_raw(), width, height, "DeviceRGB", rect, doc)
    }

    fn add_image(
        &mut self,
        raw_bytes: &[u8],
        width: u32,
        height: u32,
        color_space: &str,
        rect: &Rect,
        doc: &mut Document,
    ) -> Result<()> {
        let compressed_bytes = compress_data(raw_bytes)?;

        let mut img_dict = Dictionary::new();
        img_dict.set("Type", "XObject");
        img_dict.set("Subtype", "Image");
        img_dict.set("Width", width as i64);
        img_dict.set("Height", height as i64);
        img_dict.set("ColorSpace", color_space);
        img_dict.set("BitsPerComponent", 8_i64);
        img_dict.set("Filter", "FlateDecode");

        let img_stream = Stream::new(img_dict, compressed_bytes);
        let img_id = doc.add_object(img_stream);

        let img_name = format!("Im{}", img_id.0);
        self.xobjects.set(img_name.clone(), Object::Reference(img_id));

        // The image unit square is stretched to the cell, x and y independently
        let y = self.page_height - rect.y - rect.h;
        self.content_parts.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q ",
            rect.w, rect.h, rect.x, y, img_name
        ));

        Ok(())
    }

    /// Draw one tag: both outlines, the thumbnail and the code image
    pub fn add_tag(
        &mut self,
        cells: &TagCells,
        thumbnail: &DynamicImage,
        code: &GrayImage,
        doc: &mut Document,
    ) -> Result<()> {
        self.add_outline(&cells.thumbnail);
        self.add_outline(&cells.code);
        self.add_gray_image(code, &cells.code, doc)?;
        self.add_rgb_image(thumbnail, &cells.thumbnail, doc)?;
        Ok(())
    }

    /// Build the final content bytes
    pub fn build_content_bytes(&self) -> Vec<u8> {
        self.content_parts.join("").into_bytes()
    }
}

/// Compress data using zlib/flate2
pub fn compress_data(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Generate a QR code as a square grayscale image of `size` pixels
pub fn generate_qr_code(data: &str, size: u32) -> Result<GrayImage, TagError> {
    let qr_code = QrCode::new(data).map_err(|source| TagError::Encode {
        data: data.to_string(),
        source,
    })?;

    // Render QR code with light=255 (white) and dark=0 (black)
    let img = qr_code
        .render::<Luma<u8>>()
        .light_color(Luma([255u8]))
        .dark_color(Luma([0u8]))
        .build();

    // Nearest keeps module edges sharp
    Ok(image::imageops::resize(
        &img,
        size,
        size,
        image::imageops::FilterType::Nearest,
    ))
}
