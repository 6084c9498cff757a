//! Thumbnail retrieval and square cropping.

use crate::error::TagError;
use crate::video::{thumbnail_url, THUMBNAIL_BASE_URL};
use image::{DynamicImage, GenericImageView};
use log::debug;
use reqwest::blocking::Client;

/// Anything that can produce the thumbnail for a video identifier
pub trait ThumbnailSource {
    fn fetch(&self, video_id: &str) -> Result<DynamicImage, TagError>;
}

/// Fetches thumbnails from the public image endpoint over HTTP
pub struct HttpThumbnails {
    client: Client,
    base_url: String,
}

impl HttpThumbnails {
    pub fn new() -> Self {
        Self::with_base_url(THUMBNAIL_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for HttpThumbnails {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailSource for HttpThumbnails {
    fn fetch(&self, video_id: &str) -> Result<DynamicImage, TagError> {
        let url = thumbnail_url(&self.base_url, video_id);
        debug!("Fetching thumbnail {}", url);

        let response = self.client.get(&url).send().map_err(|source| TagError::Fetch {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TagError::Status { url, status });
        }

        let body = response.bytes().map_err(|source| TagError::Fetch {
            url: url.clone(),
            source,
        })?;

        image::load_from_memory(&body).map_err(|source| TagError::Decode { url, source })
    }
}

/// Crop the centered square of side `min(width, height)`.
///
/// Offsets are truncated: a 5x2 image keeps columns 1..3.
pub fn crop_to_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    image.crop_imm(left, top, side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::{Cursor, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single HTTP request with `response` and return the base URL
    fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(&response);
            }
        });
        format!("http://{}/vi", addr)
    }

    fn http_response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            content_type,
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[test]
    fn test_fetch_decodes_served_image() {
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([9, 9, 9])))
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let base = serve_once(http_response("200 OK", "image/png", &png));

        let img = HttpThumbnails::with_base_url(&base).fetch("SA2iWivDJiE").unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[test]
    fn test_fetch_not_found_is_status_error() {
        let base = serve_once(http_response("404 Not Found", "text/plain", b""));

        let err = HttpThumbnails::with_base_url(&base).fetch("missing").unwrap_err();
        match err {
            TagError::Status { url, status } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("/vi/missing/0.jpg"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_non_image_body_is_decode_error() {
        let base = serve_once(http_response("200 OK", "text/html", b"not an image!"));

        let err = HttpThumbnails::with_base_url(&base).fetch("SA2iWivDJiE").unwrap_err();
        assert!(matches!(err, TagError::Decode { .. }), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_fetch_refused_connection_is_fetch_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        // Listener is dropped, nothing accepts on this port any more
        let base = format!("http://{}/vi", addr);

        let err = HttpThumbnails::with_base_url(&base).fetch("SA2iWivDJiE").unwrap_err();
        assert!(matches!(err, TagError::Fetch { .. }), "unexpected error: {:?}", err);
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 7]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_crop_square_is_identity() {
        let img = gradient(40, 40);
        let cropped = crop_to_square(&img);
        assert_eq!(cropped.dimensions(), (40, 40));
        assert_eq!(cropped.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_crop_landscape_centers_horizontally() {
        // Typical 4:3 thumbnail
        let img = gradient(480, 360);
        let cropped = crop_to_square(&img).to_rgb8();
        assert_eq!(cropped.dimensions(), (360, 360));
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([60, 0, 7]));
        assert_eq!(cropped.get_pixel(359, 359), &Rgb([(419 % 256) as u8, (359 % 256) as u8, 7]));
    }

    #[test]
    fn test_crop_portrait_centers_vertically() {
        let img = gradient(10, 30);
        let cropped = crop_to_square(&img).to_rgb8();
        assert_eq!(cropped.dimensions(), (10, 10));
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([0, 10, 7]));
    }

    #[test]
    fn test_crop_odd_difference_truncates_offset() {
        let img = gradient(5, 2);
        let cropped = crop_to_square(&img).to_rgb8();
        assert_eq!(cropped.dimensions(), (2, 2));
        // (5 - 2) / 2 = 1.5, truncated to 1
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([1, 0, 7]));
        assert_eq!(cropped.get_pixel(1, 1), &Rgb([2, 1, 7]));
    }

    #[test]
    fn test_crop_is_idempotent() {
        let once = crop_to_square(&gradient(33, 20));
        let twice = crop_to_square(&once);
        assert_eq!(once.to_rgb8(), twice.to_rgb8());
    }
}
