//! Error types for tag generation

use thiserror::Error;

/// Errors raised while turning a URL into a tag
#[derive(Error, Debug)]
pub enum TagError {
    /// No video identifier could be extracted from the URL
    #[error("Unrecognized URL format: {0}")]
    UnrecognizedUrl(String),

    /// The thumbnail request failed before a response arrived
    #[error("Failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The thumbnail server answered with a non-success status
    #[error("Thumbnail request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body is not a decodable image
    #[error("Failed to decode image from {url}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// The payload does not fit in a QR code
    #[error("Failed to generate QR code for data: {data}")]
    Encode {
        data: String,
        #[source]
        source: qrcode::types::QrError,
    },

    /// Layout values that cannot produce a page
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}
