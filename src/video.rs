//! Video identifier extraction from YouTube URLs.

use url::Url;

/// Base of the public thumbnail endpoint
pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

/// Extract the video identifier from a YouTube URL.
///
/// Recognized shapes:
/// - `https://youtu.be/<id>`
/// - `https://www.youtube.com/watch?v=<id>&...`
/// - `https://www.youtube.com/embed/<id>`
/// - `https://www.youtube.com/v/<id>?version=3`
///
/// Returns `None` for anything else, including strings that are not URLs.
pub fn video_id(value: &str) -> Option<String> {
    let url = Url::parse(value.trim()).ok()?;
    let host = url.host_str()?;

    let id = match host {
        "youtu.be" => first_segment(&url, 0),
        "www.youtube.com" | "youtube.com" => match url.path() {
            "/watch" => url
                .query_pairs()
                .find(|(key, _)| *key == "v")
                .map(|(_, value)| value.into_owned()),
            path if path.starts_with("/embed/") || path.starts_with("/v/") => {
                first_segment(&url, 1)
            }
            _ => None,
        },
        _ => None,
    };

    id.filter(|id| !id.is_empty())
}

fn first_segment(url: &Url, index: usize) -> Option<String> {
    url.path_segments()?.nth(index).map(str::to_string)
}

/// Build the thumbnail URL for a video identifier
pub fn thumbnail_url(base_url: &str, video_id: &str) -> String {
    format!("{}/{}/0.jpg", base_url.trim_end_matches('/'), video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(video_id("http://youtu.be/SA2iWivDJiE").as_deref(), Some("SA2iWivDJiE"));
    }

    #[test]
    fn test_short_link_with_timestamp() {
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ?t=30").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_watch_link() {
        assert_eq!(
            video_id("http://www.youtube.com/watch?v=_oPAwA_Udwc&feature=feedu").as_deref(),
            Some("_oPAwA_Udwc")
        );
        assert_eq!(
            video_id("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_embed_link() {
        assert_eq!(
            video_id("http://www.youtube.com/embed/SA2iWivDJiE").as_deref(),
            Some("SA2iWivDJiE")
        );
    }

    #[test]
    fn test_v_link() {
        assert_eq!(
            video_id("http://www.youtube.com/v/SA2iWivDJiE?version=3&amp;hl=en_US").as_deref(),
            Some("SA2iWivDJiE")
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(video_id("https://vimeo.com/123456789"), None);
        assert_eq!(video_id("https://www.youtube.com/playlist?list=PLrAXtmRdnEQy"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?list=PLrAXtmRdnEQy"), None);
        assert_eq!(video_id("https://www.youtube.com/embed/"), None);
        assert_eq!(video_id("youtu.be/SA2iWivDJiE"), None);
        assert_eq!(video_id("not a url"), None);
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url(THUMBNAIL_BASE_URL, "SA2iWivDJiE"),
            "https://img.youtube.com/vi/SA2iWivDJiE/0.jpg"
        );
        assert_eq!(
            thumbnail_url("http://localhost:8080/", "abc"),
            "http://localhost:8080/abc/0.jpg"
        );
    }
}
