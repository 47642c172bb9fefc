//! Class page extraction: video source and note document
//!
//! A class page hosts its lecture video one of two ways: an embedded
//! YouTube player initialized by an inline script, or a plain `<video>`
//! element pointing at the portal CDN. The embedded variant is detected by
//! the literal initializer marker; everything else falls through to the
//! direct-video parse. The note document lives on a sibling page whose URL
//! is derived from the content URL.

use crate::extract::capture_or_structure_error;
use crate::types::VideoSource;
use crate::{Error, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Marker emitted by the embedded-player page template
pub const PLAYER_INIT_MARKER: &str =
    "initYoutubePlayer(containerId, videoId, thumbnailSrc, topOverlayText)";

static VIDEO_TAB_SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#video-tabContent script").expect("valid selector"));
static DIRECT_VIDEO_SOURCE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("video#video_1 source").expect("valid selector"));
static NOTE_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn.btn-success.btn-sm").expect("valid selector"));

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"let videoId = '([^']*)';").expect("valid regex"));
static OVERLAY_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"let topOverlayText = '([^']*)';").expect("valid regex"));
static DIRECT_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<h4 class="mb-lg-0 mb-2">(.*?)</h4>"#).expect("valid regex"));

/// Detect which video-hosting variant the page uses and parse it
pub fn parse_video_source(html: &str) -> Result<VideoSource> {
    if html.contains(PLAYER_INIT_MARKER) {
        parse_embedded_player(html)
    } else {
        parse_direct_video(html)
    }
}

fn parse_embedded_player(html: &str) -> Result<VideoSource> {
    let document = Html::parse_document(html);
    let script = document
        .select(&VIDEO_TAB_SCRIPT_SELECTOR)
        .next()
        .ok_or_else(|| {
            Error::page_structure("class", "missing script under div#video-tabContent")
        })?;
    let code: String = script.text().map(str::trim).collect();

    Ok(VideoSource::EmbeddedPlayer {
        video_id: capture_or_structure_error(&VIDEO_ID_RE, &code, "class", "let videoId = '...'")?,
        overlay_title: capture_or_structure_error(
            &OVERLAY_TEXT_RE,
            &code,
            "class",
            "let topOverlayText = '...'",
        )?,
    })
}

fn parse_direct_video(html: &str) -> Result<VideoSource> {
    let document = Html::parse_document(html);
    let source = document
        .select(&DIRECT_VIDEO_SOURCE_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("class", "missing video#video_1 source element"))?;
    let source_url = source
        .value()
        .attr("src")
        .ok_or_else(|| Error::page_structure("class", "video source element has no src"))?
        .to_string();

    // The heading is matched on the raw page text rather than the DOM, which
    // is what the site's template has always allowed
    let title = capture_or_structure_error(
        &DIRECT_TITLE_RE,
        html,
        "class",
        r#"<h4 class="mb-lg-0 mb-2">"#,
    )?;

    Ok(VideoSource::DirectVideo { source_url, title })
}

/// Derive the note-view URL from a content URL: drop the last path segment,
/// append `/ViewClassNote` and keep the query string
pub fn derive_note_url(content_url: &str) -> Result<String> {
    let mut url = url::Url::parse(content_url)?;
    let query = url
        .query()
        .ok_or_else(|| Error::config("content_url", "content URL has no query string"))?
        .to_string();

    let parent = url
        .path()
        .rsplit_once('/')
        .map(|(head, _)| head.to_string())
        .unwrap_or_default();
    url.set_path(&format!("{}/ViewClassNote", parent));
    url.set_query(Some(&query));
    Ok(url.to_string())
}

/// Extract the note document's download link from the note-view page
pub fn parse_note_link(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let anchor = document
        .select(&NOTE_LINK_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("note", "missing a.btn.btn-success.btn-sm"))?;
    let href = anchor
        .value()
        .attr("href")
        .ok_or_else(|| Error::page_structure("note", "note anchor has no href"))?;
    Ok(href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn embedded_player_page(video_id: &str, overlay: &str) -> String {
        format!(
            r#"<html><body>
<script>function initYoutubePlayer(containerId, videoId, thumbnailSrc, topOverlayText) {{}}</script>
<div id="video-tabContent">
  <script>
    let videoId = '{}';
    let thumbnailSrc = '/img/thumb.jpg';
    let topOverlayText = '{}';
    initYoutubePlayer('player', videoId, thumbnailSrc, topOverlayText);
  </script>
</div>
</body></html>"#,
            video_id, overlay
        )
    }

    #[test]
    fn test_embedded_player_variant() {
        let html = embedded_player_page("abc123", "Intro to Calculus");
        let source = parse_video_source(&html).unwrap();
        assert_eq!(
            source,
            VideoSource::EmbeddedPlayer {
                video_id: "abc123".to_string(),
                overlay_title: "Intro to Calculus".to_string(),
            }
        );
        assert_eq!(source.video_url(), "https://youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_embedded_player_missing_video_id_fails() {
        let html = format!(
            r#"<html><body>{}<div id="video-tabContent"><script>let other = 1;</script></div></body></html>"#,
            PLAYER_INIT_MARKER
        );
        let err = parse_video_source(&html).unwrap_err();
        assert!(matches!(err, Error::PageStructure { .. }));
    }

    #[test]
    fn test_direct_video_variant() {
        let html = r#"<html><body>
<h4 class="mb-lg-0 mb-2">Vectors Lecture 3</h4>
<video id="video_1"><source src="https://cdn.udvash-unmesh.com/lec3.mp4" type="video/mp4"></video>
</body></html>"#;
        let source = parse_video_source(html).unwrap();
        assert_eq!(
            source,
            VideoSource::DirectVideo {
                source_url: "https://cdn.udvash-unmesh.com/lec3.mp4".to_string(),
                title: "Vectors Lecture 3".to_string(),
            }
        );
    }

    #[test]
    fn test_direct_video_missing_element_fails() {
        let err = parse_video_source("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, Error::PageStructure { .. }));
    }

    #[test]
    fn test_derive_note_url() {
        let note = derive_note_url(
            "https://online.udvash-unmesh.com/Routine/RoutineDetails?classId=42&courseId=7",
        )
        .unwrap();
        assert_eq!(
            note,
            "https://online.udvash-unmesh.com/Routine/ViewClassNote?classId=42&courseId=7"
        );
    }

    #[test]
    fn test_derive_note_url_requires_query() {
        let err =
            derive_note_url("https://online.udvash-unmesh.com/Routine/RoutineDetails").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_parse_note_link() {
        let html = r#"<a class="btn btn-success btn-sm" href="https://cdn.udvash-unmesh.com/notes/lec3.pdf">Download</a>"#;
        assert_eq!(
            parse_note_link(html).unwrap(),
            "https://cdn.udvash-unmesh.com/notes/lec3.pdf"
        );
    }

    #[test]
    fn test_parse_note_link_missing_fails() {
        let err = parse_note_link("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, Error::PageStructure { .. }));
    }
}
