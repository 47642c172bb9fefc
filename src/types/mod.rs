//! Result types produced by the content extractor
//!
//! All of these are immutable values constructed once during a single
//! fetch-and-parse operation and handed to the caller. Nothing here is
//! mutated or cached across calls.

use serde::{Deserialize, Serialize};

/// One lecture entry from the routine listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Lecture title from the item heading
    pub title: String,
    /// First body line, usually the lecture topic
    pub description: String,
    /// Scheduled time
    pub time: String,
    /// Course name, always the last body line
    pub course: String,
}

/// One exam entry from the routine listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Exam title from the item heading
    pub title: String,
    /// Scheduled time range
    pub time: String,
    /// Exam duration
    pub duration: String,
    /// Course name
    pub course: String,
    /// Status line, e.g. "You haven't taken the exam yet"
    pub status: String,
    /// Take-exam link, present only while the exam has not been taken
    pub link: Option<String>,
}

/// Routine listing: upcoming/past lectures and exams, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Routine {
    /// Lecture entries
    pub lectures: Vec<Lecture>,
    /// Exam entries
    pub exams: Vec<Exam>,
}

/// Which video-hosting variant a class page uses
///
/// The portal serves lecture videos either through an embedded YouTube
/// player initialized by an inline script, or through a plain `<video>`
/// element pointing at the portal's own CDN. The two carry different
/// fields, so the distinction is modeled as a sum type rather than an
/// after-the-fact string check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSource {
    /// Embedded YouTube player, detected by its initializer marker
    EmbeddedPlayer {
        /// YouTube video identifier scraped from the inline script
        video_id: String,
        /// Player overlay text, used as the lecture title
        overlay_title: String,
    },
    /// Plain `<video>` element with a direct source URL
    DirectVideo {
        /// Direct video URL
        source_url: String,
        /// Lecture title from the page heading
        title: String,
    },
}

impl VideoSource {
    /// Resolved, downloader-ready video URL
    pub fn video_url(&self) -> String {
        match self {
            VideoSource::EmbeddedPlayer { video_id, .. } => {
                format!("https://youtube.com/watch?v={}", video_id)
            }
            VideoSource::DirectVideo { source_url, .. } => source_url.clone(),
        }
    }

    /// Display title for the lecture
    pub fn title(&self) -> &str {
        match self {
            VideoSource::EmbeddedPlayer { overlay_title, .. } => overlay_title,
            VideoSource::DirectVideo { title, .. } => title,
        }
    }
}

/// Fully resolved class content: video, title and note document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassContent {
    /// Resolved video URL (YouTube watch URL or direct CDN link)
    pub video: String,
    /// Display title of the lecture
    pub title: String,
    /// Note document download URL
    pub notes: String,
}

/// One exam paper document, categorized (e.g. "Question", "Solution")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperLink {
    /// Suggested local filename, `"<paper> - <category>.pdf"`
    pub title: String,
    /// Resolved document URL, spaces encoded as `%20`
    pub link: String,
}

/// Exam page content: question/solution papers for one exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContent {
    /// Course the exam belongs to
    pub course_name: String,
    /// Exam name
    pub exam_name: String,
    /// Paper documents in section-then-category order
    pub links: Vec<PaperLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_player_video_url() {
        let source = VideoSource::EmbeddedPlayer {
            video_id: "abc123".to_string(),
            overlay_title: "Intro to Calculus".to_string(),
        };
        assert_eq!(source.video_url(), "https://youtube.com/watch?v=abc123");
        assert_eq!(source.title(), "Intro to Calculus");
    }

    #[test]
    fn test_direct_video_url_passes_through() {
        let source = VideoSource::DirectVideo {
            source_url: "https://cdn.example.com/lec.mp4".to_string(),
            title: "Vectors".to_string(),
        };
        assert_eq!(source.video_url(), "https://cdn.example.com/lec.mp4");
        assert_eq!(source.title(), "Vectors");
    }

    #[test]
    fn test_routine_serialization_shape() {
        let routine = Routine {
            lectures: vec![Lecture {
                title: "Lecture 1".to_string(),
                description: "Limits".to_string(),
                time: "10:00 AM".to_string(),
                course: "HSC 2026".to_string(),
            }],
            exams: vec![],
        };
        let json = serde_json::to_value(&routine).unwrap();
        assert_eq!(json["lectures"][0]["title"], "Lecture 1");
        assert!(json["exams"].as_array().unwrap().is_empty());
    }
}
