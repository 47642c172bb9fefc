//! Content extraction from portal pages
//!
//! Three independent fetch-and-parse operations share one authenticated
//! session: the routine listing, a class page (video + note) and an exam
//! page (question/solution papers). No state carries between calls; each
//! re-fetches and re-parses from scratch.
//!
//! Fetching and parsing are deliberately separated: the `parse_*` functions
//! in the submodules take raw HTML, so a structural change on the portal
//! only touches one function and the parsers stay testable without a
//! network.

pub mod class;
pub mod exam;
pub mod routine;

use crate::session::SessionManager;
use crate::types::{ClassContent, ExamContent, PaperLink, Routine};
use crate::{Error, Result};
use tracing::{debug, info};

/// Fixed form parameters sent with every routine listing request
const ROUTINE_FIXED_PARAMS: [(&str, &str); 5] = [
    ("courseId", "0"),
    ("subjectId", ""),
    ("filterType", "1"),
    ("lectureType", "0"),
    ("examPlatform", "0"),
];

/// Fetch-and-parse operations over an authenticated session
#[derive(Debug)]
pub struct ContentExtractor<'a> {
    session: &'a SessionManager,
}

impl<'a> ContentExtractor<'a> {
    /// Create an extractor over an established session
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    /// Fetch the routine listing: one request per entry type, parsed into
    /// lectures and exams in document order
    pub fn fetch_routine(&self) -> Result<Routine> {
        let url = self.session.settings().routine_ajax_url();

        debug!("Fetching lecture routine");
        let lecture_html = self.post_routine(&url, "lecture")?;
        debug!("Fetching exam routine");
        let exam_html = self.post_routine(&url, "exam")?;

        let routine = Routine {
            lectures: routine::parse_lectures(&lecture_html)?,
            exams: routine::parse_exams(&exam_html)?,
        };
        info!(
            "Routine has {} lectures and {} exams",
            routine.lectures.len(),
            routine.exams.len()
        );
        Ok(routine)
    }

    /// Fetch a class page and resolve its video and note document
    pub fn fetch_class_content(&self, content_url: &str) -> Result<ClassContent> {
        debug!("Fetching class page {}", content_url);
        let page = self.session.transport().get(content_url)?;
        let video = class::parse_video_source(&page)?;

        let note_url = class::derive_note_url(content_url)?;
        debug!("Fetching note page {}", note_url);
        let note_page = self.session.transport().get(&note_url)?;
        let notes = class::parse_note_link(&note_page)?;

        let content = ClassContent {
            video: video.video_url(),
            title: video.title().to_string(),
            notes,
        };
        info!("Resolved class content: {}", content.title);
        Ok(content)
    }

    /// Fetch an exam page and resolve every question/solution paper
    ///
    /// Each category link requires a secondary fetch of the linked page to
    /// find the actual document source. Papers come back in
    /// section-then-category order.
    pub fn fetch_exam_content(&self, exam_url: &str) -> Result<ExamContent> {
        debug!("Fetching exam page {}", exam_url);
        let page = self.session.transport().get(exam_url)?;
        let outline = exam::parse_exam_outline(&page)?;

        let base = url::Url::parse(&self.session.settings().portal.base_url)?;
        let mut links = Vec::new();
        for section in &outline.sections {
            for category in &section.categories {
                let paper_url = base.join(&category.href)?;
                debug!("Resolving paper source from {}", paper_url);
                let paper_page = self.session.transport().get(paper_url.as_str())?;
                links.push(PaperLink {
                    title: format!("{} - {}.pdf", section.title, category.label),
                    link: exam::parse_paper_source(&paper_page)?,
                });
            }
        }

        info!(
            "Resolved {} papers for exam {}",
            links.len(),
            outline.exam_name
        );
        Ok(ExamContent {
            course_name: outline.course_name,
            exam_name: outline.exam_name,
            links,
        })
    }

    fn post_routine(&self, url: &str, entry_type: &str) -> Result<String> {
        let mut form: Vec<(&str, &str)> = vec![("type", entry_type)];
        form.extend_from_slice(&ROUTINE_FIXED_PARAMS);
        self.session.transport().post_form(url, &form)
    }
}

/// Shared helper: first capture group of `re` in `text`, or a structure error
pub(crate) fn capture_or_structure_error(
    re: &regex::Regex,
    text: &str,
    page: &str,
    what: &str,
) -> Result<String> {
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::page_structure(page, &format!("missing pattern: {}", what)))
}
