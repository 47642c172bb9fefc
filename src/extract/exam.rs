//! Exam page extraction: question and solution papers
//!
//! An exam page carries a run of `div.TakeExamHeader` containers. The first
//! identifies the exam (course heading, exam name); each later one is a
//! paper section with a left-column title and right-column category links
//! ("Question", "Solution", ...). The links do not point at the documents
//! themselves; each linked page holds the real source in a hidden input,
//! which is why resolution needs a secondary fetch per category.

use crate::{Error, Result};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static HEADER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.TakeExamHeader").expect("valid selector"));
static COURSE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("valid selector"));
static EXAM_NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid selector"));
static PAPER_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.col.text-left h2").expect("valid selector"));
static RIGHT_COLUMN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.col.text-right").expect("valid selector"));
static CATEGORY_ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static CATEGORY_LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.linkspan").expect("valid selector"));
static PDF_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input#mcqAnalysisPdf").expect("valid selector"));

/// One category link inside a paper section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperCategory {
    /// Short category label, e.g. "Question" or "Solution"
    pub label: String,
    /// Portal-relative link to the page holding the document source
    pub href: String,
}

/// One paper section of the exam page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperSection {
    /// Section title with any colon stripped, e.g. "Set A"
    pub title: String,
    /// Category links in document order
    pub categories: Vec<PaperCategory>,
}

/// Structured form of the exam page before paper sources are resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamOutline {
    /// Course the exam belongs to
    pub course_name: String,
    /// Exam name
    pub exam_name: String,
    /// Paper sections in document order
    pub sections: Vec<PaperSection>,
}

/// Parse the exam page into its outline
pub fn parse_exam_outline(html: &str) -> Result<ExamOutline> {
    let document = Html::parse_document(html);
    let mut headers = document.select(&HEADER_SELECTOR);

    let details = headers.next().ok_or_else(|| {
        Error::page_structure("exam", "no div.TakeExamHeader containers found")
    })?;

    let course_name = details
        .select(&COURSE_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("exam", "details header has no h2 course name"))?
        .text()
        .collect::<String>();

    let exam_name = details
        .select(&EXAM_NAME_SELECTOR)
        .last()
        .ok_or_else(|| Error::page_structure("exam", "details header has no h3 exam name"))?
        .text()
        .collect::<String>();

    let mut sections = Vec::new();
    for header in headers {
        let title = header
            .select(&PAPER_TITLE_SELECTOR)
            .next()
            .ok_or_else(|| {
                Error::page_structure("exam", "paper section has no left-column h2 title")
            })?
            .text()
            .collect::<String>()
            .replace(':', "");

        let right_column = header.select(&RIGHT_COLUMN_SELECTOR).next().ok_or_else(|| {
            Error::page_structure("exam", "paper section has no right column")
        })?;

        let mut categories = Vec::new();
        for anchor in right_column.select(&CATEGORY_ANCHOR_SELECTOR) {
            let label = anchor
                .select(&CATEGORY_LABEL_SELECTOR)
                .next()
                .ok_or_else(|| {
                    Error::page_structure("exam", "category anchor has no span.linkspan")
                })?
                .text()
                .collect::<String>();
            let href = anchor
                .value()
                .attr("href")
                .ok_or_else(|| Error::page_structure("exam", "category anchor has no href"))?
                .to_string();
            categories.push(PaperCategory { label, href });
        }

        sections.push(PaperSection { title, categories });
    }

    Ok(ExamOutline {
        course_name,
        exam_name,
        sections,
    })
}

/// Extract the document source from a category page
///
/// Spaces are URL-encoded so the value can be handed to a downloader as-is.
pub fn parse_paper_source(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let input = document
        .select(&PDF_INPUT_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("paper", "missing input#mcqAnalysisPdf"))?;
    let value = input
        .value()
        .attr("value")
        .ok_or_else(|| Error::page_structure("paper", "pdf input has no value attribute"))?;
    Ok(value.replace(' ', "%20"))
}
