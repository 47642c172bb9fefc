//! Routine listing extraction
//!
//! The routine endpoint returns HTML fragments with one `div.displayClass`
//! container per entry. Field extraction is positional over the container's
//! non-blank body lines, which is brittle by nature; the exact positional
//! semantics are preserved here, isolated per entry type so a template
//! change on the site touches exactly one function. A container whose body
//! has fewer lines than the layout requires is a malformed-input condition
//! and fails loudly.

use crate::types::{Exam, Lecture};
use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Status literal marking an exam that can still be taken
pub const EXAM_NOT_TAKEN_STATUS: &str = "You haven't taken the exam yet";

static ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.displayClass").expect("valid selector"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2.uu-routine-title").expect("valid selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.uu-routine-item-body").expect("valid selector"));
static TAKE_EXAM_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.uu-button-style-4").expect("valid selector"));

/// Parse the lecture-type routine fragment
pub fn parse_lectures(html: &str) -> Result<Vec<Lecture>> {
    let document = Html::parse_document(html);
    let mut lectures = Vec::new();

    for item in document.select(&ITEM_SELECTOR) {
        let (title, lines) = item_fields(item)?;
        if lines.len() < 4 {
            return Err(Error::page_structure(
                "routine",
                &format!(
                    "lecture item body has {} non-blank lines, expected at least 4",
                    lines.len()
                ),
            ));
        }

        lectures.push(Lecture {
            title,
            description: lines[0].clone(),
            time: lines[2].clone(),
            course: lines[lines.len() - 1].clone(),
        });
    }

    Ok(lectures)
}

/// Parse the exam-type routine fragment
pub fn parse_exams(html: &str) -> Result<Vec<Exam>> {
    let document = Html::parse_document(html);
    let mut exams = Vec::new();

    for item in document.select(&ITEM_SELECTOR) {
        let (title, lines) = item_fields(item)?;
        if lines.len() < 7 {
            return Err(Error::page_structure(
                "routine",
                &format!(
                    "exam item body has {} non-blank lines, expected at least 7",
                    lines.len()
                ),
            ));
        }

        let status = lines[lines.len() - 1].clone();
        // The take-exam button only exists while the status says so; its
        // absence in that state is a layout change, not an empty field.
        let link = if status == EXAM_NOT_TAKEN_STATUS {
            let anchor = item.select(&TAKE_EXAM_LINK_SELECTOR).next().ok_or_else(|| {
                Error::page_structure("routine", "missing a.uu-button-style-4 on open exam")
            })?;
            let href = anchor.value().attr("href").ok_or_else(|| {
                Error::page_structure("routine", "take-exam anchor has no href")
            })?;
            Some(href.to_string())
        } else {
            None
        };

        exams.push(Exam {
            title: title.trim().to_string(),
            time: format!("{} {}", lines[1], lines[2]),
            duration: lines[4].clone(),
            course: lines[lines.len() - 2].clone(),
            status,
            link,
        });
    }

    Ok(exams)
}

/// Title heading plus the container's non-blank, trimmed body lines
fn item_fields(item: ElementRef) -> Result<(String, Vec<String>)> {
    let title = item
        .select(&TITLE_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("routine", "missing h2.uu-routine-title"))?
        .text()
        .collect::<String>();

    let body = item
        .select(&BODY_SELECTOR)
        .next()
        .ok_or_else(|| Error::page_structure("routine", "missing div.uu-routine-item-body"))?;

    let text = body.text().collect::<String>();
    let lines = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok((title, lines))
}
