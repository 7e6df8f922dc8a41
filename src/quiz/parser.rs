//! Booklet text → leveled question/answer items.
//!
//! The booklet is a flat list of lines. Level headers ("난이도 하", ...)
//! can appear anywhere inside a line and switch the current level. A
//! question line looks like:
//!
//! ```text
//! 12. 달의 다른 이름은? 정답: 위성
//! ```
//!
//! Lines before the first header, and numbered lines with no `정답:` marker,
//! are skipped without error.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Level, QuizItem};

/// `<digits>.` followed by optional whitespace
static QUESTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid question prefix pattern"));

/// `정답:` with optional whitespace around the colon
static ANSWER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"정답\s*:\s*").expect("valid answer marker pattern"));

/// Last level header found on the line, checked in tier order
fn find_level_marker(line: &str) -> Option<Level> {
    Level::ALL
        .into_iter()
        .rev()
        .find(|level| line.contains(level.marker()))
}

/// Split a numbered line into (question, answer), both trimmed and non-empty
fn split_question_line(line: &str) -> Option<(&str, &str)> {
    let prefix = QUESTION_PREFIX.find(line)?;
    let rest = &line[prefix.end()..];

    let marker = ANSWER_MARKER.find(rest)?;
    let question = rest[..marker.start()].trim();
    let answer = rest[marker.end()..].trim();

    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some((question, answer))
}

/// Parse the full booklet text into items, in document order.
pub fn parse(text: &str) -> Vec<QuizItem> {
    let mut items = Vec::new();
    let mut current_level: Option<Level> = None;

    for line in text.lines() {
        if let Some(level) = find_level_marker(line) {
            current_level = Some(level);
        }

        let Some(level) = current_level else {
            continue;
        };

        if let Some((question, answer)) = split_question_line(line) {
            items.push(QuizItem::new(level, question, answer));
        }
    }

    items
}
