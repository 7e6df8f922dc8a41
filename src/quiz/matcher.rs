//! Answer checking with multi-answer support.
//!
//! A canonical answer such as `8 또는 여덟` or `moon or 달` accepts any of its
//! alternatives. Matching is exact after trimming: no case folding, no typo
//! tolerance.

use std::sync::LazyLock;

use regex::Regex;

/// `또는` anywhere, or the word `or` in any case
static ALTERNATIVE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)또는|\bor\b").expect("valid separator pattern"));

#[derive(Debug, Clone, Copy)]
pub struct AnswerMatcher {
    multi_answer: bool,
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AnswerMatcher {
    pub fn new(multi_answer: bool) -> Self {
        Self { multi_answer }
    }

    pub fn multi_answer(&self) -> bool {
        self.multi_answer
    }

    /// Accepted answers, trimmed, in the order they appear.
    pub fn alternatives<'a>(&self, canonical: &'a str) -> Vec<&'a str> {
        let whole = canonical.trim();
        if !self.multi_answer {
            return vec![whole];
        }

        let parts: Vec<&str> = ALTERNATIVE_SEPARATOR
            .split(canonical)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() { vec![whole] } else { parts }
    }

    /// Whether `candidate` equals one of the accepted answers.
    ///
    /// Callers route blank candidates to the "no answer" outcome before
    /// asking; a blank candidate never matches here.
    pub fn is_correct(&self, candidate: &str, canonical: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        self.alternatives(canonical)
            .into_iter()
            .any(|alternative| alternative == candidate)
    }
}
