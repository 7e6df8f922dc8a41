//! Plain-text access to the quiz booklet.
//!
//! A [`DocumentTextSource`] yields one entry per page, in page order.
//! [`read_full_text`] joins those pages into the single string the quiz
//! parser works on.

use std::fs;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::error::ParseError;

/// Page separator used by [`TextDocument`]
pub const PAGE_BREAK: char = '\x0c';

/// Something that can produce the text of a multi-page document.
pub trait DocumentTextSource {
    /// Text of every page in order. `None` marks a page with no extractable text.
    fn pages(&self) -> Result<Vec<Option<String>>, ParseError>;
}

/// PDF booklet read with `lopdf`.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentTextSource for PdfDocument {
    fn pages(&self) -> Result<Vec<Option<String>>, ParseError> {
        let doc = lopdf::Document::load(&self.path).map_err(|source| ParseError::Pdf {
            path: self.path.clone(),
            source,
        })?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        tracing::debug!("{} has {} pages", self.path.display(), page_numbers.len());

        let pages = page_numbers
            .into_iter()
            .map(|page| match doc.extract_text(&[page]) {
                Ok(text) if !text.trim().is_empty() => Some(text),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("No text extracted from page {}: {}", page, e);
                    None
                }
            })
            .collect();

        Ok(pages)
    }
}

/// UTF-8 text file with pages separated by form feeds.
#[derive(Debug, Clone)]
pub struct TextDocument {
    path: PathBuf,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentTextSource for TextDocument {
    fn pages(&self) -> Result<Vec<Option<String>>, ParseError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ParseError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(contents
            .split(PAGE_BREAK)
            .map(|page| {
                let page = page.trim_end_matches('\n');
                (!page.is_empty()).then(|| page.to_string())
            })
            .collect())
    }
}

/// Either kind of booklet, chosen from the file extension.
#[derive(Debug, Clone)]
pub enum QuizDocument {
    Pdf(PdfDocument),
    Text(TextDocument),
}

impl DocumentTextSource for QuizDocument {
    fn pages(&self) -> Result<Vec<Option<String>>, ParseError> {
        match self {
            Self::Pdf(doc) => doc.pages(),
            Self::Text(doc) => doc.pages(),
        }
    }
}

/// Open a booklet: `.pdf` files go through `lopdf`, anything else is read as text
pub fn open_document(path: &Path) -> QuizDocument {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        QuizDocument::Pdf(PdfDocument::new(path))
    } else {
        QuizDocument::Text(TextDocument::new(path))
    }
}

/// Concatenate all pages, one trailing newline per page, normalized to NFC.
///
/// PDF extractors sometimes emit decomposed Hangul jamo; NFC keeps the level
/// markers and answers comparable with what users type.
pub fn read_full_text<S: DocumentTextSource + ?Sized>(source: &S) -> Result<String, ParseError> {
    let mut text = String::new();
    for page in source.pages()? {
        if let Some(page_text) = page {
            text.push_str(&page_text);
        }
        text.push('\n');
    }
    Ok(text.nfc().collect())
}
