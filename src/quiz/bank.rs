//! The loaded question bank and its load-once cache.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::document::{DocumentTextSource, read_full_text};
use crate::domain::{Level, QuizItem};
use crate::error::ParseError;

use super::parser;

/// All quiz items in document order. Never changes after construction.
#[derive(Debug, Clone, Default)]
pub struct QuizBank {
    items: Vec<QuizItem>,
}

impl QuizBank {
    pub fn new(items: Vec<QuizItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizItem> {
        self.items.get(index)
    }

    /// Items of one level, in document order (empty if none)
    pub fn by_level(&self, level: Level) -> Vec<&QuizItem> {
        self.items.iter().filter(|item| item.level == level).collect()
    }

    /// Bank indices of one level's items, in document order
    pub fn indices_for(&self, level: Level) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.level == level)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn count_by_level(&self, level: Level) -> usize {
        self.items.iter().filter(|item| item.level == level).count()
    }
}

/// Parses the booklet on first use and hands out the same bank afterwards.
///
/// Concurrent first calls run the parse once; the others wait for it. A
/// failed load is not remembered, so a later call tries again.
pub struct QuizBankCache<S> {
    source: S,
    bank: OnceCell<Arc<QuizBank>>,
}

impl<S: DocumentTextSource> QuizBankCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            bank: OnceCell::new(),
        }
    }

    pub fn load(&self) -> Result<Arc<QuizBank>, ParseError> {
        self.bank
            .get_or_try_init(|| {
                let text = read_full_text(&self.source)?;
                let bank = QuizBank::new(parser::parse(&text));

                tracing::info!("Loaded {} quiz items", bank.len());
                for level in Level::ALL {
                    tracing::info!("  {}: {} items", level.marker(), bank.count_by_level(level));
                }

                Ok(Arc::new(bank))
            })
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.bank.get().is_some()
    }
}
