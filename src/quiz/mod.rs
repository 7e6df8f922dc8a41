//! Quiz content: booklet parsing, the loaded bank, and answer matching.

pub mod bank;
pub mod matcher;
pub mod parser;

pub use bank::{QuizBank, QuizBankCache};
pub use matcher::AnswerMatcher;
pub use parser::parse;
