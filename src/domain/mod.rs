pub mod quiz;

pub use quiz::{Level, QuizItem};
