use serde::{Deserialize, Serialize};

/// Difficulty tier of a quiz question, in booklet order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  #[default]
  Low,
  Medium,
  High,
  Highest,
}

impl Level {
  pub const ALL: [Level; 4] = [Level::Low, Level::Medium, Level::High, Level::Highest];

  /// Header token that opens a section of this level in the booklet
  pub fn marker(&self) -> &'static str {
    match self {
      Self::Low => "난이도 하",
      Self::Medium => "난이도 중",
      Self::High => "난이도 상",
      Self::Highest => "난이도 최상",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Low => "하",
      Self::Medium => "중",
      Self::High => "상",
      Self::Highest => "최상",
    }
  }

  pub fn caption(&self) -> &'static str {
    match self {
      Self::Low => "쉬움",
      Self::Medium => "보통",
      Self::High => "조금 어려움",
      Self::Highest => "진짜 어려움",
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
      Self::Highest => "highest",
    }
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Level {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "low" | "하" => Ok(Self::Low),
      "medium" | "중" => Ok(Self::Medium),
      "high" | "상" => Ok(Self::High),
      "highest" | "최상" => Ok(Self::Highest),
      _ => Err(format!("Invalid level: {}", s)),
    }
  }
}

/// One question/answer pair extracted from the booklet.
///
/// `answer` is the raw canonical text and may hold several accepted
/// alternatives joined by `또는` / `or`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
  pub level: Level,
  pub question: String,
  pub answer: String,
}

impl QuizItem {
  pub fn new(level: Level, question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      level,
      question: question.into(),
      answer: answer.into(),
    }
  }
}
