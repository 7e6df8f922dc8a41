//! Template and form structs for quiz handlers.

use askama::Template;
use serde::Deserialize;

use crate::domain::Level;
use crate::filters;
use crate::session::{QuizEngine, QuizSession, SessionEffect, Verdict};

/// One radio button in the level picker
pub struct LevelOption {
  pub id: &'static str,
  pub label: &'static str,
  pub caption: &'static str,
  pub count: usize,
  pub is_selected: bool,
}

impl LevelOption {
  pub fn all(engine: &QuizEngine, selected: Level) -> Vec<Self> {
    Level::ALL
      .into_iter()
      .map(|level| LevelOption {
        id: level.as_str(),
        label: level.label(),
        caption: level.caption(),
        count: engine.bank().count_by_level(level),
        is_selected: level == selected,
      })
      .collect()
  }
}

/// Everything the quiz panel shows, flattened for the template
#[derive(Default)]
pub struct QuizPanelView {
  pub level_label: String,
  pub has_questions: bool,
  pub has_question: bool,
  pub question: String,
  pub input_answer: String,
  pub has_result: bool,
  pub result_class: String,
  pub result_message: String,
  pub canonical_answer: String,
  pub alternatives: Vec<String>,
  pub revealed: bool,
  pub notice: String,
  pub speech_output: bool,
  pub speech_input: bool,
}

impl QuizPanelView {
  pub fn build(engine: &QuizEngine, session: &QuizSession, effect: &SessionEffect) -> Self {
    let level = session.level();
    let speech = engine.speech();
    let mut view = QuizPanelView {
      level_label: level.label().to_string(),
      has_questions: engine.bank().count_by_level(level) > 0,
      input_answer: session.input_answer().to_string(),
      revealed: session.is_revealed(),
      notice: notice_for(effect).to_string(),
      speech_output: speech.output_enabled,
      speech_input: speech.input_enabled,
      ..Default::default()
    };

    if let Some(item) = engine.current_item(session) {
      view.has_question = true;
      view.question = item.question.clone();
      view.canonical_answer = item.answer.clone();
      view.alternatives = engine
        .matcher()
        .alternatives(&item.answer)
        .into_iter()
        .map(String::from)
        .collect();
    }

    if let Some(result) = session.result() {
      view.has_result = true;
      view.result_class = match result.verdict {
        Verdict::Correct => "correct",
        Verdict::Incorrect => "incorrect",
        Verdict::Empty => "empty",
      }
      .to_string();
      view.result_message = result.verdict.message().to_string();
      view.canonical_answer = result.canonical_answer.clone();
    }

    view
  }

  pub fn show_alternatives(&self) -> bool {
    self.alternatives.len() > 1
  }
}

fn notice_for(effect: &SessionEffect) -> &'static str {
  match effect {
    SessionEffect::NoCurrentQuestion => "먼저 '새로운 문제 나와라!' 버튼을 눌러 문제를 받아 보세요.",
    SessionEffect::NoResult => "먼저 답을 적고 '정답 확인!' 버튼을 눌러 보세요.",
    SessionEffect::SpeechUnavailable => "지금은 소리 기능을 쓸 수 없어요.",
    SessionEffect::None | SessionEffect::NoQuestionsAtLevel | SessionEffect::Speak(_) => "",
  }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub levels: Vec<LevelOption>,
  pub panel: QuizPanelView,
  pub speech_output: bool,
  pub speech_input: bool,
  pub speech_lang: String,
}

/// Quiz panel alone, swapped in by htmx after each action
#[derive(Template)]
#[template(path = "quiz_panel.html")]
pub struct QuizPanelTemplate {
  pub panel: QuizPanelView,
}

#[derive(Deserialize)]
pub struct LevelForm {
  pub level: Level,
}

#[derive(Deserialize)]
pub struct AnswerForm {
  #[serde(default)]
  pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakTarget {
  Question,
  Result,
}

#[derive(Deserialize)]
pub struct SpeakQuery {
  pub target: SpeakTarget,
}
