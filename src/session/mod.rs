//! Quiz session state machine.
//!
//! [`QuizSession`] is a plain value owned by whoever hosts the user's
//! session. Every user action becomes a [`SessionEvent`] that
//! [`QuizEngine::apply`] folds into the session, returning a
//! [`SessionEffect`] for the UI layer (a message to show, an utterance to
//! speak).

pub mod cursor;
pub mod store;

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{Level, QuizItem};
use crate::quiz::{AnswerMatcher, QuizBank};
use crate::speech::{SpeechRequest, SpeechSettings};

pub use cursor::ShuffleCursor;
pub use store::{SessionStore, generate_session_id};

/// How the next question is picked within a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStrategy {
  /// Every question once per cycle, in shuffled order
  #[default]
  Shuffle,
  /// Uniform pick on every draw; immediate repeats possible
  Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
  Correct,
  Incorrect,
  /// Blank submission: the answer is shown without grading
  Empty,
}

impl Verdict {
  pub fn message(&self) -> &'static str {
    match self {
      Self::Correct => "정답이에요! 참 잘했어요!",
      Self::Incorrect => "아쉬워요, 다시 생각해 볼까요?",
      Self::Empty => "답을 적지 않았어요. 정답을 확인해 보세요.",
    }
  }
}

/// Outcome of the last submission, with the answer to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
  pub verdict: Verdict,
  pub canonical_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
  SelectLevel(Level),
  DrawNext,
  SubmitAnswer(String),
  RevealAnswer,
  ReadAloud,
  ReadResult,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
  None,
  /// The selected level has no questions
  NoQuestionsAtLevel,
  /// The event needs a drawn question
  NoCurrentQuestion,
  /// The event needs a graded answer
  NoResult,
  Speak(SpeechRequest),
  SpeechUnavailable,
}

/// Per-user quiz progress. Holds bank indices, never items.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
  level: Level,
  current: Option<usize>,
  input_answer: String,
  result: Option<AnswerResult>,
  revealed: bool,
  cursor: Option<ShuffleCursor>,
}

impl QuizSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn level(&self) -> Level {
    self.level
  }

  /// Bank index of the question on screen
  pub fn current_index(&self) -> Option<usize> {
    self.current
  }

  pub fn input_answer(&self) -> &str {
    &self.input_answer
  }

  pub fn result(&self) -> Option<&AnswerResult> {
    self.result.as_ref()
  }

  pub fn is_revealed(&self) -> bool {
    self.revealed
  }

  pub fn cursor(&self) -> Option<&ShuffleCursor> {
    self.cursor.as_ref()
  }

  /// Show a different question (or none) and drop everything tied to the old one
  fn set_current(&mut self, index: Option<usize>) {
    self.current = index;
    self.input_answer.clear();
    self.result = None;
    self.revealed = false;
  }
}

/// Applies session events against a shared, read-only bank.
#[derive(Debug, Clone)]
pub struct QuizEngine {
  bank: Arc<QuizBank>,
  matcher: AnswerMatcher,
  strategy: DrawStrategy,
  speech: SpeechSettings,
}

impl QuizEngine {
  pub fn new(
    bank: Arc<QuizBank>,
    matcher: AnswerMatcher,
    strategy: DrawStrategy,
    speech: SpeechSettings,
  ) -> Self {
    Self {
      bank,
      matcher,
      strategy,
      speech,
    }
  }

  pub fn bank(&self) -> &QuizBank {
    &self.bank
  }

  pub fn matcher(&self) -> &AnswerMatcher {
    &self.matcher
  }

  pub fn strategy(&self) -> DrawStrategy {
    self.strategy
  }

  pub fn speech(&self) -> &SpeechSettings {
    &self.speech
  }

  pub fn current_item(&self, session: &QuizSession) -> Option<&QuizItem> {
    session.current.and_then(|i| self.bank.get(i))
  }

  pub fn apply<R: Rng + ?Sized>(
    &self,
    session: &mut QuizSession,
    event: SessionEvent,
    rng: &mut R,
  ) -> SessionEffect {
    tracing::debug!("Session event: {:?}", event);
    match event {
      SessionEvent::SelectLevel(level) => self.select_level(session, level, rng),
      SessionEvent::DrawNext => self.draw_next(session, rng),
      SessionEvent::SubmitAnswer(text) => self.submit_answer(session, text),
      SessionEvent::RevealAnswer => self.reveal_answer(session),
      SessionEvent::ReadAloud => self.read_aloud(session),
      SessionEvent::ReadResult => self.read_result(session),
    }
  }

  fn select_level<R: Rng + ?Sized>(
    &self,
    session: &mut QuizSession,
    level: Level,
    rng: &mut R,
  ) -> SessionEffect {
    if session.level != level {
      session.level = level;
      session.set_current(None);
    }

    let count = self.bank.count_by_level(level);
    if self.strategy == DrawStrategy::Shuffle {
      self.ensure_cursor(session, count, rng);
    }

    if count == 0 {
      SessionEffect::NoQuestionsAtLevel
    } else {
      SessionEffect::None
    }
  }

  /// Keep the cursor if it still matches the level and its size, else start fresh
  fn ensure_cursor<R: Rng + ?Sized>(&self, session: &mut QuizSession, count: usize, rng: &mut R) {
    let fits = session
      .cursor
      .as_ref()
      .is_some_and(|c| c.fits(session.level, count));

    if !fits {
      tracing::debug!("New shuffle order for {} ({} items)", session.level, count);
      session.cursor = Some(ShuffleCursor::new(session.level, count, rng));
    }
  }

  fn draw_next<R: Rng + ?Sized>(&self, session: &mut QuizSession, rng: &mut R) -> SessionEffect {
    let indices = self.bank.indices_for(session.level);
    if indices.is_empty() {
      session.set_current(None);
      return SessionEffect::NoQuestionsAtLevel;
    }

    let offset = match self.strategy {
      DrawStrategy::Shuffle => {
        self.ensure_cursor(session, indices.len(), rng);
        session.cursor.as_mut().and_then(|c| c.advance(rng))
      }
      DrawStrategy::Random => Some(rng.random_range(0..indices.len())),
    };

    session.set_current(offset.and_then(|o| indices.get(o).copied()));
    SessionEffect::None
  }

  fn submit_answer(&self, session: &mut QuizSession, text: String) -> SessionEffect {
    let Some(item) = self.current_item(session) else {
      return SessionEffect::NoCurrentQuestion;
    };

    let verdict = if text.trim().is_empty() {
      Verdict::Empty
    } else if self.matcher.is_correct(&text, &item.answer) {
      Verdict::Correct
    } else {
      Verdict::Incorrect
    };

    session.result = Some(AnswerResult {
      verdict,
      canonical_answer: item.answer.clone(),
    });
    session.input_answer = text;
    SessionEffect::None
  }

  fn reveal_answer(&self, session: &mut QuizSession) -> SessionEffect {
    if self.current_item(session).is_none() {
      return SessionEffect::NoCurrentQuestion;
    }
    session.revealed = true;
    SessionEffect::None
  }

  fn read_aloud(&self, session: &QuizSession) -> SessionEffect {
    let Some(item) = self.current_item(session) else {
      return SessionEffect::NoCurrentQuestion;
    };
    if !self.speech.output_enabled {
      return SessionEffect::SpeechUnavailable;
    }
    SessionEffect::Speak(self.speech.request(&item.question))
  }

  fn read_result(&self, session: &QuizSession) -> SessionEffect {
    let Some(result) = session.result.as_ref() else {
      return SessionEffect::NoResult;
    };
    if !self.speech.output_enabled {
      return SessionEffect::SpeechUnavailable;
    }
    let text = format!("{} 정답은 {}", result.verdict.message(), result.canonical_answer);
    SessionEffect::Speak(self.speech.request(&text))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::quiz::parse;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use std::collections::HashSet;

  const BOOKLET: &str = "\
난이도 하
1. 달의 다른 이름은? 정답: 위성
2. 태양은 무엇일까요? 정답: 별
3. 지구는 몇 번째 행성? 정답: 3 또는 세 번째
4. 빨간 행성은? 정답: 화성 or Mars
난이도 중
5. 태양계 행성 개수는? 정답: 8 또는 여덟
난이도 상
6. 가장 큰 행성은? 정답: 목성";

  fn engine_with(strategy: DrawStrategy) -> QuizEngine {
    let bank = Arc::new(QuizBank::new(parse(BOOKLET)));
    QuizEngine::new(bank, AnswerMatcher::default(), strategy, SpeechSettings::default())
  }

  fn engine() -> QuizEngine {
    engine_with(DrawStrategy::Shuffle)
  }

  fn drawn_question(engine: &QuizEngine, session: &QuizSession) -> String {
    engine.current_item(session).unwrap().question.clone()
  }

  #[test]
  fn test_shuffle_cycle_visits_each_item_once() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);

    let mut seen = HashSet::new();
    for _ in 0..4 {
      assert_eq!(engine.apply(&mut session, SessionEvent::DrawNext, &mut rng), SessionEffect::None);
      seen.insert(session.current_index().unwrap());
    }
    assert_eq!(seen, HashSet::from([0, 1, 2, 3]));

    // Fifth draw opens a new cycle without stalling
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    assert!(session.current_index().is_some());
    assert_eq!(session.cursor().unwrap().position(), 1);
  }

  #[test]
  fn test_draw_only_returns_items_of_selected_level() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(3);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::High), &mut rng);

    for _ in 0..5 {
      engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
      assert_eq!(drawn_question(&engine, &session), "가장 큰 행성은?");
    }
  }

  #[test]
  fn test_draw_without_selecting_uses_default_level() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = QuizSession::new();

    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    let item = engine.current_item(&session).unwrap();
    assert_eq!(item.level, Level::Low);
  }

  #[test]
  fn test_empty_level_draw_leaves_no_question() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(1);
    let mut session = QuizSession::new();

    let effect = engine.apply(&mut session, SessionEvent::SelectLevel(Level::Highest), &mut rng);
    assert_eq!(effect, SessionEffect::NoQuestionsAtLevel);

    let effect = engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    assert_eq!(effect, SessionEffect::NoQuestionsAtLevel);
    assert!(session.current_index().is_none());
    assert_eq!(session.cursor().unwrap().position(), 0);
  }

  #[test]
  fn test_submit_correct_incorrect_and_empty() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(9);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Medium), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);

    engine.apply(&mut session, SessionEvent::SubmitAnswer("  여덟 ".into()), &mut rng);
    let result = session.result().unwrap();
    assert_eq!(result.verdict, Verdict::Correct);
    assert_eq!(result.canonical_answer, "8 또는 여덟");
    assert_eq!(session.input_answer(), "  여덟 ");

    engine.apply(&mut session, SessionEvent::SubmitAnswer("아홉".into()), &mut rng);
    assert_eq!(session.result().unwrap().verdict, Verdict::Incorrect);

    engine.apply(&mut session, SessionEvent::SubmitAnswer(" \t ".into()), &mut rng);
    let result = session.result().unwrap();
    assert_eq!(result.verdict, Verdict::Empty);
    assert_eq!(result.canonical_answer, "8 또는 여덟");
  }

  #[test]
  fn test_submit_without_question_is_rejected() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(9);
    let mut session = QuizSession::new();

    let effect = engine.apply(&mut session, SessionEvent::SubmitAnswer("위성".into()), &mut rng);
    assert_eq!(effect, SessionEffect::NoCurrentQuestion);
    assert!(session.result().is_none());
    assert_eq!(session.input_answer(), "");
  }

  #[test]
  fn test_new_draw_clears_answer_and_result() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(2);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    engine.apply(&mut session, SessionEvent::SubmitAnswer("틀린 답".into()), &mut rng);
    engine.apply(&mut session, SessionEvent::RevealAnswer, &mut rng);
    assert!(session.is_revealed());

    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    assert!(session.result().is_none());
    assert_eq!(session.input_answer(), "");
    assert!(!session.is_revealed());
  }

  #[test]
  fn test_level_switch_resets_question_and_cursor() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(8);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    engine.apply(&mut session, SessionEvent::SubmitAnswer("별".into()), &mut rng);

    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Medium), &mut rng);
    assert!(session.current_index().is_none());
    assert!(session.result().is_none());
    assert_eq!(session.input_answer(), "");

    let cursor = session.cursor().unwrap();
    assert_eq!(cursor.level(), Level::Medium);
    assert_eq!(cursor.len(), 1);
    assert_eq!(cursor.position(), 0);
  }

  #[test]
  fn test_reselecting_same_level_keeps_progress() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(8);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    let order = session.cursor().unwrap().order().to_vec();
    let current = session.current_index();

    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);
    assert_eq!(session.cursor().unwrap().order(), order.as_slice());
    assert_eq!(session.cursor().unwrap().position(), 1);
    assert_eq!(session.current_index(), current);
  }

  #[test]
  fn test_returning_to_a_level_starts_a_fresh_cycle() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(13);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::High), &mut rng);
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);

    let cursor = session.cursor().unwrap();
    assert_eq!(cursor.level(), Level::Low);
    assert_eq!(cursor.position(), 0);
  }

  #[test]
  fn test_random_strategy_stays_within_level() {
    let engine = engine_with(DrawStrategy::Random);
    let mut rng = StdRng::seed_from_u64(21);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::Low), &mut rng);
    assert!(session.cursor().is_none());

    for _ in 0..20 {
      engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
      let item = engine.current_item(&session).unwrap();
      assert_eq!(item.level, Level::Low);
    }
  }

  #[test]
  fn test_read_aloud_emits_question() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(4);
    let mut session = QuizSession::new();

    let effect = engine.apply(&mut session, SessionEvent::ReadAloud, &mut rng);
    assert_eq!(effect, SessionEffect::NoCurrentQuestion);

    engine.apply(&mut session, SessionEvent::SelectLevel(Level::High), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
    let before = session.current_index();

    match engine.apply(&mut session, SessionEvent::ReadAloud, &mut rng) {
      SessionEffect::Speak(request) => {
        assert_eq!(request.text, "가장 큰 행성은?");
        assert_eq!(request.lang, "ko-KR");
      }
      other => panic!("expected speech, got {:?}", other),
    }
    assert_eq!(session.current_index(), before);
  }

  #[test]
  fn test_read_result_needs_a_result() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(4);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::SelectLevel(Level::High), &mut rng);
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);

    let effect = engine.apply(&mut session, SessionEvent::ReadResult, &mut rng);
    assert_eq!(effect, SessionEffect::NoResult);

    engine.apply(&mut session, SessionEvent::SubmitAnswer("목성".into()), &mut rng);
    match engine.apply(&mut session, SessionEvent::ReadResult, &mut rng) {
      SessionEffect::Speak(request) => assert!(request.text.ends_with("정답은 목성")),
      other => panic!("expected speech, got {:?}", other),
    }
  }

  #[test]
  fn test_speech_disabled_reports_unavailable() {
    let bank = Arc::new(QuizBank::new(parse(BOOKLET)));
    let speech = SpeechSettings {
      output_enabled: false,
      ..SpeechSettings::default()
    };
    let engine = QuizEngine::new(bank, AnswerMatcher::default(), DrawStrategy::Shuffle, speech);
    let mut rng = StdRng::seed_from_u64(4);
    let mut session = QuizSession::new();
    engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);

    let effect = engine.apply(&mut session, SessionEvent::ReadAloud, &mut rng);
    assert_eq!(effect, SessionEffect::SpeechUnavailable);
  }

  #[test]
  fn test_or_alternatives_in_session() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(0);
    let mut session = QuizSession::new();

    // Draw until the Mars question comes up; at most one cycle
    for _ in 0..4 {
      engine.apply(&mut session, SessionEvent::DrawNext, &mut rng);
      if drawn_question(&engine, &session) == "빨간 행성은?" {
        break;
      }
    }
    assert_eq!(drawn_question(&engine, &session), "빨간 행성은?");

    engine.apply(&mut session, SessionEvent::SubmitAnswer("Mars".into()), &mut rng);
    assert_eq!(session.result().unwrap().verdict, Verdict::Correct);
    engine.apply(&mut session, SessionEvent::SubmitAnswer("mars".into()), &mut rng);
    assert_eq!(session.result().unwrap().verdict, Verdict::Incorrect);
  }
}
