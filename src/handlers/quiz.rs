//! Quiz page and the htmx actions that drive a session.

use askama::Template;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::CookieJar;

use crate::error::LogOnError;
use crate::session::{SessionEffect, SessionEvent};
use crate::state::AppState;

use super::session_cookie;
use super::templates::{
  AnswerForm, IndexTemplate, LevelForm, LevelOption, QuizPanelTemplate, QuizPanelView,
  SpeakQuery, SpeakTarget,
};

/// GET / - full quiz page
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
  let (jar, session_id) = session_cookie(jar);
  let engine = &state.engine;

  let template = state.sessions.with_session(&session_id, |session| IndexTemplate {
    levels: LevelOption::all(engine, session.level()),
    panel: QuizPanelView::build(engine, session, &SessionEffect::None),
    speech_output: engine.speech().output_enabled,
    speech_input: engine.speech().input_enabled,
    speech_lang: engine.speech().lang.clone(),
  });

  (jar, Html(template.render().log_warn_default("Failed to render quiz page")))
}

/// Apply one event and answer with the re-rendered panel (htmx) or a redirect home
fn apply_and_render(
  state: &AppState,
  jar: CookieJar,
  headers: &HeaderMap,
  event: SessionEvent,
) -> Response {
  let (jar, session_id) = session_cookie(jar);
  let engine = &state.engine;

  let panel = state.sessions.with_session(&session_id, |session| {
    let effect = engine.apply(session, event, &mut rand::rng());
    QuizPanelView::build(engine, session, &effect)
  });

  if !is_htmx(headers) {
    return (jar, Redirect::to("/")).into_response();
  }

  let template = QuizPanelTemplate { panel };
  (jar, Html(template.render().log_warn_default("Failed to render quiz panel"))).into_response()
}

fn is_htmx(headers: &HeaderMap) -> bool {
  headers.get("HX-Request").is_some_and(|v| v == "true")
}

/// POST /level
pub async fn select_level(
  State(state): State<AppState>,
  jar: CookieJar,
  headers: HeaderMap,
  Form(form): Form<LevelForm>,
) -> Response {
  apply_and_render(&state, jar, &headers, SessionEvent::SelectLevel(form.level))
}

/// POST /draw
pub async fn draw_next(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap) -> Response {
  apply_and_render(&state, jar, &headers, SessionEvent::DrawNext)
}

/// POST /answer
pub async fn submit_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  headers: HeaderMap,
  Form(form): Form<AnswerForm>,
) -> Response {
  apply_and_render(&state, jar, &headers, SessionEvent::SubmitAnswer(form.answer))
}

/// POST /reveal
pub async fn reveal_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  headers: HeaderMap,
) -> Response {
  apply_and_render(&state, jar, &headers, SessionEvent::RevealAnswer)
}

/// GET /speak?target=question|result - utterance for the browser to speak
pub async fn speak(
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<SpeakQuery>,
) -> Response {
  let (jar, session_id) = session_cookie(jar);
  let event = match query.target {
    SpeakTarget::Question => SessionEvent::ReadAloud,
    SpeakTarget::Result => SessionEvent::ReadResult,
  };

  let effect = state
    .sessions
    .with_session(&session_id, |session| state.engine.apply(session, event, &mut rand::rng()));

  match effect {
    SessionEffect::Speak(request) => (jar, Json(request)).into_response(),
    SessionEffect::SpeechUnavailable => {
      (StatusCode::SERVICE_UNAVAILABLE, jar, "speech output is disabled").into_response()
    }
    _ => (StatusCode::NOT_FOUND, jar, "nothing to read").into_response(),
  }
}
