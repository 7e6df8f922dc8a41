//! Typed speech messages for the browser's text-to-speech and speech input.
//!
//! The server never builds script source around quiz text. It hands the
//! browser a JSON [`SpeechRequest`] and the page script feeds that to
//! `speechSynthesis`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "ko-KR";
pub const DEFAULT_RATE: f32 = 1.0;

/// One utterance for the browser to speak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
  pub text: String,
  pub lang: String,
  pub rate: f32,
}

impl SpeechRequest {
  /// JSON form, safe to place in an HTML attribute once escaped by the template
  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
  pub output_enabled: bool,
  pub input_enabled: bool,
  pub lang: String,
  pub rate: f32,
}

impl Default for SpeechSettings {
  fn default() -> Self {
    Self {
      output_enabled: true,
      input_enabled: true,
      lang: DEFAULT_LANG.to_string(),
      rate: DEFAULT_RATE,
    }
  }
}

impl SpeechSettings {
  pub fn request(&self, text: &str) -> SpeechRequest {
    SpeechRequest {
      text: sanitize(text),
      lang: self.lang.clone(),
      rate: self.rate,
    }
  }
}

/// Drop control characters and collapse whitespace runs
fn sanitize(text: &str) -> String {
  text
    .chars()
    .map(|c| if c.is_whitespace() { ' ' } else { c })
    .filter(|c| !c.is_control())
    .collect::<String>()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}
