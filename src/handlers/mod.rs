pub mod download;
pub mod quiz;
pub mod templates;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::{SESSION_COOKIE_NAME, SESSION_EXPIRY_HOURS};
use crate::session::generate_session_id;

pub use download::download;
pub use quiz::{draw_next, index, reveal_answer, select_level, speak, submit_answer};

/// Session ID from the cookie, or a fresh one added to the jar
pub(crate) fn session_cookie(jar: CookieJar) -> (CookieJar, String) {
  if let Some(id) = jar
    .get(SESSION_COOKIE_NAME)
    .map(|c| c.value().to_string())
    .filter(|id| is_valid_session_id(id))
  {
    return (jar, id);
  }

  let session_id = generate_session_id();
  let cookie = Cookie::build((SESSION_COOKIE_NAME, session_id.clone()))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(time::Duration::hours(SESSION_EXPIRY_HOURS))
    .build();

  (jar.add(cookie), session_id)
}

/// Only IDs we could have issued are used as store keys
fn is_valid_session_id(id: &str) -> bool {
  id.len() == 32 && id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
