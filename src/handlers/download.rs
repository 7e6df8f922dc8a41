use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// GET /download - the quiz booklet as a PDF attachment
pub async fn download(State(state): State<AppState>) -> Response {
  let path = &state.config.document_path;
  match tokio::fs::read(path).await {
    Ok(bytes) => {
      tracing::debug!("Serving {} ({} bytes)", path.display(), bytes.len());
      (
        [
          (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
          (header::CONTENT_DISPOSITION, content_disposition(&state.config.download_name)),
        ],
        bytes,
      )
        .into_response()
    }
    Err(e) => {
      tracing::warn!("Failed to read {} for download: {}", path.display(), e);
      (StatusCode::NOT_FOUND, "문제집 파일을 찾을 수 없어요.").into_response()
    }
  }
}

/// `attachment` header with an ASCII fallback name and the UTF-8 name (RFC 5987)
fn content_disposition(file_name: &str) -> HeaderValue {
  let fallback: String = file_name
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
        c
      } else {
        '_'
      }
    })
    .collect();

  let value = format!(
    "attachment; filename=\"{}\"; filename*=UTF-8''{}",
    fallback,
    urlencoding::encode(file_name)
  );
  HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
