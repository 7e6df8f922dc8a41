//! Application configuration.
//!
//! Values come from `config.toml` first, then environment variables (a
//! `.env` file is loaded if present), then the defaults below.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::quiz::AnswerMatcher;
use crate::session::DrawStrategy;
use crate::speech::SpeechSettings;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

// ==================== Document Configuration ====================

/// Quiz booklet read at startup
pub const DEFAULT_DOCUMENT_PATH: &str = "도전골든벨_어린이천문대_2025.pdf";

/// File name offered to the browser on download
pub const DEFAULT_DOWNLOAD_NAME: &str = "도전골든벨_어린이천문대_2025.pdf";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== Session Configuration ====================

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Cookie carrying the quiz session ID
pub const SESSION_COOKIE_NAME: &str = "quiz_session";

// ==================== File structure ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: ServerSection,
    document: DocumentSection,
    quiz: QuizSection,
    speech: SpeechSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocumentSection {
    path: Option<String>,
    download_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct QuizSection {
    draw_strategy: DrawStrategy,
    multi_answer: bool,
}

impl Default for QuizSection {
    fn default() -> Self {
        Self {
            draw_strategy: DrawStrategy::default(),
            multi_answer: true,
        }
    }
}

// ==================== Resolved configuration ====================

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub server_port: u16,
    pub document_path: PathBuf,
    pub download_name: String,
    pub draw_strategy: DrawStrategy,
    pub multi_answer: bool,
    pub speech: SpeechSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_addr: SERVER_ADDR.to_string(),
            server_port: SERVER_PORT,
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            draw_strategy: DrawStrategy::default(),
            multi_answer: true,
            speech: SpeechSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load with priority: config.toml > environment (.env) > default
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let path = Path::new(CONFIG_FILE);
        let contents = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            String::new()
        };

        let env = |key: &str| std::env::var(key).ok();
        Self::from_sources(&contents, env)
    }

    /// Resolve config from TOML text and an environment lookup
    pub fn from_sources(
        toml_text: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(toml_text)?;
        let defaults = Self::default();

        let document_path = match (file.document.path, env("QUIZ_DOCUMENT")) {
            (Some(path), _) => {
                tracing::info!("Using quiz document from {}: {}", CONFIG_FILE, path);
                PathBuf::from(path)
            }
            (None, Some(path)) => {
                tracing::info!("Using quiz document from QUIZ_DOCUMENT env: {}", path);
                PathBuf::from(path)
            }
            (None, None) => {
                tracing::info!("Using default quiz document: {}", DEFAULT_DOCUMENT_PATH);
                defaults.document_path
            }
        };

        let server_port = match (file.server.port, env("PORT")) {
            (Some(port), _) => port,
            (None, Some(port)) => port.trim().parse().map_err(|_| ConfigError::Value {
                key: "PORT",
                message: format!("not a port number: {}", port),
            })?,
            (None, None) => defaults.server_port,
        };

        let speech = file.speech;
        if !(0.1..=10.0).contains(&speech.rate) {
            return Err(ConfigError::Value {
                key: "speech.rate",
                message: format!("{} is outside 0.1..=10.0", speech.rate),
            });
        }

        Ok(Self {
            server_addr: file.server.addr.unwrap_or(defaults.server_addr),
            server_port,
            document_path,
            download_name: file.document.download_name.unwrap_or(defaults.download_name),
            draw_strategy: file.quiz.draw_strategy,
            multi_answer: file.quiz.multi_answer,
            speech,
        })
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }

    pub fn matcher(&self) -> AnswerMatcher {
        AnswerMatcher::new(self.multi_answer)
    }
}
