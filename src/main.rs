use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use golden_bell::config::AppConfig;
use golden_bell::document::open_document;
use golden_bell::quiz::QuizBankCache;
use golden_bell::routes;
use golden_bell::state::AppState;

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "golden_bell=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = match AppConfig::load() {
    Ok(config) => config,
    Err(e) => {
      tracing::error!("Invalid configuration: {}", e);
      std::process::exit(1);
    }
  };

  // Without the booklet there is nothing to serve
  let cache = QuizBankCache::new(open_document(&config.document_path));
  let bank = match cache.load() {
    Ok(bank) => bank,
    Err(e) => {
      tracing::error!("Could not load quiz document: {}", e);
      std::process::exit(1);
    }
  };
  if bank.is_empty() {
    tracing::warn!("No questions found in {}", config.document_path.display());
  }

  let bind_addr = config.bind_addr();
  let app = routes::router(AppState::new(bank, config));

  let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
    Ok(listener) => listener,
    Err(e) => {
      tracing::error!("Failed to bind to {}: {}", bind_addr, e);
      std::process::exit(1);
    }
  };

  tracing::info!("Server running on http://{}", bind_addr);

  if let Err(e) = axum::serve(listener, app).await {
    tracing::error!("Server error: {}", e);
    std::process::exit(1);
  }
}
