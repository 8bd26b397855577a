//! refrate server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the rating API over HTTP. Settings
//! can be overridden with `REFRATE_`-prefixed environment variables, e.g.
//! `REFRATE_PORT=8080`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use refrate_store_sqlite::SqliteStore;
use refrate_voice::{Extractor, Glossary};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
  /// LibreTranslate-compatible endpoint for description translation.
  /// Absent: descriptions fall back to the raw transcript.
  translate_url: Option<String>,
  /// Speech-to-text command template with `{audio}`, `{lang}`, `{out}`
  /// placeholders. Absent: audio-only draft requests answer 501.
  asr_cmd:       Option<String>,
}

#[derive(Parser)]
#[command(author, version, about = "refrate rating server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("REFRATE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // Voice pipeline. The glossary is embedded and built once.
  let glossary = Glossary::embedded().context("failed to build glossary")?;
  let translator = server_cfg
    .translate_url
    .as_deref()
    .map(refrate_voice::translate::Translator::new);
  let transcriber = server_cfg
    .asr_cmd
    .as_deref()
    .map(refrate_voice::transcribe::Transcriber::new);
  if translator.is_none() {
    tracing::info!("no translate_url configured; translation disabled");
  }
  if transcriber.is_none() {
    tracing::info!("no asr_cmd configured; audio transcription disabled");
  }
  let extractor = Arc::new(Extractor::new(glossary, translator, transcriber));

  let app = Router::new()
    .nest("/api/v1", refrate_api::api_router(store.clone()))
    .nest("/api/v1", refrate_api::admin_router(store, extractor))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
