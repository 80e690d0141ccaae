use dotenv::dotenv;
use std::error::Error as StdError;
use std::sync::Arc;
use todd::api::{self, AppState};
use todd::client::InferenceClient;
use todd::config::Config;
use todd::router::ReplyRouter;
use todd::service::ChatService;
use todd::session::SessionStore;
use todd::transcript::TranscriptLog;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todd=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    if config.hf_token.is_empty() {
        warn!("HF_TOKEN is not set; the remote model will likely refuse every request");
    }

    let client = InferenceClient::new(&config.hf_api_url, &config.hf_token, config.remote_timeout)?;
    let mut service = ChatService::new(
        Arc::new(client),
        ReplyRouter::new(config.pledge_url.clone()),
        SessionStore::new(config.session_mode, config.session_ttl),
    )
    .with_history_window(config.history_window);

    if let Some(path) = &config.transcript_log {
        service = service.with_transcript(Arc::new(TranscriptLog::new(path)?));
        info!(path = %path.display(), "transcript logging enabled");
    }

    let state = AppState {
        service: Arc::new(service),
    };
    let app = api::router(state, Some(&config.static_dir));

    let addr = format!("{}:{}", config.bind_addr, config.port);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        model = %config.hf_api_url,
        sessions = ?config.session_mode,
        static_dir = %config.static_dir.display(),
        "Todd is awake, reluctantly"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Todd is going back underground");
}
