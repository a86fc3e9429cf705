//! Maitre HTTP Server
//!
//! Serves the synthesis demo page and the chat API.

use std::{sync::Arc, time::Duration};

use ai_speech::GoogleTtsProvider;
use application::{ChatService, ports::PersonaStorePort};
use domain::Persona;
use infrastructure::{AppConfig, JsonPersonaStore, OllamaInferenceAdapter, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("maitre_server=debug,tower_http=debug");

    info!("Maitre server v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.default_model,
        "Configuration loaded"
    );

    // Inference + chat
    let inference = OllamaInferenceAdapter::new(config.inference.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;
    let chat_service = ChatService::new(Arc::new(inference));

    // Persona frames every chat request; the default stands in when the
    // file is absent (the demo server must come up without one)
    let persona = match JsonPersonaStore::new(config.storage.persona_path.clone())
        .load()
        .await
    {
        Ok(persona) => persona,
        Err(e) => {
            warn!("Persona not loaded ({e}), using default");
            Persona::default()
        },
    };

    // Cloud TTS is optional: without a key the synthesis endpoint reports 502
    let tts = match config.speech.google_api_key.as_ref() {
        Some(_) => match GoogleTtsProvider::new(config.speech.clone()) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                warn!("Cloud TTS disabled: {e}");
                None
            },
        },
        None => {
            info!("No Google API key configured, synthesis endpoint disabled");
            None
        },
    };

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let addr = config.server.bind_addr();

    let state = AppState {
        chat_service: Arc::new(chat_service),
        persona: Arc::new(persona),
        tts,
        config: Arc::new(config.clone()),
    };

    let app = routes::create_router(state);

    // CORS: open for local demos, restricted when origins are configured
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("Waiting up to {:?} for connections to close", timeout);
}
