use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_assistant::config::Config;
use cv_assistant::credentials::FileCredentialStore;
use cv_assistant::llm_client::{GeminiClient, ReqwestTransport};
use cv_assistant::routes::build_router;
use cv_assistant::state::AppState;
use cv_assistant::CvAssistant;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Assistant v{}", env!("CARGO_PKG_VERSION"));

    // Credential store
    let store = Arc::new(FileCredentialStore::new(&config.credential_store_path));
    info!(
        "Credential store at {}",
        config.credential_store_path.display()
    );

    // Gemini client
    let client = GeminiClient::new(Arc::new(ReqwestTransport::new()), &config.gemini_settings());
    info!("Gemini client initialized (endpoint: {})", client.endpoint());

    // The single assistant instance shared by every request
    let assistant = Arc::new(CvAssistant::new(
        client,
        store,
        config.gemini_api_key.as_deref(),
    ));
    if !assistant.has_credential() {
        info!("No API key yet; set one via PUT /api/v1/credential");
    }

    let state = AppState { assistant };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
