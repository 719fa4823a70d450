// Parley API - Local Server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parley_common::{db, Config};
use parley_llm::LlmConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(&config);

    info!("Starting Parley API server");

    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            anyhow::anyhow!("Database connection failed: {}", e)
        })?;

    info!("Database connection established");

    if config.seed_database {
        let repos = parley_conversations::ConversationsRepositories::new(pool.clone());
        parley_conversations::seed_if_empty(&repos).await?;
    }

    let llm_config = LlmConfig::from_env();
    match &llm_config {
        Some(llm) => info!(provider = %llm.provider, model = %llm.model, "LLM configured"),
        None => info!("LLM not configured, set NRP_API_KEY to enable replies"),
    }

    let app = parley_app::create_app(pool, llm_config)
        .await
        .map_err(|e| {
            error!("Failed to create application: {}", e);
            e
        })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.rust_log));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
