use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use dispatcher::{ClassifierGateway, Dispatcher, MovieQueryService};
use groq_client::GroqClassifier;
use server::{create_router, AppState, SessionStore};
use tmdb_client::TmdbClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let classifier: Arc<dyn ClassifierGateway> = Arc::new(
        GroqClassifier::from_env().context("Failed to configure the Groq classifier")?,
    );
    let movies: Arc<dyn MovieQueryService> =
        Arc::new(TmdbClient::from_env().context("Failed to configure the TMDb client")?);

    let state = AppState {
        dispatcher: Dispatcher::new(classifier, movies.clone()),
        movies,
        sessions: Arc::new(SessionStore::new()),
    };

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
        Err(_) => 8000,
    };
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("chat server listening on {addr}");

    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
