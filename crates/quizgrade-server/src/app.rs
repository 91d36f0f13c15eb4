//! Router assembly and server startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{Extension, Router};
use http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use quizgrade_core::QuestionBank;

use crate::config::ServerConfig;
use crate::routes;

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub quiz_size: usize,
}

impl AppState {
    pub fn new(bank: QuestionBank, quiz_size: usize) -> Self {
        Self {
            bank: Arc::new(bank),
            quiz_size,
        }
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .with_context(|| format!("invalid CORS origin: {origin}"))
                })
                .collect::<Result<Vec<_>>>()?,
        )
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)))
}

/// Build the application router.
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let app = Router::new()
        .route("/api/quiz", get(routes::quiz::get_quiz))
        .route("/api/grade", post(routes::grade::grade_answers))
        .route("/health", get(routes::health::health))
        .fallback(routes::not_found)
        // Router layers are called bottom to top
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Serve `app` on an already bound listener until ctrl-c.
pub async fn run(listener: TcpListener, app: Router) -> Result<()> {
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

/// Load the bank, bind the configured address, and serve.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let bank = config.load_bank()?;
    let state = AppState::new(bank, config.quiz_size);
    let app = create_app(state, &config.allowed_origins)?;

    let listener = TcpListener::bind((config.host, config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    run(listener, app).await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
