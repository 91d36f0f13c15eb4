//! quizgrade-server: HTTP serving layer.
//!
//! Exposes the question bank and the grader over a small JSON API:
//! `GET /api/quiz`, `POST /api/grade`, and `GET /health`.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod submission;

pub use app::{create_app, run, serve, AppState};
pub use config::{load_config, load_config_from, ServerConfig};
pub use error::ApiError;
