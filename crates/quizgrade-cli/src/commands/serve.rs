//! The `quizgrade serve` command.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;

use quizgrade_server::config::load_config_from;

pub async fn execute(
    config_path: Option<PathBuf>,
    host: Option<IpAddr>,
    port: Option<u16>,
    bank: Option<PathBuf>,
    quiz_size: Option<usize>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;

    // Flags take precedence over the config file and environment
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if bank.is_some() {
        config.bank = bank;
    }
    if let Some(quiz_size) = quiz_size {
        anyhow::ensure!(quiz_size >= 1, "quiz size must be at least 1");
        config.quiz_size = quiz_size;
    }

    tracing::debug!(?config, "resolved configuration");
    quizgrade_server::serve(config).await
}
