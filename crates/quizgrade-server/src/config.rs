//! Server configuration.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizgrade_core::bank::DEFAULT_QUIZ_SIZE;
use quizgrade_core::parser::parse_bank;
use quizgrade_core::QuestionBank;

/// Top-level quizgrade server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
    /// TOML bank file to serve. The built-in bank is used when absent.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Number of questions `GET /api/quiz` exposes.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    /// Allowed CORS origins. Empty mirrors the request origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    8787
}
fn default_quiz_size() -> usize {
    DEFAULT_QUIZ_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bank: None,
            quiz_size: default_quiz_size(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load the configured bank, or the built-in one.
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.bank {
            Some(path) => {
                let file = parse_bank(path)?;
                tracing::info!(
                    bank = %file.id,
                    questions = file.bank.len(),
                    path = %path.display(),
                    "loaded question bank"
                );
                Ok(file.bank)
            }
            None => {
                let bank = QuestionBank::builtin();
                tracing::info!(questions = bank.len(), "using built-in question bank");
                Ok(bank)
            }
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizgrade.toml` in the current directory
/// 2. `~/.config/quizgrade/config.toml`
///
/// Environment variable overrides: `QUIZGRADE_HOST`, `QUIZGRADE_PORT`, `QUIZGRADE_BANK`.
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizgrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ServerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    if let Some(bank) = &config.bank {
        config.bank = Some(PathBuf::from(resolve_env_vars(&bank.to_string_lossy())));
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut ServerConfig) -> Result<()> {
    if let Ok(host) = std::env::var("QUIZGRADE_HOST") {
        config.host = host
            .parse()
            .with_context(|| format!("invalid QUIZGRADE_HOST: {host}"))?;
    }
    if let Ok(port) = std::env::var("QUIZGRADE_PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("invalid QUIZGRADE_PORT: {port}"))?;
    }
    if let Ok(bank) = std::env::var("QUIZGRADE_BANK") {
        config.bank = Some(PathBuf::from(bank));
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizgrade"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_QUIZGRADE_SELF_REF", "${_QUIZGRADE_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_QUIZGRADE_SELF_REF}/b"),
            "a/${_QUIZGRADE_SELF_REF}/b"
        );
        std::env::remove_var("_QUIZGRADE_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZGRADE_TEST_VAR", "banks");
        assert_eq!(resolve_env_vars("${_QUIZGRADE_TEST_VAR}"), "banks");
        assert_eq!(
            resolve_env_vars("./${_QUIZGRADE_TEST_VAR}/web.toml"),
            "./banks/web.toml"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("open ${brace"), "open ${brace");
        std::env::remove_var("_QUIZGRADE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8787);
        assert_eq!(config.quiz_size, 12);
        assert!(config.bank.is_none());
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
port = 9000
allowed_origins = ["http://localhost:3000"]
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, default_host());
        assert_eq!(config.quiz_size, 12);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn load_explicit_missing_file() {
        let err = load_config_from(Some(Path::new("/no/such/quizgrade.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizgrade.toml");
        std::fs::write(&path, "quiz_size = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.quiz_size, 5);
    }

    #[test]
    fn builtin_bank_when_unset() {
        let bank = ServerConfig::default().load_bank().unwrap();
        assert_eq!(bank.len(), 12);
    }
}
