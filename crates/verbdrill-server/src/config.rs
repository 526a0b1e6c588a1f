//! Server configuration and loading.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use verbdrill_core::selector::DEFAULT_ROUND_LENGTH;

/// Top-level verbdrill server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory of extra `.toml` presets loaded at startup.
    #[serde(default)]
    pub preset_dir: Option<PathBuf>,
    /// Maximum exercises per round.
    #[serde(default = "default_max_round_len")]
    pub max_round_len: usize,
    /// Accounts that exist at startup.
    #[serde(default = "default_users")]
    pub users: Vec<String>,
    /// Whether `POST /api/auth/test-login` is available.
    #[serde(default = "default_true")]
    pub test_login: bool,
    /// Origins allowed to call the API from a browser.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_max_round_len() -> usize {
    DEFAULT_ROUND_LENGTH
}
fn default_users() -> Vec<String> {
    vec![TEST_USER.to_string()]
}
fn default_true() -> bool {
    true
}
fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

/// The account `test-login` signs in as.
pub const TEST_USER: &str = "test@example.com";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            preset_dir: None,
            max_round_len: default_max_round_len(),
            users: default_users(),
            test_login: true,
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind` into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        search_from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `verbdrill.toml` in the current directory
/// 2. `~/.config/verbdrill/config.toml`
///
/// Environment variable overrides: `VERBDRILL_BIND`, `VERBDRILL_PRESET_DIR`.
pub fn load_config() -> Result<ServerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    load_config_with(path, Path::new("."), |key| std::env::var(key).ok())
}

/// Config loading against a given working directory and environment lookup.
fn load_config_with(
    path: Option<&Path>,
    cwd: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = cwd.join("verbdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = env("HOME") {
            let global = dirs_path(&home).join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ServerConfig::default(),
    };

    if let Some(bind) = env("VERBDRILL_BIND") {
        config.bind = bind;
    }
    if let Some(dir) = env("VERBDRILL_PRESET_DIR") {
        config.preset_dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}

/// Parse a TOML string and expand `${VAR}` references in string fields.
pub fn parse_config_str(content: &str) -> Result<ServerConfig> {
    let mut config: ServerConfig = toml::from_str(content)?;
    config.bind = resolve_env_vars(&config.bind);
    config.preset_dir = config
        .preset_dir
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    config.users = config.users.iter().map(|u| resolve_env_vars(u)).collect();
    config.cors_origins = config
        .cors_origins
        .iter()
        .map(|o| resolve_env_vars(o))
        .collect();
    anyhow::ensure!(config.max_round_len >= 1, "max_round_len must be at least 1");
    Ok(config)
}

fn dirs_path(home: &str) -> PathBuf {
    PathBuf::from(home).join(".config").join("verbdrill")
}
