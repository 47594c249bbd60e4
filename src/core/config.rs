//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.todolists/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed_examples: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    pub api_url: Option<String>,
    pub autosave_delay_ms: Option<u64>,
    pub error_display_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;
pub const DEFAULT_ERROR_DISPLAY_MS: u64 = 5000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub host: String,
    pub port: u16,
    pub seed_examples: bool,
    pub api_url: String,
    pub autosave_delay: Duration,
    pub error_display: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_examples: true,
            api_url: DEFAULT_API_URL.to_string(),
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
            error_display: Duration::from_millis(DEFAULT_ERROR_DISPLAY_MS),
        }
    }
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub no_seed: bool,
    pub api_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.todolists/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".todolists").join("config.toml"))
}

/// Load config from `~/.todolists/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TodoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TodoConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TodoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TodoConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TodoConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TodoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# todolists configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# host = "127.0.0.1"                    # Or set TODOLISTS_HOST
# port = 3001                           # Or set TODOLISTS_PORT
# seed_examples = true                  # Start with two example lists

# [client]
# api_url = "http://localhost:3001/api" # Or set TODOLISTS_API_URL
# autosave_delay_ms = 1000              # Quiet period before an edit is saved
# error_display_ms = 5000               # How long error banners stay up
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TodoConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &TodoConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let host = cli
        .host
        .clone()
        .or_else(|| env("TODOLISTS_HOST"))
        .or_else(|| config.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let env_port = env("TODOLISTS_PORT").and_then(|p| match p.parse::<u16>() {
        Ok(port) => Some(port),
        Err(e) => {
            warn!("Ignoring invalid TODOLISTS_PORT {:?}: {}", p, e);
            None
        }
    });
    let port = cli
        .port
        .or(env_port)
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    // --no-seed can only switch seeding off
    let seed_examples = !cli.no_seed && config.server.seed_examples.unwrap_or(true);

    let api_url = cli
        .api_url
        .clone()
        .or_else(|| env("TODOLISTS_API_URL"))
        .or_else(|| config.client.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    ResolvedConfig {
        host,
        port,
        seed_examples,
        api_url,
        autosave_delay: Duration::from_millis(
            config
                .client
                .autosave_delay_ms
                .unwrap_or(DEFAULT_AUTOSAVE_DELAY_MS),
        ),
        error_display: Duration::from_millis(
            config
                .client
                .error_display_ms
                .unwrap_or(DEFAULT_ERROR_DISPLAY_MS),
        ),
    }
}
