//! Daemon configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `~/.config/gamedepot/server.toml`
//! - Windows: `%APPDATA%/gamedepot/server.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use gamedepot_protocol::{DEFAULT_HTTP_PORT, DEFAULT_MANIFEST_NAME, DEFAULT_TCP_PORT};

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Repository root containing one directory per game.
    #[serde(default = "default_games_repo")]
    pub games_repo: PathBuf,

    /// Manifest filename looked up inside each game directory.
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// TCP port for the download protocol.
    #[serde(default = "default_tcp_port")]
    pub tcp_port: u16,

    /// Port for the HTTP route layer.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_games_repo() -> PathBuf {
    PathBuf::from("games")
}

fn default_manifest_name() -> String {
    DEFAULT_MANIFEST_NAME.into()
}

fn default_tcp_port() -> u16 {
    DEFAULT_TCP_PORT
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games_repo: default_games_repo(),
            manifest_name: default_manifest_name(),
            tcp_port: default_tcp_port(),
            http_port: default_http_port(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default file if none
    /// exists.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA")?;
        Ok(PathBuf::from(appdata).join("gamedepot").join("server.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("gamedepot")
            .join("server.toml"))
    }
}
