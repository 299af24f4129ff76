//! TOML-based daemon configuration.
//!
//! Stored at `~/.config/breakbot/config.toml`. The webhook URL can also be
//! supplied through the `BREAKBOT_WEBHOOK_URL` environment variable, which
//! takes precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `discord.webhook_url`.
pub const WEBHOOK_ENV: &str = "BREAKBOT_WEBHOOK_URL";

/// Discord delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiscordConfig {
    /// Webhook URL break announcements are posted to.
    #[serde(default)]
    pub webhook_url: String,
}

/// Chat command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Prefix a line must carry to be treated as a command.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "!".into()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Config {
    /// Default config file location: `~/.config/breakbot/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("breakbot")
            .join("config.toml")
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let cfg = toml::from_str(&content)?;
        Ok(cfg)
    }

    /// Load from the default location, returning defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load(&Self::default_path()).unwrap_or_default()
    }

    /// Effective webhook URL: environment override first, then the config
    /// file. `None` when neither is set.
    pub fn webhook_url(&self) -> Option<String> {
        if let Ok(url) = std::env::var(WEBHOOK_ENV) {
            if !url.is_empty() {
                return Some(url);
            }
        }
        if self.discord.webhook_url.is_empty() {
            None
        } else {
            Some(self.discord.webhook_url.clone())
        }
    }
}
