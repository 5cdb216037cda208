use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot API token. Usually supplied through `TELEGRAM_BOT_TOKEN` instead.
    #[serde(default)]
    pub bot_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Public URL of `/webhook`; when set, the webhook is registered at startup.
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    #[serde(default = "default_short_name")]
    pub short_name: String,
    /// Base URL of the client-side game.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_welcome_text")]
    pub welcome_text: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_api_url(),
            webhook_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            short_name: default_short_name(),
            url: String::new(),
            welcome_text: default_welcome_text(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_short_name() -> String {
    "snake4d".to_string()
}

fn default_welcome_text() -> String {
    "Welcome to the Snake 4D Game Bot! \
     Use @snake4dbot followed by some text in any chat to start playing."
        .to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    /// Load the TOML file at `path` (defaults if it does not exist), then
    /// apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Some(url) = lookup("GAME_URL") {
            self.game.url = url;
        }
        if let Some(addr) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }
        self.telegram.bot_token = self.telegram.bot_token.trim().to_string();
        self.game.url = self.game.url.trim().to_string();
    }

    /// The bot token, if one is configured.
    pub fn bot_token(&self) -> Option<&str> {
        Some(self.telegram.bot_token.as_str()).filter(|t| !t.is_empty())
    }

    pub fn game_url(&self) -> Option<&str> {
        Some(self.game.url.as_str()).filter(|u| !u.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.request_timeout_secs)
    }

    /// Names of required settings that are still missing.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bot_token().is_none() {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        if self.game_url().is_none() {
            missing.push("GAME_URL");
        }
        missing
    }
}
