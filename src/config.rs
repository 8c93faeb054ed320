use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    /// Usually supplied through TELEGRAM_BOT_TOKEN instead
    #[serde(default)]
    pub bot_token: String,
    /// Empty means every user may talk to the bot
    #[serde(default)]
    pub allowed_user_ids: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_program")]
    pub program: String,
    /// Arguments placed before the stream URL
    #[serde(default = "default_probe_args")]
    pub args: Vec<String>,
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    #[serde(default = "default_health_host")]
    pub host: String,
    #[serde(default = "default_health_port")]
    pub port: u16,
}

fn default_probe_program() -> String {
    "ffprobe".to_string()
}

fn default_probe_args() -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_streams".to_string(),
    ]
}

fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_health_host() -> String {
    "0.0.0.0".to_string()
}

fn default_health_port() -> u16 {
    10000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: default_probe_program(),
            args: default_probe_args(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            host: default_health_host(),
            port: default_health_port(),
        }
    }
}

impl HealthConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid health address {}:{}", self.host, self.port))
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults so the bot
    /// can run from environment variables alone.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML configuration")
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`: TELEGRAM_BOT_TOKEN (or TELOXIDE_TOKEN)
    /// and PORT.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|t| !t.is_empty())
            .or_else(|| lookup("TELOXIDE_TOKEN").filter(|t| !t.is_empty()));
        if let Some(token) = token {
            self.telegram.bot_token = token;
        }

        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            self.health.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!(
                "Telegram bot token is not set (config [telegram] bot_token or TELEGRAM_BOT_TOKEN)"
            );
        }
        if self.probe.timeout_secs == 0 {
            anyhow::bail!("[probe] timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
