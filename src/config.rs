use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for any pacing delay
const MAX_DELAY_MS: u64 = 10_000;

/// Main configuration structure loaded from prompt_builder.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub pacing: PacingConfig,
    pub clipboard: ClipboardConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Artificial delays used for perceived pacing of the conversation
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay before the next question is appended
    pub reply_delay_ms: u64,
    /// Delay before the closing message is appended
    pub summary_delay_ms: u64,
    /// How long the "copied" acknowledgement stays visible
    pub copied_indicator_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 250,
            summary_delay_ms: 350,
            copied_indicator_ms: 2500,
        }
    }
}

impl PacingConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }

    pub fn copied_indicator(&self) -> Duration {
        Duration::from_millis(self.copied_indicator_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Command line the prompt is piped into, e.g. "xclip -selection clipboard".
    /// Auto-detected when unset.
    pub command: Option<String>,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub no_log: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "prompt_builder=info".to_string(),
            log_file: None,
            no_log: false,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "prompt_builder=info".to_string()),
            log_file: std::env::var("PB_LOG_FILE").ok().map(PathBuf::from),
            no_log: std::env::var("PB_NO_LOG")
                .ok()
                .is_some_and(|v| v == "true" || v == "1"),
        }
    }

    /// Resolved log file: PB_LOG_FILE or <cache_dir>/prompt-builder/prompt-builder.log
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|d| d.join("prompt-builder").join("prompt-builder.log"))
        })
    }
}

/// Load `.env` (or the file named by PB_ENV_FILE) into the process environment
pub fn load_env() {
    if let Ok(env_path) = std::env::var("PB_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::dotenv();
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PROMPT_BUILDER_CONFIG environment variable or defaults to "prompt_builder.toml"
    pub fn load() -> anyhow::Result<Self> {
        load_env();
        Self::load_with(RuntimeConfig::load_from_env())
    }

    /// TOML, then PB_* overrides, then validation. Install the subscriber
    /// from `runtime` before calling this or its warnings are lost.
    pub fn load_with(runtime: RuntimeConfig) -> anyhow::Result<Self> {
        let config_path = std::env::var("PROMPT_BUILDER_CONFIG")
            .unwrap_or_else(|_| "prompt_builder.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = runtime;
        config.validate()?;

        Ok(config)
    }

    /// Parse the TOML layer only
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply PB_* environment overrides (env-first)
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = env_millis("PB_REPLY_DELAY_MS") {
            self.pacing.reply_delay_ms = ms;
        }
        if let Some(ms) = env_millis("PB_SUMMARY_DELAY_MS") {
            self.pacing.summary_delay_ms = ms;
        }
        if let Some(ms) = env_millis("PB_COPIED_INDICATOR_MS") {
            self.pacing.copied_indicator_ms = ms;
        }
        if let Ok(cmd) = std::env::var("PB_CLIPBOARD_CMD") {
            tracing::debug!("PB_CLIPBOARD_CMD env override applied");
            self.clipboard.command = Some(cmd);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, ms) in [
            ("reply_delay_ms", self.pacing.reply_delay_ms),
            ("summary_delay_ms", self.pacing.summary_delay_ms),
            ("copied_indicator_ms", self.pacing.copied_indicator_ms),
        ] {
            if ms > MAX_DELAY_MS {
                anyhow::bail!("pacing.{name} must be at most {MAX_DELAY_MS}ms, got {ms}");
            }
        }
        if let Some(cmd) = &self.clipboard.command
            && cmd.trim().is_empty()
        {
            anyhow::bail!("clipboard.command cannot be empty");
        }
        Ok(())
    }
}

fn env_millis(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    match value.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!("Ignoring {}={}: not a number of milliseconds", name, value);
            None
        }
    }
}
