// src/config/feedback.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::warn;

pub const DEFAULT_FEEDBACK_CONFIG_PATH: &str = "config/feedback.json";
pub const ENV_FEEDBACK_CONFIG_PATH: &str = "FEEDBACK_CONFIG_PATH";

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pub enabled: bool,
    /// "gemini" | "openai" (case-insensitive)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Empty means the provider's default model.
    #[serde(default)]
    pub model: String,
    /// "ENV" means: read from GEMINI_API_KEY / OPENAI_API_KEY (by provider)
    #[serde(default)]
    pub api_key: String,
    /// Request timeout; clamped to 1..=120.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FeedbackConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: FeedbackConfig = serde_json::from_str(&data)?;
        cfg.normalized()
    }

    /// Load from `FEEDBACK_CONFIG_PATH` (or the default path). A missing or
    /// broken file yields the disabled default.
    pub fn from_env() -> Self {
        let path = env::var(ENV_FEEDBACK_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_FEEDBACK_CONFIG_PATH.to_string());
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(target: "feedback", %path, error = %e, "feedback disabled: config not usable");
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> anyhow::Result<Self> {
        // Normalize provider
        self.provider = self.provider.trim().to_lowercase();
        if !matches!(self.provider.as_str(), "gemini" | "openai") {
            anyhow::bail!("Unsupported provider in config: {}", self.provider);
        }

        // Resolve api key if "ENV" (only needed when enabled)
        if self.enabled && self.api_key.trim().eq_ignore_ascii_case("env") {
            self.api_key = match self.provider.as_str() {
                "gemini" => env::var("GEMINI_API_KEY")
                    .map_err(|_| anyhow::anyhow!("Missing GEMINI_API_KEY env var"))?,
                _ => env::var("OPENAI_API_KEY")
                    .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?,
            };
        }

        self.timeout_secs = self.timeout_secs.clamp(1, 120);
        Ok(self)
    }
}
