use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::DataDir;

/// Environment variables that override the EmailJS credentials.
pub const ENV_SERVICE_ID: &str = "EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "EMAILJS_PUBLIC_KEY";

/// Top-level configuration.
///
/// Loaded from `~/.desert-shield/config.toml` by default. Every section is
/// optional; missing sections and fields fall back to the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl ShieldConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShieldConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Overlay EmailJS credentials from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay EmailJS credentials using `lookup` to resolve variable names.
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// clobber a configured credential.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let n = &mut self.notifications;
        for (key, slot) in [
            (ENV_SERVICE_ID, &mut n.service_id),
            (ENV_TEMPLATE_ID, &mut n.template_id),
            (ENV_PUBLIC_KEY, &mut n.public_key),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the local submission log.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.desert-shield/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl GeneralConfig {
    /// The data directory with a leading `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(DataDir::new(self.data_dir.clone()).0)
    }
}

/// Photo intake limits shared by the chat widget and the quote form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum number of pending images per session.
    pub max_images: usize,
    /// Maximum size of a single image in bytes.
    pub max_file_size_bytes: u64,
    /// Accepted MIME types.
    pub accepted_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_images: 5,
            max_file_size_bytes: 10 * 1024 * 1024,
            accepted_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

/// Chat assistant behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Lower bound of the simulated "thinking" delay in milliseconds.
    pub min_delay_ms: u64,
    /// Upper bound of the simulated "thinking" delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 600,
            max_delay_ms: 1400,
        }
    }
}

/// Quote notification transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Base URL of the EmailJS REST API.
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// IANA timezone used for the human-readable submission time.
    pub timezone: String,
    /// File name of the local fallback log inside `general.data_dir`.
    pub fallback_file: String,
    /// Request timeout for the transport in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com".to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            timezone: "America/Los_Angeles".to_string(),
            fallback_file: "ds_submissions.json".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl NotificationConfig {
    /// Whether enough credentials are present to attempt remote delivery.
    /// Whitespace-only values count as blank.
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}
