//! CLI argument definitions for the `shield` binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shield_core::config::ShieldConfig;

/// Desert Shield Auto Paint assistant: chat, quote requests and the local
/// submission log.
#[derive(Parser, Debug)]
#[command(name = "shield", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the local submission log.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the assistant in the terminal.
    Chat,
    /// Send a quote request.
    Quote(QuoteArgs),
    /// Print submissions saved to the local log.
    Submissions,
}

/// Quote form fields. Left blank, required fields fail validation with the
/// form's own messages.
#[derive(Args, Debug, Default)]
pub struct QuoteArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Year, make and model.
    #[arg(long, default_value = "")]
    pub vehicle: String,

    #[arg(long, default_value = "")]
    pub color: String,

    /// Requested service, e.g. "mobile" or "shop".
    #[arg(long, default_value = "")]
    pub service: String,

    /// Description of the damage.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Photo of the damage (JPG or PNG). Repeat for more.
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SHIELD_CONFIG env var > ~/.desert-shield/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SHIELD_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Apply --data-dir and --log-level on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut ShieldConfig) {
        if let Some(ref dir) = self.data_dir {
            config.general.data_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".desert-shield").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".desert-shield").join("config.toml");
    }
    PathBuf::from("config.toml")
}
