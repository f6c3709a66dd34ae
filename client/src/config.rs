//! Client configuration
//!
//! Lives in `<config dir>/runemetrics/config.toml` unless a path is given.
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_profile_url")]
    pub profile_url: String,

    #[serde(default = "default_quests_url")]
    pub quests_url: String,

    #[serde(default = "default_monthly_url")]
    pub monthly_url: String,

    /// Directory holding rates.json and quest_data.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Per-request timeout (seconds, valid: 1-120)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Target level for `hours` when none is given
    #[serde(default = "default_target")]
    pub default_target: i32,
}

fn default_profile_url() -> String {
    "https://apps.runescape.com/runemetrics/profile/profile".to_string()
}

fn default_quests_url() -> String {
    "https://apps.runescape.com/runemetrics/quests".to_string()
}

fn default_monthly_url() -> String {
    "https://apps.runescape.com/runemetrics/xp-monthly".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("runemetrics/{}", env!("CARGO_PKG_VERSION"))
}

fn default_target() -> i32 {
    99
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile_url: default_profile_url(),
            quests_url: default_quests_url(),
            monthly_url: default_monthly_url(),
            data_dir: default_data_dir(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            default_target: default_target(),
        }
    }
}

impl ClientConfig {
    /// `<config dir>/runemetrics/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("runemetrics").join(CONFIG_FILE))
    }

    /// Load from an explicit path, else the default location. A missing
    /// file yields defaults; a file that fails to parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => {
                log::info!("No config directory available, using defaults");
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            log::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Timeout clamped to 1-120 seconds
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, 120))
    }
}
