use anyhow::{anyhow, Result};
use serenity::all::UserId;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/keelbot/config.toml";
const GUILD_DATA_PATH_REL_HOME: &str = ".config/keelbot/guilds";

/// Process-wide bot configuration.
///
/// Loaded once at startup and read-only afterwards.  Per-guild settings live
/// in [`crate::guild_config::GuildConfig`] instead.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct GlobalConfig {
    pub discord_token: String,
    /// Command prefix used when a guild has no override, and for direct
    /// messages.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// Users denied all command access.
    #[serde(default)]
    pub blacklisted_ids: HashSet<UserId>,
    /// Users granted bot-admin commands everywhere.
    #[serde(default)]
    pub admin_ids: HashSet<UserId>,
    /// Command names left out of the registry at startup.
    #[serde(default)]
    pub excluded_commands: HashSet<String>,
    /// Where per-guild configuration documents are stored.  Defaults to a
    /// directory next to this config file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_prefix() -> String {
    "!".to_string()
}

impl GlobalConfig {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut file = tokio::fs::File::open(&path).await.map_err(|e| {
            anyhow!(
                "Could not open configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).await.map_err(|e| {
            anyhow!(
                "Could not read configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let config: GlobalConfig = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        Ok(config)
    }

    /// Directory holding per-guild configuration documents.
    pub fn guild_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|p| p.join(GUILD_DATA_PATH_REL_HOME))
                .ok_or(anyhow!("Could not find home directory")),
        }
    }

    /// Whether the user is denied all command access.
    pub fn is_blacklisted(&self, user_id: UserId) -> bool {
        self.blacklisted_ids.contains(&user_id)
    }

    /// Whether the user holds the bot-admin tier.
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
