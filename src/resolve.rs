use crate::cache::ConfigCache;
use crate::config::GlobalConfig;
use crate::error::CoreError;
use serenity::all::GuildId;

/// Decides the effective command prefix for a message.
pub struct PrefixResolver<'a> {
    global: &'a GlobalConfig,
    cache: &'a ConfigCache,
}

impl<'a> PrefixResolver<'a> {
    pub fn new(global: &'a GlobalConfig, cache: &'a ConfigCache) -> Self {
        Self { global, cache }
    }

    /// Guild override if one is set, the global default otherwise.  Direct
    /// messages have no guild and always use the global default, without
    /// touching the cache or the store.
    pub async fn resolve(&self, guild_id: Option<GuildId>) -> Result<String, CoreError> {
        let Some(guild_id) = guild_id else {
            return Ok(self.global.default_prefix.clone());
        };

        let record = self.cache.get(guild_id).await?;
        match record.prefix_override() {
            Some(prefix) => Ok(prefix.to_string()),
            None => Ok(self.global.default_prefix.clone()),
        }
    }
}
