use serenity::all::GuildId;

/// Per-guild configuration document.
///
/// An empty `prefix` means the guild has no override and the global default
/// applies.  Settings this core does not interpret ride along in `extra` so
/// a load/save cycle never drops fields another component wrote.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GuildConfig {
    pub id: GuildId,
    #[serde(default)]
    pub prefix: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GuildConfig {
    /// Default record for a guild with nothing stored remotely.
    pub fn new(id: GuildId) -> Self {
        Self {
            id,
            prefix: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// The guild's prefix override, if one is set.
    pub fn prefix_override(&self) -> Option<&str> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(&self.prefix)
        }
    }
}
