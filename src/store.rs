use crate::guild_config::GuildConfig;
use serenity::all::GuildId;
use std::path::PathBuf;

/// Persistence backend errors.  All variants are treated as transient by the
/// cache; retry policy belongs to the backend, not to callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed guild document: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Async key-value persistence for guild configuration documents.
///
/// [`crate::cache::ConfigCache`] is the only caller; it maps every failure to
/// `PersistenceUnavailable` and never retries inline.
#[serenity::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the document for a guild.  `Ok(None)` means nothing is stored,
    /// which is not an error.
    async fn fetch(&self, id: GuildId) -> Result<Option<GuildConfig>, StoreError>;

    /// Create or replace the document for `record.id`.
    async fn upsert(&self, record: &GuildConfig) -> Result<(), StoreError>;
}

/// Document store keeping one JSON file per guild.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn document_path(&self, id: GuildId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[serenity::async_trait]
impl ConfigStore for FileStore {
    async fn fetch(&self, id: GuildId) -> Result<Option<GuildConfig>, StoreError> {
        let path = self.document_path(id);

        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&contents)?))
    }

    async fn upsert(&self, record: &GuildConfig) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.document_path(record.id);
        let document = serde_json::to_vec_pretty(record)?;

        // Write to a temporary file in the same directory, then atomically
        // rename it over the target so a crash never leaves a torn document.
        let tmp_path = path.with_extension("json.new");
        tokio::fs::write(&tmp_path, document).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(())
    }
}
