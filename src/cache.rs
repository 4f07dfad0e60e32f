use crate::error::CoreError;
use crate::guild_config::GuildConfig;
use crate::store::ConfigStore;
use serenity::all::GuildId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lazily-populated cache of guild configuration records.
///
/// The single source of truth for reads during a process lifetime: once a
/// record is resident, every `get` hands out the same `Arc` until a `save`
/// replaces it.  Entries are never evicted.
pub struct ConfigCache {
    store: Box<dyn ConfigStore>,
    entries: RwLock<HashMap<GuildId, Arc<GuildConfig>>>,
}

impl ConfigCache {
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self {
            store,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the guild's record, loading it from the store on first access.
    ///
    /// A guild with nothing stored remotely gets a default record, which is
    /// cached like any other.  A store failure caches nothing, so the next
    /// call fetches again.
    pub async fn get(&self, id: GuildId) -> Result<Arc<GuildConfig>, CoreError> {
        if let Some(record) = self.entries.read().await.get(&id) {
            return Ok(Arc::clone(record));
        }

        // Fetch without holding the lock so a slow store stalls only the
        // messages that need this guild.  Concurrent misses may fetch the
        // same document twice; the first insert wins and both callers end up
        // holding the resident record.
        let fetched = match self.store.fetch(id).await {
            Ok(Some(record)) => record,
            Ok(None) => GuildConfig::new(id),
            Err(err) => return Err(CoreError::PersistenceUnavailable(err)),
        };

        let mut entries = self.entries.write().await;
        let record = entries.entry(id).or_insert_with(|| Arc::new(fetched));
        Ok(Arc::clone(record))
    }

    /// Replace the guild's record and write it through to the store.
    ///
    /// The cache is updated before the store call, so concurrent readers see
    /// the new record even while persistence is in flight.  If persistence
    /// fails the cache keeps the new record; the caller decides how to
    /// surface the inconsistency.
    pub async fn save(&self, record: GuildConfig) -> Result<Arc<GuildConfig>, CoreError> {
        let record = Arc::new(record);
        self.entries
            .write()
            .await
            .insert(record.id, Arc::clone(&record));

        self.store
            .upsert(&record)
            .await
            .map_err(CoreError::PersistenceUnavailable)?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::RecordingStore;

    fn cache_backed_by(store: &RecordingStore) -> ConfigCache {
        ConfigCache::new(Box::new(store.clone()))
    }

    #[tokio::test]
    async fn second_get_is_a_cache_hit() {
        let mut record = GuildConfig::new(GuildId::new(42));
        record.prefix = "?".to_string();
        let store = RecordingStore::with_record(record);
        let cache = cache_backed_by(&store);

        let first = cache.get(GuildId::new(42)).await.unwrap();
        let second = cache.get(GuildId::new(42)).await.unwrap();

        assert_eq!(store.fetch_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.prefix, "?");
    }

    #[tokio::test]
    async fn missing_remote_record_caches_a_default() {
        let store = RecordingStore::new();
        let cache = cache_backed_by(&store);

        let record = cache.get(GuildId::new(42)).await.unwrap();
        assert_eq!(*record, GuildConfig::new(GuildId::new(42)));
        assert_eq!(record.prefix_override(), None);

        // The default is resident now; not-found is not refetched.
        cache.get(GuildId::new(42)).await.unwrap();
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_caches_nothing() {
        let store = RecordingStore::new();
        store.set_offline(true);
        let cache = cache_backed_by(&store);

        let err = cache.get(GuildId::new(7)).await.unwrap_err();
        assert!(matches!(err, CoreError::PersistenceUnavailable(_)));

        // Once the store is back, the next get performs a fresh fetch.
        store.set_offline(false);
        let record = cache.get(GuildId::new(7)).await.unwrap();
        assert_eq!(record.id, GuildId::new(7));
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn save_writes_through_and_replaces_the_cached_record() {
        let store = RecordingStore::new();
        let cache = cache_backed_by(&store);

        let mut record = GuildConfig::new(GuildId::new(42));
        record.prefix = "?".to_string();
        let saved = cache.save(record.clone()).await.unwrap();
        assert_eq!(*saved, record);
        assert_eq!(store.upsert_count(), 1);
        assert_eq!(store.stored(GuildId::new(42)), Some(record.clone()));

        // A read after save hits the cache, not the store.
        let read_back = cache.get(GuildId::new(42)).await.unwrap();
        assert_eq!(*read_back, record);
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_new_record_in_cache() {
        let store = RecordingStore::new();
        store.set_offline(true);
        let cache = cache_backed_by(&store);

        let mut record = GuildConfig::new(GuildId::new(42));
        record.prefix = "$".to_string();
        let err = cache.save(record.clone()).await.unwrap_err();
        assert!(matches!(err, CoreError::PersistenceUnavailable(_)));

        // Readers see the saved value without any store traffic.
        let read_back = cache.get(GuildId::new(42)).await.unwrap();
        assert_eq!(read_back.prefix, "$");
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_misses_converge_on_one_resident_record() {
        let store = RecordingStore::new();
        let cache = cache_backed_by(&store);

        let (a, b) = tokio::join!(cache.get(GuildId::new(42)), cache.get(GuildId::new(42)));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        // Duplicate fetches are allowed under the race, torn state is not.
        assert!(store.fetch_count() >= 1);

        let after = cache.get(GuildId::new(42)).await.unwrap();
        assert!(Arc::ptr_eq(&a, &after));
    }
}
