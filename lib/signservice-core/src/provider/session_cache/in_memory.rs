use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{CacheEntry, SessionCache, SessionCacheError};
use crate::proto::clock::Clock;

pub struct InMemorySessionCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    time_to_live: Option<time::Duration>,
    clock: Arc<dyn Clock>,
}

impl<T> InMemorySessionCache<T> {
    pub fn new(time_to_live: Option<time::Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            time_to_live,
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, CacheEntry<T>>>, SessionCacheError> {
        self.entries
            .lock()
            .map_err(|err| SessionCacheError::Storage(err.to_string()))
    }
}

impl<T: Clone + Send + Sync + 'static> InMemorySessionCache<T> {
    /// Looks up a live entry, dropping it first if it expired.
    fn live_entry<'a>(
        &self,
        entries: &'a mut HashMap<String, CacheEntry<T>>,
        id: &str,
        requester_id: Option<&str>,
    ) -> Result<Option<&'a CacheEntry<T>>, SessionCacheError> {
        let now = self.clock.now_utc();
        if entries.get(id).is_some_and(|entry| entry.is_expired(now)) {
            tracing::debug!("Removing expired cache entry `{id}`");
            entries.remove(id);
            return Ok(None);
        }

        match entries.get(id) {
            None => Ok(None),
            Some(entry) if !entry.is_accessible_by(requester_id) => {
                Err(SessionCacheError::NoAccess(id.to_owned()))
            }
            Some(entry) => Ok(Some(entry)),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SessionCache<T> for InMemorySessionCache<T> {
    fn put(&self, id: &str, object: T, owner_id: Option<String>) -> Result<(), SessionCacheError> {
        self.clear_expired()?;

        let expires_at = match self.time_to_live {
            Some(ttl) => Some(self.clock.now_utc().checked_add(ttl).ok_or_else(|| {
                SessionCacheError::Storage(format!("time to live {ttl} out of range"))
            })?),
            None => None,
        };
        let mut entries = self.lock()?;
        if entries.contains_key(id) {
            return Err(SessionCacheError::AlreadyExists(id.to_owned()));
        }
        entries.insert(
            id.to_owned(),
            CacheEntry {
                object,
                owner_id,
                expires_at,
            },
        );
        Ok(())
    }

    fn get<'a>(
        &self,
        id: &str,
        requester_id: Option<&'a str>,
    ) -> Result<Option<T>, SessionCacheError> {
        let mut entries = self.lock()?;
        let entry = self.live_entry(&mut entries, id, requester_id)?;
        Ok(entry.map(|entry| entry.object.clone()))
    }

    fn get_and_remove<'a>(
        &self,
        id: &str,
        requester_id: Option<&'a str>,
    ) -> Result<Option<T>, SessionCacheError> {
        let mut entries = self.lock()?;
        if self.live_entry(&mut entries, id, requester_id)?.is_none() {
            return Ok(None);
        }
        Ok(entries.remove(id).map(|entry| entry.object))
    }

    fn remove(&self, id: &str) -> Result<(), SessionCacheError> {
        self.lock()?.remove(id);
        Ok(())
    }

    fn clear_expired(&self) -> Result<usize, SessionCacheError> {
        let now = self.clock.now_utc();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("Cleared {removed} expired cache entries");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod test;
