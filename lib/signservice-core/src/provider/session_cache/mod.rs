//! Server side storage for signature session state of stateful policies.
//!
//! In-memory storage is supported natively; this can be extended with another
//! storage provider implementing [`SessionCache`].

use thiserror::Error;
use time::OffsetDateTime;

pub mod in_memory;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SessionCache<T: Send + Sync + 'static>: Send + Sync {
    fn put(&self, id: &str, object: T, owner_id: Option<String>) -> Result<(), SessionCacheError>;

    /// Returns the entry if present, not expired and accessible by `requester_id`
    fn get<'a>(
        &self,
        id: &str,
        requester_id: Option<&'a str>,
    ) -> Result<Option<T>, SessionCacheError>;

    /// Like [`SessionCache::get`], removing the entry in the same step
    fn get_and_remove<'a>(
        &self,
        id: &str,
        requester_id: Option<&'a str>,
    ) -> Result<Option<T>, SessionCacheError>;

    fn remove(&self, id: &str) -> Result<(), SessionCacheError>;

    /// Physically removes expired entries, returns the number removed
    fn clear_expired(&self) -> Result<usize, SessionCacheError>;
}

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub object: T,
    pub owner_id: Option<String>,
    /// `None` means the entry never expires
    pub expires_at: Option<OffsetDateTime>,
}

impl<T> CacheEntry<T> {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// An owned entry is only accessible by a requester with the same id
    pub fn is_accessible_by(&self, requester_id: Option<&str>) -> bool {
        match &self.owner_id {
            None => true,
            Some(owner_id) => requester_id == Some(owner_id.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionCacheError {
    #[error("Cache entry `{0}` is not accessible by the requester")]
    NoAccess(String),
    #[error("Cache entry `{0}` already exists")]
    AlreadyExists(String),
    #[error("Cache storage error: `{0}`")]
    Storage(String),
}
