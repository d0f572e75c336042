use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use time::macros::datetime;

use super::InMemorySessionCache;
use crate::proto::clock::Clock;
use crate::provider::session_cache::{SessionCache, SessionCacheError};

struct ManualClock(Mutex<OffsetDateTime>);

impl ManualClock {
    fn new(now: OffsetDateTime) -> Arc<Self> {
        Arc::new(Self(Mutex::new(now)))
    }

    fn advance(&self, duration: time::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> OffsetDateTime {
        *self.0.lock().unwrap()
    }
}

fn setup(ttl: time::Duration) -> (InMemorySessionCache<String>, Arc<ManualClock>) {
    let clock = ManualClock::new(datetime!(2024-03-01 12:00 UTC));
    (InMemorySessionCache::new(Some(ttl), clock.clone()), clock)
}

#[test]
fn test_put_and_get() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache.put("id", "value".to_string(), None).unwrap();

    assert_eq!(cache.get("id", None).unwrap(), Some("value".to_string()));
    assert_eq!(cache.get("other", None).unwrap(), None);
}

#[test]
fn test_put_duplicate_id_fails() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache.put("id", "value".to_string(), None).unwrap();

    assert_eq!(
        cache.put("id", "other".to_string(), None).unwrap_err(),
        SessionCacheError::AlreadyExists("id".to_string())
    );
}

#[test]
fn test_owned_entry_requires_matching_requester() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache
        .put("id", "value".to_string(), Some("owner".to_string()))
        .unwrap();

    assert_eq!(
        cache.get("id", Some("owner")).unwrap(),
        Some("value".to_string())
    );
    assert_eq!(
        cache.get("id", Some("intruder")).unwrap_err(),
        SessionCacheError::NoAccess("id".to_string())
    );
    assert_eq!(
        cache.get("id", None).unwrap_err(),
        SessionCacheError::NoAccess("id".to_string())
    );
}

#[test]
fn test_unowned_entry_is_accessible_by_anyone() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache.put("id", "value".to_string(), None).unwrap();

    assert!(cache.get("id", Some("someone")).unwrap().is_some());
}

#[test]
fn test_get_and_remove_consumes_entry_once() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache
        .put("id", "value".to_string(), Some("owner".to_string()))
        .unwrap();

    assert_eq!(
        cache.get_and_remove("id", Some("owner")).unwrap(),
        Some("value".to_string())
    );
    assert_eq!(cache.get_and_remove("id", Some("owner")).unwrap(), None);
}

#[test]
fn test_get_and_remove_with_wrong_owner_keeps_entry() {
    let (cache, _) = setup(time::Duration::minutes(5));

    cache
        .put("id", "value".to_string(), Some("owner".to_string()))
        .unwrap();

    assert!(cache.get_and_remove("id", Some("intruder")).is_err());
    assert!(cache.get("id", Some("owner")).unwrap().is_some());
}

#[test]
fn test_expired_entry_is_invisible() {
    let (cache, clock) = setup(time::Duration::minutes(5));

    cache.put("id", "value".to_string(), None).unwrap();
    clock.advance(time::Duration::minutes(6));

    assert_eq!(cache.get("id", None).unwrap(), None);
    assert_eq!(cache.get_and_remove("id", None).unwrap(), None);
}

#[test]
fn test_clear_expired_removes_entries_physically() {
    let (cache, clock) = setup(time::Duration::minutes(5));

    cache.put("first", "1".to_string(), None).unwrap();
    clock.advance(time::Duration::minutes(3));
    cache.put("second", "2".to_string(), None).unwrap();
    clock.advance(time::Duration::minutes(3));

    assert_eq!(cache.clear_expired().unwrap(), 1);
    assert_eq!(cache.entries.lock().unwrap().len(), 1);
    assert!(cache.get("second", None).unwrap().is_some());
}

#[test]
fn test_entries_without_ttl_never_expire() {
    let clock = ManualClock::new(datetime!(2024-03-01 12:00 UTC));
    let cache = InMemorySessionCache::new(None, clock.clone());

    cache.put("id", 7u32, None).unwrap();
    clock.advance(time::Duration::days(365));

    assert_eq!(cache.get("id", None).unwrap(), Some(7));
}

#[test]
fn test_concurrent_consumption_succeeds_once() {
    let (cache, _) = setup(time::Duration::minutes(5));
    cache.put("id", "value".to_string(), None).unwrap();
    let cache = Arc::new(cache);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            std::thread::spawn(move || cache.get_and_remove("id", None).unwrap())
        })
        .collect();

    let consumed = handles
        .into_iter()
        .filter_map(|handle| handle.join().unwrap())
        .count();
    assert_eq!(consumed, 1);
}
