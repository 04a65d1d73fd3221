//! Active request storage.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use clockwork_domain::{Request, RequestId};

/// The active-request store: open work only.
///
/// A request is inserted Pending and removed the moment it transitions to
/// a terminal state, which is what makes every staff action at-most-once:
/// two near-simultaneous actions on one id race on `remove`, one wins, the
/// other sees nothing. Ids come from an atomic counter and are never
/// reused within the process lifetime.
pub struct RequestStore {
    requests: DashMap<RequestId, Request>,
    next_id: AtomicU64,
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Claim the next request id. Monotonically increasing, never reused.
    pub fn next_id(&self) -> RequestId {
        RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn insert(&self, request: Request) {
        self.requests.insert(request.id, request);
    }

    /// Snapshot of one open request.
    pub fn get(&self, id: RequestId) -> Option<Request> {
        self.requests.get(&id).map(|r| r.clone())
    }

    /// Claim an open request for a terminal transition. Only one caller
    /// can win a given id.
    pub fn remove(&self, id: RequestId) -> Option<Request> {
        self.requests.remove(&id).map(|(_, request)| request)
    }

    /// Number of requests still open.
    pub fn open_count(&self) -> usize {
        self.requests.len()
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clockwork_domain::{CharacterName, UserId};

    fn request(id: RequestId) -> Request {
        Request::new(
            id,
            UserId::new("user-1").unwrap(),
            CharacterName::new("Mychar").unwrap(),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn ids_are_monotonic_and_unique() {
        let store = RequestStore::new();
        let first = store.next_id();
        let second = store.next_id();
        assert!(second > first);
        assert_ne!(first, second);
    }

    #[test]
    fn remove_claims_exactly_once() {
        let store = RequestStore::new();
        let id = store.next_id();
        store.insert(request(id));

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert_eq!(store.open_count(), 0);
    }

    #[test]
    fn get_returns_a_snapshot() {
        let store = RequestStore::new();
        let id = store.next_id();
        store.insert(request(id));

        let snapshot = store.get(id).unwrap();
        assert_eq!(snapshot.id, id);
        // Still present after a read.
        assert_eq!(store.open_count(), 1);
    }
}
