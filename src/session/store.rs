use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use super::SessionState;

/// Session-keyed storage for [`SessionState`].
///
/// Each session sits behind its own map entry, so [`SessionStore::update`]
/// on one session excludes concurrent updates to that same session only.
#[derive(Clone)]
pub struct SessionStore {
    idle_timeout: Duration,
    sessions: Arc<DashMap<Uuid, SessionEntry>>,
}

#[derive(Debug)]
struct SessionEntry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            state: SessionState::default(),
            last_seen: now,
        }
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Starts an empty session under `id`, replacing anything stored there.
    pub fn create(&self, id: Uuid, now: DateTime<Utc>) {
        self.sessions.insert(id, SessionEntry::fresh(now));
    }

    /// Marks `id` as seen at `now`. Returns `false` when the session is
    /// unknown or has been idle past the timeout; an idle one is dropped.
    pub fn touch(&self, id: Uuid, now: DateTime<Utc>) -> bool {
        match self.sessions.entry(id) {
            Entry::Occupied(mut entry) => {
                if now - entry.get().last_seen >= self.idle_timeout {
                    entry.remove();
                    return false;
                }
                entry.get_mut().last_seen = now;
                true
            }
            Entry::Vacant(_) => false,
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.get(&id).map(|entry| entry.state.clone())
    }

    /// Hands the session's state to `f` by value and stores the state it
    /// returns. Holds the session's entry lock for the whole call.
    ///
    /// A session that vanished since the request began is recreated empty.
    pub fn update<F, R>(&self, id: Uuid, now: DateTime<Utc>, f: F) -> R
    where
        F: FnOnce(SessionState) -> (SessionState, R),
    {
        let mut entry = self
            .sessions
            .entry(id)
            .or_insert_with(|| SessionEntry::fresh(now));

        let state = std::mem::take(&mut entry.state);
        let (state, output) = f(state);
        entry.state = state;
        entry.last_seen = now;

        output
    }

    /// Drops every session idle for at least the timeout and returns how
    /// many were removed.
    pub fn purge_idle(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, entry| {
            let keep = now - entry.last_seen < self.idle_timeout;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::fixtures::ana;

    fn store() -> SessionStore {
        SessionStore::new(Duration::seconds(60))
    }

    fn append_ana(store: &SessionStore, id: Uuid, now: DateTime<Utc>) -> usize {
        store.update(id, now, |mut state| {
            state.roster.append(ana());
            let len = state.roster.len();
            (state, len)
        })
    }

    #[test]
    fn test_created_session_starts_empty() {
        let store = store();
        let id = Uuid::new_v4();
        store.create(id, Utc::now());

        assert_eq!(store.snapshot(id), Some(SessionState::default()));
    }

    #[test]
    fn test_update_persists_returned_state() {
        let store = store();
        let id = Uuid::new_v4();
        let now = Utc::now();
        store.create(id, now);

        assert_eq!(append_ana(&store, id, now), 1);
        assert_eq!(append_ana(&store, id, now), 2);
        assert_eq!(store.snapshot(id).map(|state| state.roster.len()), Some(2));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let now = Utc::now();
        store.create(first, now);
        store.create(second, now);

        append_ana(&store, first, now);

        assert_eq!(store.snapshot(first).map(|s| s.roster.len()), Some(1));
        assert_eq!(store.snapshot(second).map(|s| s.roster.len()), Some(0));
    }

    #[test]
    fn test_update_recreates_missing_session() {
        let store = store();
        let id = Uuid::new_v4();

        assert_eq!(append_ana(&store, id, Utc::now()), 1);
    }

    #[test]
    fn test_touch_expires_idle_session() {
        let store = store();
        let id = Uuid::new_v4();
        let start = Utc::now();
        store.create(id, start);

        assert!(store.touch(id, start + Duration::seconds(30)));
        assert!(store.touch(id, start + Duration::seconds(80)));
        assert!(!store.touch(id, start + Duration::seconds(141)));
        assert!(store.snapshot(id).is_none());
        assert!(!store.touch(Uuid::new_v4(), start));
    }

    #[test]
    fn test_purge_idle_removes_only_stale_sessions() {
        let store = store();
        let (stale, active) = (Uuid::new_v4(), Uuid::new_v4());
        let start = Utc::now();
        store.create(stale, start);
        store.create(active, start + Duration::seconds(50));

        assert_eq!(store.purge_idle(start + Duration::seconds(60)), 1);
        assert_eq!(store.len(), 1);
        assert!(store.snapshot(active).is_some());
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = store();
        let id = Uuid::new_v4();
        let now = Utc::now();
        store.create(id, now);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        append_ana(&store, id, now);
                    }
                });
            }
        });

        assert_eq!(store.snapshot(id).map(|s| s.roster.len()), Some(200));
    }
}
