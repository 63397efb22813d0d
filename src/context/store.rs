//! Context store: state ownership, dispatch, and change notification.
//!
//! One store per process, constructed at startup and passed by reference.
//! Subscribers are plain callbacks invoked after every transition with the
//! new state; persistence is a best-effort side effect whose failures are
//! logged, never raised to the dispatcher.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::context::action::ContextAction;
use crate::context::reducer::reduce;
use crate::context::snapshot::SnapshotStore;
use crate::context::state::ContextState;

/// Handle returned by [`ContextStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&ContextState) + Send + Sync>;

pub struct ContextStore {
    state: RwLock<ContextState>,
    subscribers: Mutex<Vec<(SubscriberId, Subscriber)>>,
    next_subscriber: Mutex<u64>,
    snapshots: Option<Arc<SnapshotStore>>,
}

impl ContextStore {
    /// Create a store with default state and no persistence.
    pub fn in_memory() -> Self {
        Self::with_state(ContextState::default(), None)
    }

    /// Create a store backed by the snapshot tree.
    ///
    /// A persisted snapshot, when present and readable, is merged into the
    /// default state via `SyncState` before the store is returned.
    pub fn open(snapshots: Arc<SnapshotStore>) -> Self {
        let initial = match snapshots.load() {
            Ok(Some(persisted)) => {
                debug!("Restoring context from persisted snapshot");
                reduce(
                    &ContextState::default(),
                    ContextAction::SyncState(Box::new(persisted)),
                )
            }
            Ok(None) => ContextState::default(),
            Err(err) => {
                warn!("Failed to read context snapshot, starting fresh: {}", err);
                ContextState::default()
            }
        };
        Self::with_state(initial, Some(snapshots))
    }

    fn with_state(state: ContextState, snapshots: Option<Arc<SnapshotStore>>) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber: Mutex::new(1),
            snapshots,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ContextState {
        self.state.read().clone()
    }

    /// Apply an action, notify subscribers, and persist the result.
    pub fn dispatch(&self, action: ContextAction) -> ContextState {
        let next = {
            let mut guard = self.state.write();
            let next = reduce(&guard, action);
            *guard = next.clone();
            next
        };

        for (_, subscriber) in self.subscribers.lock().iter() {
            subscriber(&next);
        }

        if let Some(snapshots) = &self.snapshots {
            if let Err(err) = snapshots.save(&next) {
                warn!("Failed to persist context snapshot: {}", err);
            }
        }

        next
    }

    /// Register a callback invoked after every transition.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&ContextState) + Send + Sync + 'static,
    {
        let mut next_id = self.next_subscriber.lock();
        let id = SubscriberId(*next_id);
        *next_id += 1;
        self.subscribers.lock().push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::state::PageVisit;
    use crate::types::EngagementLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn page_visit(page: &str) -> ContextAction {
        ContextAction::AddPageVisit(PageVisit {
            page: page.to_string(),
            timestamp_ms: 1,
            duration_ms: 100,
        })
    }

    #[test]
    fn dispatch_updates_state() {
        let store = ContextStore::in_memory();
        store.dispatch(page_visit("stores"));
        assert_eq!(store.state().visit_count(), 1);
    }

    #[test]
    fn subscribers_observe_every_transition() {
        let store = ContextStore::in_memory();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_by_sub = seen.clone();
        let id = store.subscribe(move |_| {
            seen_by_sub.fetch_add(1, Ordering::SeqCst);
        });

        store.dispatch(page_visit("stores"));
        store.dispatch(ContextAction::UpdateEngagement(EngagementLevel::Medium));
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        store.unsubscribe(id);
        store.dispatch(page_visit("training"));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let snapshots = Arc::new(SnapshotStore::new(&db).unwrap());

        {
            let store = ContextStore::open(snapshots.clone());
            store.dispatch(page_visit("stores"));
            store.dispatch(ContextAction::UpdateInterests(vec!["training".to_string()]));
        }

        let reopened = ContextStore::open(snapshots);
        let state = reopened.state();
        assert_eq!(state.visit_count(), 1);
        assert_eq!(state.molecules.interests, vec!["training".to_string()]);
    }
}
