//! Per-board structural mutation locks
//!
//! Reorders, moves and deletes read a whole sibling group, compute new
//! positions and write them back. Holding the board's lock for that cycle
//! keeps two overlapping requests on the same board from interleaving.
//! Requests on different boards never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = HashMap<Uuid, Arc<AsyncMutex<()>>>;

/// Registry of one async mutex per board
#[derive(Clone, Default)]
pub struct BoardLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl BoardLocks {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the registry mutex cannot leave the map in a
    // torn state, so a poisoned lock is still usable.
    fn registry(&self) -> MutexGuard<'_, LockMap> {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Wait for exclusive access to `board_id`
    ///
    /// The guard releases the board when dropped.
    pub async fn lock(&self, board_id: Uuid) -> OwnedMutexGuard<()> {
        let board_lock = self
            .registry()
            .entry(board_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();
        board_lock.lock_owned().await
    }

    /// Drop entries nobody is holding or waiting on
    pub fn prune(&self) -> usize {
        let mut registry = self.registry();
        let before = registry.len();
        registry.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - registry.len()
    }

    /// Number of boards with a live entry
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
