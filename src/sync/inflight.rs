use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = HashMap<String, Arc<AsyncMutex<()>>>;

/// Per-key serialization for bookmark changes.
///
/// A second caller for the same court file number waits until the first
/// guard is dropped; different keys never block each other. A key's slot is
/// dropped again once nobody holds or waits on it.
#[derive(Default)]
pub struct InFlight {
    slots: Mutex<Slots>,
}

/// Held for the duration of one bookmark change.
pub struct InFlightGuard<'a> {
    slots: &'a Mutex<Slots>,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> InFlightGuard<'_> {
        let slot = self
            .slots()
            .entry(key.to_string())
            .or_default()
            .clone();

        InFlightGuard {
            slots: &self.slots,
            key: key.to_string(),
            guard: Some(slot.lock_owned().await),
        }
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.slots()
            .get(key)
            .is_some_and(|slot| slot.try_lock().is_err())
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map's own handle left: no holder, no waiter.
        if slots
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.key);
        }
    }
}
