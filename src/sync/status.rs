use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::app::{DocketError, Result};
use crate::domain::SubscriptionStatus;
use crate::remote::HearingsApi;

struct Entry {
    status: SubscriptionStatus,
    /// Bumped on every optimistic write so a refresh can tell it was overtaken.
    generation: u64,
}

/// Last known subscription status per court file number.
///
/// Values come from two places: [`set_optimistic`](Self::set_optimistic) for
/// immediate feedback, and [`refresh`](Self::refresh), which asks the remote
/// service and replaces the stored value wholesale.
pub struct SubscriptionStatusStore {
    api: Arc<dyn HearingsApi>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SubscriptionStatusStore {
    pub fn new(api: Arc<dyn HearingsApi>) -> Self {
        Self {
            api,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// `None` means the status has never been looked up.
    pub fn get(&self, court_file_number: &str) -> Option<SubscriptionStatus> {
        self.entries()
            .get(court_file_number)
            .map(|entry| entry.status.clone())
    }

    /// Provisional value for immediate feedback. Must be followed by a
    /// [`refresh`](Self::refresh) in the same logical operation.
    pub fn set_optimistic(&self, court_file_number: &str, is_subscribed: bool) {
        let mut entries = self.entries();
        let entry = entries
            .entry(court_file_number.to_string())
            .or_insert_with(|| Entry {
                status: SubscriptionStatus::optimistic(is_subscribed, None),
                generation: 0,
            });

        entry.status = SubscriptionStatus::optimistic(is_subscribed, entry.status.last_consolidated_at);
        entry.generation += 1;
    }

    /// Fetch the authoritative status and overwrite whatever is stored.
    ///
    /// On failure the stored value is left untouched. If an optimistic write
    /// landed while the query was in flight, the refresh still wins: this is a
    /// known race, logged as a stale write rather than resolved.
    pub async fn refresh(&self, court_file_number: &str) -> Result<SubscriptionStatus> {
        let started_at = self.generation(court_file_number);

        let is_subscribed = self.api.is_subscribed_to(court_file_number).await?;
        let status = SubscriptionStatus::confirmed(is_subscribed);

        let mut entries = self.entries();
        let entry = entries
            .entry(court_file_number.to_string())
            .or_insert_with(|| Entry {
                status: status.clone(),
                generation: started_at,
            });

        if entry.generation != started_at {
            warn!("{}", DocketError::StaleWrite(court_file_number.to_string()));
        }

        debug!(
            "Consolidated {}: subscribed={}",
            court_file_number, status.is_subscribed
        );
        entry.status = status.clone();
        Ok(status)
    }

    fn generation(&self, court_file_number: &str) -> u64 {
        self.entries()
            .get(court_file_number)
            .map(|entry| entry.generation)
            .unwrap_or(0)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
