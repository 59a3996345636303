use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::app::{DocketError, Result};
use crate::domain::{BookmarkIntent, DesiredState, Hearing, SubscriptionStatus};
use crate::notify::NotificationChannel;
use crate::remote::HearingsApi;
use crate::store::BookmarkStore;
use crate::sync::{HearingSnapshots, InFlight, SubscriptionStatusStore};

pub const MSG_BOOKMARKED: &str = "File Number Bookmarked";
pub const MSG_REMOVED: &str = "Bookmark Removed";
pub const MSG_BOOKMARK_FAILED: &str = "Error Bookmarking";
pub const MSG_REMOVE_FAILED: &str = "Error Removing Bookmark";
pub const MSG_STATUS_FAILED: &str = "Unable to check bookmark status";
pub const MSG_HEARINGS_FAILED: &str = "Unable to load hearings";

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Put the optimistic flag back when the subscribe/unsubscribe mutation fails.
    pub revert_on_failure: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            revert_on_failure: true,
        }
    }
}

/// What the presentation layer renders for one court file number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkView {
    pub bookmarked: bool,
    pub pending: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub desired: DesiredState,
    /// The status after consolidation. Still provisional if the refresh failed.
    pub status: Option<SubscriptionStatus>,
}

/// Keeps a bookmark in step across the remote service, the in-memory status
/// and the local cache.
pub struct BookmarkSynchronizer {
    api: Arc<dyn HearingsApi>,
    store: Arc<dyn BookmarkStore + Send + Sync>,
    status: SubscriptionStatusStore,
    snapshots: HearingSnapshots,
    notifications: NotificationChannel,
    in_flight: InFlight,
    options: SyncOptions,
}

impl BookmarkSynchronizer {
    pub fn new(
        api: Arc<dyn HearingsApi>,
        store: Arc<dyn BookmarkStore + Send + Sync>,
        options: SyncOptions,
    ) -> Self {
        Self {
            status: SubscriptionStatusStore::new(api.clone()),
            api,
            store,
            snapshots: HearingSnapshots::new(),
            notifications: NotificationChannel::new(),
            in_flight: InFlight::new(),
            options,
        }
    }

    pub fn status(&self) -> &SubscriptionStatusStore {
        &self.status
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn view(&self, court_file_number: &str) -> BookmarkView {
        let status = self.status.get(court_file_number);
        BookmarkView {
            bookmarked: status.as_ref().is_some_and(|s| s.is_subscribed),
            pending: self.in_flight.is_busy(court_file_number)
                || status.as_ref().is_some_and(|s| s.provisional),
            message: self.notifications.visible_text(),
        }
    }

    /// Fetch every hearing for the file number and keep it as the bookmark snapshot.
    pub async fn load_hearings(&self, court_file_number: &str) -> Result<Vec<Hearing>> {
        self.snapshots.begin(court_file_number);
        let result = self.api.search_hearings(court_file_number).await;
        self.snapshots.complete(court_file_number, &result);

        if let Err(e) = &result {
            warn!("Hearing lookup for {} failed: {}", court_file_number, e);
            self.notifications.publish(MSG_HEARINGS_FAILED);
        }
        result
    }

    /// One detail-view activation.
    ///
    /// Shows the cached bookmark state straight away, then loads hearings and
    /// the authoritative status together. A confirmed subscription rewrites the
    /// local records from the fresh snapshot and marks the hearings viewed.
    pub async fn activate(&self, court_file_number: &str) -> Result<Vec<Hearing>> {
        if self.status.get(court_file_number).is_none() {
            match self.store.get_bookmark(court_file_number) {
                Ok(Some(local)) => self
                    .status
                    .set_optimistic(court_file_number, local.is_subscribed()),
                Ok(None) => {}
                Err(e) => warn!("Could not read cached bookmark {}: {}", court_file_number, e),
            }
        }

        let (hearings, status) = futures::future::join(
            self.load_hearings(court_file_number),
            self.status.refresh(court_file_number),
        )
        .await;

        if let Err(e) = status {
            warn!("Status lookup for {} failed: {}", court_file_number, e);
            self.notifications.publish(MSG_STATUS_FAILED);
            return hearings;
        }

        // A toggle may have landed while the lookups were out; decide on the
        // status as it stands once no change is in flight.
        let confirmed = {
            let _guard = self.in_flight.acquire(court_file_number).await;
            match self.status.get(court_file_number) {
                Some(status) if status.is_confirmed_subscribed() => {
                    if let Ok(records) = self.snapshots.records(court_file_number) {
                        if let Err(e) = self.store.put_bookmarks(court_file_number, &records) {
                            error!("Could not cache bookmark {}: {}", court_file_number, e);
                        }
                    }
                    true
                }
                Some(status) if !status.provisional => {
                    if let Err(e) = self.tombstone_cached(court_file_number) {
                        error!("Could not cache bookmark {}: {}", court_file_number, e);
                    }
                    false
                }
                _ => false,
            }
        };

        if confirmed {
            self.mark_viewed(court_file_number).await;
        }

        hearings
    }

    pub async fn toggle_bookmark(&self, court_file_number: &str) -> Result<ToggleOutcome> {
        let _guard = self.in_flight.acquire(court_file_number).await;

        let current = self
            .status
            .get(court_file_number)
            .is_some_and(|s| s.is_subscribed);
        let desired = DesiredState::from_subscribed(current).negate();

        self.apply_locked(court_file_number, current, desired).await
    }

    /// Drive the bookmark to `desired` regardless of its current value.
    /// Unsubscribing an unsubscribed file number succeeds and changes nothing.
    pub async fn set_bookmark(
        &self,
        court_file_number: &str,
        desired: DesiredState,
    ) -> Result<ToggleOutcome> {
        let _guard = self.in_flight.acquire(court_file_number).await;

        let current = self
            .status
            .get(court_file_number)
            .is_some_and(|s| s.is_subscribed);

        self.apply_locked(court_file_number, current, desired).await
    }

    /// Run the toggle on its own task. The result is only logged, so a view
    /// that goes away mid-toggle can simply stop observing.
    pub fn toggle_in_background(self: &Arc<Self>, court_file_number: String) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            match this.toggle_bookmark(&court_file_number).await {
                Ok(outcome) => debug!("Toggled {} to {:?}", court_file_number, outcome.desired),
                Err(e) => debug!("Toggle of {} ended with: {}", court_file_number, e),
            }
        })
    }

    /// Clear the unread flags for a subscribed file number. Not retried: a
    /// failed attempt is dropped.
    pub async fn mark_viewed(&self, court_file_number: &str) {
        match self.api.set_viewed(court_file_number).await {
            Ok(()) => match self.store.mark_viewed(court_file_number) {
                Ok(cleared) => debug!("Marked {} hearings viewed for {}", cleared, court_file_number),
                Err(e) => warn!("Could not mark {} viewed locally: {}", court_file_number, e),
            },
            Err(e) => debug!("Dropping failed SetViewed for {}: {}", court_file_number, e),
        }
    }

    /// Caller holds the in-flight guard for `court_file_number`.
    async fn apply_locked(
        &self,
        court_file_number: &str,
        current: bool,
        desired: DesiredState,
    ) -> Result<ToggleOutcome> {
        let intent = match desired {
            DesiredState::Subscribed => self
                .snapshots
                .records(court_file_number)
                .and_then(|records| BookmarkIntent::subscribe(court_file_number, records)),
            DesiredState::Unsubscribed => Ok(BookmarkIntent::unsubscribe(court_file_number)),
        };

        let intent = match intent {
            Ok(intent) => intent,
            Err(e) => {
                warn!("Not bookmarking {}: {}", court_file_number, e);
                self.notifications.publish(MSG_BOOKMARK_FAILED);
                return Err(e);
            }
        };

        self.status
            .set_optimistic(court_file_number, desired.is_subscribed());

        let applied = self.apply_intent(&intent).await;

        if let Err(e) = &applied {
            if e.is_remote() && self.options.revert_on_failure {
                self.status.set_optimistic(court_file_number, current);
            }
        }

        // Consolidation runs exactly once per change, whatever the mutation did.
        if let Err(e) = self.status.refresh(court_file_number).await {
            warn!("Could not consolidate {}: {}", court_file_number, e);
            // A failed mutation keeps its own message.
            if applied.is_ok() {
                self.notifications.publish(MSG_STATUS_FAILED);
            }
        }

        applied.map(|()| ToggleOutcome {
            desired,
            status: self.status.get(court_file_number),
        })
    }

    async fn apply_intent(&self, intent: &BookmarkIntent) -> Result<()> {
        let court_file_number = intent.court_file_number.as_str();

        match intent.desired_state {
            DesiredState::Subscribed => {
                if let Err(e) = self.api.add_hearings(&intent.hearings_snapshot).await {
                    warn!("AddHearings for {} failed: {}", court_file_number, e);
                    self.notifications.publish(MSG_BOOKMARK_FAILED);
                    return Err(e);
                }
                info!(
                    "Bookmarked {} ({} hearings)",
                    court_file_number,
                    intent.hearings_snapshot.len()
                );

                self.store
                    .put_bookmarks(court_file_number, &intent.hearings_snapshot)
                    .map_err(|e| local_failure(court_file_number, e))?;
                self.notifications.publish(MSG_BOOKMARKED);
            }
            DesiredState::Unsubscribed => {
                if let Err(e) = self.api.unsubscribe_hearing(court_file_number).await {
                    warn!("UnsubscribeHearing for {} failed: {}", court_file_number, e);
                    self.notifications.publish(MSG_REMOVE_FAILED);
                    return Err(e);
                }
                info!("Removed bookmark {}", court_file_number);

                self.tombstone_cached(court_file_number)
                    .map_err(|e| local_failure(court_file_number, e))?;
                self.notifications.publish(MSG_REMOVED);
            }
        }

        Ok(())
    }

    /// Tombstone the cached bookmark if it is cached as subscribed. Files that
    /// were never bookmarked get no row.
    fn tombstone_cached(&self, court_file_number: &str) -> Result<()> {
        match self.store.get_bookmark(court_file_number)? {
            Some(local) if local.is_subscribed() => self.store.mark_unsubscribed(court_file_number),
            _ => Ok(()),
        }
    }
}

fn local_failure(court_file_number: &str, e: DocketError) -> DocketError {
    error!("Local bookmark cache write for {} failed: {}", court_file_number, e);
    e
}
