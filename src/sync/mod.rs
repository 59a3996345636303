//! Bookmark subscription synchronization.
//!
//! ```text
//! toggle → optimistic flip → AddHearings / UnsubscribeHearing → local cache
//!        → IsSubscribedTo refresh (authoritative) → view
//! ```
//!
//! - [`SubscriptionStatusStore`]: last known status per court file number
//! - [`HearingSnapshots`]: hearing fetch state backing subscribe payloads
//! - [`InFlight`]: one bookmark change per court file number at a time
//! - [`BookmarkSynchronizer`]: the operations the presentation layer calls

mod inflight;
mod snapshot;
mod status;
mod synchronizer;

pub use inflight::{InFlight, InFlightGuard};
pub use snapshot::HearingSnapshots;
pub use status::SubscriptionStatusStore;
pub use synchronizer::{
    BookmarkSynchronizer, BookmarkView, SyncOptions, ToggleOutcome, MSG_BOOKMARKED,
    MSG_BOOKMARK_FAILED, MSG_HEARINGS_FAILED, MSG_REMOVED, MSG_REMOVE_FAILED, MSG_STATUS_FAILED,
};
