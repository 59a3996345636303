pub mod sqlite;

use crate::app::Result;
use crate::domain::{HearingRecord, LocalBookmark};

pub use sqlite::SqliteStore;

/// On-device bookmark cache, keyed by court file number.
///
/// The remote service stays authoritative; this cache backs offline display
/// and is rewritten whenever a bookmark change is confirmed.
pub trait BookmarkStore {
    /// Replace the cached hearings for `court_file_number` and mark it subscribed.
    /// All records are written in one transaction.
    fn put_bookmarks(&self, court_file_number: &str, records: &[HearingRecord]) -> Result<usize>;

    /// Write the `UNSUBSCRIBE` tombstone and drop the cached hearings.
    fn mark_unsubscribed(&self, court_file_number: &str) -> Result<()>;

    fn get_bookmark(&self, court_file_number: &str) -> Result<Option<LocalBookmark>>;
    fn list_subscribed(&self) -> Result<Vec<LocalBookmark>>;

    /// Clear `unread` on every cached hearing for the file number.
    fn mark_viewed(&self, court_file_number: &str) -> Result<usize>;
}
