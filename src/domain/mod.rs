pub mod bookmark;
pub mod hearing;
pub mod intent;
pub mod subscription;

pub use bookmark::{LocalBookmark, LocalState};
pub use hearing::{Court, Hearing, HearingRecord};
pub use intent::{BookmarkIntent, DesiredState};
pub use subscription::SubscriptionStatus;
