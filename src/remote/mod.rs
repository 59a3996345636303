pub mod graphql;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Hearing, HearingRecord};

pub use graphql::GraphqlClient;

/// The hearings service as the synchronizer sees it.
///
/// Every failure surfaces as [`DocketError::RemoteUnavailable`](crate::app::DocketError).
#[async_trait]
pub trait HearingsApi: Send + Sync {
    /// `SearchHearingsByCourtFileNumber`
    async fn search_hearings(&self, court_file_number: &str) -> Result<Vec<Hearing>>;

    /// `IsSubscribedTo`
    async fn is_subscribed_to(&self, court_file_number: &str) -> Result<bool>;

    /// `AddHearings`
    async fn add_hearings(&self, hearings: &[HearingRecord]) -> Result<()>;

    /// `UnsubscribeHearing`. Deletion is by key, so repeating it is harmless.
    async fn unsubscribe_hearing(&self, court_file_number: &str) -> Result<()>;

    /// `SetViewed`
    async fn set_viewed(&self, court_file_number: &str) -> Result<()>;
}
