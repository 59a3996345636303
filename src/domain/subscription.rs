use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription state for one court file number.
///
/// `provisional` marks an optimistic value set for immediate feedback. Only a
/// successful refresh clears it, and the refresh overwrites the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub is_subscribed: bool,
    pub last_consolidated_at: Option<DateTime<Utc>>,
    pub provisional: bool,
}

impl SubscriptionStatus {
    pub fn confirmed(is_subscribed: bool) -> Self {
        Self {
            is_subscribed,
            last_consolidated_at: Some(Utc::now()),
            provisional: false,
        }
    }

    pub fn optimistic(is_subscribed: bool, last_consolidated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            is_subscribed,
            last_consolidated_at,
            provisional: true,
        }
    }

    pub fn is_confirmed_subscribed(&self) -> bool {
        self.is_subscribed && !self.provisional
    }
}
