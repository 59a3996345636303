use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::HearingRecord;

/// Local cache state for a court file number. `Unsubscribed` is the tombstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalState {
    Subscribed,
    Unsubscribed,
}

impl LocalState {
    pub fn as_str(self) -> &'static str {
        match self {
            LocalState::Subscribed => "SUBSCRIBED",
            LocalState::Unsubscribed => "UNSUBSCRIBE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUBSCRIBED" => Some(LocalState::Subscribed),
            "UNSUBSCRIBE" => Some(LocalState::Unsubscribed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBookmark {
    pub court_file_number: String,
    pub state: LocalState,
    pub hearings: Vec<HearingRecord>,
    pub updated_at: DateTime<Utc>,
}

impl LocalBookmark {
    pub fn is_subscribed(&self) -> bool {
        self.state == LocalState::Subscribed
    }

    pub fn unread_count(&self) -> usize {
        self.hearings.iter().filter(|h| h.unread).count()
    }
}
