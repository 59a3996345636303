use serde::{Deserialize, Serialize};

use crate::app::{DocketError, Result};
use crate::domain::HearingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesiredState {
    Subscribed,
    Unsubscribed,
}

impl DesiredState {
    pub fn from_subscribed(is_subscribed: bool) -> Self {
        if is_subscribed {
            DesiredState::Subscribed
        } else {
            DesiredState::Unsubscribed
        }
    }

    pub fn is_subscribed(self) -> bool {
        self == DesiredState::Subscribed
    }

    pub fn negate(self) -> Self {
        match self {
            DesiredState::Subscribed => DesiredState::Unsubscribed,
            DesiredState::Unsubscribed => DesiredState::Subscribed,
        }
    }
}

/// What a single toggle wants to happen. Built and discarded within one toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkIntent {
    pub court_file_number: String,
    pub desired_state: DesiredState,
    pub hearings_snapshot: Vec<HearingRecord>,
}

impl BookmarkIntent {
    /// A subscribe intent. The snapshot must hold at least one hearing.
    pub fn subscribe(court_file_number: &str, hearings_snapshot: Vec<HearingRecord>) -> Result<Self> {
        if hearings_snapshot.is_empty() {
            return Err(DocketError::InsufficientData(format!(
                "no hearings to bookmark for {}",
                court_file_number
            )));
        }

        Ok(Self {
            court_file_number: court_file_number.to_string(),
            desired_state: DesiredState::Subscribed,
            hearings_snapshot,
        })
    }

    /// Unsubscribing deletes by key and carries no snapshot.
    pub fn unsubscribe(court_file_number: &str) -> Self {
        Self {
            court_file_number: court_file_number.to_string(),
            desired_state: DesiredState::Unsubscribed,
            hearings_snapshot: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_requires_snapshot() {
        let err = BookmarkIntent::subscribe("CF-1234", Vec::new()).unwrap_err();
        assert!(matches!(err, DocketError::InsufficientData(_)));
    }

    #[test]
    fn test_subscribe_keeps_snapshot_order() {
        let records = vec![
            HearingRecord::new("h-2", "CF-1234"),
            HearingRecord::new("h-1", "CF-1234"),
        ];
        let intent = BookmarkIntent::subscribe("CF-1234", records.clone()).unwrap();
        assert_eq!(intent.desired_state, DesiredState::Subscribed);
        assert_eq!(intent.hearings_snapshot, records);
    }

    #[test]
    fn test_unsubscribe_has_no_snapshot() {
        let intent = BookmarkIntent::unsubscribe("CF-1234");
        assert_eq!(intent.desired_state, DesiredState::Unsubscribed);
        assert!(intent.hearings_snapshot.is_empty());
    }

    #[test]
    fn test_desired_state_negation() {
        assert_eq!(DesiredState::from_subscribed(false).negate(), DesiredState::Subscribed);
        assert!(!DesiredState::Subscribed.negate().is_subscribed());
    }
}
