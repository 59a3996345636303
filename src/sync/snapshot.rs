use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::{DocketError, Result};
use crate::domain::{Hearing, HearingRecord};

#[derive(Debug, Clone)]
enum FetchState {
    Pending,
    Failed(String),
    Ready(Vec<Hearing>),
}

/// Outcome of the most recent hearing fetch per court file number.
#[derive(Default)]
pub struct HearingSnapshots {
    states: Mutex<HashMap<String, FetchState>>,
}

impl HearingSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, court_file_number: &str) {
        self.states()
            .insert(court_file_number.to_string(), FetchState::Pending);
    }

    pub fn complete(&self, court_file_number: &str, result: &Result<Vec<Hearing>>) {
        let state = match result {
            Ok(hearings) => FetchState::Ready(hearings.clone()),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        self.states().insert(court_file_number.to_string(), state);
    }

    pub fn hearings(&self, court_file_number: &str) -> Option<Vec<Hearing>> {
        match self.states().get(court_file_number) {
            Some(FetchState::Ready(hearings)) => Some(hearings.clone()),
            _ => None,
        }
    }

    /// The bookmark payload, in fetch order. Anything short of a completed,
    /// non-empty fetch is `InsufficientData`.
    pub fn records(&self, court_file_number: &str) -> Result<Vec<HearingRecord>> {
        match self.states().get(court_file_number) {
            Some(FetchState::Ready(hearings)) if !hearings.is_empty() => {
                Ok(hearings.iter().map(Hearing::to_record).collect())
            }
            Some(FetchState::Ready(_)) => Err(DocketError::InsufficientData(format!(
                "no hearings found for {}",
                court_file_number
            ))),
            Some(FetchState::Pending) => Err(DocketError::InsufficientData(format!(
                "hearings for {} are still loading",
                court_file_number
            ))),
            Some(FetchState::Failed(reason)) => Err(DocketError::InsufficientData(format!(
                "hearing lookup for {} failed: {}",
                court_file_number, reason
            ))),
            None => Err(DocketError::InsufficientData(format!(
                "hearings for {} have not been loaded",
                court_file_number
            ))),
        }
    }

    fn states(&self) -> MutexGuard<'_, HashMap<String, FetchState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
