use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::app::{DocketError, Result};
use crate::domain::{Hearing, HearingRecord};
use crate::remote::HearingsApi;

/// In-process stand-in for the hearings service.
#[derive(Default)]
pub struct FakeApi {
    pub hearings: Mutex<HashMap<String, Vec<Hearing>>>,
    pub subscribed: Mutex<HashSet<String>>,
    pub added: Mutex<Vec<Vec<HearingRecord>>>,

    pub fail_search: AtomicBool,
    pub fail_status: AtomicBool,
    pub fail_add: AtomicBool,
    pub fail_unsubscribe: AtomicBool,
    pub fail_viewed: AtomicBool,

    pub search_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub unsubscribe_calls: AtomicUsize,
    pub viewed_calls: AtomicUsize,

    mutations_in_flight: AtomicUsize,
    pub max_mutations_in_flight: AtomicUsize,
    pub mutation_delay: Mutex<Option<Duration>>,

    /// When set, `is_subscribed_to` waits for a permit before answering.
    /// Waiters are released in arrival order.
    pub status_gate: Mutex<Option<Arc<Notify>>>,
}

pub fn hearing(id: &str, court_file_number: &str) -> Hearing {
    Hearing {
        id: id.to_string(),
        court_file_number: court_file_number.to_string(),
        party_name: Some("Doe, Jane".into()),
        lawyer: Some("Smith, John".into()),
        hearing_type: Some("Motion".into()),
        date_time: "2020-01-15T03:15:00Z".into(),
        date_time_offset: "-0500".into(),
        court: None,
    }
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_hearings(court_file_number: &str, count: usize) -> Arc<Self> {
        let api = Self::default();
        let hearings = (0..count)
            .map(|i| hearing(&format!("{}-h{}", court_file_number, i), court_file_number))
            .collect();
        api.hearings
            .lock()
            .unwrap()
            .insert(court_file_number.to_string(), hearings);
        Arc::new(api)
    }

    pub fn set_subscribed(&self, court_file_number: &str, subscribed: bool) {
        let mut set = self.subscribed.lock().unwrap();
        if subscribed {
            set.insert(court_file_number.to_string());
        } else {
            set.remove(court_file_number);
        }
    }

    pub fn is_subscribed(&self, court_file_number: &str) -> bool {
        self.subscribed.lock().unwrap().contains(court_file_number)
    }

    pub fn gate_status(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.status_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn delay_mutations(&self, delay: Duration) {
        *self.mutation_delay.lock().unwrap() = Some(delay);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(flag: &AtomicBool, operation: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(DocketError::RemoteUnavailable(format!("{}: injected failure", operation)))
        } else {
            Ok(())
        }
    }

    async fn mutation<F: FnOnce() -> Result<()>>(&self, apply: F) -> Result<()> {
        let now = self.mutations_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_mutations_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.mutation_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let result = apply();
        self.mutations_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl HearingsApi for FakeApi {
    async fn search_hearings(&self, court_file_number: &str) -> Result<Vec<Hearing>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_search, "SearchHearingsByCourtFileNumber")?;
        Ok(self
            .hearings
            .lock()
            .unwrap()
            .get(court_file_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn is_subscribed_to(&self, court_file_number: &str) -> Result<bool> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        // Answer as of arrival, so a gated query can come back stale.
        let answer = self.is_subscribed(court_file_number);
        let gate = self.status_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Self::check(&self.fail_status, "IsSubscribedTo")?;
        Ok(answer)
    }

    async fn add_hearings(&self, hearings: &[HearingRecord]) -> Result<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.mutation(|| {
            Self::check(&self.fail_add, "AddHearings")?;
            let mut subscribed = self.subscribed.lock().unwrap();
            for hearing in hearings {
                subscribed.insert(hearing.court_file_number.clone());
            }
            self.added.lock().unwrap().push(hearings.to_vec());
            Ok(())
        })
        .await
    }

    async fn unsubscribe_hearing(&self, court_file_number: &str) -> Result<()> {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.mutation(|| {
            Self::check(&self.fail_unsubscribe, "UnsubscribeHearing")?;
            self.set_subscribed(court_file_number, false);
            Ok(())
        })
        .await
    }

    async fn set_viewed(&self, _court_file_number: &str) -> Result<()> {
        self.viewed_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_viewed, "SetViewed")
    }
}
