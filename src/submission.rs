//! Outbound side of a booking. There is no real backend: the simulated
//! dispatcher waits, hands the payload to a notifier, and always succeeds.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::Result;
use crate::form::BookingSnapshot;

/// Proof that a booking request left the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub field_count: usize,
}

impl SubmissionReceipt {
    pub fn new(snapshot: &BookingSnapshot, submitted_at: DateTime<Utc>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at,
            field_count: snapshot.len(),
        }
    }
}

/// Why a submit attempt stopped before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InFlight,
    NotFinalStep,
    InvalidStep,
    ConsentMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted(SubmissionReceipt),
    Rejected(Rejection),
}

impl SubmissionOutcome {
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match self {
            SubmissionOutcome::Submitted(receipt) => Some(receipt),
            SubmissionOutcome::Rejected(_) => None,
        }
    }
}

/// Sends a completed booking somewhere. `submitted_at` is the wizard clock's
/// reading when the user confirmed.
#[async_trait]
pub trait BookingDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        snapshot: &BookingSnapshot,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt>;
}

/// Downstream collaborator told about each booking (email, CRM, ...).
pub trait BookingNotifier: Send + Sync {
    fn notify(&self, snapshot: &BookingSnapshot, receipt: &SubmissionReceipt);
}

/// Notifier that only writes the booking to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl BookingNotifier for LogNotifier {
    fn notify(&self, snapshot: &BookingSnapshot, receipt: &SubmissionReceipt) {
        info!(
            reference = %receipt.reference,
            fields = ?snapshot,
            "booking notification would be sent"
        );
    }
}

pub struct SimulatedDispatcher {
    delay: Duration,
    notifier: Arc<dyn BookingNotifier>,
}

impl SimulatedDispatcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn BookingNotifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

#[async_trait]
impl BookingDispatcher for SimulatedDispatcher {
    async fn dispatch(
        &self,
        snapshot: &BookingSnapshot,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt> {
        tokio::time::sleep(self.delay).await;
        let receipt = SubmissionReceipt::new(snapshot, submitted_at);
        self.notifier.notify(snapshot, &receipt);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    fn confirmed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<BookingSnapshot>>,
    }

    impl BookingNotifier for RecordingNotifier {
        fn notify(&self, snapshot: &BookingSnapshot, _receipt: &SubmissionReceipt) {
            self.seen.lock().unwrap().push(snapshot.clone());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_dispatch_waits_then_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = SimulatedDispatcher::from_millis(2000).with_notifier(notifier.clone());
        let snapshot: BookingSnapshot = [("firstName", "Ada")].into_iter().collect();

        let started = tokio::time::Instant::now();
        let receipt = dispatcher.dispatch(&snapshot, confirmed_at()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert_eq!(receipt.field_count, 1);
        assert_eq!(receipt.submitted_at, confirmed_at());
        assert_eq!(notifier.seen.lock().unwrap().as_slice(), &[snapshot]);
    }

    #[tokio::test]
    async fn receipts_get_distinct_references() {
        let dispatcher = SimulatedDispatcher::from_millis(0);
        let snapshot = BookingSnapshot::new();
        let first = dispatcher.dispatch(&snapshot, confirmed_at()).await.unwrap();
        let second = dispatcher.dispatch(&snapshot, confirmed_at()).await.unwrap();
        assert_ne!(first.reference, second.reference);
    }
}
