#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use booking_core::{
    config::WizardConfig,
    presenter::InlinePresenter,
    storage::{LocalStorage, MemoryStorage},
    time::Clock,
    BookingWizard,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Clock pinned to 2025-01-01 09:00 UTC that tests move forward by hand.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()),
        })
    }

    pub fn advance_ms(&self, millis: i64) {
        let mut now = self.now.lock().expect("lock clock");
        *now += Duration::milliseconds(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("lock clock")
    }
}

/// Booking wizard over `storage` with the clock pinned by [`ManualClock`].
pub fn wizard_with(
    storage: impl LocalStorage + 'static,
    clock: Arc<ManualClock>,
) -> BookingWizard<InlinePresenter> {
    BookingWizard::new(WizardConfig::default(), InlinePresenter::new(), Box::new(storage))
        .expect("build booking wizard")
        .with_clock(clock)
}

pub fn memory_wizard() -> (BookingWizard<InlinePresenter>, MemoryStorage, Arc<ManualClock>) {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new();
    let wizard = wizard_with(storage.clone(), clock.clone());
    (wizard, storage, clock)
}

pub fn fill_service_details(wizard: &mut BookingWizard<InlinePresenter>) {
    wizard.input("serviceType", "home-cleaning").unwrap();
    wizard.input("serviceFrequency", "weekly").unwrap();
    wizard.input("preferredDate", "2025-01-15").unwrap();
    wizard.input("preferredTime", "morning").unwrap();
}

pub fn fill_contact_details(wizard: &mut BookingWizard<InlinePresenter>) {
    wizard.input("firstName", "Ada").unwrap();
    wizard.input("lastName", "Lovelace").unwrap();
    wizard.input("email", "ada@example.com").unwrap();
    wizard.input("phone", "+61 400 123 456").unwrap();
    wizard.input("address", "12 Analytical Way, Sydney").unwrap();
}
