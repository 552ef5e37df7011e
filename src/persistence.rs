//! Mirrors the in-progress booking into local storage so a reload does not
//! lose what the user typed.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    errors::Result,
    form::{BookingForm, BookingSnapshot, FieldValue},
    storage::LocalStorage,
};

pub struct PersistenceMirror {
    storage: Box<dyn LocalStorage>,
    key: String,
}

impl PersistenceMirror {
    pub fn new(storage: Box<dyn LocalStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Overwrites the stored draft with `snapshot`.
    pub fn save(&self, snapshot: &BookingSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.storage.set_item(&self.key, &json)?;
        debug!(key = %self.key, fields = snapshot.len(), "saved booking draft");
        Ok(())
    }

    /// Last saved draft. Missing, unreadable or malformed data yields an empty
    /// snapshot; the cause is only logged. Entries that are not a string, number
    /// or flag are dropped one by one, keeping the rest of the draft.
    pub fn load(&self) -> BookingSnapshot {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BookingSnapshot::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read saved booking draft");
                return BookingSnapshot::new();
            }
        };
        let entries: BTreeMap<String, Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.key, error = %err, "error loading saved booking draft");
                return BookingSnapshot::new();
            }
        };
        entries
            .into_iter()
            .filter_map(|(name, value)| match stored_value(value) {
                Some(value) => Some((name, value)),
                None => {
                    debug!(key = %self.key, field = %name, "skipping unsupported draft value");
                    None
                }
            })
            .collect()
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }

    /// Loads the saved draft into `form`, returning how many fields it filled.
    pub fn restore_into(&self, form: &mut BookingForm) -> usize {
        let restored = form.restore(&self.load());
        if restored > 0 {
            debug!(key = %self.key, restored, "restored booking draft");
        }
        restored
    }
}

fn stored_value(value: Value) -> Option<FieldValue> {
    match value {
        Value::String(text) => Some(FieldValue::Text(text)),
        Value::Bool(flag) => Some(FieldValue::Checked(flag)),
        Value::Number(number) => Some(FieldValue::Text(number.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Trailing debounce for draft saves: an edit arms the timer, further edits
/// push it back, and the save fires once the interval passes quietly.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    interval: Duration,
    pending_since: Option<DateTime<Utc>>,
}

impl SaveDebouncer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::milliseconds(interval_ms.min(u64::from(u32::MAX)) as i64),
            pending_since: None,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Returns true (and disarms) when a save is due at `now`.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending_since {
            Some(since) if now - since >= self.interval => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn mirror(storage: &MemoryStorage) -> PersistenceMirror {
        PersistenceMirror::new(Box::new(storage.clone()), "draft")
    }

    #[test]
    fn save_then_load_round_trips() {
        let storage = MemoryStorage::new();
        let mirror = mirror(&storage);
        let snapshot: BookingSnapshot = [
            ("firstName", FieldValue::from("Ada")),
            ("termsAccepted", FieldValue::from(true)),
        ]
        .into_iter()
        .collect();
        mirror.save(&snapshot).unwrap();
        assert_eq!(mirror.load(), snapshot);
    }

    #[test]
    fn save_overwrites_previous_draft() {
        let storage = MemoryStorage::new();
        let mirror = mirror(&storage);
        mirror.save(&[("a", "1")].into_iter().collect()).unwrap();
        mirror.save(&[("b", "2")].into_iter().collect()).unwrap();
        let loaded = mirror.load();
        assert_eq!(loaded.get("a"), None);
        assert_eq!(loaded.text("b"), "2");
    }

    #[test]
    fn corrupt_data_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set_item("draft", "{ definitely not json").unwrap();
        assert!(mirror(&storage).load().is_empty());
        storage.set_item("draft", "[1, 2, 3]").unwrap();
        assert!(mirror(&storage).load().is_empty());
    }

    #[test]
    fn unsupported_entries_are_skipped_not_fatal() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "draft",
                r#"{"firstName":"Ada","age":null,"guests":3,"notes":["x"],"termsAccepted":true}"#,
            )
            .unwrap();
        let loaded = mirror(&storage).load();
        assert_eq!(loaded.text("firstName"), "Ada");
        assert_eq!(loaded.text("guests"), "3");
        assert_eq!(loaded.get("termsAccepted"), Some(&FieldValue::Checked(true)));
        assert_eq!(loaded.get("age"), None);
        assert_eq!(loaded.get("notes"), None);
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn clear_removes_entry() {
        let storage = MemoryStorage::new();
        let mirror = mirror(&storage);
        mirror.save(&[("a", "1")].into_iter().collect()).unwrap();
        mirror.clear().unwrap();
        assert!(storage.is_empty());
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn debouncer_waits_for_quiet_interval() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let mut debouncer = SaveDebouncer::new(500);
        assert!(!debouncer.take_due(start));

        debouncer.touch(start);
        assert!(!debouncer.take_due(start + Duration::milliseconds(300)));
        debouncer.touch(start + Duration::milliseconds(300));
        assert!(!debouncer.take_due(start + Duration::milliseconds(700)));
        assert!(debouncer.take_due(start + Duration::milliseconds(800)));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.take_due(start + Duration::milliseconds(2000)));
    }
}
