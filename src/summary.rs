//! Read-only recap of a booking shown before final confirmation.

use crate::form::{BookingForm, BookingSnapshot, FieldValue};

pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SummarySource {
    Field(String),
    Joined { fields: Vec<String>, separator: String },
}

/// One line of the recap and where its value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    label: String,
    source: SummarySource,
    fallback: String,
    omit_when_empty: bool,
}

impl SummaryItem {
    pub fn field(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: SummarySource::Field(name.into()),
            fallback: NOT_SPECIFIED.into(),
            omit_when_empty: false,
        }
    }

    /// Several fields rendered on one line, e.g. first and last name.
    pub fn joined(label: impl Into<String>, names: &[&str], separator: &str) -> Self {
        Self {
            label: label.into(),
            source: SummarySource::Joined {
                fields: names.iter().map(|name| (*name).to_string()).collect(),
                separator: separator.to_string(),
            },
            fallback: NOT_SPECIFIED.into(),
            omit_when_empty: false,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Drop the line entirely instead of showing the fallback.
    pub fn omit_when_empty(mut self) -> Self {
        self.omit_when_empty = true;
        self
    }

    fn resolve(&self, snapshot: &BookingSnapshot, form: &BookingForm) -> Option<String> {
        match &self.source {
            SummarySource::Field(name) => display(snapshot, form, name),
            SummarySource::Joined { fields, separator } => {
                let parts: Vec<String> = fields
                    .iter()
                    .filter_map(|name| display(snapshot, form, name))
                    .collect();
                let joined = parts.join(separator);
                let trimmed = joined.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

fn display(snapshot: &BookingSnapshot, form: &BookingForm, name: &str) -> Option<String> {
    match snapshot.get(name)? {
        value if value.is_blank() => None,
        FieldValue::Text(text) => Some(form.display_value(name, text.trim())),
        flag => Some(flag.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

/// Snapshot of collected data displayed before final confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSummary {
    pub entries: Vec<SummaryEntry>,
}

impl BookingSummary {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryProjector {
    items: Vec<SummaryItem>,
}

impl SummaryProjector {
    pub fn new(items: Vec<SummaryItem>) -> Self {
        Self { items }
    }

    pub fn project(&self, snapshot: &BookingSnapshot, form: &BookingForm) -> BookingSummary {
        let entries = self
            .items
            .iter()
            .filter_map(|item| match item.resolve(snapshot, form) {
                Some(value) => Some(SummaryEntry {
                    label: item.label.clone(),
                    value,
                }),
                None if item.omit_when_empty => None,
                None => Some(SummaryEntry {
                    label: item.label.clone(),
                    value: item.fallback.clone(),
                }),
            })
            .collect();
        BookingSummary { entries }
    }
}

pub fn format_summary_lines(summary: &BookingSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Review your booking:".into());
    for entry in &summary.entries {
        lines.push(format!("  {}: {}", entry.label, entry.value));
    }
    lines
}
