use std::fmt;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationVerdict};

/// Supported control kinds for booking form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Telephone,
    Date,
    Checkbox,
    Select,
    Textarea,
}

/// Current value of a field: free text for most controls, a flag for
/// checkboxes. Serializes as a bare JSON string or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
}

impl FieldValue {
    /// Empty after trimming, or an unticked checkbox.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Checked(checked) => !checked,
            FieldValue::Text(text) => text.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Checked(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Checked(true) => write!(f, "Yes"),
            FieldValue::Checked(false) => write!(f, "No"),
        }
    }
}

/// Stored value paired with the label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Range of bookable dates relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub earliest_days: i64,
    pub latest_months: u32,
}

impl DateWindow {
    pub fn new(earliest_days: i64, latest_months: u32) -> Self {
        Self {
            earliest_days,
            latest_months,
        }
    }

    /// Inclusive `(earliest, latest)` bounds for the given day.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let earliest = Duration::try_days(self.earliest_days)
            .and_then(|offset| today.checked_add_signed(offset))
            .unwrap_or(if self.earliest_days < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            });
        let latest = today
            .checked_add_months(Months::new(self.latest_months))
            .unwrap_or(NaiveDate::MAX);
        (earliest, latest)
    }
}

/// Declarative description of a single form field and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<SelectOption>,
    pub date_window: Option<DateWindow>,
    value: FieldValue,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: true,
            options: Vec::new(),
            date_window: None,
            value: empty_value(kind),
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_options(mut self, pairs: &[(&str, &str)]) -> Self {
        self.options = pairs
            .iter()
            .map(|(value, label)| SelectOption {
                value: (*value).to_string(),
                label: (*label).to_string(),
            })
            .collect();
        self
    }

    pub fn with_date_window(mut self, window: DateWindow) -> Self {
        self.date_window = Some(window);
        self
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Assigns a value, coercing text into a flag for checkboxes.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = match (self.kind, value) {
            (FieldKind::Checkbox, FieldValue::Text(text)) => {
                let normalized = text.trim().to_ascii_lowercase();
                FieldValue::Checked(matches!(normalized.as_str(), "on" | "true" | "yes" | "1"))
            }
            (_, value) => value,
        };
    }

    pub fn clear(&mut self) {
        self.value = empty_value(self.kind);
    }

    /// Label of the option matching `raw`, or `raw` itself when the field has
    /// no such option.
    pub fn display_value(&self, raw: &str) -> String {
        self.options
            .iter()
            .find(|option| option.value == raw)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn validate(&self, today: NaiveDate) -> ValidationVerdict {
        let verdict = validation::validate(self.kind, self.required, &self.label, &self.value);
        if !verdict.valid {
            return verdict;
        }
        match (self.date_window, self.value.as_text()) {
            (Some(window), Some(text)) if !text.trim().is_empty() => {
                validation::check_date_window(text, &window, today)
            }
            _ => verdict,
        }
    }
}

fn empty_value(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Checkbox => FieldValue::Checked(false),
        _ => FieldValue::default(),
    }
}
