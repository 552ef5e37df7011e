//! Syntactic checks applied to a single field value. Nothing here touches the
//! presenter, so verdicts can be computed and asserted on in isolation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::field::{DateWindow, FieldKind, FieldValue};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("valid phone pattern"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Applies the required, email and telephone rules in that order; the first
/// failing rule decides the message.
pub fn validate(
    kind: FieldKind,
    required: bool,
    label: &str,
    value: &FieldValue,
) -> ValidationVerdict {
    if required && value.is_blank() {
        return ValidationVerdict::invalid(format!("{} is required", label));
    }

    let text = value.as_text().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return ValidationVerdict::valid();
    }

    match kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(text) => {
            ValidationVerdict::invalid(INVALID_EMAIL)
        }
        FieldKind::Telephone if !PHONE_PATTERN.is_match(text) => {
            ValidationVerdict::invalid(INVALID_PHONE)
        }
        _ => ValidationVerdict::valid(),
    }
}

/// Checks that a non-empty date value parses and falls inside the booking
/// window for `today`.
pub fn check_date_window(value: &str, window: &DateWindow, today: NaiveDate) -> ValidationVerdict {
    let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") else {
        return ValidationVerdict::invalid("Use YYYY-MM-DD format");
    };
    let (earliest, latest) = window.bounds(today);
    if date < earliest {
        ValidationVerdict::invalid(format!(
            "Date must be on or after {}",
            earliest.format("%Y-%m-%d")
        ))
    } else if date > latest {
        ValidationVerdict::invalid(format!(
            "Date cannot be after {}",
            latest.format("%Y-%m-%d")
        ))
    } else {
        ValidationVerdict::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FieldValue {
        FieldValue::from(value)
    }

    #[test]
    fn required_rejects_blank_and_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            let verdict = validate(FieldKind::Text, true, "First Name", &text(raw));
            assert!(!verdict.valid);
            assert_eq!(verdict.message.as_deref(), Some("First Name is required"));
        }
        assert!(validate(FieldKind::Text, true, "First Name", &text("Ada")).valid);
    }

    #[test]
    fn optional_blank_is_valid_for_every_kind() {
        for kind in [FieldKind::Email, FieldKind::Telephone, FieldKind::Date, FieldKind::Select] {
            assert!(validate(kind, false, "Optional", &text("")).valid);
        }
    }

    #[test]
    fn unchecked_required_checkbox_is_blank() {
        let verdict = validate(FieldKind::Checkbox, true, "Terms", &FieldValue::Checked(false));
        assert_eq!(verdict.message.as_deref(), Some("Terms is required"));
        assert!(validate(FieldKind::Checkbox, true, "Terms", &FieldValue::Checked(true)).valid);
    }

    #[test]
    fn email_pattern() {
        assert!(validate(FieldKind::Email, true, "Email", &text("user@example.com")).valid);
        assert!(validate(FieldKind::Email, true, "Email", &text("  user@example.com ")).valid);
        for bad in ["not-an-email", "user@example", "us er@example.com", "a@b@c.com"] {
            let verdict = validate(FieldKind::Email, true, "Email", &text(bad));
            assert_eq!(verdict.message.as_deref(), Some(INVALID_EMAIL), "{bad}");
        }
    }

    #[test]
    fn phone_pattern() {
        for good in ["+61 400 123 456", "(02) 9876-5432", "0400123456"] {
            assert!(validate(FieldKind::Telephone, true, "Phone", &text(good)).valid, "{good}");
        }
        for bad in ["12345", "0400 abc 456", "++61400123456"] {
            let verdict = validate(FieldKind::Telephone, true, "Phone", &text(bad));
            assert_eq!(verdict.message.as_deref(), Some(INVALID_PHONE), "{bad}");
        }
    }

    #[test]
    fn required_rule_wins_over_pattern_rules() {
        let verdict = validate(FieldKind::Email, true, "Email Address", &text(" "));
        assert_eq!(verdict.message.as_deref(), Some("Email Address is required"));
    }

    #[test]
    fn date_window_rules() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let window = DateWindow::new(1, 6);
        assert!(check_date_window("2025-01-02", &window, today).valid);
        assert!(check_date_window("2025-07-01", &window, today).valid);
        assert_eq!(
            check_date_window("2025-01-01", &window, today).message.as_deref(),
            Some("Date must be on or after 2025-01-02")
        );
        assert_eq!(
            check_date_window("2025-07-02", &window, today).message.as_deref(),
            Some("Date cannot be after 2025-07-01")
        );
        assert_eq!(
            check_date_window("01/02/2025", &window, today).message.as_deref(),
            Some("Use YYYY-MM-DD format")
        );
    }
}
