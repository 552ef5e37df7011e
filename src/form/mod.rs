//! In-memory booking form: the ordered set of fields the wizard edits,
//! validates, snapshots and restores.

pub mod catalog;
pub mod field;
pub mod snapshot;
pub mod validation;

use std::collections::HashSet;

use crate::errors::{BookingError, Result};

pub use field::{DateWindow, FieldKind, FieldValue, FormField, SelectOption};
pub use snapshot::BookingSnapshot;
pub use validation::{validate, ValidationVerdict};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    fields: Vec<FormField>,
}

impl BookingForm {
    /// Builds a form, rejecting duplicate field names.
    pub fn new(fields: Vec<FormField>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BookingError::InvalidTemplate(format!(
                    "duplicate field `{}`",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(FormField::value)
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = self
            .field_mut(name)
            .ok_or_else(|| BookingError::UnknownField(name.to_string()))?;
        field.set_value(value.into());
        Ok(())
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value().clone()))
            .collect()
    }

    /// Copies saved values into matching fields, skipping unknown names and
    /// blank values. Returns how many fields were populated.
    pub fn restore(&mut self, snapshot: &BookingSnapshot) -> usize {
        let mut restored = 0;
        for (name, value) in snapshot.non_empty() {
            if let Some(field) = self.field_mut(name) {
                field.set_value(value.clone());
                restored += 1;
            }
        }
        restored
    }

    /// Clears every field back to its empty value.
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(FormField::clear);
    }

    pub fn display_value(&self, name: &str, raw: &str) -> String {
        self.field(name)
            .map(|field| field.display_value(raw))
            .unwrap_or_else(|| raw.to_string())
    }
}
