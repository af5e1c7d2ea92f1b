use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::resource::Lookup;
use crate::validation::{Rule, DATE_FORMAT};

/// Input widget used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Checkbox,
    /// Foreign key picked from the records of another resource
    Select(Lookup),
    /// Fixed `(value, label)` options
    Choice(&'static [(&'static str, &'static str)]),
}

/// Declarative description of one form field and its constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        rules: &'static [Rule],
    ) -> Self {
        Self {
            name,
            label,
            kind,
            rules,
        }
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Raw form state as typed by the user.
///
/// An `id` means the form edits an existing record; without one it creates a new record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityForm {
    pub id: Option<i64>,
    pub values: BTreeMap<String, String>,
}

impl EntityForm {
    pub fn for_record(id: i64) -> Self {
        Self {
            id: Some(id),
            values: BTreeMap::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Builder form of [`EntityForm::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.set(field, value.to_string());
        self
    }

    /// Store an optional foreign key; `None` leaves the select empty
    pub fn with_opt(self, field: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with(field, v),
            None => self,
        }
    }

    pub fn text(&self, field: &str) -> String {
        self.get(field).trim().to_string()
    }

    /// Trimmed text, or `None` when blank
    pub fn opt_text(&self, field: &str) -> Option<String> {
        Some(self.text(field)).filter(|v| !v.is_empty())
    }

    pub fn is_checked(&self, field: &str) -> bool {
        matches!(self.get(field).trim(), "true" | "on" | "1")
    }

    pub fn parse_i64(&self, field: &str) -> Result<i64> {
        let raw = self.get(field).trim();
        raw.parse::<i64>()
            .with_context(|| format!("Field '{}' is not a whole number: '{}'", field, raw))
    }

    pub fn parse_opt_i64(&self, field: &str) -> Result<Option<i64>> {
        if self.get(field).trim().is_empty() {
            return Ok(None);
        }
        self.parse_i64(field).map(Some)
    }

    pub fn parse_f64(&self, field: &str) -> Result<f64> {
        let raw = self.get(field).trim();
        let value = raw
            .parse::<f64>()
            .with_context(|| format!("Field '{}' is not a number: '{}'", field, raw))?;
        if !value.is_finite() {
            return Err(anyhow!("Field '{}' is not a finite number", field));
        }
        Ok(value)
    }

    pub fn parse_date(&self, field: &str) -> Result<NaiveDate> {
        let raw = self.get(field).trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .with_context(|| format!("Field '{}' is not a YYYY-MM-DD date: '{}'", field, raw))
    }
}
