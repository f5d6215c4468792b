//! Required-field checks for the create and edit forms.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::entry::{BudgetEntry, Category, EntryUpdate, NewEntry, PaymentMethod, Status};

/// A form field that failed validation and why.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The form input name.
    pub field: &'static str,
    /// The message shown under the input.
    pub message: &'static str,
}

/// Every field error found in a single form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// The error message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The number of fields that failed validation.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.errors.iter().map(|error| error.message).collect();
        f.write_str(&messages.join(" "))
    }
}

/// The raw values submitted by the create and edit forms.
///
/// Values are kept as text so that an invalid submission can be shown back
/// to the user exactly as they typed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFormData {
    /// The amount as typed, e.g. "12.50".
    #[serde(default)]
    pub amount: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// The date in `YYYY-MM-DD` format.
    #[serde(default)]
    pub date: String,
    /// A [Category] label.
    #[serde(default)]
    pub category: String,
    /// A [PaymentMethod] label. Not part of the edit form.
    #[serde(default)]
    pub payment_method: String,
    /// A [Status] label.
    #[serde(default)]
    pub status: String,
    /// Optional notes. Not part of the edit form.
    #[serde(default)]
    pub notes: String,
}

impl EntryFormData {
    /// Check the fields needed to create an entry.
    ///
    /// # Errors
    /// Returns every missing or invalid field at once.
    pub fn validate_new(&self) -> Result<NewEntry, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let amount = parse_amount(&self.amount, &mut errors);
        let date = parse_date(&self.date, &mut errors);
        let category = parse_label::<Category>(
            &self.category,
            "category",
            "Category is required.",
            &mut errors,
        );
        let payment_method = parse_label::<PaymentMethod>(
            &self.payment_method,
            "payment_method",
            "Payment Method is required.",
            &mut errors,
        );
        let status = parse_label::<Status>(&self.status, "status", "Status is required.", &mut errors);

        match (amount, date, category, payment_method, status) {
            (Some(amount), Some(date), Some(category), Some(payment_method), Some(status))
                if errors.is_empty() =>
            {
                Ok(NewEntry {
                    amount,
                    description: optional_text(&self.description),
                    date,
                    category,
                    payment_method,
                    status,
                    notes: optional_text(&self.notes),
                })
            }
            _ => Err(errors),
        }
    }

    /// Check the fields shown on the edit form.
    ///
    /// # Errors
    /// Returns every missing or invalid field at once.
    pub fn validate_update(&self) -> Result<EntryUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let amount = parse_amount(&self.amount, &mut errors);
        let date = parse_date(&self.date, &mut errors);
        let category = parse_label::<Category>(
            &self.category,
            "category",
            "Category is required.",
            &mut errors,
        );
        let status = parse_label::<Status>(&self.status, "status", "Status is required.", &mut errors);

        match (amount, date, category, status) {
            (Some(amount), Some(date), Some(category), Some(status)) if errors.is_empty() => {
                Ok(EntryUpdate {
                    amount,
                    date,
                    description: optional_text(&self.description),
                    category,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&BudgetEntry> for EntryFormData {
    fn from(entry: &BudgetEntry) -> Self {
        Self {
            amount: entry
                .amount
                .as_ref()
                .map(|amount| amount.to_string())
                .unwrap_or_default(),
            description: entry.description.clone().unwrap_or_default(),
            date: entry.date.map(|date| date.to_string()).unwrap_or_default(),
            category: label_or_empty(entry.category.map(|category| category.as_str())),
            payment_method: label_or_empty(entry.payment_method.map(|method| method.as_str())),
            status: label_or_empty(entry.status.map(|status| status.as_str())),
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }
}

fn label_or_empty(label: Option<&str>) -> String {
    label.unwrap_or_default().to_owned()
}

fn optional_text(text: &str) -> Option<String> {
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

fn parse_amount(raw: &str, errors: &mut ValidationErrors) -> Option<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.add("amount", "Amount is required.");
        return None;
    }

    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
        _ => {
            errors.add("amount", "Amount must be a non-negative number.");
            None
        }
    }
}

fn parse_date(raw: &str, errors: &mut ValidationErrors) -> Option<Date> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.add("date", "Date is required.");
        return None;
    }

    match Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add("date", "Date must be a valid date.");
            None
        }
    }
}

fn parse_label<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    message: &'static str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}
