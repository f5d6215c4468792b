//! Defines the budget entry model and its enumerated fields.

use std::{fmt, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Alias for the integer type used for entry IDs.
pub type EntryId = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a label read from storage, where an unrecognised label is treated
/// as missing.
pub(crate) fn parse_stored_label<T: FromStr<Err = UnknownLabel>>(label: &str) -> Option<T> {
    label
        .parse()
        .inspect_err(|error| tracing::warn!("Ignoring stored label: {error}"))
        .ok()
}

/// Parse a date read from storage, where anything other than a `YYYY-MM-DD`
/// date is treated as missing.
pub(crate) fn parse_stored_date(text: &str) -> Option<Date> {
    Date::parse(text, ISO_DATE)
        .inspect_err(|error| tracing::warn!("Ignoring stored date {text:?}: {error}"))
        .ok()
}

/// Read a stored value as text, whatever JSON type it was written as.
fn stored_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownLabel>,
{
    Ok(stored_text(deserializer)?.and_then(|label| parse_stored_label(&label)))
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    Ok(stored_text(deserializer)?.and_then(|text| parse_stored_date(&text)))
}

/// A label that does not name any variant of a labelled enum.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a recognised value")]
pub struct UnknownLabel(pub String);

/// Declares an enum whose variants are written as human readable labels,
/// both in forms and in storage.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label shown to users and written to storage.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(label: &str) -> Result<Self, Self::Err> {
                match label {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel(other.to_owned())),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }
    };
}

labelled_enum! {
    /// What an entry's money was spent on.
    Category {
        Food => "Food",
        Bills => "Bills",
        Housing => "Housing",
        Entertainment => "Entertainment",
        Transport => "Transport",
        Savings => "Savings",
        Other => "Other",
    }
}

labelled_enum! {
    /// How an entry was paid for.
    PaymentMethod {
        CreditCard => "Credit Card",
        DebitCard => "Debit Card",
        Cash => "Cash",
        BankTransfer => "Bank Transfer",
    }
}

labelled_enum! {
    /// The progress of an entry.
    ///
    /// A full edit may set any status, the toggle action only ever produces
    /// [Status::Pending] or [Status::Completed].
    Status {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        Completed => "Completed",
        OnHold => "On Hold",
        Cancelled => "Cancelled",
        Pending => "Pending",
    }
}

/// The amount of an entry as it was stored.
///
/// Entries written by other clients may hold text where a number belongs, so
/// the raw value is kept and only coerced when a number is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A numeric amount.
    Number(f64),
    /// An amount stored as text, which may or may not hold a number.
    Text(String),
}

impl Amount {
    /// The numeric value of the amount, or zero if it is not a finite number.
    pub fn value(&self) -> f64 {
        let value = match self {
            Amount::Number(number) => *number,
            Amount::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        };

        if value.is_finite() { value } else { 0.0 }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(number) => write!(f, "{number}"),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Amount::Number(number) => Ok(ToSqlOutput::from(*number)),
            Amount::Text(text) => Ok(ToSqlOutput::from(text.as_str())),
        }
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Real(number) => Ok(Amount::Number(number)),
            ValueRef::Integer(number) => Ok(Amount::Number(number as f64)),
            ValueRef::Text(text) => Ok(Amount::Text(String::from_utf8_lossy(text).into_owned())),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A single budget/expense record.
///
/// Every field other than `id` is optional because stored entries are not
/// guaranteed to be well formed. Entries created through the app always have
/// an amount, date, category, payment method and status. A stored date or
/// label that cannot be parsed is read as missing so that one bad entry does
/// not hide the rest of the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    /// The ID assigned by the entry store.
    pub id: EntryId,
    /// A short title. Only present in entries written by other clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// How much was spent.
    #[serde(default)]
    pub amount: Option<Amount>,
    /// What the money was spent on.
    #[serde(default)]
    pub description: Option<String>,
    /// When the money was spent.
    #[serde(
        default,
        serialize_with = "iso_date::option::serialize",
        deserialize_with = "lenient_date"
    )]
    pub date: Option<Date>,
    /// The spending category.
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: Option<Category>,
    /// How the entry was paid for.
    #[serde(default, deserialize_with = "lenient_label")]
    pub payment_method: Option<PaymentMethod>,
    /// The progress of the entry.
    #[serde(default, deserialize_with = "lenient_label")]
    pub status: Option<Status>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl BudgetEntry {
    /// The amount coerced to a number, with missing or malformed amounts as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.as_ref().map_or(0.0, Amount::value)
    }
}

/// A validated entry that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// How much was spent, always positive.
    pub amount: f64,
    /// What the money was spent on.
    pub description: Option<String>,
    /// When the money was spent.
    pub date: Date,
    /// The spending category.
    pub category: Category,
    /// How the entry was paid for.
    pub payment_method: PaymentMethod,
    /// The initial progress of the entry.
    pub status: Status,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewEntry {
    /// Attach the store assigned `id`.
    pub fn into_entry(self, id: EntryId) -> BudgetEntry {
        BudgetEntry {
            id,
            title: None,
            amount: Some(Amount::Number(self.amount)),
            description: self.description,
            date: Some(self.date),
            category: Some(self.category),
            payment_method: Some(self.payment_method),
            status: Some(self.status),
            notes: self.notes,
        }
    }
}

/// The validated fields of a full edit.
///
/// Fields the edit form does not show (title, payment method and notes) are
/// left as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryUpdate {
    /// The new amount, always positive.
    pub amount: f64,
    /// The new date.
    pub date: Date,
    /// The new description, where `None` clears it.
    pub description: Option<String>,
    /// The new category.
    pub category: Category,
    /// The new status.
    pub status: Status,
}

impl EntryUpdate {
    /// Merge the update into `entry`.
    pub fn apply_to(self, entry: BudgetEntry) -> BudgetEntry {
        BudgetEntry {
            amount: Some(Amount::Number(self.amount)),
            date: Some(self.date),
            description: self.description,
            category: Some(self.category),
            status: Some(self.status),
            ..entry
        }
    }
}
