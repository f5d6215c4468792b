//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;

use crate::{
    alert::Alert, entry::ValidationErrors, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The htmx event sent to the page when its view of the entries is stale.
pub const ENTRIES_CHANGED_EVENT: &str = "entries-changed";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A submitted entry is missing required fields or has invalid values.
    ///
    /// Handlers should show these next to the form fields rather than as an
    /// alert, see [ValidationErrors::get].
    #[error("invalid entry: {0}")]
    Validation(ValidationErrors),

    /// The entry store could not be read or written.
    ///
    /// The string describes the underlying failure and should only be
    /// logged, not shown to the client.
    #[error("the entry store is unavailable: {0}")]
    StoreUnavailable(String),

    /// The requested entry was not found.
    ///
    /// For HTTP request handlers, the client should check that the entry ID
    /// is correct and that the entry has not already been deleted.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested entry could not be found")]
    NotFound,

    /// Could not acquire the entry store lock.
    #[error("could not acquire the entry store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StoreUnavailable(error.to_string())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::StoreUnavailable(_) => InternalServerError {
                description: "Could not load your entries",
                fix: "The entry store is unavailable. Try again later or check the server logs.",
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Validation errors are rendered inline by the form handlers.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// [Error::NotFound] also tells the page to reload its entries with the
    /// [ENTRIES_CHANGED_EVENT] trigger.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid entry".to_owned(),
                    details: errors.to_string(),
                },
            ),
            Error::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Alert::Error {
                    message: "Could not reach the entry store".to_owned(),
                    details: "Your changes were not saved. Try again later or check the server logs."
                        .to_owned(),
                },
            ),
            Error::NotFound => {
                let alert = Alert::Error {
                    message: "Entry not found".to_owned(),
                    details: "The entry could not be found. \
                        It may have already been deleted, the list has been refreshed."
                        .to_owned(),
                };

                return (
                    StatusCode::NOT_FOUND,
                    [(
                        HX_TRIGGER,
                        HeaderValue::from_static(ENTRIES_CHANGED_EVENT),
                    )],
                    alert.into_html(),
                )
                    .into_response();
            }
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::StoreLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
