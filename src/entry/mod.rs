//! Budget entries: the model, form validation and the pages and endpoints
//! for creating, editing, toggling and deleting them.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod toggle;
mod validation;

use axum::extract::FromRef;
use serde::Deserialize;

pub use api::list_entries_endpoint;
pub use create::{create_entry_endpoint, get_new_entry_page};
pub use delete::delete_entry_endpoint;
pub use domain::{
    Amount, BudgetEntry, Category, EntryId, EntryUpdate, NewEntry, PaymentMethod, Status,
    UnknownLabel,
};
pub(crate) use domain::{parse_stored_date, parse_stored_label};
pub use edit::{get_edit_entry_page, update_entry_endpoint};
pub use toggle::toggle_status_endpoint;
pub use validation::{EntryFormData, FieldError, ValidationErrors};

use crate::{AppState, store::SharedStore};

/// The state needed by the endpoints that read or change entries.
#[derive(Clone)]
pub struct EntryEndpointState {
    pub store: SharedStore,
}

impl FromRef<AppState> for EntryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The search term the dashboard is currently filtered by.
///
/// Endpoints that return the refreshed dashboard content take this so the
/// refreshed view keeps the user's search.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}
