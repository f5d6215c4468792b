//! The endpoint behind the status button in the dashboard table.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    aggregation::toggle_status,
    dashboard::dashboard_content_view,
    entry::{BudgetEntry, EntryEndpointState, EntryId, SearchQuery},
    store,
};

/// Flip an entry between pending and completed and return the refreshed
/// dashboard content.
pub async fn toggle_status_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<EntryEndpointState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match toggle_and_list(entry_id, &state) {
        Ok(entries) => dashboard_content_view(&entries, &query.search).into_response(),
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not toggle the status of entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn toggle_and_list(
    entry_id: EntryId,
    state: &EntryEndpointState,
) -> Result<Vec<BudgetEntry>, Error> {
    let mut store = store::lock(&state.store)?;

    let entry = toggle_status(store.get(entry_id)?);
    store.set_status(entry_id, entry.status)?;
    tracing::info!("Set status of entry {entry_id} to {:?}", entry.status);

    store.list()
}
