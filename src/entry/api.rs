use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    aggregation::filter,
    entry::{EntryEndpointState, SearchQuery},
    store,
};

/// List the entries matching the `search` query parameter as JSON.
pub async fn list_entries_endpoint(
    State(state): State<EntryEndpointState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let entries = match store::lock(&state.store).and_then(|store| store.list()) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::error!("Could not list entries: {error}");
            return error.into_alert_response();
        }
    };

    Json(filter(&entries, &query.search)).into_response()
}
