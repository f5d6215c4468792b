//! Entry deletion endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;
use serde::Deserialize;

use crate::{
    Error,
    alert::Alert,
    dashboard::dashboard_content_view,
    endpoints,
    entry::{EntryEndpointState, EntryId},
    store,
};

/// Where to go once the entry has been deleted.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// The search term to keep when refreshing the dashboard content.
    #[serde(default)]
    pub search: String,
    /// Redirect here instead of returning the refreshed dashboard content.
    pub redirect_url: Option<String>,
}

/// Handle entry deletion.
///
/// Returns the refreshed dashboard content with a success alert, or an
/// htmx redirect when `redirect_url` is given. Only paths on this site are
/// followed, anything else redirects to the dashboard.
pub async fn delete_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<EntryEndpointState>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let mut store = match store::lock(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = store.delete(entry_id) {
        if error != Error::NotFound {
            tracing::error!("An unexpected error occurred while deleting entry {entry_id}: {error}");
        }

        return error.into_alert_response();
    }

    tracing::info!("Deleted entry {entry_id}");

    if let Some(redirect_url) = query.redirect_url {
        let redirect_url = if is_local_path(&redirect_url) {
            redirect_url
        } else {
            tracing::warn!("Ignoring non-local redirect URL {redirect_url:?}");
            endpoints::DASHBOARD_VIEW.to_owned()
        };

        return (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response();
    }

    let entries = match store.list() {
        Ok(entries) => entries,
        Err(error) => return error.into_alert_response(),
    };

    let alert = Alert::Success {
        message: "Entry deleted".to_owned(),
        details: String::new(),
    };

    Html(
        html! {
            (dashboard_content_view(&entries, &query.search))
            (alert.into_oob_html())
        }
        .into_string(),
    )
    .into_response()
}

fn is_local_path(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

#[cfg(test)]
mod delete_entry_endpoint_tests {
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        endpoints,
        entry::{Category, EntryEndpointState, NewEntry, PaymentMethod, Status},
        error::ENTRIES_CHANGED_EVENT,
        store::{SqliteEntryStore, share},
        test_utils::{assert_hx_redirect, assert_valid_html, get_header, parse_html_fragment},
    };

    use super::{DeleteQuery, delete_entry_endpoint};

    fn get_state() -> EntryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        EntryEndpointState {
            store: share(SqliteEntryStore::new(connection).expect("Could not create entry table")),
        }
    }

    fn new_entry(amount: f64, category: Category) -> NewEntry {
        NewEntry {
            amount,
            description: None,
            date: date!(2025 - 01 - 15),
            category,
            payment_method: PaymentMethod::Cash,
            status: Status::Pending,
            notes: None,
        }
    }

    #[tokio::test]
    async fn returns_refreshed_content_without_entry() {
        let state = get_state();
        let (food, bills) = {
            let mut store = state.store.lock().unwrap();
            (
                store.create(new_entry(20.0, Category::Food)).unwrap(),
                store.create(new_entry(30.0, Category::Bills)).unwrap(),
            )
        };

        let response = delete_entry_endpoint(
            Path(food.id),
            State(state.clone()),
            Query(DeleteQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let rows = html
            .select(&Selector::parse("tbody tr").unwrap())
            .count();
        assert_eq!(rows, 1);
        let alert = html
            .select(&Selector::parse("#alert-container[hx-swap-oob] p").unwrap())
            .next()
            .expect("No success alert found");
        assert_eq!(alert.text().collect::<String>(), "Entry deleted");

        let remaining = state.store.lock().unwrap().list().unwrap();
        assert_eq!(remaining, vec![bills]);
    }

    #[tokio::test]
    async fn redirects_when_asked() {
        let state = get_state();
        let entry = state
            .store
            .lock()
            .unwrap()
            .create(new_entry(20.0, Category::Food))
            .unwrap();

        let response = delete_entry_endpoint(
            Path(entry.id),
            State(state),
            Query(DeleteQuery {
                search: String::new(),
                redirect_url: Some(endpoints::DASHBOARD_VIEW.to_owned()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn does_not_redirect_off_site() {
        let state = get_state();
        let entry = state
            .store
            .lock()
            .unwrap()
            .create(new_entry(20.0, Category::Food))
            .unwrap();

        let response = delete_entry_endpoint(
            Path(entry.id),
            State(state),
            Query(DeleteQuery {
                search: String::new(),
                redirect_url: Some("//evil.example.com".to_owned()),
            }),
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let state = get_state();
        let entry = state
            .store
            .lock()
            .unwrap()
            .create(new_entry(20.0, Category::Food))
            .unwrap();
        delete_entry_endpoint(
            Path(entry.id),
            State(state.clone()),
            Query(DeleteQuery::default()),
        )
        .await;

        let response =
            delete_entry_endpoint(Path(entry.id), State(state), Query(DeleteQuery::default()))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(get_header(&response, "hx-trigger"), ENTRIES_CHANGED_EVENT);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
    }
}
