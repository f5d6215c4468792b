//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, get_edit_entry_page, get_new_entry_page,
        list_entries_endpoint, toggle_status_endpoint, update_entry_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_ENTRY_VIEW, get(get_new_entry_page))
        .route(endpoints::EDIT_ENTRY_VIEW, get(get_edit_entry_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::ENTRIES_API,
            get(list_entries_endpoint).post(create_entry_endpoint),
        )
        .route(
            endpoints::ENTRY_API,
            put(update_entry_endpoint).delete(delete_entry_endpoint),
        )
        .route(endpoints::ENTRY_STATUS_API, post(toggle_status_endpoint));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use serde_json::Value;

    use crate::{
        AppState, endpoints,
        error::ENTRIES_CHANGED_EVENT,
        store::{LocalEntryStore, SqliteEntryStore, share},
    };

    use super::build_router;

    fn sqlite_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let store = share(SqliteEntryStore::new(connection).expect("Could not create entry table"));
        let state = AppState::new(store, "Etc/UTC").expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn entry_form<'a>(amount: &'a str, category: &'a str, status: &'a str) -> [(&'a str, &'a str); 6] {
        [
            ("amount", amount),
            ("description", "Something"),
            ("date", "2025-01-15"),
            ("category", category),
            ("payment_method", "Cash"),
            ("status", status),
        ]
    }

    async fn list_entries(server: &TestServer, search: &str) -> Vec<Value> {
        server
            .get(endpoints::ENTRIES_API)
            .add_query_param("search", search)
            .await
            .json::<Vec<Value>>()
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = sqlite_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = sqlite_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn create_then_search_then_toggle_then_delete() {
        let server = sqlite_server();

        for (amount, category, status) in [("20", "Food", "Pending"), ("30", "Bills", "Completed")]
        {
            let response = server
                .post(endpoints::ENTRIES_API)
                .form(&entry_form(amount, category, status))
                .await;
            response.assert_status_see_other();
            assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);
        }

        let food = list_entries(&server, "food").await;
        assert_eq!(food.len(), 1);
        let food_id = food[0]["id"].as_i64().expect("entry should have an ID");

        let toggled = server
            .post(&endpoints::format_endpoint(endpoints::ENTRY_STATUS_API, food_id))
            .await;
        toggled.assert_status_ok();
        let food = list_entries(&server, "food").await;
        assert_eq!(food[0]["status"], "Completed");

        server
            .delete(&endpoints::format_endpoint(endpoints::ENTRY_API, food_id))
            .await
            .assert_status_ok();
        let remaining = list_entries(&server, "").await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["category"], "Bills");

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::ENTRY_API, food_id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.header("hx-trigger"), ENTRIES_CHANGED_EVENT);
    }

    #[tokio::test]
    async fn edit_page_and_update_round_trip() {
        let server = sqlite_server();
        server
            .post(endpoints::ENTRIES_API)
            .form(&entry_form("12", "Transport", "Not Started"))
            .await
            .assert_status_see_other();
        let id = list_entries(&server, "").await[0]["id"]
            .as_i64()
            .expect("entry should have an ID");

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, id))
            .await
            .assert_status_ok();

        server
            .put(&endpoints::format_endpoint(endpoints::ENTRY_API, id))
            .form(&[
                ("amount", "14.5"),
                ("date", "2025-01-16"),
                ("category", "Transport"),
                ("status", "In Progress"),
            ])
            .await
            .assert_status_see_other();

        let entries = list_entries(&server, "").await;
        assert_eq!(entries[0]["amount"], 14.5);
        assert_eq!(entries[0]["status"], "In Progress");
        assert_eq!(entries[0]["paymentMethod"], "Cash");
    }

    #[tokio::test]
    async fn missing_edit_page_is_not_found() {
        let server = sqlite_server();

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, 404))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn htmx_dashboard_request_gets_partial() {
        let server = sqlite_server();
        server
            .post(endpoints::ENTRIES_API)
            .form(&entry_form("20", "Food", "Pending"))
            .await
            .assert_status_see_other();

        let full_page = server.get(endpoints::DASHBOARD_VIEW).await.text();
        let partial = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_header("HX-Request", "true")
            .await
            .text();

        let nav = Selector::parse("nav").unwrap();
        assert!(Html::parse_document(&full_page).select(&nav).next().is_some());
        assert!(Html::parse_fragment(&partial).select(&nav).next().is_none());
    }

    #[tokio::test]
    async fn local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let state = AppState::new(share(LocalEntryStore::new(&path)), "Etc/UTC")
            .expect("Could not create app state");
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        server
            .post(endpoints::ENTRIES_API)
            .form(&entry_form("9.99", "Entertainment", "Pending"))
            .await
            .assert_status_see_other();

        let document: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["budgetEntries"][0]["category"], "Entertainment");
        assert_eq!(list_entries(&server, "").await.len(), 1);
    }
}
