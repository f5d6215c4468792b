//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard shows the total spending, a chart of spending by category
//! and a table of the entries matching the search box. Every action in the
//! table swaps a freshly rendered [dashboard_content_view] into
//! `#dashboard-content`.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::summarize,
    dashboard::{
        charts::{CATEGORY_CHART_ID, category_chart, chart_view},
        table::entries_table,
    },
    endpoints,
    entry::{BudgetEntry, SearchQuery},
    error::ENTRIES_CHANGED_EVENT,
    html::{FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, format_currency, link},
    navigation::NavBar,
    store::{self, SharedStore},
};

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The store holding the budget entries.
    pub store: SharedStore,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display the dashboard for the entries matching `search`.
///
/// htmx requests, such as those sent while typing in the search box, only
/// get the dashboard content so the search box keeps its focus.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<SearchQuery>,
) -> Result<Response, Error> {
    let entries = store::lock(&state.store)
        .and_then(|store| store.list())
        .inspect_err(|error| tracing::error!("could not list entries: {error}"));

    let entries = match entries {
        Ok(entries) => entries,
        Err(error) if is_htmx_request => return Ok(error.into_alert_response()),
        Err(error) => return Err(error),
    };

    let content = dashboard_content_view(&entries, &query.search);

    if is_htmx_request {
        return Ok(content.into_response());
    }

    Ok(dashboard_view(&query.search, content).into_response())
}

/// Render the total spending, chart and table for the entries matching
/// `search_term`.
///
/// When there are no entries at all, a prompt to add one is shown instead.
pub(crate) fn dashboard_content_view(entries: &[BudgetEntry], search_term: &str) -> Markup {
    if entries.is_empty() {
        return no_entries_view();
    }

    let summary = summarize(entries, search_term);

    html! {
        section class="w-full mb-4"
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { "Total Spending" }
            p id="total-spending" class="text-3xl font-bold" { (format_currency(summary.total_spending)) }
        }

        @if summary.category_totals.is_empty() {
            p class="mb-4" { "No entries match \"" (search_term) "\"." }
        } @else {
            (chart_view(CATEGORY_CHART_ID, &category_chart(&summary.category_totals)))
        }

        (entries_table(&summary.entries, search_term))
    }
}

fn no_entries_view() -> Markup {
    let new_entry_link = link(endpoints::NEW_ENTRY_VIEW, "adding an entry");

    html! {
        div class="flex flex-col items-center"
        {
            h2 class="text-xl font-bold" { "Nothing here yet" }

            p
            {
                "Your spending will show up here once you have some entries.
                Get started by " (new_entry_link) "."
            }
        }
    }
}

fn dashboard_view(search_term: &str, content: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let refresh_trigger = format!("{ENTRIES_CHANGED_EVENT} from:body");

    let content = html! {
        (nav_bar)

        div class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl" }
        {
            div class="w-full mb-4"
            {
                label for="search" class="sr-only" { "Search entries" }

                input
                    id="search"
                    name="search"
                    type="search"
                    placeholder="Search by title, amount, date, category or status"
                    value=(search_term)
                    hx-get=(endpoints::DASHBOARD_VIEW)
                    hx-trigger="input changed delay:300ms, search"
                    hx-target="#dashboard-content"
                    hx-target-error="#alert-container"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
                id="dashboard-content"
                hx-get=(endpoints::DASHBOARD_VIEW)
                hx-trigger=(refresh_trigger)
                hx-include="#search"
                hx-target-error="#alert-container"
                class="w-full"
            {
                (content)
            }
        }
    };

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod dashboard_page_tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_htmx::HxRequest;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        entry::{Category, NewEntry, PaymentMethod, SearchQuery, Status},
        store::{EntryStore, LocalEntryStore, SqliteEntryStore, share},
        test_utils::{assert_valid_html, parse_html_document, parse_html_fragment},
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_state() -> DashboardState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let mut store = SqliteEntryStore::new(connection).expect("Could not create entry table");

        for (amount, category, status) in [
            (20.0, Category::Food, Status::Pending),
            (30.0, Category::Bills, Status::Completed),
        ] {
            store
                .create(NewEntry {
                    amount,
                    description: None,
                    date: date!(2025 - 01 - 15),
                    category,
                    payment_method: PaymentMethod::Cash,
                    status,
                    notes: None,
                })
                .expect("Could not create test entry");
        }

        DashboardState {
            store: share(store),
        }
    }

    fn search(term: &str) -> Query<SearchQuery> {
        Query(SearchQuery {
            search: term.to_owned(),
        })
    }

    #[track_caller]
    fn total_spending(html: &Html) -> String {
        html.select(&Selector::parse("#total-spending").unwrap())
            .next()
            .expect("No total spending found")
            .text()
            .collect()
    }

    #[track_caller]
    fn row_count(html: &Html) -> usize {
        html.select(&Selector::parse("tbody tr").unwrap()).count()
    }

    #[tokio::test]
    async fn full_page_shows_total_chart_and_table() {
        let response = get_dashboard_page(State(get_state()), HxRequest(false), search(""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(total_spending(&html), "$50.00");
        assert!(
            html.select(&Selector::parse("#category-chart").unwrap())
                .next()
                .is_some()
        );
        assert_eq!(row_count(&html), 2);

        let search_box = html
            .select(&Selector::parse("input#search").unwrap())
            .next()
            .expect("No search box found");
        assert_eq!(search_box.value().attr("hx-get"), Some("/dashboard"));
        let content = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .expect("No dashboard content found");
        assert_eq!(
            content.value().attr("hx-trigger"),
            Some("entries-changed from:body")
        );
    }

    #[tokio::test]
    async fn search_filters_total_and_table() {
        let response = get_dashboard_page(State(get_state()), HxRequest(false), search("food"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(total_spending(&html), "$20.00");
        assert_eq!(row_count(&html), 1);
    }

    #[tokio::test]
    async fn htmx_request_gets_content_only() {
        let response = get_dashboard_page(State(get_state()), HxRequest(true), search("bills"))
            .await
            .unwrap();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(html.select(&Selector::parse("nav").unwrap()).next().is_none());
        assert!(
            html.select(&Selector::parse("input#search").unwrap())
                .next()
                .is_none()
        );
        assert_eq!(total_spending(&html), "$30.00");
    }

    #[tokio::test]
    async fn search_without_matches_shows_zero_total() {
        let response = get_dashboard_page(State(get_state()), HxRequest(true), search("rent"))
            .await
            .unwrap();

        let html = parse_html_fragment(response).await;
        assert_eq!(total_spending(&html), "$0.00");
        assert_eq!(row_count(&html), 0);
        assert!(
            html.select(&Selector::parse("#category-chart").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn empty_store_prompts_to_add_entry() {
        let dir = tempfile::tempdir().unwrap();
        let state = DashboardState {
            store: share(LocalEntryStore::new(dir.path().join("entries.json"))),
        };

        let response = get_dashboard_page(State(state), HxRequest(false), search(""))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let heading = html
            .select(&Selector::parse("#dashboard-content h2").unwrap())
            .next()
            .expect("No heading found")
            .text()
            .collect::<String>();
        assert_eq!(heading, "Nothing here yet");
        assert!(
            html.select(&Selector::parse("#dashboard-content a[href='/entries/new']").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn unreadable_store_is_error_page_or_alert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(&path, "{").unwrap();
        let state = DashboardState {
            store: share(LocalEntryStore::new(path)),
        };

        let page = get_dashboard_page(State(state.clone()), HxRequest(false), search(""))
            .await
            .into_response();
        let alert = get_dashboard_page(State(state), HxRequest(true), search(""))
            .await
            .into_response();

        assert_eq!(page.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(alert.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
