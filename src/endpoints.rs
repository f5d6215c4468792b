//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/entries/{entry_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page showing total spending, the category chart and the entry table.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for creating a new entry.
pub const NEW_ENTRY_VIEW: &str = "/entries/new";
/// The page for editing an existing entry.
pub const EDIT_ENTRY_VIEW: &str = "/entries/{entry_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create entries.
pub const ENTRIES_API: &str = "/api/entries";
/// The route to update or delete a single entry.
pub const ENTRY_API: &str = "/api/entries/{entry_id}";
/// The route to toggle an entry between pending and completed.
pub const ENTRY_STATUS_API: &str = "/api/entries/{entry_id}/status";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/entries/{entry_id}', '{entry_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Append `search_term` to `endpoint` as the `search` query parameter.
///
/// An empty search term returns `endpoint` unchanged.
pub fn with_search(endpoint: &str, search_term: &str) -> String {
    with_query(endpoint, &[("search", search_term)])
}

/// Append the non-empty parameters in `params` to `endpoint` as a query string.
pub fn with_query(endpoint: &str, params: &[(&str, &str)]) -> String {
    let params: Vec<_> = params.iter().filter(|(_, value)| !value.is_empty()).collect();

    if params.is_empty() {
        return endpoint.to_owned();
    }

    match serde_urlencoded::to_string(params) {
        Ok(query) => format!("{endpoint}?{query}"),
        Err(error) => {
            tracing::warn!("could not encode query parameters for {endpoint}: {error}");
            endpoint.to_owned()
        }
    }
}
