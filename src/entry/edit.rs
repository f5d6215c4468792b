//! Entry editing page and endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    entry::{
        EntryEndpointState, EntryFormData, EntryId, ValidationErrors,
        form::{FormKind, entry_form_view},
    },
    html::{BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    store,
};

/// Render the entry editing page with the form filled in from the stored entry.
///
/// # Errors
/// Returns [Error::NotFound] if the entry does not exist, which is rendered
/// as the 404 page.
pub async fn get_edit_entry_page(
    Path(entry_id): Path<EntryId>,
    State(state): State<EntryEndpointState>,
) -> Result<Response, Error> {
    let entry = store::lock(&state.store)?.get(entry_id)?;

    Ok(edit_entry_view(entry_id, &EntryFormData::from(&entry)).into_response())
}

/// Handle entry edit form submission.
pub async fn update_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<EntryEndpointState>,
    Form(form_data): Form<EntryFormData>,
) -> Response {
    let update = match form_data.validate_update() {
        Ok(update) => update,
        Err(errors) => {
            return entry_form_view(FormKind::Edit(entry_id), &form_data, &errors).into_response();
        }
    };

    let mut store = match store::lock(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    match store.update(entry_id, update) {
        Ok(_) => {
            tracing::info!("Updated entry {entry_id}");

            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_entry_view(entry_id: EntryId, form_data: &EntryFormData) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry_id);
    let delete_endpoint = endpoints::with_query(
        &endpoints::format_endpoint(endpoints::ENTRY_API, entry_id),
        &[("redirect_url", endpoints::DASHBOARD_VIEW)],
    );
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = entry_form_view(
        FormKind::Edit(entry_id),
        form_data,
        &ValidationErrors::default(),
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold leading-tight tracking-tight md:text-2xl"
            {
                "Edit Entry"
            }

            (form)

            button
                type="button"
                hx-delete=(delete_endpoint)
                hx-confirm="Are you sure you want to delete this entry? This cannot be undone."
                hx-target-error="#alert-container"
                class={ "mt-6 " (BUTTON_DELETE_STYLE) }
            {
                "Delete Entry"
            }
        }
    };

    base("Edit Entry", &[dollar_input_styles()], &content)
}
