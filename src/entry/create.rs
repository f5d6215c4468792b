//! Entry creation page and endpoint.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    entry::{
        EntryEndpointState, EntryFormData, ValidationErrors,
        form::{FormKind, entry_form_view},
    },
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    store,
    timezone::local_today,
};

/// The state needed for the new entry page.
#[derive(Debug, Clone)]
pub struct NewEntryPageState {
    pub local_timezone: String,
}

impl FromRef<AppState> for NewEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the entry creation page with the date set to today.
pub async fn get_new_entry_page(State(state): State<NewEntryPageState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let form_data = EntryFormData {
        date: today.to_string(),
        ..Default::default()
    };

    Ok(new_entry_view(&form_data).into_response())
}

/// Handle entry creation form submission.
///
/// An invalid submission is sent back as the form with the reasons next to
/// each field and the store is not touched.
pub async fn create_entry_endpoint(
    State(state): State<EntryEndpointState>,
    Form(form_data): Form<EntryFormData>,
) -> Response {
    let new_entry = match form_data.validate_new() {
        Ok(new_entry) => new_entry,
        Err(errors) => {
            return entry_form_view(FormKind::Create, &form_data, &errors).into_response();
        }
    };

    let mut store = match store::lock(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    match store.create(new_entry) {
        Ok(entry) => {
            tracing::info!("Created entry {}", entry.id);

            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an entry: {error}");
            error.into_alert_response()
        }
    }
}

fn new_entry_view(form_data: &EntryFormData) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_ENTRY_VIEW).into_html();
    let form = entry_form_view(FormKind::Create, form_data, &ValidationErrors::default());

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold leading-tight tracking-tight md:text-2xl"
            {
                "Add Entry"
            }

            (form)
        }
    };

    base("Add Entry", &[dollar_input_styles()], &content)
}
