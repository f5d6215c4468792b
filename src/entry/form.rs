//! The form shared by the create and edit pages.

use std::fmt::Display;

use maud::{Markup, html};

use crate::{
    endpoints,
    entry::{Category, EntryFormData, EntryId, PaymentMethod, Status, ValidationErrors},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner,
    },
};

/// Which endpoint the form submits to, and so which fields it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FormKind {
    /// Creates a new entry with every field.
    Create,
    /// Edits the amount, date, description, category and status of an entry.
    Edit(EntryId),
}

/// Render the entry form with the values in `form_data`.
///
/// A failed submission is swapped back in place of the form, so the messages
/// in `errors` are shown next to the fields they belong to.
pub(crate) fn entry_form_view(
    kind: FormKind,
    form_data: &EntryFormData,
    errors: &ValidationErrors,
) -> Markup {
    let (hx_post, hx_put, submit_text) = match kind {
        FormKind::Create => (Some(endpoints::ENTRIES_API.to_owned()), None, "Add Entry"),
        FormKind::Edit(entry_id) => (
            None,
            Some(endpoints::format_endpoint(endpoints::ENTRY_API, entry_id)),
            "Save Changes",
        ),
    };
    let is_create = kind == FormKind::Create;

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(form_data.amount)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (field_error(errors, "amount"))
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(form_data.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors, "date"))
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    value=(form_data.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (label_select("category", "Category", Category::ALL, &form_data.category, errors))

            @if is_create {
                (label_select(
                    "payment_method",
                    "Payment Method",
                    PaymentMethod::ALL,
                    &form_data.payment_method,
                    errors,
                ))
            }

            (label_select("status", "Status", Status::ALL, &form_data.status, errors))

            @if is_create {
                div
                {
                    label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

                    textarea
                        name="notes"
                        id="notes"
                        rows="3"
                        placeholder="Notes"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (form_data.notes)
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                (loading_spinner())
                (submit_text)
            }
        }
    }
}

fn label_select<T: Display>(
    name: &str,
    label: &str,
    options: &[T],
    selected: &str,
    errors: &ValidationErrors,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(name) required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select " (label.to_lowercase()) }

                @for choice in options {
                    @let value = choice.to_string();

                    @if value == selected {
                        option value=(value) selected { (value) }
                    } @else {
                        option value=(value) { (value) }
                    }
                }
            }

            (field_error(errors, name))
        }
    }
}

fn field_error(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}
