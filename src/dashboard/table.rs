//! The table of entries on the dashboard.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    entry::{BudgetEntry, Status},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_STATUS_STYLE, LINK_STYLE, STATUS_BADGE_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
};

/// Descriptions longer than this many graphemes are truncated in the table.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Render the entries as a table with the actions for each entry.
///
/// `search_term` is passed on to the row actions so that the refreshed
/// content they return stays filtered.
pub(super) fn entries_table(entries: &[&BudgetEntry], search_term: &str) -> Markup {
    html! {
        div class="overflow-x-auto w-full rounded-lg shadow"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for entry in entries {
                        (entry_row(entry, search_term))
                    }
                }
            }
        }
    }
}

fn entry_row(entry: &BudgetEntry, search_term: &str) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, entry.id);
    let toggle_url = endpoints::with_search(
        &endpoints::format_endpoint(endpoints::ENTRY_STATUS_API, entry.id),
        search_term,
    );
    let delete_url = endpoints::with_search(
        &endpoints::format_endpoint(endpoints::ENTRY_API, entry.id),
        search_term,
    );
    let description = entry.description.as_deref().unwrap_or_default();
    let (truncated_description, was_truncated) = truncate_description(description);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap font-medium text-gray-900 dark:text-white" }
            {
                (format_currency(entry.amount_value()))
            }

            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                @if let Some(date) = entry.date {
                    time datetime=(date) { (date) }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(category) = entry.category {
                    span class=(STATUS_BADGE_STYLE) { (category) }
                }
            }

            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                span class="mr-2" { (entry.status.map_or("", |status| status.as_str())) }

                button
                    type="button"
                    hx-post=(toggle_url)
                    hx-target="#dashboard-content"
                    hx-target-error="#alert-container"
                    hx-swap="innerHTML"
                    class=(BUTTON_STATUS_STYLE)
                {
                    (toggle_label(entry.status))
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if was_truncated {
                    span title=(description) { (truncated_description) }
                } @else {
                    (description)
                }
            }

            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm="Are you sure you want to delete this entry? This cannot be undone."
                        hx-target="#dashboard-content"
                        hx-target-error="#alert-container"
                        hx-swap="innerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// The label of the status button, naming the status the entry will move to.
fn toggle_label(status: Option<Status>) -> &'static str {
    if status == Some(Status::Pending) {
        "Complete"
    } else {
        "Pending"
    }
}

/// Shorten `description` to [MAX_DESCRIPTION_GRAPHEMES] graphemes with an
/// ellipsis and report whether it was shortened.
fn truncate_description(description: &str) -> (String, bool) {
    if description.graphemes(true).count() <= MAX_DESCRIPTION_GRAPHEMES {
        return (description.to_owned(), false);
    }

    let truncated: String = description
        .graphemes(true)
        .take(MAX_DESCRIPTION_GRAPHEMES - 3)
        .collect();

    (format!("{truncated}..."), true)
}
