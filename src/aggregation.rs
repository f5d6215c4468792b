//! Turns the raw list of budget entries into the searched, summed and
//! chart-ready view shown on the dashboard.
//!
//! Everything here is a pure function of the entries and the search term:
//! nothing is stored between requests and nothing can fail. Malformed
//! entries are tolerated by treating a missing or non-numeric amount as zero
//! and by only searching fields that are present.

use crate::entry::{BudgetEntry, Category, Status};

/// The chart label for entries without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The total amount spent in a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// `None` groups the entries that have no category.
    pub category: Option<Category>,
    /// The sum of the coerced amounts.
    pub total: f64,
}

impl CategoryTotal {
    /// The label to display for this category.
    pub fn label(&self) -> &'static str {
        self.category
            .map_or(UNCATEGORIZED_LABEL, |category| category.as_str())
    }
}

/// The entries matching a search together with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary<'a> {
    /// The matching entries in store order.
    pub entries: Vec<&'a BudgetEntry>,
    /// The sum of the matching entries' amounts.
    pub total_spending: f64,
    /// Per-category sums in order of first appearance.
    pub category_totals: Vec<CategoryTotal>,
}

/// Filter `entries` and aggregate the result in one pass over the collection.
pub fn summarize<'a>(entries: &'a [BudgetEntry], search_term: &str) -> EntrySummary<'a> {
    let entries = filter(entries, search_term);
    let total_spending = total_spending(entries.iter().copied());
    let category_totals = category_totals(entries.iter().copied());

    EntrySummary {
        entries,
        total_spending,
        category_totals,
    }
}

/// Get the entries that match `search_term`, in their original order.
///
/// An empty search term matches every entry. Otherwise, an entry matches if
/// the lower-cased search term is contained in its title, amount, date,
/// category or status. Fields that are missing never match.
pub fn filter<'a>(entries: &'a [BudgetEntry], search_term: &str) -> Vec<&'a BudgetEntry> {
    if search_term.is_empty() {
        return entries.iter().collect();
    }

    let search_term = search_term.to_lowercase();

    entries
        .iter()
        .filter(|entry| matches_search(entry, &search_term))
        .collect()
}

fn matches_search(entry: &BudgetEntry, search_term: &str) -> bool {
    entry
        .title
        .as_deref()
        .is_some_and(|title| contains(title, search_term))
        || entry
            .amount
            .as_ref()
            .is_some_and(|amount| contains(&amount.to_string(), search_term))
        || entry
            .date
            .is_some_and(|date| contains(&date.to_string(), search_term))
        || entry
            .category
            .is_some_and(|category| contains(category.as_str(), search_term))
        || entry
            .status
            .is_some_and(|status| contains(status.as_str(), search_term))
}

#[inline]
fn contains(field: &str, search_term: &str) -> bool {
    field.to_lowercase().contains(search_term)
}

/// Sum the amounts of `entries`, counting missing or non-numeric amounts as zero.
///
/// The result is not rounded.
pub fn total_spending<'a>(entries: impl IntoIterator<Item = &'a BudgetEntry>) -> f64 {
    entries.into_iter().map(BudgetEntry::amount_value).sum()
}

/// Sum the amounts of `entries` per category.
///
/// Categories appear in the order they are first seen in `entries` and only
/// if at least one entry has that category. Entries without a category are
/// grouped together under `None`.
pub fn category_totals<'a>(entries: impl IntoIterator<Item = &'a BudgetEntry>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for entry in entries {
        let amount = entry.amount_value();

        match totals
            .iter_mut()
            .find(|total| total.category == entry.category)
        {
            Some(total) => total.total += amount,
            None => totals.push(CategoryTotal {
                category: entry.category,
                total: amount,
            }),
        }
    }

    totals
}

/// The status an entry gets from the toggle action.
///
/// Only pending entries become completed, every other status (or no status
/// at all) becomes pending.
pub fn toggled_status(status: Option<Status>) -> Status {
    match status {
        Some(Status::Pending) => Status::Completed,
        _ => Status::Pending,
    }
}

/// Flip `entry` between pending and completed, leaving every other field as is.
///
/// The caller is responsible for saving the result.
pub fn toggle_status(entry: BudgetEntry) -> BudgetEntry {
    BudgetEntry {
        status: Some(toggled_status(entry.status)),
        ..entry
    }
}


#[cfg(test)]
mod aggregation_tests {
    use crate::entry::{Amount, BudgetEntry, Category, Status};

    use super::{CategoryTotal, UNCATEGORIZED_LABEL, category_totals, filter, summarize, total_spending};

    fn entry(id: i64, amount: Amount, category: Option<Category>, status: Status) -> BudgetEntry {
        BudgetEntry {
            id,
            title: None,
            amount: Some(amount),
            description: None,
            date: None,
            category,
            payment_method: None,
            status: Some(status),
            notes: None,
        }
    }

    fn food_and_bills() -> Vec<BudgetEntry> {
        vec![
            entry(1, Amount::Number(20.0), Some(Category::Food), Status::Pending),
            entry(2, Amount::Number(30.0), Some(Category::Bills), Status::Completed),
        ]
    }

    #[test]
    fn summarizes_everything_for_empty_search() {
        let entries = food_and_bills();

        let summary = summarize(&entries, "");

        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.total_spending, 50.0);
        assert_eq!(
            summary.category_totals,
            vec![
                CategoryTotal {
                    category: Some(Category::Food),
                    total: 20.0
                },
                CategoryTotal {
                    category: Some(Category::Bills),
                    total: 30.0
                },
            ]
        );
    }

    #[test]
    fn summarizes_only_matching_entries() {
        let entries = food_and_bills();

        let summary = summarize(&entries, "food");

        assert_eq!(summary.entries, vec![&entries[0]]);
        assert_eq!(summary.total_spending, 20.0);
        assert_eq!(
            summary.category_totals,
            vec![CategoryTotal {
                category: Some(Category::Food),
                total: 20.0
            }]
        );
    }

    #[test]
    fn malformed_amount_contributes_zero() {
        let entries = vec![
            entry(1, Amount::Text("abc".to_owned()), Some(Category::Food), Status::Pending),
            entry(2, Amount::Number(5.5), Some(Category::Food), Status::Pending),
        ];

        let summary = summarize(&entries, "");

        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.total_spending, 5.5);
        assert_eq!(
            summary.category_totals,
            vec![CategoryTotal {
                category: Some(Category::Food),
                total: 5.5
            }]
        );
    }

    #[test]
    fn missing_amount_contributes_zero() {
        let mut entries = food_and_bills();
        entries[0].amount = None;

        assert_eq!(total_spending(&entries), 30.0);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let entries = vec![
            entry(1, Amount::Number(1.0), Some(Category::Transport), Status::Pending),
            entry(2, Amount::Number(2.0), Some(Category::Food), Status::Pending),
            entry(3, Amount::Number(3.0), Some(Category::Transport), Status::Pending),
            entry(4, Amount::Number(4.0), Some(Category::Housing), Status::Pending),
        ];

        let labels: Vec<_> = category_totals(&entries)
            .iter()
            .map(CategoryTotal::label)
            .collect();

        assert_eq!(labels, vec!["Transport", "Food", "Housing"]);
        assert_eq!(category_totals(&entries)[0].total, 4.0);
    }

    #[test]
    fn uncategorized_entries_are_grouped_together() {
        let entries = vec![
            entry(1, Amount::Number(1.0), None, Status::Pending),
            entry(2, Amount::Number(2.0), Some(Category::Food), Status::Pending),
            entry(3, Amount::Number(3.0), None, Status::Pending),
        ];

        let totals = category_totals(&entries);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].label(), UNCATEGORIZED_LABEL);
        assert_eq!(totals[0].total, 4.0);
    }

    #[test]
    fn empty_input_has_no_categories() {
        assert!(category_totals(&[]).is_empty());
        assert_eq!(total_spending(&[]), 0.0);
    }

    #[test]
    fn category_totals_sum_to_total_spending() {
        let entries = vec![
            entry(1, Amount::Number(0.1), Some(Category::Food), Status::Pending),
            entry(2, Amount::Number(0.2), Some(Category::Bills), Status::Pending),
            entry(3, Amount::Text("x".to_owned()), None, Status::Pending),
            entry(4, Amount::Number(19.99), Some(Category::Food), Status::Completed),
            entry(5, Amount::Number(7.01), Some(Category::Savings), Status::OnHold),
        ];

        for search_term in ["", "food", "pending", "0.", "zzz"] {
            let filtered = filter(&entries, search_term);
            let category_sum: f64 = category_totals(filtered.iter().copied())
                .iter()
                .map(|total| total.total)
                .sum();

            let total = total_spending(filtered.iter().copied());
            assert!(
                (category_sum - total).abs() < 1e-9,
                "search {search_term:?}: categories sum to {category_sum}, total is {total}"
            );
        }
    }

    #[test]
    fn filtering_never_increases_spending() {
        let entries = vec![
            entry(1, Amount::Number(10.0), Some(Category::Food), Status::Pending),
            entry(2, Amount::Number(25.0), Some(Category::Bills), Status::Completed),
            entry(3, Amount::Number(5.0), Some(Category::Other), Status::Cancelled),
        ];
        let everything = total_spending(&entries);

        for search_term in ["food", "bills", "o", "1", "nothing"] {
            let filtered = filter(&entries, search_term);
            assert!(total_spending(filtered.iter().copied()) <= everything);
        }

        // "e" appears in every status label.
        let filtered = filter(&entries, "e");
        assert_eq!(filtered.len(), entries.len());
        assert_eq!(total_spending(filtered.iter().copied()), everything);
    }
}
