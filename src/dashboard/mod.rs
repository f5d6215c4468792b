//! Dashboard module
//!
//! Provides the overview page with the total spending, a chart of spending by
//! category and a searchable table of entries.

mod charts;
mod handlers;
mod table;

pub(crate) use handlers::dashboard_content_view;
pub use handlers::{DashboardState, get_dashboard_page};
