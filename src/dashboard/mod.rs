//! Dashboard module
//!
//! Provides an overview page with the current month's totals, balance and
//! the breakdown of income and expenses by category.

mod cards;
mod handlers;

pub use cards::summary_cards;
pub use handlers::get_dashboard_page;
