//! Deleting many transactions of one ledger and month at once.
//!
//! Each row of the delete page carries its own ID in its checkbox, so the
//! selection stays correct even if the listing changes between selecting
//! and confirming.

mod endpoints;
mod page;

pub use endpoints::{delete_preview_endpoint, delete_transactions_endpoint};
pub use page::get_delete_page;
