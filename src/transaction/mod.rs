//! Income and expense transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its `Ledger` and `Category`
//! - Database functions for storing, querying and deleting transactions
//! - The income and expense entry pages and their endpoints
//! - The transaction table shown on the report and delete pages

mod core;
mod create_endpoint;
mod create_page;
mod form;
mod table;

pub use core::{
    Category, Ledger, NewTransaction, Transaction, create_transaction, create_transaction_table,
    delete_transactions, get_transaction, get_transactions_in_date_range,
    get_transactions_in_period,
};
pub use create_endpoint::{create_expense_endpoint, create_income_endpoint};
pub use create_page::{get_new_expense_page, get_new_income_page};
pub use table::{RowSelection, transactions_table};

#[cfg(test)]
pub use core::count_transactions;
