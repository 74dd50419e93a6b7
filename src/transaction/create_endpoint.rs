//! Defines the endpoints for saving a new income or expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    amount_input::parse_amount_input,
    html::format_rupiah,
    timezone::get_local_date,
    transaction::{
        Category, Ledger, NewTransaction, core::create_transaction,
        form::transaction_form_fields,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub category: Category,
    /// The amount as typed, e.g. "1,500,000". Non-digits are ignored.
    pub amount: String,
    pub description: String,
    /// Defaults to today's local date.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for saving an income.
pub async fn create_income_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    create_transaction_in_ledger(Ledger::Income, state, form)
}

/// A route handler for saving an expense.
pub async fn create_expense_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    create_transaction_in_ledger(Ledger::Expense, state, form)
}

/// Validate and save the form, then clear the form and show a success alert.
fn create_transaction_in_ledger(
    ledger: Ledger,
    state: CreateTransactionState,
    form: TransactionForm,
) -> Response {
    let today = match get_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let transaction = match NewTransaction::new(
        ledger,
        form.category,
        &form.description,
        parse_amount_input(&form.amount),
        form.date.unwrap_or(today),
    ) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected new {ledger} transaction: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let transaction = match create_transaction(transaction, &connection) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("could not create {ledger} transaction: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!(
        "created {ledger} transaction {} for {}",
        transaction.id,
        transaction.amount
    );

    let alert = Alert::Success {
        message: format!("Data {ledger} berhasil disimpan!"),
        details: format!(
            "{}: {} ({})",
            transaction.category,
            format_rupiah(transaction.amount),
            transaction.description
        ),
    };

    html! {
        (alert.into_html())
        (transaction_form_fields(ledger, today, true))
    }
    .into_response()
}
