//! Defines the endpoints for previewing and saving a truck trip's revenue.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    html::format_rupiah,
    timezone::get_local_date,
    transaction::{Category, Ledger, NewTransaction, create_transaction},
    truck::{
        TruckForm, TruckTrip,
        page::{truck_fields, truck_result},
    },
};

/// The state needed to save a truck trip's revenue.
#[derive(Debug, Clone)]
pub struct TruckState {
    /// The database connection for saving the income.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for TruckState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that renders the calculation for the calculator's current inputs.
pub async fn truck_preview_endpoint(Form(form): Form<TruckForm>) -> Markup {
    truck_result(&TruckTrip::from_inputs(&form), &form.description, false)
}

/// A route handler that saves a truck trip's revenue as an income dated today.
///
/// On success the calculator is cleared.
pub async fn create_truck_revenue_endpoint(
    State(state): State<TruckState>,
    Form(form): Form<TruckForm>,
) -> Response {
    let trip = TruckTrip::from_inputs(&form);

    if !trip.is_complete() {
        return Error::IncompleteTruckTrip.into_alert_response();
    }

    let today = match get_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let transaction = match NewTransaction::new(
        Ledger::Income,
        Category::TruckRevenue,
        &form.description,
        trip.revenue(),
        today,
    ) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected truck revenue: {error}");
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
            tracing::error!("could not save truck revenue: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!(
        "saved truck revenue {} as income {}",
        transaction.amount,
        transaction.id
    );

    let alert = Alert::Success {
        message: "Pendapatan truck berhasil dicatat!".to_owned(),
        details: format!(
            "{} dicatat sebagai {}.",
            format_rupiah(transaction.amount),
            transaction.category
        ),
    };
    let empty_trip = TruckTrip {
        outbound: 0,
        return_leg: 0,
        allowance: 0,
    };

    html! {
        (alert.into_html())
        (truck_fields(true))
        (truck_result(&empty_trip, "", true))
    }
    .into_response()
}
