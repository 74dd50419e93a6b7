//! Defines the endpoints for previewing and deleting the selected transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    bulk_delete::page::{DeleteQuery, delete_preview},
    database_id::TransactionId,
    endpoints,
    transaction::{Ledger, Transaction, delete_transactions, get_transaction},
};

/// The state needed to preview and delete transactions.
#[derive(Debug, Clone)]
pub struct BulkDeleteState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BulkDeleteState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The contents of the delete form.
///
/// `ids` holds the value of every checked row, an empty list when nothing is checked.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub ledger: Ledger,
    pub year: Option<i32>,
    pub month: Option<u8>,
    #[serde(default)]
    pub ids: Vec<TransactionId>,
}

/// Get the selected transactions, skipping IDs that no longer exist.
fn get_selected(
    ledger: Ledger,
    ids: &[TransactionId],
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut selected = Vec::with_capacity(ids.len());

    for &id in ids {
        match get_transaction(ledger, id, connection) {
            Ok(transaction) => selected.push(transaction),
            Err(Error::NotFound) => tracing::debug!("skipping missing {ledger} transaction {id}"),
            Err(error) => return Err(error),
        }
    }

    Ok(selected)
}

/// A route handler that renders the summary of the selected transactions.
pub async fn delete_preview_endpoint(
    State(state): State<BulkDeleteState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_selected(form.ledger, &form.ids, &connection) {
        Ok(selected) => delete_preview(form.ledger, &selected).into_response(),
        Err(error) => {
            tracing::error!("could not get transactions selected for deletion: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler that deletes the selected transactions, then redirects
/// back to the delete page for the same period and ledger.
pub async fn delete_transactions_endpoint(
    State(state): State<BulkDeleteState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if form.ids.is_empty() {
        return Error::NothingSelected.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let deleted = match delete_transactions(form.ledger, &form.ids, &connection) {
        Ok(deleted) => deleted,
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!(
        "deleted {deleted} of {} selected {} transactions",
        form.ids.len(),
        form.ledger
    );

    let query = DeleteQuery {
        year: form.year,
        month: form.month,
        ledger: Some(form.ledger),
        deleted: Some(deleted),
    };
    let redirect_url = match serde_urlencoded::to_string(&query) {
        Ok(query_string) => format!("{}?{}", endpoints::DELETE_VIEW, query_string),
        Err(error) => {
            tracing::error!("could not encode delete page query: {error}");
            endpoints::DELETE_VIEW.to_owned()
        }
    };

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{FromRequest, State},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        test_utils::{assert_hx_redirect, assert_valid_html, parse_html_fragment},
        transaction::{
            Category, Ledger, NewTransaction, count_transactions, create_transaction,
            get_transaction,
        },
    };

    use super::{BulkDeleteState, DeleteForm, delete_preview_endpoint, delete_transactions_endpoint};

    fn get_test_state() -> BulkDeleteState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        BulkDeleteState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn insert(state: &BulkDeleteState, category: Category, description: &str, amount: i64) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction::new(
                category.ledger(),
                category,
                description,
                amount,
                date!(2025 - 03 - 10),
            )
            .unwrap(),
            &connection,
        )
        .unwrap();
    }

    fn form(ledger: Ledger, ids: Vec<i64>) -> Form<DeleteForm> {
        Form(DeleteForm {
            ledger,
            year: Some(2025),
            month: Some(3),
            ids,
        })
    }

    #[tokio::test]
    async fn decodes_repeated_ids() {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("ledger=expense&year=2025&month=3&ids=4&ids=7"))
            .unwrap();

        let Form(form) = Form::<DeleteForm>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(form.ledger, Ledger::Expense);
        assert_eq!(form.ids, [4, 7]);
    }

    #[tokio::test]
    async fn decodes_no_selection_as_empty() {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("ledger=income&year=2025&month=3"))
            .unwrap();

        let Form(form) = Form::<DeleteForm>::from_request(request, &())
            .await
            .unwrap();

        assert!(form.ids.is_empty());
    }

    #[tokio::test]
    async fn preview_counts_selected_rows() {
        let state = get_test_state();
        insert(&state, Category::Salary, "Gaji", 5_000_000);
        insert(&state, Category::OtherIncome, "Hadiah", 250_000);
        insert(&state, Category::TruckRevenue, "Trip", 700_000);

        let response =
            delete_preview_endpoint(State(state), form(Ledger::Income, vec![1, 3, 99])).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let count = html
            .select(&Selector::parse("#delete-count").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(count, "Anda akan menghapus 2 data pemasukan");
        let entries = html
            .select(&Selector::parse("#delete-preview li").unwrap())
            .map(|entry| entry.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                "Gaji - Rp 5.000.000 (Pemasukan Gaji, 10 Mar 2025)",
                "Trip - Rp 700.000 (Pemasukan Truck, 10 Mar 2025)",
            ]
        );
        assert!(
            html.select(&Selector::parse("#delete-button").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn preview_without_selection_is_empty() {
        let response =
            delete_preview_endpoint(State(get_test_state()), form(Ledger::Income, vec![])).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("#delete-preview").unwrap())
                .next()
                .is_some()
        );
        assert!(
            html.select(&Selector::parse("#delete-button").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn deletes_exactly_the_selected_rows() {
        let state = get_test_state();
        insert(&state, Category::TruckRepair, "Ban", 400_000);
        insert(&state, Category::HouseholdNeeds, "Beras", 150_000);
        insert(&state, Category::OtherExpense, "Pulsa", 50_000);
        insert(&state, Category::Salary, "Gaji", 5_000_000);

        let response =
            delete_transactions_endpoint(State(state.clone()), form(Ledger::Expense, vec![1, 3]))
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/hapus?year=2025&month=3&ledger=expense&deleted=2");
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(Ledger::Expense, &connection), Ok(1));
        assert_eq!(
            get_transaction(Ledger::Expense, 1, &connection),
            Err(Error::NotFound)
        );
        assert!(get_transaction(Ledger::Expense, 2, &connection).is_ok());
        // The income row with the same ID is untouched.
        assert!(get_transaction(Ledger::Income, 1, &connection).is_ok());
    }

    #[tokio::test]
    async fn missing_ids_are_ignored() {
        let state = get_test_state();
        insert(&state, Category::Salary, "Gaji", 5_000_000);

        let response =
            delete_transactions_endpoint(State(state.clone()), form(Ledger::Income, vec![1, 42]))
                .await;

        assert_hx_redirect(&response, "/hapus?year=2025&month=3&ledger=income&deleted=1");
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(Ledger::Income, &connection), Ok(0));
    }

    #[tokio::test]
    async fn nothing_selected_is_rejected() {
        let state = get_test_state();
        insert(&state, Category::Salary, "Gaji", 5_000_000);

        let response =
            delete_transactions_endpoint(State(state.clone()), form(Ledger::Income, vec![])).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(Ledger::Income, &connection), Ok(1));
    }
}
