//! Defines the route handler for downloading a month of transactions as CSV.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    html::format_rupiah,
    period::{Period, PeriodQuery},
    timezone::get_local_date,
    transaction::{Ledger, Transaction, get_transactions_in_period},
};

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct CsvExportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for CsvExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for a CSV export.
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvQuery {
    pub ledger: Ledger,
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// A row of the exported CSV, with the same columns as the report table.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Jenis")]
    category: &'a str,
    #[serde(rename = "Keterangan")]
    description: &'a str,
    #[serde(rename = "Jumlah")]
    amount: String,
    #[serde(rename = "Tanggal")]
    date: String,
}

/// The file name of the export of `ledger` for `period`, e.g. "pemasukan_3_2025.csv".
pub fn csv_file_name(ledger: Ledger, period: &Period) -> String {
    format!("{}_{}_{}.csv", ledger, period.month_number(), period.year())
}

/// Write `transactions` as CSV with a header row and the amounts formatted as Rupiah.
///
/// # Errors
/// Returns [Error::CsvExportError] if a row could not be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if transactions.is_empty() {
        writer.write_record(["ID", "Jenis", "Keterangan", "Jumlah", "Tanggal"])?;
    }

    for transaction in transactions {
        writer.serialize(CsvRow {
            id: transaction.id,
            category: transaction.category.label(),
            description: &transaction.description,
            amount: format_rupiah(transaction.amount),
            date: transaction.date.to_string(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvExportError(error.to_string()))
}

/// A route handler that downloads the transactions of a ledger for one month as CSV.
pub async fn get_transactions_csv(
    State(state): State<CsvExportState>,
    Query(query): Query<CsvQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let period = PeriodQuery {
        year: query.year,
        month: query.month,
    }
    .resolve(today)?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions_in_period(query.ledger, &period, &connection).inspect_err(|error| {
            tracing::error!("could not get {} transactions for CSV: {error}", query.ledger)
        })?
    };

    let body = transactions_to_csv(&transactions)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    csv_file_name(query.ledger, &period)
                ),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        period::Period,
        test_utils::{assert_content_type, assert_status_ok, get_header},
        transaction::{Category, Ledger, NewTransaction, create_transaction},
    };

    use super::{CsvExportState, CsvQuery, csv_file_name, get_transactions_csv, transactions_to_csv};

    fn get_test_state() -> CsvExportState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CsvExportState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn insert(state: &CsvExportState, category: Category, description: &str, amount: i64, date: time::Date) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction::new(category.ledger(), category, description, amount, date).unwrap(),
            &connection,
        )
        .unwrap();
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[test]
    fn file_name_uses_table_month_and_year() {
        let period = Period::new(2025, 3).unwrap();

        assert_eq!(csv_file_name(Ledger::Income, &period), "pemasukan_3_2025.csv");
        assert_eq!(
            csv_file_name(Ledger::Expense, &period),
            "pengeluaran_3_2025.csv"
        );
    }

    #[test]
    fn empty_export_has_header_only() {
        let csv = String::from_utf8(transactions_to_csv(&[]).unwrap()).unwrap();

        assert_eq!(csv, "ID,Jenis,Keterangan,Jumlah,Tanggal\n");
    }

    #[tokio::test]
    async fn exports_month_of_ledger() {
        let state = get_test_state();
        insert(&state, Category::Salary, "Gaji, Maret", 5_000_000, date!(2025 - 03 - 25));
        insert(&state, Category::OtherIncome, "Hadiah", 250_000, date!(2025 - 03 - 02));
        insert(&state, Category::Salary, "Gaji April", 5_000_000, date!(2025 - 04 - 25));
        insert(&state, Category::HouseholdNeeds, "Belanja", 100_000, date!(2025 - 03 - 10));

        let response = get_transactions_csv(
            State(state),
            Query(CsvQuery {
                ledger: Ledger::Income,
                year: Some(2025),
                month: Some(3),
            }),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/csv; charset=utf-8");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"pemasukan_3_2025.csv\""
        );
        assert_eq!(
            body_text(response).await,
            "ID,Jenis,Keterangan,Jumlah,Tanggal\n\
            1,Pemasukan Gaji,\"Gaji, Maret\",Rp 5.000.000,2025-03-25\n\
            2,Pemasukan Lainnya,Hadiah,Rp 250.000,2025-03-02\n"
        );
    }

    #[test]
    fn query_deserializes_ledger_names() {
        let query: CsvQuery =
            serde_urlencoded::from_str("ledger=expense&year=2024&month=12").unwrap();

        assert_eq!(query.ledger, Ledger::Expense);
        assert_eq!(query.year, Some(2024));
        assert_eq!(query.month, Some(12));
    }
}
