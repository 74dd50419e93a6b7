//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    html::error_view,
    internal_server_error::InternalServerError,
    not_found::NotFoundError,
    transaction::{Category, Ledger},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was submitted with an amount of zero or less.
    #[error("the amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),

    /// A transaction was submitted with an empty or whitespace only description.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// A category was used with the table of the other ledger, e.g. an
    /// expense category for an income transaction.
    #[error("the category \"{0}\" cannot be used for {1}")]
    CategoryMismatch(Category, Ledger),

    /// The truck calculator was submitted before all of its amounts were filled in.
    #[error("all truck trip amounts must be greater than zero")]
    IncompleteTruckTrip,

    /// Bulk delete was submitted without any transactions selected.
    #[error("no transactions were selected for deletion")]
    NothingSelected,

    /// A month outside of 1-12, or a year that cannot be represented as a date.
    #[error("{year}-{month} is not a valid period")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u8,
    },

    /// A year too far from the years with data to be offered in a year selector.
    #[error("{0} is not a valid year")]
    InvalidYear(i32),

    /// A bulk delete stopped part way through.
    ///
    /// The transactions deleted before the failure stay deleted.
    #[error("deleted {deleted} of {requested} transactions before an error occurred: {reason}")]
    PartialDelete {
        /// The number of transactions deleted before the failure.
        deleted: usize,
        /// The number of transactions that were selected for deletion.
        requested: usize,
        /// A description of the error that stopped the deletion.
        reason: String,
    },

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while writing transactions as CSV.
    #[error("could not write CSV: {0}")]
    CsvExportError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("could not write CSV: {}", value);
        Error::CsvExportError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidPeriod { year, month } => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Periode Tidak Valid",
                    "400",
                    "Periode tidak valid",
                    &format!(
                        "Bulan {month} tahun {year} tidak dapat ditampilkan. \
                        Pilih bulan 1 sampai 12 dan tahun yang valid."
                    ),
                ),
            )
                .into_response(),
            Error::InvalidYear(year) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Tahun Tidak Valid",
                    "400",
                    "Tahun tidak valid",
                    &format!("Tahun {year} tidak dapat ditampilkan. Pilih tahun dari daftar."),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Pengaturan zona waktu tidak valid",
                fix: &format!(
                    "Zona waktu \"{timezone}\" tidak dikenal. Periksa pengaturan server dan \
                    pastikan zona waktu menggunakan nama kanonik, misalnya \"Asia/Jakarta\"."
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NonPositiveAmount(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Jumlah harus lebih dari 0".to_owned(),
                    details: "Isi jumlah dengan angka lebih dari nol.".to_owned(),
                },
            ),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Keterangan harus diisi".to_owned(),
                    details: "Tuliskan keterangan singkat untuk transaksi ini.".to_owned(),
                },
            ),
            Error::CategoryMismatch(category, ledger) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Jenis tidak valid".to_owned(),
                    details: format!("Jenis \"{category}\" tidak dapat digunakan untuk {ledger}."),
                },
            ),
            Error::IncompleteTruckTrip => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Data belum lengkap".to_owned(),
                    details: "Silakan isi semua field jumlah untuk melihat perhitungan.".to_owned(),
                },
            ),
            Error::NothingSelected => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Tidak ada data terpilih".to_owned(),
                    details: "Pilih data yang ingin dihapus terlebih dahulu.".to_owned(),
                },
            ),
            Error::InvalidPeriod { year, month } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Periode tidak valid".to_owned(),
                    details: format!("Bulan {month} tahun {year} tidak valid."),
                },
            ),
            Error::InvalidYear(year) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Tahun tidak valid".to_owned(),
                    details: format!("Tahun {year} tidak valid."),
                },
            ),
            Error::PartialDelete { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Gagal menghapus data".to_owned(),
                    details: "Terjadi kesalahan saat menghapus data. \
                    Muat ulang halaman untuk melihat data yang tersisa."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Pengaturan zona waktu tidak valid".to_owned(),
                    details: format!(
                        "Zona waktu \"{timezone}\" tidak dikenal. Periksa pengaturan server."
                    ),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Data tidak ditemukan".to_owned(),
                    details: "Muat ulang halaman untuk melihat data terbaru.".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Terjadi kesalahan".to_owned(),
                    details: "Terjadi kesalahan tak terduga, periksa log server untuk detailnya."
                        .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
        transaction::{Category, Ledger},
    };

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let errors = [
            Error::NonPositiveAmount(0),
            Error::EmptyDescription,
            Error::CategoryMismatch(Category::Salary, Ledger::Expense),
            Error::IncompleteTruckTrip,
            Error::NothingSelected,
            Error::InvalidYear(-9999),
        ];

        for error in errors {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let html = parse_html_fragment(response).await;
            assert_valid_html(&html);
        }
    }

    #[tokio::test]
    async fn partial_delete_alert_hides_row_count() {
        let error = Error::PartialDelete {
            deleted: 2,
            requested: 5,
            reason: "disk I/O error".to_owned(),
        };

        let response = error.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Gagal menghapus data"));
        assert!(!text.contains("disk I/O error"));
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_period_renders_400_page() {
        let response = Error::InvalidPeriod {
            year: 2025,
            month: 13,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_year_renders_400_page() {
        let response = Error::InvalidYear(-9999).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
