//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/amount/{field}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the totals for the current month.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for recording income.
pub const NEW_INCOME_VIEW: &str = "/pemasukan/new";
/// The page for recording an expense.
pub const NEW_EXPENSE_VIEW: &str = "/pengeluaran/new";
/// The page for calculating the revenue of a truck trip.
pub const TRUCK_CALCULATOR_VIEW: &str = "/truck";
/// The page for the monthly financial report.
pub const MONTHLY_REPORT_VIEW: &str = "/laporan";
/// The route for downloading one table of the monthly report as CSV.
pub const MONTHLY_REPORT_CSV: &str = "/laporan/csv";
/// The page for the annual financial report.
pub const ANNUAL_REPORT_VIEW: &str = "/laporan/tahunan";
/// The page for deleting transactions in bulk.
pub const DELETE_VIEW: &str = "/hapus";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an income transaction.
pub const INCOME_API: &str = "/api/pemasukan";
/// The route to create an expense transaction.
pub const EXPENSE_API: &str = "/api/pengeluaran";
/// The route to render the truck calculator result for the current inputs.
pub const TRUCK_PREVIEW: &str = "/api/truck/preview";
/// The route to save the truck calculator result as income.
pub const TRUCK_API: &str = "/api/truck";
/// The route to render the preview of the transactions selected for deletion.
pub const DELETE_PREVIEW: &str = "/api/hapus/preview";
/// The route to delete the selected transactions.
pub const DELETE_API: &str = "/api/hapus";
/// The route to re-render an amount input with its value formatted.
pub const FORMAT_AMOUNT: &str = "/api/amount/{field}";

/// Replace the parameter in `endpoint_path` with `param`.
///
/// Only the first parameter, delimited by curly braces, is replaced. If
/// `endpoint_path` has no parameter, it is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_endpoint("/api/amount/{field}", "amount"), "/api/amount/amount");
/// ```
pub fn format_endpoint(endpoint_path: &str, param: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        param,
        &endpoint_path[param_end..]
    )
}
