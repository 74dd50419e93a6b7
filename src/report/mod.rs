//! The monthly and annual financial reports and the CSV export of a month.

mod annual_page;
mod csv_export;
mod monthly_page;

pub use annual_page::get_annual_report_page;
pub use csv_export::get_transactions_csv;
pub use monthly_page::get_monthly_report_page;
