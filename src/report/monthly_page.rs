//! Defines the route handler for the monthly financial report.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{Balance, get_balance},
    dashboard::summary_cards,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    period::{Period, PeriodQuery, month_select, year_select},
    report::csv_export::CsvQuery,
    timezone::get_local_date,
    transaction::{Ledger, RowSelection, Transaction, get_transactions_in_period, transactions_table},
};

/// The state needed for the monthly report page.
#[derive(Debug, Clone)]
pub struct MonthlyReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for MonthlyReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

struct MonthlyReport {
    period: Period,
    balance: Balance,
    income: Vec<Transaction>,
    expenses: Vec<Transaction>,
}

/// Display the totals and transactions of a month, the current month by default.
pub async fn get_monthly_report_page(
    State(state): State<MonthlyReportState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let period = query.resolve(today)?;

    let report = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        MonthlyReport {
            period,
            balance: get_balance(&period, &connection)?,
            income: get_transactions_in_period(Ledger::Income, &period, &connection)?,
            expenses: get_transactions_in_period(Ledger::Expense, &period, &connection)?,
        }
    };

    Ok(monthly_report_view(&report, today.year()).into_response())
}

fn csv_link(ledger: Ledger, period: &Period) -> String {
    let query = CsvQuery {
        ledger,
        year: Some(period.year()),
        month: Some(period.month_number()),
    };

    match serde_urlencoded::to_string(&query) {
        Ok(query_string) => format!("{}?{}", endpoints::MONTHLY_REPORT_CSV, query_string),
        Err(error) => {
            tracing::error!("could not encode CSV query: {error}");
            endpoints::MONTHLY_REPORT_CSV.to_owned()
        }
    }
}

fn ledger_section(ledger: Ledger, transactions: &[Transaction], period: &Period) -> Markup {
    html! {
        section id={ (ledger.table()) "-section" } class="w-full mb-6"
        {
            div class="flex flex-wrap items-center justify-between gap-2 mb-2"
            {
                h3 class="text-lg font-semibold" { "Daftar " (ledger.title()) }

                @if !transactions.is_empty() {
                    a
                        href=(csv_link(ledger, period))
                        download
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Download " (ledger.title()) " (CSV)"
                    }
                }
            }

            @if transactions.is_empty() {
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Tidak ada data " (ledger) " untuk periode ini"
                }
            } @else {
                (transactions_table(transactions, RowSelection::None))
            }
        }
    }
}

/// A GET form for choosing the year and month of a report.
fn period_selector(action: &str, current_year: i32, period: &Period) -> Markup {
    html! {
        form
            method="get"
            action=(action)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            (year_select(current_year, period.year()))
            (month_select(period.month()))

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Tampilkan" }
            }
        }
    }
}

fn monthly_report_view(report: &MonthlyReport, current_year: i32) -> Markup {
    let nav_bar = NavBar::new(endpoints::MONTHLY_REPORT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full mb-4"
            {
                h2 class="text-xl font-bold" { "Laporan Keuangan Bulanan" }
                p class="text-sm text-gray-600 dark:text-gray-400" { (report.period.name()) }
            }

            (period_selector(endpoints::MONTHLY_REPORT_VIEW, current_year, &report.period))

            (summary_cards(&report.balance))

            (ledger_section(Ledger::Income, &report.income, &report.period))
            (ledger_section(Ledger::Expense, &report.expenses, &report.period))
        }
    };

    base("Laporan Keuangan", &[], &content)
}
