//! Defines the route handler for the annual financial report.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    aggregation::{MonthlyTotals, get_annual_totals},
    charts::{PageChart, annual_bar_chart, charts_scripts, charts_view},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_rupiah,
    },
    navigation::NavBar,
    period::{check_year, format_short_date, month_name, year_date_range, year_select},
    timezone::get_local_date,
    transaction::{Ledger, Transaction, get_transactions_in_date_range},
};

/// The state needed for the annual report page.
#[derive(Debug, Clone)]
pub struct AnnualReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnnualReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the annual report, defaults to the current year.
#[derive(Debug, Default, Deserialize)]
pub struct AnnualQuery {
    pub year: Option<i32>,
}

/// The totals and transactions of one month of the report.
struct MonthDetail {
    totals: MonthlyTotals,
    income: Vec<Transaction>,
    expenses: Vec<Transaction>,
}

struct AnnualReport {
    year: i32,
    totals: Vec<MonthlyTotals>,
    months: Vec<MonthDetail>,
}

/// Display the monthly totals of a year with a chart and the transactions of each month.
pub async fn get_annual_report_page(
    State(state): State<AnnualReportState>,
    Query(query): Query<AnnualQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let year = check_year(query.year.unwrap_or(today.year()), today.year())?;

    let report = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        build_annual_report(year, &connection)?
    };

    Ok(annual_report_view(&report, today.year()).into_response())
}

fn build_annual_report(year: i32, connection: &Connection) -> Result<AnnualReport, Error> {
    let date_range = year_date_range(year)?;
    let totals = get_annual_totals(year, connection)?;
    let income = get_transactions_in_date_range(Ledger::Income, date_range.clone(), connection)?;
    let expenses = get_transactions_in_date_range(Ledger::Expense, date_range, connection)?;

    let months = totals
        .iter()
        .map(|totals| MonthDetail {
            totals: *totals,
            income: in_month(&income, totals.month),
            expenses: in_month(&expenses, totals.month),
        })
        .collect();

    Ok(AnnualReport {
        year,
        totals,
        months,
    })
}

fn in_month(transactions: &[Transaction], month: Month) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.date.month() == month)
        .cloned()
        .collect()
}

fn year_selector(current_year: i32, year: i32) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::ANNUAL_REPORT_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            (year_select(current_year, year))

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Tampilkan" }
            }
        }
    }
}

fn monthly_table(totals: &[MonthlyTotals]) -> Markup {
    html! {
        section id="monthly-totals" class="w-full mb-6"
        {
            h3 class="text-lg font-semibold mb-2" { "Rincian Bulanan" }

            div class="w-full overflow-x-auto rounded shadow"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Bulan" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Pemasukan" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Pengeluaran" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Saldo" }
                        }
                    }

                    tbody
                    {
                        @for total in totals {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (month_name(total.month)) }
                                td class=(TABLE_CELL_STYLE) { (format_rupiah(total.balance.income)) }
                                td class=(TABLE_CELL_STYLE) { (format_rupiah(total.balance.expense)) }
                                td class=(TABLE_CELL_STYLE) { (format_rupiah(total.balance.saldo())) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn detail_column(ledger: Ledger, transactions: &[Transaction], total: i64) -> Markup {
    html! {
        div class="flex flex-col gap-2"
        {
            h4 class="font-semibold" { (ledger.title()) }

            @if transactions.is_empty() {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Tidak ada " (ledger) }
            } @else {
                ul class="flex flex-col gap-2"
                {
                    @for transaction in transactions {
                        li class="text-sm"
                        {
                            p class="font-medium" { (transaction.category) }
                            p { (format_rupiah(transaction.amount)) " - " (transaction.description) }
                            p class="text-xs text-gray-600 dark:text-gray-400"
                            {
                                "Tanggal: " (format_short_date(transaction.date))
                            }
                        }
                    }
                }
            }

            p class="font-semibold" { "Total: " (format_rupiah(total)) }
        }
    }
}

fn month_details(year: i32, detail: &MonthDetail) -> Markup {
    let balance = detail.totals.balance;

    html! {
        details class=(CARD_STYLE)
        {
            summary class="cursor-pointer font-medium"
            {
                "Detail " (month_name(detail.totals.month)) " " (year)
                " - Saldo: " (format_rupiah(balance.saldo()))
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-4"
            {
                (detail_column(Ledger::Income, &detail.income, balance.income))
                (detail_column(Ledger::Expense, &detail.expenses, balance.expense))
            }
        }
    }
}

fn annual_report_view(report: &AnnualReport, current_year: i32) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANNUAL_REPORT_VIEW).into_html();
    let charts = [PageChart {
        id: "annual-chart",
        options: annual_bar_chart(report.year, &report.totals).to_string(),
    }];

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full mb-4"
            {
                h2 class="text-xl font-bold" { "Laporan Keuangan Tahunan " (report.year) }
            }

            (year_selector(current_year, report.year))

            (charts_view(&charts))

            (monthly_table(&report.totals))

            section id="month-details" class="w-full flex flex-col gap-2"
            {
                @for detail in &report.months {
                    (month_details(report.year, detail))
                }
            }
        }
    };

    base("Laporan Tahunan", &charts_scripts(&charts), &content)
}
