//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{Balance, get_balance, get_category_breakdown},
    charts::{PageChart, category_pie_chart, charts_scripts, charts_view},
    dashboard::cards::summary_cards,
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    period::Period,
    timezone::get_local_date,
    transaction::{Category, Ledger},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the month's totals.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    period: Period,
    balance: Balance,
    income_breakdown: Vec<(Category, i64)>,
    expense_breakdown: Vec<(Category, i64)>,
}

/// Display the totals, balance and category breakdowns of the current month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let period = Period::containing(today)?;

    let data = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        build_dashboard_data(period, &connection)?
    };

    Ok(dashboard_view(&data).into_response())
}

fn build_dashboard_data(period: Period, connection: &Connection) -> Result<DashboardData, Error> {
    let balance = get_balance(&period, connection)
        .inspect_err(|error| tracing::error!("could not get balance for dashboard: {error}"))?;
    let income_breakdown = get_category_breakdown(Ledger::Income, &period, connection)
        .inspect_err(|error| tracing::error!("could not get income breakdown: {error}"))?;
    let expense_breakdown = get_category_breakdown(Ledger::Expense, &period, connection)
        .inspect_err(|error| tracing::error!("could not get expense breakdown: {error}"))?;

    Ok(DashboardData {
        period,
        balance,
        income_breakdown,
        expense_breakdown,
    })
}

fn build_dashboard_charts(data: &DashboardData) -> Vec<PageChart> {
    let subtitle = data.period.name();
    let mut charts = Vec::with_capacity(2);

    if !data.income_breakdown.is_empty() {
        charts.push(PageChart {
            id: "income-chart",
            options: category_pie_chart("Pemasukan per Jenis", &subtitle, &data.income_breakdown)
                .to_string(),
        });
    }

    if !data.expense_breakdown.is_empty() {
        charts.push(PageChart {
            id: "expense-chart",
            options: category_pie_chart(
                "Pengeluaran per Jenis",
                &subtitle,
                &data.expense_breakdown,
            )
            .to_string(),
        });
    }

    charts
}

/// Shown in place of a pie chart when a ledger has no data for the month.
fn no_data_notice(ledger: Ledger) -> Markup {
    let entry_link = link(ledger.new_view(), "tambahkan data");

    html! {
        div id={ "no-" (ledger.query_value()) "-data" } class=(CARD_STYLE)
        {
            p class="font-semibold" { "Belum ada data " (ledger) " bulan ini" }
            p class="text-sm text-gray-600 dark:text-gray-400"
            {
                "Grafik akan muncul setelah Anda " (entry_link) "."
            }
        }
    }
}

fn dashboard_view(data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let charts = build_dashboard_charts(data);

    let content = html!(
        (nav_bar)

        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full mb-4"
            {
                h2 class="text-xl font-bold" { "Dashboard Keuangan" }
                p class="text-sm text-gray-600 dark:text-gray-400" { (data.period.name()) }
            }

            (summary_cards(&data.balance))

            @if !charts.is_empty() {
                (charts_view(&charts))
            }

            @if data.income_breakdown.is_empty() || data.expense_breakdown.is_empty() {
                div class="w-full grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @if data.income_breakdown.is_empty() {
                        (no_data_notice(Ledger::Income))
                    }

                    @if data.expense_breakdown.is_empty() {
                        (no_data_notice(Ledger::Expense))
                    }
                }
            }
        }
    );

    if charts.is_empty() {
        base("Dashboard", &[], &content)
    } else {
        base("Dashboard", &charts_scripts(&charts), &content)
    }
}
