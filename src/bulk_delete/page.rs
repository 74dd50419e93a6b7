//! Defines the route handler and templates for the bulk delete page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        PAGE_CONTAINER_STYLE, base, format_rupiah, loading_spinner,
    },
    navigation::NavBar,
    period::{Period, PeriodQuery, format_short_date, month_select, year_select},
    timezone::get_local_date,
    transaction::{Ledger, RowSelection, Transaction, get_transactions_in_period, transactions_table},
};

pub(super) const DELETE_FORM_ID: &str = "delete-form";
pub(super) const DELETE_PREVIEW_ID: &str = "delete-preview";

/// The state needed for the bulk delete page.
#[derive(Debug, Clone)]
pub struct DeletePageState {
    /// The database connection for listing the transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for DeletePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters of the bulk delete page.
///
/// The period defaults to the current month and the ledger to income.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub ledger: Option<Ledger>,
    /// Set after a successful delete to the number of rows that were deleted.
    pub deleted: Option<usize>,
}

/// Display the transactions of one ledger in a month with a checkbox for each row.
pub async fn get_delete_page(
    State(state): State<DeletePageState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let period = PeriodQuery {
        year: query.year,
        month: query.month,
    }
    .resolve(today)?;
    let ledger = query.ledger.unwrap_or(Ledger::Income);

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions_in_period(ledger, &period, &connection)?
    };

    Ok(delete_page_view(
        ledger,
        &period,
        &transactions,
        query.deleted,
        today.year(),
    )
    .into_response())
}

fn ledger_radio(selected: Ledger) -> Markup {
    html! {
        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "Jenis Data" }

            div class={ (FORM_RADIO_GROUP_STYLE) " sm:flex-row" }
            {
                @for ledger in [Ledger::Income, Ledger::Expense] {
                    div class="flex items-center gap-2"
                    {
                        input
                            type="radio"
                            name="ledger"
                            id={ "ledger-" (ledger.query_value()) }
                            value=(ledger.query_value())
                            checked[ledger == selected]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for={ "ledger-" (ledger.query_value()) } class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (ledger.title())
                        }
                    }
                }
            }
        }
    }
}

fn filter_form(ledger: Ledger, period: &Period, current_year: i32) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DELETE_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            (year_select(current_year, period.year()))
            (month_select(period.month()))
            (ledger_radio(ledger))

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Tampilkan" }
            }
        }
    }
}

/// The summary of the rows selected for deletion with the button that deletes them.
///
/// Re-rendered by [endpoints::DELETE_PREVIEW] whenever a checkbox in the
/// delete form changes.
pub(super) fn delete_preview(ledger: Ledger, selected: &[Transaction]) -> Markup {
    let spinner = loading_spinner();

    html! {
        div
            id=(DELETE_PREVIEW_ID)
            hx-post=(endpoints::DELETE_PREVIEW)
            hx-trigger={ "change from:#" (DELETE_FORM_ID) }
            hx-include={ "#" (DELETE_FORM_ID) }
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full mt-4"
        {
            @if !selected.is_empty() {
                div class=(CARD_STYLE)
                {
                    p id="delete-count" class="font-semibold text-red-700 dark:text-red-400"
                    {
                        "Anda akan menghapus " (selected.len()) " data " (ledger)
                    }

                    h4 class="font-semibold mt-2" { "Detail Data yang Akan Dihapus" }

                    ul class="flex flex-col gap-2 text-sm"
                    {
                        @for transaction in selected {
                            li
                            {
                                span class="font-medium" { (transaction.description) }
                                " - " (format_rupiah(transaction.amount))
                                " (" (transaction.category) ", "
                                (format_short_date(transaction.date)) ")"
                            }
                        }
                    }

                    button
                        type="submit"
                        form=(DELETE_FORM_ID)
                        id="delete-button"
                        class={ (BUTTON_DANGER_STYLE) " mt-4" }
                    {
                        span id="indicator" class="inline htmx-indicator" { (spinner) }
                        " Hapus Data Terpilih"
                    }
                }
            }
        }
    }
}

fn delete_page_view(
    ledger: Ledger,
    period: &Period,
    transactions: &[Transaction],
    deleted: Option<usize>,
    current_year: i32,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full mb-4"
            {
                h2 class="text-xl font-bold" { "Hapus Data" }
                p class="text-sm text-gray-600 dark:text-gray-400" { (period.name()) }
            }

            (filter_form(ledger, period, current_year))

            @if let Some(count) = deleted {
                div
                    id="delete-success"
                    role="status"
                    class="w-full p-4 mb-4 text-sm rounded-lg text-green-800 bg-green-50 \
                    border border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
                {
                    p class="font-semibold" { "Data berhasil dihapus!" }
                    p { (count) " data telah dihapus." }
                }
            }

            section id="delete-listing" class="w-full"
            {
                h3 class="text-lg font-semibold mb-2" { "Daftar " (ledger.title()) }

                @if transactions.is_empty() {
                    p id="no-data" class="text-gray-600 dark:text-gray-400"
                    {
                        "Tidak ada data " (ledger) " untuk periode ini"
                    }
                } @else {
                    form
                        id=(DELETE_FORM_ID)
                        hx-post=(endpoints::DELETE_API)
                        hx-swap="none"
                        hx-target-error="#alert-container"
                    {
                        input type="hidden" name="ledger" value=(ledger.query_value());
                        input type="hidden" name="year" value=(period.year());
                        input type="hidden" name="month" value=(period.month_number());

                        (transactions_table(transactions, RowSelection::Checkbox))
                    }

                    (delete_preview(ledger, &[]))
                }
            }
        }
    };

    base("Hapus Data", &[], &content)
}
