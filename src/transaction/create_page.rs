//! Defines the route handlers for the income and expense entry pages.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner, rupiah_input_styles},
    navigation::NavBar,
    timezone::get_local_date,
    transaction::{Ledger, form::transaction_form_fields},
};

fn new_transaction_view(ledger: Ledger, today: Date) -> Markup {
    let nav_bar = NavBar::new(ledger.new_view()).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(ledger.create_endpoint())
                hx-swap="none"
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Input " (ledger.title()) }

                (transaction_form_fields(ledger, today, false))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Simpan"
                }
            }
        }
    };

    base(&format!("Input {}", ledger.title()), &[rupiah_input_styles()], &content)
}

/// The state needed for the income and expense entry pages.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for entering an income.
pub async fn get_new_income_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    Ok(new_transaction_view(Ledger::Income, today).into_response())
}

/// Renders the page for entering an expense.
pub async fn get_new_expense_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    Ok(new_transaction_view(Ledger::Expense, today).into_response())
}
