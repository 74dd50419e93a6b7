//! Amount inputs that format themselves as the user types.
//!
//! Each amount field posts its text to [endpoints::FORMAT_AMOUNT] and is
//! replaced by the server's rendering: digits grouped with commas and a
//! caption showing the amount that will be saved. The field's text is the
//! only state, it is sent with the request and returned in the response.

use std::collections::HashMap;

use axum::extract::Path;
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints::{self, format_endpoint},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, format_rupiah, format_thousands},
};

/// The maximum number of digits kept from an amount input.
///
/// Fifteen digits always fit in an `i64` and in the SQLite `INTEGER` column.
pub const MAX_AMOUNT_DIGITS: usize = 15;

/// Parse the digits in `raw` as an amount, ignoring every other character.
///
/// Returns zero if `raw` contains no digits. Digits past
/// [MAX_AMOUNT_DIGITS] are dropped.
pub fn parse_amount_input(raw: &str) -> i64 {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_AMOUNT_DIGITS)
        .collect::<String>()
        .parse()
        .unwrap_or_default()
}

/// Re-render the text of an amount input with a comma every three digits.
///
/// Returns an empty string if `raw` contains no digits so that an untouched
/// field stays empty instead of showing "0".
pub fn format_amount_input(raw: &str) -> String {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }

    format_thousands(parse_amount_input(raw).unsigned_abs())
}

/// The amount inputs that support live formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    /// The amount of an income or expense.
    Amount,
    /// The payment for the outbound leg of a truck trip.
    Outbound,
    /// The payment for the return leg of a truck trip.
    ReturnLeg,
    /// The allowance paid to the driver of a truck trip.
    Allowance,
}

impl AmountField {
    /// The name of the form input.
    pub fn name(self) -> &'static str {
        match self {
            AmountField::Amount => "amount",
            AmountField::Outbound => "outbound",
            AmountField::ReturnLeg => "return_leg",
            AmountField::Allowance => "allowance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AmountField::Amount => "Jumlah",
            AmountField::Outbound => "Jumlah Berangkat",
            AmountField::ReturnLeg => "Jumlah Pulang",
            AmountField::Allowance => "Sangu Supir",
        }
    }

    fn example(self) -> &'static str {
        match self {
            AmountField::Amount => "1000000",
            AmountField::Outbound => "500000",
            AmountField::ReturnLeg => "300000",
            AmountField::Allowance => "100000",
        }
    }

    /// The ID of the element that wraps the input and its caption.
    pub fn container_id(self) -> String {
        format!("{}-field", self.name().replace('_', "-"))
    }
}

/// Render the amount input for `field` with `raw` formatted as its value.
pub fn amount_field(field: AmountField, raw: &str) -> Markup {
    let name = field.name();
    let container_id = field.container_id();
    let formatted = format_amount_input(raw);

    html! {
        div id=(container_id)
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (field.label()) }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name=(name)
                    id=(name)
                    type="text"
                    inputmode="numeric"
                    autocomplete="off"
                    placeholder={ "Ketik angka (contoh: " (field.example()) ")" }
                    value=(formatted)
                    required
                    hx-post=(format_endpoint(endpoints::FORMAT_AMOUNT, name))
                    hx-trigger="input changed delay:300ms"
                    hx-params=(name)
                    hx-target={ "#" (container_id) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            p class="mt-1 text-sm text-gray-600 dark:text-gray-400"
            {
                @if formatted.is_empty() {
                    "Contoh: ketik " (field.example()) " akan menjadi "
                    (format_amount_input(field.example()))
                } @else {
                    "Jumlah yang akan disimpan: " (format_rupiah(parse_amount_input(raw)))
                }
            }
        }
    }
}

/// A route handler that re-renders an amount input with its value formatted.
///
/// The request body holds the current text of the input under the input's name.
pub async fn format_amount_endpoint(
    Path(field): Path<AmountField>,
    Form(values): Form<HashMap<String, String>>,
) -> Markup {
    let raw = values
        .get(field.name())
        .map(String::as_str)
        .unwrap_or_default();

    amount_field(field, raw)
}
