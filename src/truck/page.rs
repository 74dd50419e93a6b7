//! Defines the truck calculator page and the views shared with its endpoints.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    amount_input::{AmountField, amount_field},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, format_rupiah,
        PAGE_CONTAINER_STYLE, base, loading_spinner, rupiah_input_styles,
    },
    navigation::NavBar,
    truck::TruckTrip,
};

const TRUCK_FORM_ID: &str = "truck-form";
const TRUCK_FIELDS_ID: &str = "truck-fields";
const TRUCK_RESULT_ID: &str = "truck-result";

/// The inputs of the calculator: the three amounts and a description.
///
/// Set `swap_oob` to clear the calculator by swapping in empty inputs.
pub(super) fn truck_fields(swap_oob: bool) -> Markup {
    html! {
        div
            id=(TRUCK_FIELDS_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="space-y-4"
        {
            (amount_field(AmountField::Outbound, ""))
            (amount_field(AmountField::ReturnLeg, ""))
            (amount_field(AmountField::Allowance, ""))

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Keterangan Pendapatan Truck"
                }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Masukkan keterangan untuk pendapatan truck"
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

/// The calculation for `trip`, refreshed whenever an input of the calculator changes.
///
/// The button for saving the revenue is only shown once every amount has
/// been filled in.
pub(super) fn truck_result(trip: &TruckTrip, description: &str, swap_oob: bool) -> Markup {
    let spinner = loading_spinner();

    html! {
        div
            id=(TRUCK_RESULT_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            hx-post=(endpoints::TRUCK_PREVIEW)
            hx-trigger={ "input from:#" (TRUCK_FORM_ID) " delay:300ms" }
            hx-include={ "#" (TRUCK_FORM_ID) }
            hx-swap="outerHTML"
            class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold" { "Perhitungan" }

            @if trip.is_complete() {
                dl class="grid grid-cols-2 gap-1 text-sm"
                {
                    dt { "Berangkat" }
                    dd class="text-right" { (format_rupiah(trip.outbound)) }
                    dt { "Pulang" }
                    dd class="text-right" { (format_rupiah(trip.return_leg)) }
                    dt { "Sangu Supir" }
                    dd class="text-right" { (format_rupiah(trip.allowance)) }
                    dt class="font-bold" { "Total" }
                    dd id="truck-total" class="text-right font-bold"
                    {
                        (format_rupiah(trip.revenue()))
                    }
                }

                @if !description.trim().is_empty() {
                    p class="text-sm" { span class="font-semibold" { "Keterangan: " } (description) }
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Masukkan ke Pendapatan Truck"
                }
            } @else {
                p class="text-sm text-yellow-700 dark:text-yellow-400"
                {
                    "Silakan isi semua field jumlah untuk melihat perhitungan."
                }
            }
        }
    }
}

fn truck_calculator_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::TRUCK_CALCULATOR_VIEW).into_html();
    let empty_trip = TruckTrip {
        outbound: 0,
        return_leg: 0,
        allowance: 0,
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-4"
            {
                h2 class="text-xl font-bold" { "Kalkulator Truck" }

                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Ketik angka dan akan otomatis diformat dengan koma. \
                    Hasil perhitungan akan ditampilkan secara otomatis setelah input diisi."
                }

                form
                    id=(TRUCK_FORM_ID)
                    hx-post=(endpoints::TRUCK_API)
                    hx-swap="none"
                    hx-target-error="#alert-container"
                    class="grid grid-cols-1 md:grid-cols-2 gap-6"
                {
                    (truck_fields(false))
                    (truck_result(&empty_trip, "", false))
                }
            }
        }
    };

    base("Kalkulator Truck", &[rupiah_input_styles()], &content)
}

/// Renders the truck calculator page.
pub async fn get_truck_calculator_page() -> Response {
    truck_calculator_view().into_response()
}

#[cfg(test)]
mod tests {
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::get_truck_calculator_page;

    #[tokio::test]
    async fn page_has_calculator_form() {
        let response = get_truck_calculator_page().await;

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRUCK_API, "hx-post");
        assert_form_input(&form, "outbound", "text");
        assert_form_input(&form, "return_leg", "text");
        assert_form_input(&form, "allowance", "text");
    }

    #[tokio::test]
    async fn page_starts_without_save_button() {
        let response = get_truck_calculator_page().await;

        let document = parse_html_document(response).await;
        let result = document
            .select(&Selector::parse("#truck-result").unwrap())
            .next()
            .expect("result panel missing");
        assert_eq!(
            result.value().attr("hx-post"),
            Some(endpoints::TRUCK_PREVIEW)
        );
        assert!(
            result
                .select(&Selector::parse("button").unwrap())
                .next()
                .is_none()
        );
        let text = result.text().collect::<String>();
        assert!(text.contains("Silakan isi semua field jumlah"));
    }
}
