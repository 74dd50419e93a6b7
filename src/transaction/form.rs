use maud::{Markup, html};
use time::Date;

use crate::{
    amount_input::{AmountField, amount_field},
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::Ledger,
};

/// The ID of the element that wraps the inputs of the entry form.
pub const TRANSACTION_FIELDS_ID: &str = "transaction-fields";

/// The inputs for a new income or expense: category, amount, description and date.
///
/// The first category of `ledger` is selected and the date defaults to `today`.
/// Set `swap_oob` to clear a submitted form by swapping in fresh inputs.
pub fn transaction_form_fields(ledger: Ledger, today: Date, swap_oob: bool) -> Markup {
    html! {
        div
            id=(TRANSACTION_FIELDS_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Jenis " (ledger.title()) }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for (index, category) in ledger.categories().iter().enumerate() {
                        @let id = format!("category-{}", category.form_value().replace('_', "-"));

                        div class="flex items-center gap-3"
                        {
                            input
                                name="category"
                                id=(id)
                                type="radio"
                                value=(category.form_value())
                                checked[index == 0]
                                required
                                tabindex="0"
                                class=(FORM_RADIO_INPUT_STYLE);

                            label
                                for=(id)
                                class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (category.label())
                            }
                        }
                    }
                }
            }

            (amount_field(AmountField::Amount, ""))

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Keterangan"
                }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder={ "Keterangan " (ledger) }
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Tanggal"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}
