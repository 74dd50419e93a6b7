//! Summary cards with the month's income, expenses and balance.

use maud::{Markup, html};

use crate::{
    aggregation::{Balance, BalanceLabel},
    html::{CARD_STYLE, format_rupiah},
};

/// Renders one card each for the income, expense and balance of a month.
pub fn summary_cards(balance: &Balance) -> Markup {
    let label = balance.label();
    let (saldo_style, badge_style) = match label {
        BalanceLabel::Surplus => (
            "text-2xl font-bold text-green-600 dark:text-green-400",
            "inline-flex self-start px-2.5 py-0.5 text-xs font-semibold rounded-full \
            text-green-800 bg-green-100 dark:bg-green-900 dark:text-green-300",
        ),
        BalanceLabel::Deficit => (
            "text-2xl font-bold text-red-600 dark:text-red-400",
            "inline-flex self-start px-2.5 py-0.5 text-xs font-semibold rounded-full \
            text-red-800 bg-red-100 dark:bg-red-900 dark:text-red-300",
        ),
    };

    html! {
        section id="summary" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-4"
        {
            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-600 dark:text-gray-400" { "Total Pemasukan" }
                span id="total-income" class="text-2xl font-bold" { (format_rupiah(balance.income)) }
            }

            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-600 dark:text-gray-400" { "Total Pengeluaran" }
                span id="total-expense" class="text-2xl font-bold" { (format_rupiah(balance.expense)) }
            }

            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-600 dark:text-gray-400" { "Saldo" }
                span id="saldo" class=(saldo_style) { (format_rupiah(balance.saldo())) }
                span id="saldo-label" class=(badge_style) { (label) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::aggregation::Balance;

    use super::summary_cards;

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("{selector} not found"))
            .text()
            .collect::<String>()
    }

    #[test]
    fn shows_surplus() {
        let html = Html::parse_fragment(
            &summary_cards(&Balance {
                income: 1_000_000,
                expense: 450_000,
            })
            .into_string(),
        );

        assert_eq!(text_of(&html, "#total-income"), "Rp 1.000.000");
        assert_eq!(text_of(&html, "#total-expense"), "Rp 450.000");
        assert_eq!(text_of(&html, "#saldo"), "Rp 550.000");
        assert_eq!(text_of(&html, "#saldo-label"), "Surplus");
    }

    #[test]
    fn shows_deficit() {
        let html = Html::parse_fragment(
            &summary_cards(&Balance {
                income: 0,
                expense: 250_000,
            })
            .into_string(),
        );

        assert_eq!(text_of(&html, "#saldo"), "-Rp 250.000");
        assert_eq!(text_of(&html, "#saldo-label"), "Defisit");
    }
}
