//! HTML table of transactions shared by the report and delete pages.

use maud::{Markup, html};

use crate::{
    html::{CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_rupiah},
    period::format_short_date,
    transaction::Transaction,
};

/// Whether the rows of a [transactions_table] can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelection {
    None,
    /// Each row gets a checkbox named "ids" whose value is the row's ID.
    Checkbox,
}

/// Renders `transactions` with the columns ID, Jenis, Keterangan, Jumlah and Tanggal.
pub fn transactions_table(transactions: &[Transaction], selection: RowSelection) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded shadow"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @if selection == RowSelection::Checkbox {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Pilih" }
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Jenis" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Keterangan" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Jumlah" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Tanggal" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            @if selection == RowSelection::Checkbox {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    input
                                        type="checkbox"
                                        name="ids"
                                        value=(transaction.id)
                                        aria-label={ "Pilih " (transaction.description) }
                                        class="rounded-sm border-gray-300 text-blue-600";
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.id) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class={ (TABLE_CELL_STYLE) " text-right whitespace-nowrap" }
                            {
                                (format_rupiah(transaction.amount))
                            }
                            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
                            {
                                (format_short_date(transaction.date))
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{Category, Transaction};

    use super::{RowSelection, transactions_table};

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 7,
                category: Category::Salary,
                description: "Gaji".to_owned(),
                amount: 5_000_000,
                date: date!(2025 - 03 - 25),
            },
            Transaction {
                id: 3,
                category: Category::OtherIncome,
                description: "Hadiah".to_owned(),
                amount: 250_000,
                date: date!(2025 - 03 - 02),
            },
        ]
    }

    #[test]
    fn renders_one_row_per_transaction() {
        let html = Html::parse_fragment(
            &transactions_table(&transactions(), RowSelection::None).into_string(),
        );

        let rows = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        assert_eq!(
            rows,
            vec![
                vec!["7", "Pemasukan Gaji", "Gaji", "Rp 5.000.000", "25 Mar 2025"],
                vec!["3", "Pemasukan Lainnya", "Hadiah", "Rp 250.000", "02 Mar 2025"],
            ]
        );
        assert!(
            html.select(&Selector::parse("input").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn checkboxes_carry_row_ids() {
        let html = Html::parse_fragment(
            &transactions_table(&transactions(), RowSelection::Checkbox).into_string(),
        );

        let values = html
            .select(&Selector::parse("input[type='checkbox'][name='ids']").unwrap())
            .filter_map(|input| input.value().attr("value"))
            .collect::<Vec<_>>();

        assert_eq!(values, ["7", "3"]);
    }
}
