//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, ops::RangeInclusive};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId, endpoints, period::Period};

// ============================================================================
// MODELS
// ============================================================================

/// Which of the two tables a transaction is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ledger {
    /// Money coming in, stored in the "pemasukan" table.
    Income,
    /// Money going out, stored in the "pengeluaran" table.
    Expense,
}

impl Ledger {
    /// The name of the database table for this ledger.
    pub fn table(self) -> &'static str {
        match self {
            Ledger::Income => "pemasukan",
            Ledger::Expense => "pengeluaran",
        }
    }

    /// The capitalised display name, e.g. "Pemasukan".
    pub fn title(self) -> &'static str {
        match self {
            Ledger::Income => "Pemasukan",
            Ledger::Expense => "Pengeluaran",
        }
    }

    /// The value used for this ledger in forms and query strings.
    pub fn query_value(self) -> &'static str {
        match self {
            Ledger::Income => "income",
            Ledger::Expense => "expense",
        }
    }

    /// The categories that may be stored in this ledger, in display order.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Ledger::Income => &[
                Category::TruckRevenue,
                Category::Salary,
                Category::OtherIncome,
            ],
            Ledger::Expense => &[
                Category::TruckRepair,
                Category::HouseholdNeeds,
                Category::OtherExpense,
            ],
        }
    }

    /// The route for creating a transaction in this ledger.
    pub fn create_endpoint(self) -> &'static str {
        match self {
            Ledger::Income => endpoints::INCOME_API,
            Ledger::Expense => endpoints::EXPENSE_API,
        }
    }

    /// The page with the form for creating a transaction in this ledger.
    pub fn new_view(self) -> &'static str {
        match self {
            Ledger::Income => endpoints::NEW_INCOME_VIEW,
            Ledger::Expense => endpoints::NEW_EXPENSE_VIEW,
        }
    }
}

impl Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// The category ("jenis") of a transaction.
///
/// Categories are stored in the database as their display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// "Pemasukan Truck", also used by the truck calculator.
    TruckRevenue,
    /// "Pemasukan Gaji"
    Salary,
    /// "Pemasukan Lainnya"
    OtherIncome,
    /// "Perbaikan Truck"
    TruckRepair,
    /// "Kebutuhan Rumah"
    HouseholdNeeds,
    /// "Pengeluaran Lainnya"
    OtherExpense,
}

impl Category {
    /// The display label, which is also how the category is stored.
    pub fn label(self) -> &'static str {
        match self {
            Category::TruckRevenue => "Pemasukan Truck",
            Category::Salary => "Pemasukan Gaji",
            Category::OtherIncome => "Pemasukan Lainnya",
            Category::TruckRepair => "Perbaikan Truck",
            Category::HouseholdNeeds => "Kebutuhan Rumah",
            Category::OtherExpense => "Pengeluaran Lainnya",
        }
    }

    /// The ledger whose table this category belongs in.
    pub fn ledger(self) -> Ledger {
        match self {
            Category::TruckRevenue | Category::Salary | Category::OtherIncome => Ledger::Income,
            Category::TruckRepair | Category::HouseholdNeeds | Category::OtherExpense => {
                Ledger::Expense
            }
        }
    }

    /// The value used for this category in forms.
    pub fn form_value(self) -> &'static str {
        match self {
            Category::TruckRevenue => "truck_revenue",
            Category::Salary => "salary",
            Category::OtherIncome => "other_income",
            Category::TruckRepair => "truck_repair",
            Category::HouseholdNeeds => "household_needs",
            Category::OtherExpense => "other_expense",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        [Ledger::Income, Ledger::Expense]
            .into_iter()
            .flat_map(|ledger| ledger.categories())
            .find(|category| category.label() == label)
            .copied()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;

        Category::from_label(label)
            .ok_or_else(|| FromSqlError::Other(format!("unknown category \"{label}\"").into()))
    }
}

/// An income or expense that has been saved to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction, unique within its ledger.
    pub id: TransactionId,
    /// What kind of income or expense this is. Also determines the ledger.
    pub category: Category,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount in whole Rupiah, always greater than zero.
    pub amount: i64,
    /// When the transaction happened.
    pub date: Date,
}

/// A validated transaction that is ready to be inserted.
///
/// Use [NewTransaction::new] to create one, the checks run before any
/// database call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    ledger: Ledger,
    category: Category,
    description: String,
    amount: i64,
    date: Date,
}

impl NewTransaction {
    /// Validate the fields of a new transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative,
    /// - [Error::EmptyDescription] if `description` is empty or only whitespace,
    /// - or [Error::CategoryMismatch] if `category` belongs to the other ledger.
    pub fn new(
        ledger: Ledger,
        category: Category,
        description: &str,
        amount: i64,
        date: Date,
    ) -> Result<Self, Error> {
        if amount <= 0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        if description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if category.ledger() != ledger {
            return Err(Error::CategoryMismatch(category, ledger));
        }

        Ok(Self {
            ledger,
            category,
            description: description.to_owned(),
            amount,
            date,
        })
    }

    /// The ledger the transaction will be inserted into.
    pub fn ledger(&self) -> Ledger {
        self.ledger
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a validated transaction into the table of its ledger.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO {} (jenis, keterangan, jumlah, tanggal)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, jenis, keterangan, jumlah, tanggal",
            transaction.ledger.table()
        ))?
        .query_row(
            (
                transaction.category,
                transaction.description,
                transaction.amount,
                transaction.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the table of `ledger` by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction in `ledger`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    ledger: Ledger,
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT id, jenis, keterangan, jumlah, tanggal FROM {} WHERE id = :id",
            ledger.table()
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the transactions of `ledger` in `period`, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_period(
    ledger: Ledger,
    period: &Period,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    get_transactions_in_date_range(ledger, period.date_range(), connection)
}

/// Get the transactions of `ledger` dated within `date_range`, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_date_range(
    ledger: Ledger,
    date_range: RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, jenis, keterangan, jumlah, tanggal FROM {}
             WHERE tanggal BETWEEN ?1 AND ?2
             ORDER BY tanggal DESC, id DESC",
            ledger.table()
        ))?
        .query_map((date_range.start(), date_range.end()), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Delete the transactions with the given `ids` from the table of `ledger`.
///
/// The IDs are deleted one at a time in order. If a delete fails, the
/// remaining IDs are skipped and the rows deleted so far stay deleted. IDs
/// that do not exist are ignored.
///
/// Returns the number of rows deleted.
///
/// # Errors
/// This function will return a:
/// - [Error::PartialDelete] if a delete failed part way through,
/// - or [Error::SqlError] if the delete statement could not be prepared.
pub fn delete_transactions(
    ledger: Ledger,
    ids: &[TransactionId],
    connection: &Connection,
) -> Result<usize, Error> {
    let mut statement =
        connection.prepare(&format!("DELETE FROM {} WHERE id = ?1", ledger.table()))?;
    let mut deleted = 0;

    for id in ids {
        match statement.execute([id]) {
            Ok(row_count) => deleted += row_count,
            Err(error) => {
                tracing::error!(
                    "could not delete {ledger} transaction {id} after deleting {deleted} rows: {error}"
                );

                return Err(Error::PartialDelete {
                    deleted,
                    requested: ids.len(),
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(deleted)
}

/// Get the total number of transactions in the table of `ledger`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(ledger: Ledger, connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            &format!("SELECT COUNT(id) FROM {};", ledger.table()),
            [],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Create the table for `ledger` in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(
    ledger: Ledger,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    let table = ledger.table();

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                jenis TEXT NOT NULL,
                keterangan TEXT,
                jumlah INTEGER NOT NULL,
                tanggal TEXT NOT NULL DEFAULT CURRENT_DATE
                )"
        ),
        (),
    )?;

    // Used by the monthly and annual queries.
    connection.execute(
        &format!("CREATE INDEX IF NOT EXISTS idx_{table}_tanggal ON {table}(tanggal);"),
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The columns must be selected in the order id, jenis, keterangan, jumlah, tanggal.
pub(super) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let category = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;

    Ok(Transaction {
        id,
        category,
        description: description.unwrap_or_default(),
        amount,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod model_tests {
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Category, Ledger, NewTransaction},
    };

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for ledger in [Ledger::Income, Ledger::Expense] {
            let category = ledger.categories()[0];

            for amount in [0, -1, -500_000] {
                let result =
                    NewTransaction::new(ledger, category, "Gaji", amount, date!(2025 - 01 - 01));

                assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
            }
        }
    }

    #[test]
    fn rejects_empty_and_whitespace_descriptions() {
        for ledger in [Ledger::Income, Ledger::Expense] {
            let category = ledger.categories()[0];

            for description in ["", "   ", "\t\n"] {
                let result =
                    NewTransaction::new(ledger, category, description, 1000, date!(2025 - 01 - 01));

                assert_eq!(result, Err(Error::EmptyDescription));
            }
        }
    }

    #[test]
    fn rejects_category_from_other_ledger() {
        let result = NewTransaction::new(
            Ledger::Income,
            Category::HouseholdNeeds,
            "Belanja",
            1000,
            date!(2025 - 01 - 01),
        );

        assert_eq!(
            result,
            Err(Error::CategoryMismatch(
                Category::HouseholdNeeds,
                Ledger::Income
            ))
        );
    }

    #[test]
    fn every_category_belongs_to_its_ledger() {
        for ledger in [Ledger::Income, Ledger::Expense] {
            for category in ledger.categories() {
                assert_eq!(category.ledger(), ledger);
            }
        }
    }

    #[test]
    fn category_labels_match_stored_values() {
        assert_eq!(Category::TruckRevenue.label(), "Pemasukan Truck");
        assert_eq!(Category::Salary.label(), "Pemasukan Gaji");
        assert_eq!(Category::OtherIncome.label(), "Pemasukan Lainnya");
        assert_eq!(Category::TruckRepair.label(), "Perbaikan Truck");
        assert_eq!(Category::HouseholdNeeds.label(), "Kebutuhan Rumah");
        assert_eq!(Category::OtherExpense.label(), "Pengeluaran Lainnya");
    }
}
