//! Sums of transactions by period and category.

use std::fmt::Display;

use rusqlite::Connection;
use time::Month;

use crate::{
    Error,
    period::{Period, year_date_range},
    transaction::{Category, Ledger},
};

/// Whether a period ended with more income than expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLabel {
    Surplus,
    Deficit,
}

impl Display for BalanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceLabel::Surplus => write!(f, "Surplus"),
            BalanceLabel::Deficit => write!(f, "Defisit"),
        }
    }
}

/// The income and expense totals for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub income: i64,
    pub expense: i64,
}

impl Balance {
    /// Income minus expenses, the "saldo".
    pub fn saldo(&self) -> i64 {
        self.income - self.expense
    }

    /// A balance of exactly zero counts as a surplus.
    pub fn label(&self) -> BalanceLabel {
        if self.saldo() >= 0 {
            BalanceLabel::Surplus
        } else {
            BalanceLabel::Deficit
        }
    }
}

/// The totals of one month in the annual report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub month: Month,
    pub balance: Balance,
}

/// Get the sum of the amounts of `ledger` in `period`, zero if there are none.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_period_total(
    ledger: Ledger,
    period: &Period,
    connection: &Connection,
) -> Result<i64, Error> {
    let date_range = period.date_range();

    connection
        .query_row(
            &format!(
                "SELECT COALESCE(SUM(jumlah), 0) FROM {} WHERE tanggal BETWEEN ?1 AND ?2",
                ledger.table()
            ),
            (date_range.start(), date_range.end()),
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Get the income and expense totals for `period`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_balance(period: &Period, connection: &Connection) -> Result<Balance, Error> {
    Ok(Balance {
        income: get_period_total(Ledger::Income, period, connection)?,
        expense: get_period_total(Ledger::Expense, period, connection)?,
    })
}

/// Get the sum of the amounts of `ledger` in `period` for each category.
///
/// Categories without transactions in the period are left out. The result
/// is ordered by category label.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_category_breakdown(
    ledger: Ledger,
    period: &Period,
    connection: &Connection,
) -> Result<Vec<(Category, i64)>, Error> {
    let date_range = period.date_range();

    connection
        .prepare(&format!(
            "SELECT jenis, SUM(jumlah) FROM {}
             WHERE tanggal BETWEEN ?1 AND ?2
             GROUP BY jenis
             ORDER BY jenis",
            ledger.table()
        ))?
        .query_map((date_range.start(), date_range.end()), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}

/// Get the income and expense totals for every month of `year`.
///
/// Always returns twelve entries, January first. Months without
/// transactions have totals of zero.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidPeriod] if `year` cannot be represented as a date,
/// - or [Error::SqlError] if there is an SQL error.
pub fn get_annual_totals(year: i32, connection: &Connection) -> Result<Vec<MonthlyTotals>, Error> {
    let income = get_monthly_sums(Ledger::Income, year, connection)?;
    let expense = get_monthly_sums(Ledger::Expense, year, connection)?;

    let mut month = Month::January;
    let mut totals = Vec::with_capacity(12);

    for (income, expense) in income.into_iter().zip(expense) {
        totals.push(MonthlyTotals {
            month,
            balance: Balance { income, expense },
        });
        month = month.next();
    }

    Ok(totals)
}

fn get_monthly_sums(ledger: Ledger, year: i32, connection: &Connection) -> Result<[i64; 12], Error> {
    let date_range = year_date_range(year)?;
    let mut sums = [0; 12];

    let rows = connection
        .prepare(&format!(
            "SELECT CAST(strftime('%m', tanggal) AS INTEGER), SUM(jumlah) FROM {}
             WHERE tanggal BETWEEN ?1 AND ?2
             GROUP BY 1",
            ledger.table()
        ))?
        .query_map((date_range.start(), date_range.end()), |row| {
            Ok((row.get::<_, u8>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for (month, sum) in rows {
        match sums.get_mut(usize::from(month).wrapping_sub(1)) {
            Some(slot) => *slot = sum,
            None => tracing::warn!("ignoring {ledger} total for invalid month {month}"),
        }
    }

    Ok(sums)
}
