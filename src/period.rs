//! Calendar periods used to filter transactions, plus the Indonesian month names
//! and the year/month selectors shared by the report and delete pages.

use std::ops::RangeInclusive;

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The first year offered in the year selectors.
pub const FIRST_YEAR: i32 = 2020;

/// How many years before [FIRST_YEAR] or after the current year may be requested.
pub const YEAR_MARGIN: i32 = 100;

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// A single month of a year, e.g. Maret 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    first_day: Date,
    last_day: Date,
}

impl Period {
    /// Create the period for `month` (1-12) of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPeriod] if `month` is not in 1-12 or if the
    /// month cannot be represented as a calendar date.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let invalid_period = || Error::InvalidPeriod { year, month };

        let month_ = Month::try_from(month).map_err(|_| invalid_period())?;
        let first_day = Date::from_calendar_date(year, month_, 1).map_err(|_| invalid_period())?;

        let (next_year, next_month) = match month_ {
            Month::December => (year.checked_add(1).ok_or_else(invalid_period)?, Month::January),
            month_ => (year, month_.next()),
        };
        let last_day = Date::from_calendar_date(next_year, next_month, 1)
            .ok()
            .and_then(Date::previous_day)
            .ok_or_else(invalid_period)?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The period that contains `date`.
    pub fn containing(date: Date) -> Result<Self, Error> {
        Self::new(date.year(), date.month().into())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The month as a number from 1 to 12.
    pub fn month_number(&self) -> u8 {
        self.first_day.month().into()
    }

    /// The first and last day of the period.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        self.first_day..=self.last_day
    }

    /// The display name of the period, e.g. "Maret 2025".
    pub fn name(&self) -> String {
        format!("{} {}", month_name(self.month()), self.year())
    }
}

/// The first and last day of `year`.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if the year cannot be represented as a calendar date.
pub fn year_date_range(year: i32) -> Result<RangeInclusive<Date>, Error> {
    let january = Period::new(year, 1)?;
    let december = Period::new(year, 12)?;

    Ok(*january.date_range().start()..=*december.date_range().end())
}

/// The Indonesian name of `month`, e.g. "Agustus".
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[usize::from(u8::from(month)) - 1]
}

/// Format `date` as day, abbreviated Indonesian month and year, e.g. "05 Okt 2025".
pub fn format_short_date(date: Date) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        SHORT_MONTH_NAMES[usize::from(u8::from(date.month())) - 1],
        date.year()
    )
}

/// Check that `year` lies within [YEAR_MARGIN] years of [FIRST_YEAR] and `current_year`.
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is outside of that range.
pub fn check_year(year: i32, current_year: i32) -> Result<i32, Error> {
    let earliest = FIRST_YEAR - YEAR_MARGIN;
    let latest = current_year.saturating_add(YEAR_MARGIN);

    if (earliest..=latest).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidYear(year))
    }
}

/// The years to offer in a year selector.
///
/// Starts at [FIRST_YEAR] and ends at `current_year`, widened to include
/// `selected_year` when the user asked for a year outside of that range.
pub fn year_options(current_year: i32, selected_year: i32) -> RangeInclusive<i32> {
    FIRST_YEAR.min(selected_year)..=current_year.max(selected_year)
}

/// Query parameters for choosing a period, both default to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

impl PeriodQuery {
    /// Resolve the query to a [Period], filling in missing values from `today`.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if the year fails [check_year], or
    /// [Error::InvalidPeriod] if the month is not in 1-12.
    pub fn resolve(&self, today: Date) -> Result<Period, Error> {
        let year = check_year(self.year.unwrap_or(today.year()), today.year())?;

        Period::new(year, self.month.unwrap_or(today.month().into()))
    }
}

/// A `select` for the year, named "year".
pub fn year_select(current_year: i32, selected_year: i32) -> Markup {
    html! {
        div
        {
            label for="year" class=(FORM_LABEL_STYLE) { "Tahun" }

            select name="year" id="year" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for year in year_options(current_year, selected_year) {
                    option value=(year) selected[year == selected_year] { (year) }
                }
            }
        }
    }
}

/// A `select` for the month, named "month", with Indonesian month names.
pub fn month_select(selected_month: Month) -> Markup {
    let selected_month = u8::from(selected_month);

    html! {
        div
        {
            label for="month" class=(FORM_LABEL_STYLE) { "Bulan" }

            select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (month, name) in (1u8..).zip(MONTH_NAMES) {
                    option value=(month) selected[month == selected_month] { (name) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::Error;

    use super::{
        Period, PeriodQuery, check_year, format_short_date, month_name, year_date_range,
        year_options,
    };

    #[test]
    fn period_covers_whole_month() {
        let period = Period::new(2025, 3).unwrap();

        assert_eq!(period.date_range(), date!(2025 - 03 - 01)..=date!(2025 - 03 - 31));
    }

    #[test]
    fn period_handles_leap_years() {
        let leap = Period::new(2024, 2).unwrap();
        let common = Period::new(2025, 2).unwrap();

        assert_eq!(*leap.date_range().end(), date!(2024 - 02 - 29));
        assert_eq!(*common.date_range().end(), date!(2025 - 02 - 28));
    }

    #[test]
    fn period_handles_december() {
        let period = Period::new(2025, 12).unwrap();

        assert_eq!(*period.date_range().end(), date!(2025 - 12 - 31));
    }

    #[test]
    fn period_rejects_invalid_month() {
        assert_eq!(
            Period::new(2025, 13),
            Err(Error::InvalidPeriod {
                year: 2025,
                month: 13
            })
        );
        assert_eq!(
            Period::new(2025, 0),
            Err(Error::InvalidPeriod {
                year: 2025,
                month: 0
            })
        );
    }

    #[test]
    fn period_containing_date() {
        let period = Period::containing(date!(2025 - 08 - 17)).unwrap();

        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), Month::August);
        assert_eq!(period.month_number(), 8);
        assert_eq!(period.name(), "Agustus 2025");
    }

    #[test]
    fn year_range_covers_whole_year() {
        let range = year_date_range(2025).unwrap();

        assert_eq!(range, date!(2025 - 01 - 01)..=date!(2025 - 12 - 31));
    }

    #[test]
    fn month_names_are_indonesian() {
        assert_eq!(month_name(Month::January), "Januari");
        assert_eq!(month_name(Month::May), "Mei");
        assert_eq!(month_name(Month::December), "Desember");
    }

    #[test]
    fn short_date_uses_indonesian_abbreviations() {
        assert_eq!(format_short_date(date!(2025 - 10 - 05)), "05 Okt 2025");
        assert_eq!(format_short_date(date!(2024 - 08 - 17)), "17 Agu 2024");
    }

    #[test]
    fn year_options_start_at_2020() {
        assert_eq!(year_options(2025, 2025), 2020..=2025);
        assert_eq!(year_options(2025, 2019), 2019..=2025);
        assert_eq!(year_options(2025, 2027), 2020..=2027);
    }

    #[test]
    fn query_defaults_to_current_month() {
        let today = date!(2025 - 06 - 15);

        let period = PeriodQuery::default().resolve(today).unwrap();

        assert_eq!(period, Period::new(2025, 6).unwrap());
    }

    #[test]
    fn query_uses_given_values() {
        let query = PeriodQuery {
            year: Some(2023),
            month: Some(11),
        };

        let period = query.resolve(date!(2025 - 06 - 15)).unwrap();

        assert_eq!(period, Period::new(2023, 11).unwrap());
    }

    #[test]
    fn years_far_from_the_data_are_rejected() {
        assert_eq!(check_year(1920, 2025), Ok(1920));
        assert_eq!(check_year(2125, 2025), Ok(2125));
        assert_eq!(check_year(1919, 2025), Err(Error::InvalidYear(1919)));
        assert_eq!(check_year(2126, 2025), Err(Error::InvalidYear(2126)));
        assert_eq!(check_year(-9999, 2025), Err(Error::InvalidYear(-9999)));
    }

    #[test]
    fn query_with_distant_year_is_rejected() {
        let query = PeriodQuery {
            year: Some(-9999),
            month: Some(3),
        };

        assert_eq!(
            query.resolve(date!(2025 - 06 - 15)),
            Err(Error::InvalidYear(-9999))
        );
    }
}
